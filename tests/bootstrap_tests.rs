//! Tests for the three-phase bootstrap sequence and its lookup surface
//!
//! # Test Coverage
//!
//! - Phase ordering: container → configure → serving, each once
//! - Fatal startup failures: discovery errors, duplicate keys
//! - Lookup semantics: one instance per registration, by-key resolution,
//!   `ModuleNotFound` for unregistered keys
//! - Instance-sharing policy (`shared` vs `transient`)
//! - Default service overrides applied during configuration

mod common;
mod tracing_util;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bindery::bootstrap::{BootError, BootPhase, Bootstrapper};
use bindery::keys::ModuleKey;
use bindery::module::StaticModuleCatalog;
use bindery::registry::RegistryError;
use bindery::runtime_config::ModuleScope;
use bindery::services::ModuleKeyGenerator;
use common::{counting_descriptor, demo_catalog, FailingCatalog, PetsModule};
use tracing_util::TestTracing;

/// Keys modules by the last segment of their type name, so tests can name them
/// without depending on the test crate's module path.
struct ShortNameKeyGenerator;

impl ModuleKeyGenerator for ShortNameKeyGenerator {
    fn generate(&self, type_name: &str) -> ModuleKey {
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        ModuleKey::from(short)
    }
}

fn booted_demo() -> Bootstrapper {
    Bootstrapper::new(demo_catalog())
        .with_module_key_generator(ShortNameKeyGenerator)
        .with_module_scope(ModuleScope::Shared)
        .boot()
        .unwrap()
}

#[test]
fn boot_walks_all_three_phases() {
    let _trace = TestTracing::init();

    let mut bootstrapper =
        Bootstrapper::new(demo_catalog()).with_module_scope(ModuleScope::Shared);
    assert_eq!(bootstrapper.phase(), BootPhase::Created);

    bootstrapper.create_container();
    assert_eq!(bootstrapper.phase(), BootPhase::ContainerReady);

    bootstrapper.configure().unwrap();
    assert_eq!(bootstrapper.phase(), BootPhase::Configured);
}

#[test]
fn create_container_is_idempotent_across_phases() {
    let mut bootstrapper =
        Bootstrapper::new(demo_catalog()).with_module_scope(ModuleScope::Shared);
    let first = bootstrapper.create_container();
    let second = bootstrapper.create_container();
    assert!(Arc::ptr_eq(&first, &second));

    bootstrapper.configure().unwrap();
    let third = bootstrapper.create_container();
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn configure_requires_a_container() {
    let mut bootstrapper = Bootstrapper::new(demo_catalog());
    let err = bootstrapper.configure().unwrap_err();
    assert!(matches!(
        err,
        BootError::Phase {
            expected: BootPhase::ContainerReady,
            found: BootPhase::Created,
        }
    ));
}

#[test]
fn configure_runs_exactly_once() {
    let mut bootstrapper =
        Bootstrapper::new(demo_catalog()).with_module_scope(ModuleScope::Shared);
    bootstrapper.create_container();
    bootstrapper.configure().unwrap();

    let err = bootstrapper.configure().unwrap_err();
    assert!(matches!(
        err,
        BootError::Phase {
            found: BootPhase::Configured,
            ..
        }
    ));
}

#[test]
fn lookups_before_configuration_are_phase_errors() {
    let bootstrapper = Bootstrapper::new(demo_catalog());
    assert!(matches!(
        bootstrapper.all_modules(),
        Err(BootError::Phase { .. })
    ));
    assert!(matches!(
        bootstrapper.module_by_key(&ModuleKey::from("pets")),
        Err(BootError::Phase { .. })
    ));
    assert!(matches!(
        bootstrapper.route_cache(),
        Err(BootError::Phase { .. })
    ));
}

#[test]
fn discovery_failure_is_fatal() {
    let _trace = TestTracing::init();

    match Bootstrapper::new(FailingCatalog).boot() {
        Err(BootError::Discovery(source)) => {
            assert!(source.to_string().contains("discovery backend offline"));
        }
        Err(other) => panic!("expected discovery error, got {other}"),
        Ok(_) => panic!("boot should have failed"),
    }
}

#[test]
fn duplicate_module_keys_abort_startup() {
    // the same module type twice produces the same generated key
    let catalog = StaticModuleCatalog::new()
        .with::<PetsModule>()
        .with::<PetsModule>();
    assert!(matches!(
        Bootstrapper::new(catalog).boot(),
        Err(BootError::Registry(RegistryError::DuplicateKey { .. }))
    ));
}

#[test]
fn all_modules_returns_one_instance_per_registration() {
    let bootstrapper = booted_demo();
    let modules = bootstrapper.all_modules().unwrap();
    assert_eq!(modules.len(), 2);

    let names: BTreeSet<&str> = modules.iter().map(|module| module.name()).collect();
    assert_eq!(names, BTreeSet::from(["pets", "users"]));
}

#[test]
fn module_by_key_resolves_the_matching_type() {
    let bootstrapper = booted_demo();

    let pets = bootstrapper
        .module_by_key(&ModuleKey::from("PetsModule"))
        .unwrap();
    assert_eq!(pets.name(), "pets");

    let users = bootstrapper
        .module_by_key(&ModuleKey::from("UsersModule"))
        .unwrap();
    assert_eq!(users.name(), "users");
}

#[test]
fn unregistered_key_is_module_not_found() {
    let bootstrapper = booted_demo();
    match bootstrapper.module_by_key(&ModuleKey::from("ghost")) {
        Err(BootError::ModuleNotFound { key }) => assert_eq!(key.as_str(), "ghost"),
        Err(other) => panic!("expected module-not-found, got {other}"),
        Ok(_) => panic!("lookup should have failed"),
    }
}

#[test]
fn registered_keys_keep_catalog_order() {
    let bootstrapper = booted_demo();
    let keys: Vec<&str> = bootstrapper.module_keys().map(ModuleKey::as_str).collect();
    assert_eq!(keys, ["PetsModule", "UsersModule"]);
}

#[test]
fn shared_scope_reuses_the_resolved_set() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let mut catalog = StaticModuleCatalog::new();
    catalog.push(counting_descriptor(constructed.clone()));

    let bootstrapper = Bootstrapper::new(catalog)
        .with_module_scope(ModuleScope::Shared)
        .boot()
        .unwrap();

    let first = bootstrapper.all_modules().unwrap();
    let second = bootstrapper.all_modules().unwrap();
    assert!(Arc::ptr_eq(&first[0], &second[0]));
    assert_eq!(constructed.load(Ordering::SeqCst), 1);
}

#[test]
fn transient_scope_resolves_fresh_sets() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let mut catalog = StaticModuleCatalog::new();
    catalog.push(counting_descriptor(constructed.clone()));

    let bootstrapper = Bootstrapper::new(catalog)
        .with_module_scope(ModuleScope::Transient)
        .boot()
        .unwrap();

    let first = bootstrapper.all_modules().unwrap();
    let second = bootstrapper.all_modules().unwrap();
    assert!(!Arc::ptr_eq(&first[0], &second[0]));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}

#[test]
fn by_key_resolution_is_always_fresh() {
    let constructed = Arc::new(AtomicUsize::new(0));
    let mut catalog = StaticModuleCatalog::new();
    catalog.push(counting_descriptor(constructed.clone()));

    let bootstrapper = Bootstrapper::new(catalog)
        .with_module_scope(ModuleScope::Shared)
        .boot()
        .unwrap();

    let key = bootstrapper
        .module_keys()
        .next()
        .expect("one module registered")
        .clone();
    let first = bootstrapper.module_by_key(&key).unwrap();
    let second = bootstrapper.module_by_key(&key).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(constructed.load(Ordering::SeqCst), 2);
}
