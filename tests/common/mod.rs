#![allow(dead_code)]

//! Shared module fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bindery::module::{Module, ModuleCatalog, ModuleDescriptor, RouteEntry, StaticModuleCatalog};

#[derive(Default)]
pub struct PetsModule;

impl Module for PetsModule {
    fn name(&self) -> &str {
        "pets"
    }

    fn routes(&self) -> Vec<RouteEntry> {
        vec![
            RouteEntry::get("/pets", "list_pets"),
            RouteEntry::post("/pets", "add_pet"),
            RouteEntry::get("/pets/{id}", "get_pet"),
        ]
    }
}

#[derive(Default)]
pub struct UsersModule;

impl Module for UsersModule {
    fn name(&self) -> &str {
        "users"
    }

    fn routes(&self) -> Vec<RouteEntry> {
        vec![
            RouteEntry::get("/users", "list_users"),
            RouteEntry::get("/users/{id}/posts/{post_id}", "get_post"),
        ]
    }
}

/// Module that counts how many instances have been constructed, for verifying
/// multi-instance and shared-set scoping.
pub struct CountingModule {
    _constructed: Arc<AtomicUsize>,
}

impl Module for CountingModule {
    fn name(&self) -> &str {
        "counting"
    }

    fn routes(&self) -> Vec<RouteEntry> {
        Vec::new()
    }
}

/// Descriptor for a [`CountingModule`] that bumps `counter` on each construction.
pub fn counting_descriptor(counter: Arc<AtomicUsize>) -> ModuleDescriptor {
    ModuleDescriptor::with_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        CountingModule {
            _constructed: counter.clone(),
        }
    })
}

/// The two-module catalog most tests boot with.
pub fn demo_catalog() -> StaticModuleCatalog {
    StaticModuleCatalog::new()
        .with::<PetsModule>()
        .with::<UsersModule>()
}

/// Catalog whose discovery always fails, for exercising fatal-startup paths.
pub struct FailingCatalog;

impl ModuleCatalog for FailingCatalog {
    fn modules(&self) -> anyhow::Result<Vec<ModuleDescriptor>> {
        Err(anyhow::anyhow!("discovery backend offline"))
    }
}
