//! # Bindery
//!
//! **Bindery** is the composition root for request-handling services: it binds an
//! application's handler modules into a typed container, derives the route table
//! from their declarations, and exposes typed access to inbound HTTP headers.
//!
//! ## Overview
//!
//! A host application brings three things: module types implementing
//! [`Module`](module::Module), a [`ModuleCatalog`](module::ModuleCatalog) that
//! enumerates them, and a transport layer that feeds raw requests in. Bindery owns
//! what sits between: the startup sequence that turns discovered module types into
//! resolvable instances, the process-wide container those resolutions go through,
//! the route table derived from module declarations, and the per-request
//! [`HeaderStore`](headers::HeaderStore) view over raw header data.
//!
//! ## Architecture
//!
//! - **[`headers`]** - Typed, default-safe accessors over raw multi-valued header
//!   data, including cookie decoding
//! - **[`module`]** - The `Module` trait, route declarations, and discovery
//!   catalogs
//! - **[`registry`]** - Ordered, duplicate-checked record of discovered modules
//! - **[`container`]** - The process-wide container: singleton default services,
//!   multi-instance module bindings, and its one-time lifecycle
//! - **[`services`]** - The closed default service set (key generation, route
//!   cache, route resolution, template engine selection), each overridable
//! - **[`bootstrap`]** - The three-phase startup orchestrator and lookup surface
//! - **[`runtime_config`]** - Environment-variable runtime knobs
//! - **[`telemetry`]** - Structured logging setup for hosts
//!
//! ## Boot Flow
//!
//! 1. The [`Bootstrapper`](bootstrap::Bootstrapper) allocates the container
//!    (phase 1), then binds default services, discovers modules through the
//!    catalog, and registers each under its generated key (phase 2). Failures in
//!    these phases abort startup; there is no partial-start state.
//! 2. Once configured (phase 3), the bootstrapper serves lookups:
//!    [`all_modules`](bootstrap::Bootstrapper::all_modules),
//!    [`module_by_key`](bootstrap::Bootstrapper::module_by_key), and the derived
//!    [`route_cache`](bootstrap::Bootstrapper::route_cache).
//! 3. Per request, the transport builds a `HeaderStore` and asks the route
//!    resolver to match method + path; the resolved module and handler name are
//!    handed to the host's dispatch.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bindery::bootstrap::Bootstrapper;
//! use bindery::module::{Module, RouteEntry, StaticModuleCatalog};
//!
//! #[derive(Default)]
//! struct PetsModule;
//!
//! impl Module for PetsModule {
//!     fn name(&self) -> &str {
//!         "pets"
//!     }
//!     fn routes(&self) -> Vec<RouteEntry> {
//!         vec![
//!             RouteEntry::get("/pets", "list_pets"),
//!             RouteEntry::get("/pets/{id}", "get_pet"),
//!         ]
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     bindery::telemetry::init_logging()?;
//!
//!     let catalog = StaticModuleCatalog::new().with::<PetsModule>();
//!     let bootstrapper = Bootstrapper::new(catalog).boot()?;
//!
//!     bootstrapper.route_cache()?.dump();
//!     Ok(())
//! }
//! ```
//!
//! ## Error Policy
//!
//! Two regimes, deliberately different:
//!
//! - **Headers**: absence of an optional header is never an error; accessors
//!   return typed defaults. A present-but-malformed value is a
//!   [`HeaderError`](headers::HeaderError) the caller must see.
//! - **Modules**: a missing module is always a hard error. Startup failures are
//!   fatal; lookup failures surface per call as
//!   [`BootError`](bootstrap::BootError).

pub mod bootstrap;
pub mod container;
pub mod headers;
pub mod keys;
pub mod module;
pub mod registry;
pub mod runtime_config;
pub mod services;
pub mod telemetry;

pub use bootstrap::{BootError, BootPhase, Bootstrapper};
pub use container::{Container, ContainerLifecycle, ResolveError, ServiceOverrides};
pub use headers::{Cookie, HeaderError, HeaderStore};
pub use keys::ModuleKey;
pub use module::{
    Module, ModuleCatalog, ModuleDescriptor, ModuleFactory, RouteEntry, StaticModuleCatalog,
};
pub use registry::{ModuleRegistration, ModuleRegistry, RegistryError};
pub use runtime_config::{ModuleScope, RuntimeConfig};
pub use services::{ResolvedRoute, RouteTable};
