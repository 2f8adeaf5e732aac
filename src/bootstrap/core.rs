use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::container::{Container, ContainerLifecycle, ServiceOverrides};
use crate::keys::ModuleKey;
use crate::module::{Module, ModuleCatalog};
use crate::registry::ModuleRegistry;
use crate::runtime_config::{ModuleScope, RuntimeConfig};
use crate::services::{
    ModuleKeyGenerator, RouteCacheProvider, RouteResolver, RouteTable, TemplateEngineSelector,
};

use super::error::BootError;

/// Startup phases, strictly ordered. Each is entered once per application
/// lifetime; lookups are only legal in `Configured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    /// Nothing allocated yet.
    Created,
    /// The container exists but holds no bindings.
    ContainerReady,
    /// Defaults bound, modules discovered and registered. Ready to serve lookups.
    Configured,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootPhase::Created => "Created",
            BootPhase::ContainerReady => "ContainerReady",
            BootPhase::Configured => "Configured",
        };
        write!(f, "{name}")
    }
}

/// Orchestrates application startup.
///
/// The bootstrapper drives three strictly ordered phases:
///
/// 1. [`create_container`](Self::create_container) allocates the process-wide
///    [`Container`] (idempotent within one bootstrapper).
/// 2. [`configure`](Self::configure) binds the default services, discovers modules
///    through the host's [`ModuleCatalog`], and registers each one in the
///    registry for bookkeeping and in the container for resolution. Any failure
///    here is fatal; there is no partial-start state.
/// 3. Once configured, [`all_modules`](Self::all_modules) and
///    [`module_by_key`](Self::module_by_key) serve lookups for the rest of the
///    process lifetime. Lookup failures are per-call errors, surfaced to the
///    caller and never silently defaulted.
///
/// ```no_run
/// use bindery::bootstrap::Bootstrapper;
/// use bindery::module::StaticModuleCatalog;
///
/// # fn main() -> Result<(), bindery::bootstrap::BootError> {
/// let catalog = StaticModuleCatalog::new();
/// let bootstrapper = Bootstrapper::new(catalog).boot()?;
/// let modules = bootstrapper.all_modules()?;
/// # Ok(())
/// # }
/// ```
pub struct Bootstrapper {
    catalog: Box<dyn ModuleCatalog>,
    lifecycle: ContainerLifecycle,
    registry: ModuleRegistry,
    overrides: ServiceOverrides,
    scope: ModuleScope,
    phase: BootPhase,
    container: Option<Arc<Container>>,
    shared_modules: OnceCell<Vec<Arc<dyn Module>>>,
}

impl Bootstrapper {
    /// Start a bootstrap sequence over the host's module catalog. The module
    /// scope is read from the environment ([`RuntimeConfig::from_env`]) unless
    /// overridden with [`with_module_scope`](Self::with_module_scope).
    #[must_use]
    pub fn new(catalog: impl ModuleCatalog + 'static) -> Self {
        Self {
            catalog: Box::new(catalog),
            lifecycle: ContainerLifecycle::new(),
            registry: ModuleRegistry::new(),
            overrides: ServiceOverrides::default(),
            scope: RuntimeConfig::from_env().module_scope,
            phase: BootPhase::Created,
            container: None,
            shared_modules: OnceCell::new(),
        }
    }

    /// Set the instance-sharing policy for [`all_modules`](Self::all_modules).
    #[must_use]
    pub fn with_module_scope(mut self, scope: ModuleScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the default route resolver.
    #[must_use]
    pub fn with_route_resolver(mut self, resolver: impl RouteResolver + 'static) -> Self {
        self.overrides.route_resolver = Some(Arc::new(resolver));
        self
    }

    /// Replace the default template engine selector.
    #[must_use]
    pub fn with_template_engine_selector(
        mut self,
        selector: impl TemplateEngineSelector + 'static,
    ) -> Self {
        self.overrides.template_engine_selector = Some(Arc::new(selector));
        self
    }

    /// Replace the default module key generator.
    #[must_use]
    pub fn with_module_key_generator(
        mut self,
        generator: impl ModuleKeyGenerator + 'static,
    ) -> Self {
        self.overrides.module_key_generator = Some(Arc::new(generator));
        self
    }

    /// Replace the default route cache provider.
    #[must_use]
    pub fn with_route_cache_provider(
        mut self,
        provider: impl RouteCacheProvider + 'static,
    ) -> Self {
        self.overrides.route_cache_provider = Some(Arc::new(provider));
        self
    }

    /// Phase 1: allocate the process-wide container. Idempotent: repeated calls
    /// within one bootstrapper return the same instance.
    pub fn create_container(&mut self) -> Arc<Container> {
        let container = self.lifecycle.create_container();
        if self.phase == BootPhase::Created {
            self.phase = BootPhase::ContainerReady;
            info!(phase = %self.phase, "Bootstrap phase advanced");
        }
        self.container = Some(container.clone());
        container
    }

    /// Phase 2: bind the default services, discover modules, register each one.
    ///
    /// Must run exactly once, after [`create_container`](Self::create_container).
    /// Any failure is fatal to startup and leaves the bootstrapper unusable for
    /// lookups.
    pub fn configure(&mut self) -> Result<(), BootError> {
        if self.phase != BootPhase::ContainerReady {
            return Err(BootError::Phase {
                expected: BootPhase::ContainerReady,
                found: self.phase,
            });
        }
        let container = self.lifecycle.create_container();

        let overrides = std::mem::take(&mut self.overrides);
        self.lifecycle.configure_defaults(&container, overrides)?;

        let descriptors = self.catalog.modules().map_err(|err| {
            error!(error = %err, "Module discovery failed");
            BootError::Discovery(err)
        })?;
        info!(discovered = descriptors.len(), "Module discovery complete");

        let key_generator = container.module_key_generator()?;
        for descriptor in descriptors {
            let key = key_generator.generate(descriptor.type_name);
            let registration = self.registry.register(key, descriptor.factory)?.clone();
            self.lifecycle.register_module(&container, &registration);
        }

        self.phase = BootPhase::Configured;
        info!(
            phase = %self.phase,
            modules = self.registry.len(),
            "Bootstrap phase advanced"
        );
        Ok(())
    }

    /// Phases 1 and 2 in order. The usual entry point for hosts that do not need
    /// to interleave their own work between phases.
    pub fn boot(mut self) -> Result<Self, BootError> {
        self.create_container();
        self.configure()?;
        Ok(self)
    }

    /// One resolved instance per registered module, in registration order.
    ///
    /// Under [`ModuleScope::Shared`] the set is resolved once and the same
    /// instances are returned on every call; under [`ModuleScope::Transient`]
    /// each call constructs a fresh set.
    pub fn all_modules(&self) -> Result<Vec<Arc<dyn Module>>, BootError> {
        let container = self.configured_container()?;
        match self.scope {
            ModuleScope::Shared => self
                .shared_modules
                .get_or_try_init(|| container.resolve_all_modules())
                .map(Clone::clone)
                .map_err(BootError::from),
            ModuleScope::Transient => container
                .resolve_all_modules()
                .map_err(BootError::from),
        }
    }

    /// A fresh instance of the module registered under `key`.
    ///
    /// Always constructs anew, regardless of module scope. An unregistered key is
    /// [`BootError::ModuleNotFound`], a per-call lookup failure, not a crash.
    pub fn module_by_key(&self, key: &ModuleKey) -> Result<Arc<dyn Module>, BootError> {
        let container = self.configured_container()?;
        container.resolve_module(key).map_err(|err| match err {
            crate::container::ResolveError::UnknownModule { key } => {
                BootError::ModuleNotFound { key }
            }
            other => BootError::Resolve(other),
        })
    }

    /// The derived route table. Available once configured; built on first access.
    pub fn route_cache(&self) -> Result<Arc<RouteTable>, BootError> {
        let container = self.configured_container()?;
        container.route_cache().map_err(BootError::from)
    }

    /// The container, if phase 1 has run.
    #[must_use]
    pub fn container(&self) -> Option<&Arc<Container>> {
        self.container.as_ref()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    /// Registered keys, in registration order.
    pub fn module_keys(&self) -> impl Iterator<Item = &ModuleKey> + '_ {
        self.registry.keys()
    }

    fn configured_container(&self) -> Result<&Arc<Container>, BootError> {
        if self.phase != BootPhase::Configured {
            return Err(BootError::Phase {
                expected: BootPhase::Configured,
                found: self.phase,
            });
        }
        self.container.as_ref().ok_or(BootError::Phase {
            expected: BootPhase::Configured,
            found: self.phase,
        })
    }
}
