use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::keys::ModuleKey;
use crate::module::{Module, ModuleFactory};
use crate::registry::ModuleRegistration;
use crate::services::{
    DefaultRouteCacheProvider, ExtensionTemplateSelector, ModuleKeyGenerator, RegexRouteResolver,
    RouteCacheProvider, RouteResolver, RouteTable, TemplateEngineSelector, TypeNameKeyGenerator,
};

use super::error::ResolveError;

type ServiceFactory<T> = Box<dyn Fn() -> Arc<T> + Send + Sync>;

/// One singleton-scoped service slot: a factory bound during configuration, an
/// instance constructed at most once on first resolve and shared thereafter.
struct Singleton<T: ?Sized> {
    service: &'static str,
    factory: RwLock<Option<ServiceFactory<T>>>,
    instance: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Singleton<T> {
    fn new(service: &'static str) -> Self {
        Self {
            service,
            factory: RwLock::new(None),
            instance: OnceCell::new(),
        }
    }

    fn bind<F>(&self, factory: F) -> Result<(), ResolveError>
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        if self.instance.get().is_some() {
            return Err(ResolveError::RebindAfterResolve {
                service: self.service,
            });
        }
        *self.factory.write().unwrap() = Some(Box::new(factory));
        debug!(service = self.service, "Service factory bound");
        Ok(())
    }

    fn resolve(&self) -> Result<Arc<T>, ResolveError> {
        self.instance
            .get_or_try_init(|| {
                let factory = self.factory.read().unwrap();
                factory
                    .as_ref()
                    .map(|build| build())
                    .ok_or(ResolveError::ServiceUnbound {
                        service: self.service,
                    })
            })
            .cloned()
    }
}

#[derive(Default)]
struct ModuleBindings {
    order: Vec<ModuleKey>,
    factories: HashMap<ModuleKey, ModuleFactory>,
}

/// Process-wide resolution state.
///
/// Created exactly once per application lifetime by [`ContainerLifecycle`], written
/// during the bootstrap configuration phase, and read concurrently from every
/// request thereafter. Two kinds of bindings live here:
///
/// - **Default services**, singleton-scoped: factory bound once, instance
///   constructed at most once on first resolve, shared for the container's
///   lifetime. The set is closed: route resolver, template engine selector,
///   module key generator, route cache provider, and the derived route cache.
/// - **Modules**, multi-instance scoped: one binding per registration, every
///   resolution invoking the factory for a fresh instance, so no mutable state
///   leaks across requests through the container.
///
/// The container is an explicit value threaded to whoever needs resolution; there
/// is no ambient global. Holding an `Arc<Container>` is the capability to resolve.
pub struct Container {
    route_resolver: Singleton<dyn RouteResolver>,
    template_selector: Singleton<dyn TemplateEngineSelector>,
    key_generator: Singleton<dyn ModuleKeyGenerator>,
    route_cache_provider: Singleton<dyn RouteCacheProvider>,
    route_cache: OnceCell<Arc<RouteTable>>,
    modules: RwLock<ModuleBindings>,
}

impl Container {
    pub(crate) fn new() -> Self {
        Self {
            route_resolver: Singleton::new("route_resolver"),
            template_selector: Singleton::new("template_engine_selector"),
            key_generator: Singleton::new("module_key_generator"),
            route_cache_provider: Singleton::new("route_cache_provider"),
            route_cache: OnceCell::new(),
            modules: RwLock::new(ModuleBindings::default()),
        }
    }

    /// Resolve the route resolver singleton.
    pub fn route_resolver(&self) -> Result<Arc<dyn RouteResolver>, ResolveError> {
        self.route_resolver.resolve()
    }

    /// Resolve the template engine selector singleton.
    pub fn template_engine_selector(&self) -> Result<Arc<dyn TemplateEngineSelector>, ResolveError> {
        self.template_selector.resolve()
    }

    /// Resolve the module key generator singleton.
    pub fn module_key_generator(&self) -> Result<Arc<dyn ModuleKeyGenerator>, ResolveError> {
        self.key_generator.resolve()
    }

    /// Resolve the route cache provider singleton.
    pub fn route_cache_provider(&self) -> Result<Arc<dyn RouteCacheProvider>, ResolveError> {
        self.route_cache_provider.resolve()
    }

    /// The derived route table, built by the route-cache provider on first access
    /// and shared for the container's lifetime.
    ///
    /// Resolve it only after every module is registered: the table is a snapshot of
    /// the bindings visible when it is first built.
    pub fn route_cache(&self) -> Result<Arc<RouteTable>, ResolveError> {
        self.route_cache
            .get_or_try_init(|| {
                let provider = self.route_cache_provider()?;
                provider.cache(self)
            })
            .cloned()
    }

    pub(crate) fn bind_module(&self, registration: &ModuleRegistration) {
        let mut bindings = self.modules.write().unwrap();
        let replaced = bindings
            .factories
            .insert(registration.key.clone(), registration.factory.clone())
            .is_some();
        if replaced {
            warn!(module_key = %registration.key, "Replaced existing module binding");
        } else {
            bindings.order.push(registration.key.clone());
            debug!(module_key = %registration.key, "Module binding added");
        }
    }

    /// Keys of all module bindings, in registration order.
    #[must_use]
    pub fn module_keys(&self) -> Vec<ModuleKey> {
        self.modules.read().unwrap().order.clone()
    }

    /// Construct a fresh instance of the module bound under `key`.
    pub fn resolve_module(&self, key: &ModuleKey) -> Result<Arc<dyn Module>, ResolveError> {
        // The factory runs outside the lock; a module constructor may resolve
        // from this container.
        let factory = {
            let bindings = self.modules.read().unwrap();
            match bindings.factories.get(key) {
                Some(factory) => factory.clone(),
                None => {
                    let known: Vec<&str> = bindings.order.iter().map(ModuleKey::as_str).collect();
                    error!(
                        module_key = %key,
                        known_modules = ?known,
                        "No module binding matches key"
                    );
                    return Err(ResolveError::UnknownModule { key: key.clone() });
                }
            }
        };
        let module = factory();
        debug!(module_key = %key, module = module.name(), "Module resolved");
        Ok(module)
    }

    /// Construct a fresh instance of every bound module, in registration order.
    pub fn resolve_all_modules(&self) -> Result<Vec<Arc<dyn Module>>, ResolveError> {
        let factories: Vec<ModuleFactory> = {
            let bindings = self.modules.read().unwrap();
            bindings
                .order
                .iter()
                .map(|key| {
                    bindings
                        .factories
                        .get(key)
                        .cloned()
                        .ok_or_else(|| ResolveError::UnknownModule { key: key.clone() })
                })
                .collect::<Result<_, _>>()?
        };
        let resolved: Vec<Arc<dyn Module>> = factories.iter().map(|factory| factory()).collect();
        debug!(modules = resolved.len(), "Resolved full module set");
        Ok(resolved)
    }
}

/// Host-supplied replacements for individual default services. Any slot left
/// `None` falls back to the built-in default.
#[derive(Default)]
pub struct ServiceOverrides {
    pub route_resolver: Option<Arc<dyn RouteResolver>>,
    pub template_engine_selector: Option<Arc<dyn TemplateEngineSelector>>,
    pub module_key_generator: Option<Arc<dyn ModuleKeyGenerator>>,
    pub route_cache_provider: Option<Arc<dyn RouteCacheProvider>>,
}

/// One-time owner of the process-wide [`Container`].
///
/// Allocates the container on first use, hands out the same instance afterwards,
/// and performs the two configuration moves the bootstrap sequence needs: binding
/// the default service set and binding each discovered module.
#[derive(Default)]
pub struct ContainerLifecycle {
    container: OnceCell<Arc<Container>>,
}

impl ContainerLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the process-wide container, or return the already-allocated one.
    /// Idempotent within one lifecycle.
    pub fn create_container(&self) -> Arc<Container> {
        self.container
            .get_or_init(|| {
                info!("Container created");
                Arc::new(Container::new())
            })
            .clone()
    }

    /// The container, if [`create_container`](Self::create_container) has run.
    #[must_use]
    pub fn container(&self) -> Option<&Arc<Container>> {
        self.container.get()
    }

    /// Bind the fixed default service set as singletons, honoring `overrides`.
    pub fn configure_defaults(
        &self,
        container: &Container,
        overrides: ServiceOverrides,
    ) -> Result<(), ResolveError> {
        let ServiceOverrides {
            route_resolver,
            template_engine_selector,
            module_key_generator,
            route_cache_provider,
        } = overrides;

        let resolver: Arc<dyn RouteResolver> =
            route_resolver.unwrap_or_else(|| Arc::new(RegexRouteResolver));
        container.route_resolver.bind(move || resolver.clone())?;

        let selector: Arc<dyn TemplateEngineSelector> =
            template_engine_selector.unwrap_or_else(|| Arc::new(ExtensionTemplateSelector::new()));
        container.template_selector.bind(move || selector.clone())?;

        let generator: Arc<dyn ModuleKeyGenerator> =
            module_key_generator.unwrap_or_else(|| Arc::new(TypeNameKeyGenerator));
        container.key_generator.bind(move || generator.clone())?;

        let provider: Arc<dyn RouteCacheProvider> =
            route_cache_provider.unwrap_or_else(|| Arc::new(DefaultRouteCacheProvider));
        container.route_cache_provider.bind(move || provider.clone())?;

        info!("Default service bindings configured");
        Ok(())
    }

    /// Bind one discovered module under its key as multi-instance: every resolution
    /// constructs a fresh instance through the registration's factory.
    pub fn register_module(&self, container: &Container, registration: &ModuleRegistration) {
        container.bind_module(registration);
    }
}
