use std::fmt;
use std::sync::Arc;

use http::Method;

/// Factory producing a fresh module instance per call.
///
/// Factories are registered at startup and invoked on every by-key resolution, so
/// they must be cheap and must not share mutable state between the instances they
/// produce.
pub type ModuleFactory = Arc<dyn Fn() -> Arc<dyn Module> + Send + Sync>;

/// A handler unit grouping related request-handling logic.
///
/// Modules are discovered at startup, registered under a generated
/// [`ModuleKey`](crate::keys::ModuleKey), and resolved per lookup. The route table
/// is derived from their [`routes`](Module::routes) declarations; dispatching a
/// matched route to the named handler is the host framework's concern.
pub trait Module: Send + Sync {
    /// Human-readable module name, used in logs and route dumps.
    fn name(&self) -> &str;

    /// The route entries this module contributes to the derived route table.
    fn routes(&self) -> Vec<RouteEntry>;
}

/// A single route declared by a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    /// Path pattern with `{param}` placeholders, e.g. `/pets/{id}`.
    pub path_pattern: String,
    /// Name of the handler inside the module that serves this route.
    pub handler_name: String,
}

impl RouteEntry {
    #[must_use]
    pub fn new(
        method: Method,
        path_pattern: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path_pattern: path_pattern.into(),
            handler_name: handler_name.into(),
        }
    }

    #[must_use]
    pub fn get(path_pattern: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self::new(Method::GET, path_pattern, handler_name)
    }

    #[must_use]
    pub fn post(path_pattern: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self::new(Method::POST, path_pattern, handler_name)
    }

    #[must_use]
    pub fn put(path_pattern: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self::new(Method::PUT, path_pattern, handler_name)
    }

    #[must_use]
    pub fn delete(path_pattern: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path_pattern, handler_name)
    }
}

/// A constructible module type produced by discovery: its type name (the raw
/// material for key generation) plus the factory that builds instances.
#[derive(Clone)]
pub struct ModuleDescriptor {
    pub type_name: &'static str,
    pub factory: ModuleFactory,
}

impl ModuleDescriptor {
    /// Describe a module type constructible via [`Default`].
    #[must_use]
    pub fn new<M>() -> Self
    where
        M: Module + Default + 'static,
    {
        Self {
            type_name: std::any::type_name::<M>(),
            factory: Arc::new(|| Arc::new(M::default()) as Arc<dyn Module>),
        }
    }

    /// Describe a module type with an explicit constructor, for modules that carry
    /// host-supplied state.
    #[must_use]
    pub fn with_factory<M, F>(factory: F) -> Self
    where
        M: Module + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<M>(),
            factory: Arc::new(move || Arc::new(factory()) as Arc<dyn Module>),
        }
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Discovery boundary: supplies the set of constructible module types.
///
/// How modules are found is host-defined (a hand-maintained list, build-time
/// codegen, a plugin scan), so failures cross this boundary as [`anyhow::Error`]
/// and abort startup.
pub trait ModuleCatalog: Send + Sync {
    fn modules(&self) -> anyhow::Result<Vec<ModuleDescriptor>>;
}

/// Fixed, in-code catalog. The common case: the host lists its module types once at
/// startup.
///
/// ```
/// use bindery::module::{Module, RouteEntry, StaticModuleCatalog};
///
/// #[derive(Default)]
/// struct HealthModule;
///
/// impl Module for HealthModule {
///     fn name(&self) -> &str {
///         "health"
///     }
///     fn routes(&self) -> Vec<RouteEntry> {
///         vec![RouteEntry::get("/health", "check")]
///     }
/// }
///
/// let catalog = StaticModuleCatalog::new().with::<HealthModule>();
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticModuleCatalog {
    modules: Vec<ModuleDescriptor>,
}

impl StaticModuleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a [`Default`]-constructible module type.
    #[must_use]
    pub fn with<M>(mut self) -> Self
    where
        M: Module + Default + 'static,
    {
        self.modules.push(ModuleDescriptor::new::<M>());
        self
    }

    /// Add a pre-built descriptor.
    pub fn push(&mut self, descriptor: ModuleDescriptor) {
        self.modules.push(descriptor);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleCatalog for StaticModuleCatalog {
    fn modules(&self) -> anyhow::Result<Vec<ModuleDescriptor>> {
        Ok(self.modules.clone())
    }
}
