use std::sync::Arc;

use regex::Regex;
use tracing::info;

use crate::container::{Container, ResolveError};
use crate::keys::ModuleKey;
use crate::module::RouteEntry;

use super::route_resolver::path_to_regex;

/// One compiled route in the derived table: the declaring module's key, the
/// declaration itself, and the regex it was compiled to.
#[derive(Debug, Clone)]
pub struct CachedRoute {
    pub module: ModuleKey,
    pub entry: RouteEntry,
    pub(crate) regex: Regex,
    pub(crate) param_names: Vec<Arc<str>>,
}

/// The derived route table: every route declared by every registered module,
/// compiled for matching.
///
/// Routes keep declaration order: module registration order first, declaration
/// order within a module second. That order is also match precedence for the
/// default resolver. Built once per container, shared read-only afterwards.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<CachedRoute>,
}

impl RouteTable {
    /// Compile a table from `(declaring module, entry)` pairs.
    #[must_use]
    pub fn new(declared: Vec<(ModuleKey, RouteEntry)>) -> Self {
        let routes: Vec<CachedRoute> = declared
            .into_iter()
            .map(|(module, entry)| {
                let (regex, param_names) = path_to_regex(&entry.path_pattern);
                CachedRoute {
                    module,
                    entry,
                    regex,
                    param_names,
                }
            })
            .collect();

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|route| format!("{} {}", route.entry.method, route.entry.path_pattern))
            .collect();
        info!(
            route_count = routes.len(),
            routes_summary = ?routes_summary,
            "Route table built"
        );

        Self { routes }
    }

    /// All routes in precedence order.
    #[must_use]
    pub fn routes(&self) -> &[CachedRoute] {
        &self.routes
    }

    /// Routes declared by one module, in declaration order.
    pub fn routes_for<'a>(
        &'a self,
        module: &'a ModuleKey,
    ) -> impl Iterator<Item = &'a CachedRoute> + 'a {
        self.routes.iter().filter(move |route| route.module == *module)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print the table to stdout. Useful when verifying what a booted application
    /// actually serves.
    pub fn dump(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> {} ({})",
                route.entry.method, route.entry.path_pattern, route.entry.handler_name, route.module
            );
        }
    }
}

/// Supplies the derived route table. One of the container's default services; the
/// container scopes whatever it returns as a singleton.
///
/// Implementations must not resolve the route cache itself from the passed
/// container; the table is being built under that very cell.
pub trait RouteCacheProvider: Send + Sync {
    fn cache(&self, container: &Container) -> Result<Arc<RouteTable>, ResolveError>;
}

/// Default provider: resolves every registered module once and compiles the routes
/// it declares, in registration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRouteCacheProvider;

impl RouteCacheProvider for DefaultRouteCacheProvider {
    fn cache(&self, container: &Container) -> Result<Arc<RouteTable>, ResolveError> {
        let mut declared = Vec::new();
        for key in container.module_keys() {
            let module = container.resolve_module(&key)?;
            for entry in module.routes() {
                declared.push((key.clone(), entry));
            }
        }
        Ok(Arc::new(RouteTable::new(declared)))
    }
}
