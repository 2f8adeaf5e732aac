use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::keys::ModuleKey;

use super::route_cache::RouteTable;

/// Maximum number of path parameters before heap allocation. Most REST paths have
/// well under eight (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the match path.
///
/// Names are `Arc<str>` because they come from the route table built at startup,
/// so extraction clones a pointer instead of copying the string. Values are
/// per-request data from the URL and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request against the route table: the owning
/// module, the handler inside it, and the extracted path parameters.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    /// Key of the module that declared the matched route.
    pub module: ModuleKey,
    /// Name of the handler inside the module that serves this route.
    pub handler_name: String,
    /// Path parameters extracted from the URL (e.g. `{id}` → `("id", "123")`).
    pub path_params: ParamVec,
}

impl ResolvedRoute {
    /// Get a path parameter by name.
    ///
    /// Last write wins: with duplicate parameter names at different path depths
    /// (`/org/{id}/user/{id}`), the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path parameters to a `HashMap`. Allocates; prefer
    /// [`path_param`](Self::path_param) on the match path.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Matches an inbound method and path against the derived route table.
///
/// One of the container's default services; hosts with different matching needs
/// (radix trees, host-header dispatch) bind their own implementation.
pub trait RouteResolver: Send + Sync {
    fn resolve(&self, method: Method, path: &str, table: &RouteTable) -> Option<ResolvedRoute>;
}

/// Default resolver: ordered scan over the table's compiled per-route regexes.
///
/// First declaration wins on overlap, so module registration order doubles as
/// route precedence.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexRouteResolver;

impl RouteResolver for RegexRouteResolver {
    fn resolve(&self, method: Method, path: &str, table: &RouteTable) -> Option<ResolvedRoute> {
        debug!(method = %method, path = %path, "Route match attempt");

        let match_start = std::time::Instant::now();

        for route in table.routes() {
            if route.entry.method != method {
                continue;
            }
            let Some(captures) = route.regex.captures(path) else {
                continue;
            };

            let path_params: ParamVec = route
                .param_names
                .iter()
                .enumerate()
                .filter_map(|(position, name)| {
                    captures
                        .get(position + 1)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect();

            let match_duration = match_start.elapsed();
            if match_duration > std::time::Duration::from_millis(1) {
                warn!(
                    method = %method,
                    path = %path,
                    handler_name = %route.entry.handler_name,
                    module_key = %route.module,
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            } else {
                info!(
                    method = %method,
                    path = %path,
                    handler_name = %route.entry.handler_name,
                    module_key = %route.module,
                    route_pattern = %route.entry.path_pattern,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }

            return Some(ResolvedRoute {
                module: route.module.clone(),
                handler_name: route.entry.handler_name.clone(),
                path_params,
            });
        }

        warn!(
            method = %method,
            path = %path,
            duration_us = match_start.elapsed().as_micros(),
            "No route matched"
        );
        None
    }
}

/// Convert a path pattern to a regex and extract its parameter names.
///
/// Transforms patterns like `/users/{id}` into `^/users/([^/]+)$` with parameter
/// names `["id"]`. Literal segments are regex-escaped, so patterns containing
/// metacharacters match themselves only.
pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
    if path == "/" {
        return (
            Regex::new(r"^/$").expect("Failed to compile path regex"),
            Vec::new(),
        );
    }

    let mut pattern = String::with_capacity(path.len() + 5);
    pattern.push('^');
    let mut param_names: Vec<Arc<str>> = Vec::with_capacity(path.matches('{').count());

    for segment in path.split('/') {
        if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
            let param_name = segment.trim_start_matches('{').trim_end_matches('}');
            pattern.push_str("/([^/]+)");
            param_names.push(Arc::from(param_name));
        } else if !segment.is_empty() {
            pattern.push('/');
            pattern.push_str(&regex::escape(segment));
        }
    }

    pattern.push('$');
    let regex = Regex::new(&pattern).expect("Failed to compile path regex");

    (regex, param_names)
}
