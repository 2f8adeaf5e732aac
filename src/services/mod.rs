//! Default container services
//!
//! The container binds a closed set of services at configuration time, each behind
//! a trait so hosts can override it without touching the bootstrap sequence:
//!
//! - [`ModuleKeyGenerator`]: derives each module's registry key
//!   ([`TypeNameKeyGenerator`] uses the type name).
//! - [`RouteCacheProvider`]: produces the derived [`RouteTable`]
//!   ([`DefaultRouteCacheProvider`] compiles every registered module's
//!   declarations).
//! - [`RouteResolver`]: matches method + path against the table
//!   ([`RegexRouteResolver`] scans compiled per-route regexes in precedence
//!   order).
//! - [`TemplateEngineSelector`]: picks a rendering engine id for a view path
//!   ([`ExtensionTemplateSelector`] goes by file extension); rendering itself is
//!   the host's concern.

mod key_generator;
mod route_cache;
mod route_resolver;
mod template;

pub use key_generator::{ModuleKeyGenerator, TypeNameKeyGenerator};
pub use route_cache::{CachedRoute, DefaultRouteCacheProvider, RouteCacheProvider, RouteTable};
pub use route_resolver::{
    ParamVec, RegexRouteResolver, ResolvedRoute, RouteResolver, MAX_INLINE_PARAMS,
};
pub use template::{ExtensionTemplateSelector, TemplateEngineId, TemplateEngineSelector};
