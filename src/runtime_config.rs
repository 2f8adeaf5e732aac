//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for runtime behavior that is policy,
//! not wiring: knobs an operator may want to turn without a rebuild.
//!
//! ## Environment Variables
//!
//! ### `BINDERY_MODULE_SCOPE`
//!
//! Controls how [`Bootstrapper::all_modules`](crate::bootstrap::Bootstrapper::all_modules)
//! shares module instances across calls:
//! - `shared` (default): the full module set is resolved once and the same
//!   instances are handed out on every call.
//! - `transient`: every call resolves a fresh set of instances.
//!
//! By-key lookups always construct fresh instances and ignore this setting.
//!
//! ## Usage
//!
//! ```rust
//! use bindery::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Module scope: {:?}", config.module_scope);
//! ```

use std::env;

/// Instance-sharing policy for full-set module resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleScope {
    /// Resolve the module set once; later calls reuse the same instances.
    #[default]
    Shared,
    /// Resolve a fresh set of instances on every call.
    Transient,
}

impl ModuleScope {
    /// Parse a scope from a config string, case-insensitive. `None` for anything
    /// unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "shared" => Some(ModuleScope::Shared),
            "transient" => Some(ModuleScope::Transient),
            _ => None,
        }
    }
}

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`]; the bootstrapper does
/// so itself unless the host overrides the scope explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    /// Module instance-sharing policy (default: [`ModuleScope::Shared`]).
    pub module_scope: ModuleScope,
}

impl RuntimeConfig {
    /// Load configuration from environment variables. Unset or unparseable values
    /// fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let module_scope = env::var("BINDERY_MODULE_SCOPE")
            .ok()
            .and_then(|value| ModuleScope::parse(&value))
            .unwrap_or_default();
        RuntimeConfig { module_scope }
    }
}
