//! Module registry
//!
//! The registry is the startup-time record of every discovered module: one
//! [`ModuleRegistration`] per module type, keyed by its generated
//! [`ModuleKey`]. It is written during the bootstrap configuration phase and only
//! read afterwards, so lookups never contend with registration.
//!
//! Keys are the primary lookup handle for the rest of the process lifetime, which
//! makes uniqueness a hard invariant: a collision at registration time is reported
//! as [`RegistryError::DuplicateKey`] and aborts startup rather than letting one
//! module shadow another.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::keys::ModuleKey;
use crate::module::ModuleFactory;

/// A module key paired with the factory that constructs instances of its module
/// type. Created during discovery, never mutated afterwards.
#[derive(Clone)]
pub struct ModuleRegistration {
    pub key: ModuleKey,
    pub factory: ModuleFactory,
}

impl fmt::Debug for ModuleRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistration")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Registration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The key is already registered. Usually a discovery bug (the same module type
    /// listed twice) or a key generator that is not injective.
    DuplicateKey { key: ModuleKey },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateKey { key } => {
                write!(f, "module key '{key}' is already registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered record of module registrations.
///
/// Registration order is observable: it drives iteration order, the order of
/// resolved module sets, and the precedence of the derived route table, so it is
/// preserved exactly.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    order: Vec<ModuleRegistration>,
    index: HashMap<ModuleKey, usize>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a registration. Fails without side effects if `key` is taken.
    pub fn register(
        &mut self,
        key: ModuleKey,
        factory: ModuleFactory,
    ) -> Result<&ModuleRegistration, RegistryError> {
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateKey { key });
        }
        let position = self.order.len();
        info!(
            module_key = %key,
            total_modules = position + 1,
            "Module registered"
        );
        self.index.insert(key.clone(), position);
        self.order.push(ModuleRegistration { key, factory });
        Ok(&self.order[position])
    }

    /// All registrations, in registration order. Restartable and non-destructive.
    pub fn registrations(&self) -> impl Iterator<Item = &ModuleRegistration> + '_ {
        self.order.iter()
    }

    /// All keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &ModuleKey> + '_ {
        self.order.iter().map(|registration| &registration.key)
    }

    #[must_use]
    pub fn get(&self, key: &ModuleKey) -> Option<&ModuleRegistration> {
        self.index.get(key).map(|&position| &self.order[position])
    }

    #[must_use]
    pub fn contains(&self, key: &ModuleKey) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
