use std::fmt;

use crate::container::ResolveError;
use crate::keys::ModuleKey;
use crate::registry::RegistryError;

use super::core::BootPhase;

/// Bootstrap failure.
///
/// Everything raised during the container and configuration phases is fatal to
/// startup; there is no partial-start state. `ModuleNotFound` is the one per-call
/// variant, raised by lookups after configuration completes.
#[derive(Debug)]
pub enum BootError {
    /// An operation ran in the wrong phase.
    Phase {
        expected: BootPhase,
        found: BootPhase,
    },
    /// Module discovery failed in the host's catalog.
    Discovery(anyhow::Error),
    /// A discovered module collided with an already-registered key.
    Registry(RegistryError),
    /// A container binding could not be satisfied.
    Resolve(ResolveError),
    /// A by-key lookup named a module that was never registered.
    ModuleNotFound { key: ModuleKey },
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::Phase { expected, found } => {
                write!(
                    f,
                    "bootstrap phase error: operation requires phase {expected}, currently {found}"
                )
            }
            BootError::Discovery(err) => write!(f, "module discovery failed: {err}"),
            BootError::Registry(err) => write!(f, "module registration failed: {err}"),
            BootError::Resolve(err) => write!(f, "container resolution failed: {err}"),
            BootError::ModuleNotFound { key } => {
                write!(f, "no module registered under key '{key}'")
            }
        }
    }
}

impl std::error::Error for BootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootError::Discovery(err) => Some(err.as_ref()),
            BootError::Registry(err) => Some(err),
            BootError::Resolve(err) => Some(err),
            BootError::Phase { .. } | BootError::ModuleNotFound { .. } => None,
        }
    }
}

impl From<RegistryError> for BootError {
    fn from(err: RegistryError) -> Self {
        BootError::Registry(err)
    }
}

impl From<ResolveError> for BootError {
    fn from(err: ResolveError) -> Self {
        BootError::Resolve(err)
    }
}
