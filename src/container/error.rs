use std::fmt;

use crate::keys::ModuleKey;

/// A binding could not be satisfied.
///
/// During the bootstrap configuration phase every variant is fatal to startup.
/// After configuration, `UnknownModule` is the only variant a lookup can produce
/// and it is a per-call error for the caller, not a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A default service was resolved before any factory was bound for it. The
    /// configuration phase did not run, or did not finish.
    ServiceUnbound { service: &'static str },
    /// No module binding matches the key.
    UnknownModule { key: ModuleKey },
    /// A singleton service was already resolved; binding a replacement afterwards
    /// could never take effect, so it is refused.
    RebindAfterResolve { service: &'static str },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ServiceUnbound { service } => {
                write!(f, "no factory bound for service '{service}'")
            }
            ResolveError::UnknownModule { key } => {
                write!(f, "no module binding matches key '{key}'")
            }
            ResolveError::RebindAfterResolve { service } => {
                write!(
                    f,
                    "service '{service}' was already resolved; rebinding would have no effect"
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
