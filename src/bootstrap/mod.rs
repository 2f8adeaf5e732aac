//! Application startup orchestration
//!
//! The [`Bootstrapper`] is the composition root: it owns the container lifecycle,
//! the module registry, and the discovery catalog, and drives them through three
//! strictly ordered phases (container → configuration → serving). Hosts construct
//! one bootstrapper at process start, run [`Bootstrapper::boot`], and keep it for
//! the lifetime of the process as the entry point for module lookups and the
//! derived route table.
//!
//! Startup failures (discovery errors, duplicate keys, unresolvable defaults) are
//! always fatal: a partially started application would serve an unpredictable
//! subset of its routes.

mod core;
mod error;

pub use core::{BootPhase, Bootstrapper};
pub use error::BootError;
