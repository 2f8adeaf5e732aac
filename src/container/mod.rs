//! The process-wide container and its lifecycle
//!
//! A [`Container`] holds everything the framework can resolve: the closed set of
//! default services (singleton-scoped) and one binding per discovered module
//! (multi-instance scoped). [`ContainerLifecycle`] owns its creation and
//! configuration; after the bootstrap phases complete, the container is a
//! read-only, concurrently shared lookup structure.
//!
//! Resolution is explicit. Code that needs a service or a module receives the
//! container (or something holding it) as a value; nothing in this crate reaches
//! for a process-global.

mod core;
mod error;

pub use core::{Container, ContainerLifecycle, ServiceOverrides};
pub use error::ResolveError;
