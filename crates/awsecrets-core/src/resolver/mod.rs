//! Region and credential resolution
//!
//! This module provides a single entry point, [`Resolver`], that walks the
//! fixed chain of sources and reports where each value came from.

mod options;
mod resolution;
mod state;
mod strategies;
mod credential_resolver;

pub use options::ResolveOptions;
pub use resolution::{Resolution, Source};
pub use credential_resolver::{load, Resolver};
