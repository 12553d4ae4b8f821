//! Core data model for component and dependency analysis.
//!
//! Two families of types live here: component occurrences discovered by
//! scanning build output ([`ComponentEntry`], [`UnitFormat`]) and the
//! externally-materialized dependency tree consumed by the resolver
//! ([`DependencyNode`] and friends). Both are plain data; all behavior
//! lives in the scanner, registry, and resolver modules.

mod component;
mod dependency;

pub use component::*;
pub use dependency::*;
