//! **Duplicate-class and dependency conflict detection for JVM build output.**
//!
//! `classpath-tools` scans assembled build artifacts (loose `.class` files and
//! `jar`/`war`/`ear`-style archives) for components that appear more than once
//! with divergent content, and analyzes dependency trees for version conflicts
//! hidden by first-wins resolution. It powers both a command-line interface
//! for CI pipelines and a Rust library for programmatic integration.
//!
//! ## Key Features
//!
//! - **Duplicate Detection**: Registers every class observed across a build's
//!   library output and flags identities that resolve to more than one
//!   distinct content digest.
//! - **Deep and Shallow Scanning**: Opens archives to fingerprint individual
//!   class entries, or registers archives whole, keyed by file name and
//!   manifest build metadata.
//! - **Version Conflict Analysis**: Walks an externally-materialized
//!   dependency tree and reports artifacts whose omitted versions are newer
//!   than the version that was kept.
//! - **Failure Containment**: Unreadable archives and malformed class files
//!   are recorded as findings without aborting the scan.
//! - **Flexible Reporting**: Renders a human-readable summary or JSON, with
//!   CI-friendly exit codes.
//!
//! ## Core Concepts & Modules
//!
//! The library is organized into several key modules:
//!
//! - **[`model`]**: Defines the central data structures: [`ComponentEntry`]
//!   (one observed unit, equal to another exactly when identity and digest
//!   both match) and [`DependencyNode`] (one node of a resolved tree with its
//!   [`model::InclusionState`]).
//! - **[`registry`]**: The concurrency-safe [`ComponentRegistry`] multimap
//!   that scanner workers feed, and the ordered [`registry::RegistrySnapshot`]
//!   view that reporting consumes.
//! - **[`scanner`]**: The [`ComponentScanner`] that traverses build output,
//!   reads class files and archives, and contains per-unit failures.
//! - **[`resolver`]**: The [`resolver::resolve_tree`] walk that classifies
//!   tree nodes by inclusion state and applies the version policy.
//! - **[`report`]**: [`AnalysisReport`] assembly plus the summary and JSON
//!   renderers.
//!
//! ## Getting Started: Scanning Build Output
//!
//! ```no_run
//! use classpath_tools::registry::ComponentRegistry;
//! use classpath_tools::scanner::{ComponentScanner, ScanOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ComponentRegistry::new();
//!     let scanner = ComponentScanner::new(&registry, ScanOptions::default());
//!     let outcome = scanner.scan(Path::new("build/lib"))?;
//!
//!     let snapshot = registry.snapshot();
//!     for (identity, entries) in snapshot.duplicate_groups() {
//!         println!("{} appears {} times with divergent content:", identity, entries.len());
//!         for entry in entries {
//!             println!("  {}", entry.location);
//!         }
//!     }
//!     println!("{} unit(s) could not be read", outcome.failures.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Examples
//!
//! ### Analyzing a Dependency Tree
//!
//! The [`resolver`] consumes a JSON tree document in which every node carries
//! its artifact coordinate and the inclusion state the build's resolution
//! assigned to it.
//!
//! ```no_run
//! use classpath_tools::resolver::{load_tree, resolve_tree};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let root = load_tree(Path::new("deps.json"))?;
//!     let resolution = resolve_tree(&root);
//!
//!     for (key, conflicting) in &resolution.conflicts_by_key {
//!         println!("{key}:");
//!         if let Some(kept) = resolution.resolved_by_key.get(key) {
//!             println!("  kept {}", kept.version);
//!         }
//!         for artifact in conflicting {
//!             println!("  - {artifact}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Building a Combined Report
//!
//! [`AnalysisReport::build`] merges scan findings, tree conflicts, and unit
//! failures into one document with a single pass/fail verdict.
//!
//! ```no_run
//! use classpath_tools::registry::ComponentRegistry;
//! use classpath_tools::report::{AnalysisReport, ReportFormat};
//! use classpath_tools::scanner::{ComponentScanner, ScanOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ComponentRegistry::new();
//!     let scanner = ComponentScanner::new(&registry, ScanOptions::default());
//!     let outcome = scanner.scan(Path::new("build/lib"))?;
//!
//!     let report = AnalysisReport::build(&registry.snapshot(), None, &outcome.failures, None);
//!     println!("{}", report.render(ReportFormat::Json, false)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `classpath-tools` library crate. If you are
//! looking for the command-line tool, please refer to the project's README or
//! install it via `cargo install classpath-tools`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Shard routing truncates a 64-bit hash into an index — bounded by the
    // shard count, so the truncation is the point
    clippy::cast_possible_truncation,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // ComponentRegistry, ComponentScanner, AnalysisReport et al. read better
    // with their module's noun in the name
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod utils;

// Re-export main types for convenience
pub use config::{BehaviorConfig, CheckConfig, OutputConfig, ResolveConfig, ScanConfig};
pub use error::{AnalysisError, ErrorContext, OptionContext, Result, UnitErrorKind};
pub use model::{ArtifactCoordinate, ComponentEntry, DependencyNode, InclusionState, UnitFormat};
pub use registry::{ComponentRegistry, RegistrySnapshot};
pub use report::{AnalysisReport, CompatibilityChecker, ReportFormat, Verdict};
pub use resolver::{load_tree, resolve_tree, ResolutionOutcome};
pub use scanner::{ComponentScanner, FailureKind, FailureRecord, ScanOptions, ScanOutcome};
pub use utils::{digest_bytes, digest_reader, is_incompatible, ContentDigest};
