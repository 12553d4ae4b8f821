//! Resolve command handler.
//!
//! Implements the `resolve` subcommand for dependency-tree version
//! conflict analysis.

use crate::cli::emit_report;
use crate::config::ResolveConfig;
use crate::registry::RegistrySnapshot;
use crate::report::AnalysisReport;
use crate::resolver::{load_tree, resolve_tree};
use anyhow::Result;

/// Run the resolve command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_resolve(config: ResolveConfig) -> Result<i32> {
    let root = load_tree(&config.tree)?;
    let resolution = resolve_tree(&root);

    if !config.behavior.quiet {
        tracing::info!(
            "Resolved {} artifact key(s), {} with version conflicts",
            resolution.resolved_by_key.len(),
            resolution.conflicts_by_key.len()
        );
    }

    let report = AnalysisReport::build(
        &RegistrySnapshot::default(),
        Some(&resolution),
        &[],
        None,
    );
    emit_report(&report, &config.output, &config.behavior)
}
