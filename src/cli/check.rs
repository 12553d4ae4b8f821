//! Check command handler.
//!
//! Implements the `check` subcommand, which runs the duplicate scan and
//! the dependency-tree analysis together and reports a single verdict.

use crate::cli::emit_report;
use crate::config::CheckConfig;
use crate::error::AnalysisError;
use crate::registry::{ComponentRegistry, RegistrySnapshot};
use crate::report::AnalysisReport;
use crate::resolver::{load_tree, resolve_tree, ResolutionOutcome};
use crate::scanner::{ComponentScanner, FailureRecord, ScanOptions};
use anyhow::Result;

/// Run the check command, returning the desired exit code.
///
/// At least one of `lib_dir` and `tree` must be set; with both, the scan
/// findings and the tree conflicts are merged into one report.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_check(config: CheckConfig) -> Result<i32> {
    config.validate()?;

    let registry = ComponentRegistry::new();
    let mut failures: Vec<FailureRecord> = Vec::new();

    if let Some(lib_dir) = &config.lib_dir {
        if !lib_dir.exists() {
            return Err(AnalysisError::missing_prerequisite(
                lib_dir.clone(),
                "run the build so its library directory is assembled",
            )
            .into());
        }
        let options = ScanOptions {
            scan_archive_entries: config.scan_archive_entries,
        };
        let scanner = ComponentScanner::new(&registry, options);
        let outcome = scanner.scan(lib_dir)?;
        failures = outcome.failures;
    }

    let resolution: Option<ResolutionOutcome> = match &config.tree {
        Some(tree) => {
            let root = load_tree(tree)?;
            let resolution = resolve_tree(&root);
            if !config.behavior.quiet {
                tracing::info!(
                    "Resolved {} artifact key(s), {} with version conflicts",
                    resolution.resolved_by_key.len(),
                    resolution.conflicts_by_key.len()
                );
            }
            Some(resolution)
        }
        None => None,
    };

    let snapshot = if config.lib_dir.is_some() {
        registry.snapshot()
    } else {
        RegistrySnapshot::default()
    };
    let report = AnalysisReport::build(&snapshot, resolution.as_ref(), &failures, None);
    emit_report(&report, &config.output, &config.behavior)
}
