//! Scan command handler.
//!
//! Implements the `scan` subcommand for duplicate-component detection
//! across a build's library output.

use crate::cli::emit_report;
use crate::config::ScanConfig;
use crate::registry::ComponentRegistry;
use crate::report::AnalysisReport;
use crate::scanner::{ComponentScanner, ScanOptions};
use anyhow::Result;

/// Run the scan command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_scan(config: ScanConfig) -> Result<i32> {
    let registry = ComponentRegistry::new();
    let options = ScanOptions {
        scan_archive_entries: config.scan_archive_entries,
    };
    let scanner = ComponentScanner::new(&registry, options);
    let outcome = scanner.scan(&config.root)?;

    if !config.behavior.quiet {
        tracing::info!(
            "Registered {} unit(s) across {} distinct identity key(s)",
            outcome.registered_units,
            registry.len()
        );
    }

    let report = AnalysisReport::build(&registry.snapshot(), None, &outcome.failures, None);
    emit_report(&report, &config.output, &config.behavior)
}
