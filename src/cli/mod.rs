//! Command handlers for the `classpath-tools` binary.
//!
//! Each subcommand has a `run_*` handler that takes its config struct and
//! returns the desired exit code; `main` is responsible for calling
//! `std::process::exit()` when the code is non-zero.

mod check;
mod resolve;
mod scan;

pub use check::run_check;
pub use resolve::run_resolve;
pub use scan::run_scan;

use crate::config::{BehaviorConfig, OutputConfig};
use crate::report::{AnalysisReport, ReportFormat};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Clean run, or findings suppressed with --no-fail
    pub const PASS: i32 = 0;
    /// Duplicate components, version conflicts, or unreadable units were found
    pub const FINDINGS: i32 = 1;
    /// The analysis itself could not run
    pub const FATAL: i32 = 2;
}

/// Target for report output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutputTarget::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags, environment, and target
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err() && target.is_terminal()
}

/// Write a rendered report to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{}", content);
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            if !quiet {
                tracing::info!("Report written to {:?}", path);
            }
            Ok(())
        }
    }
}

/// Render a finished report, write it out, and map it to an exit code.
pub(crate) fn emit_report(
    report: &AnalysisReport,
    output: &OutputConfig,
    behavior: &BehaviorConfig,
) -> Result<i32> {
    let target = OutputTarget::from_option(output.file.clone());
    let colored =
        output.format == ReportFormat::Summary && should_use_color(output.no_color, &target);
    let rendered = report
        .render(output.format, colored)
        .context("Failed to render report")?;
    write_output(&rendered, &target, behavior.quiet)?;
    Ok(determine_exit_code(report, behavior))
}

/// Determine the appropriate exit code based on findings and config flags.
fn determine_exit_code(report: &AnalysisReport, behavior: &BehaviorConfig) -> i32 {
    if report.is_clean_pass() || !behavior.fail_on_findings {
        exit_codes::PASS
    } else {
        exit_codes::FINDINGS
    }
}
