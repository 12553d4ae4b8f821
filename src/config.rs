//! Runtime configuration for CLI commands.
//!
//! Assembled in `main` from parsed arguments and handed to the command
//! handlers; handlers never read argument structs directly, which keeps
//! them callable from tests and embedders.

use crate::error::{AnalysisError, Result};
use crate::report::ReportFormat;
use std::path::PathBuf;

/// Output routing shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Write the report here instead of stdout.
    pub file: Option<PathBuf>,
    /// Disable colored output (the `NO_COLOR` env var also disables it).
    pub no_color: bool,
}

/// Behavior toggles shared by all commands.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    pub quiet: bool,
    /// Exit nonzero when findings are present.
    pub fail_on_findings: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            fail_on_findings: true,
        }
    }
}

/// Configuration for the `scan` command.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root file or directory to scan.
    pub root: PathBuf,
    /// Deep mode opens archives and registers each class entry; shallow
    /// mode registers archives whole.
    pub scan_archive_entries: bool,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Configuration for the `resolve` command.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// Dependency tree JSON document.
    pub tree: PathBuf,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Configuration for the `check` command.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Assembled library directory to scan, when present.
    pub lib_dir: Option<PathBuf>,
    /// Dependency tree JSON document to analyze, when present.
    pub tree: Option<PathBuf>,
    pub scan_archive_entries: bool,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

impl CheckConfig {
    /// A check with neither input would trivially pass; reject it up
    /// front instead.
    pub fn validate(&self) -> Result<()> {
        if self.lib_dir.is_none() && self.tree.is_none() {
            return Err(AnalysisError::config(
                "check requires --lib-dir and/or --tree",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_defaults_fail_on_findings() {
        let behavior = BehaviorConfig::default();
        assert!(behavior.fail_on_findings);
        assert!(!behavior.quiet);
    }

    #[test]
    fn test_check_config_requires_an_input() {
        let empty = CheckConfig {
            lib_dir: None,
            tree: None,
            scan_archive_entries: true,
            output: OutputConfig::default(),
            behavior: BehaviorConfig::default(),
        };
        assert!(empty.validate().is_err());

        let with_tree = CheckConfig {
            tree: Some(PathBuf::from("tree.json")),
            ..empty
        };
        assert!(with_tree.validate().is_ok());
    }
}
