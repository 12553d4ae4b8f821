//! Report generation for analysis results.
//!
//! Two output formats:
//! - Summary: compact shell-friendly text
//! - JSON: structured data for programmatic integration
//!
//! Reports are pure data assembled by [`AnalysisReport::build`]; renderers
//! never do I/O.

mod json;
mod summary;
mod types;

pub use json::render_json;
pub use summary::render_summary;
pub use types::{
    AnalysisReport, CompatibilityChecker, ConflictFinding, DuplicateEntry, DuplicateFinding,
    FindingCounts, ReportFormat, ReportMetadata, Verdict,
};

impl AnalysisReport {
    /// Render in the requested format.
    pub fn render(&self, format: ReportFormat, colored: bool) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Summary => Ok(render_summary(self, colored)),
            ReportFormat::Json => render_json(self),
        }
    }
}
