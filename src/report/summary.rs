//! Compact human-readable report rendering for shell output.

use super::types::AnalysisReport;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Render the report as compact terminal text.
#[must_use]
pub fn render_summary(report: &AnalysisReport, colored: bool) -> String {
    let color = |text: &str, c: &str| ansi_color(text, c, colored);
    let mut lines = Vec::new();

    lines.push(color("Classpath conflict analysis", "bold"));
    lines.push(color(&"\u{2500}".repeat(40), "dim"));

    let status = if report.verdict.is_pass() {
        color("PASS", "green")
    } else {
        color("FAIL", "red")
    };
    lines.push(format!(
        "Status: {status}  ({} duplicate group(s), {} version conflict(s), {} unreadable unit(s))",
        report.counts.duplicate_groups,
        report.counts.version_conflicts,
        report.counts.unit_failures
    ));

    if report.is_clean_pass() {
        lines.push(String::new());
        lines.push("No duplicate components or version conflicts found.".to_owned());
        lines.push(String::new());
        return lines.join("\n");
    }

    if !report.duplicates.is_empty() {
        lines.push(String::new());
        lines.push(color("Duplicate components:", "bold"));
        for finding in &report.duplicates {
            lines.push(format!("  {}", color(&finding.identity, "yellow")));
            for entry in &finding.entries {
                lines.push(format!(
                    "    {}  (digest {})",
                    entry.location,
                    &entry.digest[..8.min(entry.digest.len())]
                ));
            }
            if let Some(note) = &finding.note {
                lines.push(format!("    note: {note}"));
            }
        }
    }

    if !report.conflicts.is_empty() {
        lines.push(String::new());
        lines.push(color("Version conflicts:", "bold"));
        for finding in &report.conflicts {
            lines.push(format!("  {}", color(&finding.qualified_key, "yellow")));
            match &finding.resolved_version {
                Some(version) => lines.push(format!("    resolved: {version}")),
                None => lines.push("    resolved: (not present in tree)".to_owned()),
            }
            for coordinate in &finding.conflicting {
                lines.push(format!("    conflicting: {coordinate}"));
            }
        }
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push(color("Unreadable units:", "bold"));
        for failure in &report.failures {
            lines.push(format!(
                "  {}  ({}): {}",
                failure.location, failure.kind, failure.message
            ));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistry;
    use crate::report::AnalysisReport;

    #[test]
    fn test_clean_pass_renders_affirmation() {
        let registry = ComponentRegistry::new();
        let report = AnalysisReport::build(&registry.snapshot(), None, &[], None);

        let text = render_summary(&report, false);
        assert!(text.contains("Status: PASS"));
        assert!(text.contains("No duplicate components or version conflicts found."));
    }

    #[test]
    fn test_colored_output_wraps_status() {
        let registry = ComponentRegistry::new();
        let report = AnalysisReport::build(&registry.snapshot(), None, &[], None);

        let plain = render_summary(&report, false);
        let colored = render_summary(&report, true);
        assert!(!plain.contains("\x1b["));
        assert!(colored.contains("\x1b[32mPASS\x1b[0m"));
    }
}
