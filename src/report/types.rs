//! Report data types and assembly.

use crate::model::{ArtifactCoordinate, ComponentEntry};
use crate::registry::RegistrySnapshot;
use crate::resolver::ResolutionOutcome;
use crate::scanner::FailureRecord;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Compact human-readable text
    #[default]
    Summary,
    /// Structured JSON for programmatic consumers
    Json,
}

/// Final pass/fail judgment for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Report provenance.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub tool: String,
    pub version: String,
    /// RFC 3339 generation timestamp
    pub generated_at: String,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Aggregate counts for quick CI consumption.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FindingCounts {
    pub duplicate_groups: usize,
    pub version_conflicts: usize,
    pub unit_failures: usize,
}

/// One occurrence inside a duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateEntry {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Hex content digest
    pub digest: String,
}

impl From<&ComponentEntry> for DuplicateEntry {
    fn from(entry: &ComponentEntry) -> Self {
        Self {
            location: entry.location.clone(),
            container: entry.container.clone(),
            digest: entry.digest.to_hex(),
        }
    }
}

/// A component identity that resolved to more than one distinct content.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateFinding {
    pub identity: String,
    pub entries: Vec<DuplicateEntry>,
    /// Annotation supplied by a [`CompatibilityChecker`], when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A dependency key where an incompatible version was silently dropped.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictFinding {
    pub qualified_key: String,
    /// Version kept on the classpath, when the tree named one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_version: Option<String>,
    pub conflicting: Vec<ArtifactCoordinate>,
}

/// Optional capability invoked once per duplicate group to attach a short
/// assessment (for instance an API-level comparison of the colliding
/// bytes). The core ships the seam, not an implementation.
pub trait CompatibilityChecker: Send + Sync {
    /// An annotation for the group, or `None` to stay silent.
    fn assess(&self, identity: &str, entries: &[ComponentEntry]) -> Option<String>;
}

/// Complete result of an analysis run. Pure data; rendering lives in the
/// sibling renderer modules.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub counts: FindingCounts,
    pub duplicates: Vec<DuplicateFinding>,
    pub conflicts: Vec<ConflictFinding>,
    pub failures: Vec<FailureRecord>,
    pub verdict: Verdict,
}

impl AnalysisReport {
    /// Assemble a report from analysis outputs.
    ///
    /// Any duplicate group, conflict, or recorded failure makes the
    /// verdict `Fail`; an empty scan passes.
    #[must_use]
    pub fn build(
        snapshot: &RegistrySnapshot,
        resolution: Option<&ResolutionOutcome>,
        failures: &[FailureRecord],
        checker: Option<&dyn CompatibilityChecker>,
    ) -> Self {
        let duplicates: Vec<DuplicateFinding> = snapshot
            .duplicate_groups()
            .map(|(identity, entries)| DuplicateFinding {
                identity: identity.to_owned(),
                entries: entries.iter().map(DuplicateEntry::from).collect(),
                note: checker.and_then(|c| c.assess(identity, entries)),
            })
            .collect();

        let conflicts: Vec<ConflictFinding> = resolution
            .map(|outcome| {
                outcome
                    .conflicts_by_key
                    .iter()
                    .map(|(key, coordinates)| ConflictFinding {
                        qualified_key: key.clone(),
                        resolved_version: outcome
                            .resolved_by_key
                            .get(key)
                            .map(|artifact| artifact.version.clone()),
                        conflicting: coordinates.iter().cloned().collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let counts = FindingCounts {
            duplicate_groups: duplicates.len(),
            version_conflicts: conflicts.len(),
            unit_failures: failures.len(),
        };
        let verdict = if counts.duplicate_groups == 0
            && counts.version_conflicts == 0
            && counts.unit_failures == 0
        {
            Verdict::Pass
        } else {
            Verdict::Fail
        };

        Self {
            metadata: ReportMetadata::default(),
            counts,
            duplicates,
            conflicts,
            failures: failures.to_vec(),
            verdict,
        }
    }

    #[must_use]
    pub fn is_clean_pass(&self) -> bool {
        self.verdict.is_pass()
    }

    /// Merge a second report into this one, keeping this metadata.
    ///
    /// For embedders that run a scan and a tree analysis separately and
    /// want one verdict over both.
    #[must_use]
    pub fn merged_with(mut self, other: AnalysisReport) -> Self {
        self.duplicates.extend(other.duplicates);
        self.conflicts.extend(other.conflicts);
        self.failures.extend(other.failures);
        self.counts = FindingCounts {
            duplicate_groups: self.duplicates.len(),
            version_conflicts: self.conflicts.len(),
            unit_failures: self.failures.len(),
        };
        if !other.verdict.is_pass() {
            self.verdict = Verdict::Fail;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistry;
    use crate::utils::digest_bytes;

    fn snapshot_with_duplicate() -> RegistrySnapshot {
        let registry = ComponentRegistry::new();
        registry.put(
            "com.example.Foo",
            ComponentEntry::new("com.example.Foo", "a.jar:Foo.class", digest_bytes(b"one"))
                .with_container("a.jar"),
        );
        registry.put(
            "com.example.Foo",
            ComponentEntry::new("com.example.Foo", "b.jar:Foo.class", digest_bytes(b"two"))
                .with_container("b.jar"),
        );
        registry.put(
            "com.example.Bar",
            ComponentEntry::new("com.example.Bar", "a.jar:Bar.class", digest_bytes(b"bar")),
        );
        registry.snapshot()
    }

    #[test]
    fn test_build_flags_duplicate_groups_only() {
        let report = AnalysisReport::build(&snapshot_with_duplicate(), None, &[], None);
        assert_eq!(report.counts.duplicate_groups, 1);
        assert_eq!(report.duplicates[0].identity, "com.example.Foo");
        assert_eq!(report.duplicates[0].entries.len(), 2);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn test_empty_inputs_pass() {
        let registry = ComponentRegistry::new();
        let report = AnalysisReport::build(&registry.snapshot(), None, &[], None);
        assert!(report.is_clean_pass());
        assert_eq!(report.counts.duplicate_groups, 0);
    }

    #[test]
    fn test_failures_fail_the_verdict() {
        let registry = ComponentRegistry::new();
        let failures = vec![FailureRecord {
            location: "bad.jar".into(),
            kind: crate::scanner::FailureKind::Io,
            message: "unreadable".into(),
        }];
        let report = AnalysisReport::build(&registry.snapshot(), None, &failures, None);
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.counts.unit_failures, 1);
    }

    struct StubChecker;

    impl CompatibilityChecker for StubChecker {
        fn assess(&self, identity: &str, entries: &[ComponentEntry]) -> Option<String> {
            Some(format!("{identity}: {} variants compared", entries.len()))
        }
    }

    #[test]
    fn test_checker_annotates_duplicate_groups() {
        let report =
            AnalysisReport::build(&snapshot_with_duplicate(), None, &[], Some(&StubChecker));
        assert_eq!(
            report.duplicates[0].note.as_deref(),
            Some("com.example.Foo: 2 variants compared")
        );
    }

    #[test]
    fn test_merged_reports_combine_findings_and_verdict() {
        let clean = AnalysisReport::build(&ComponentRegistry::new().snapshot(), None, &[], None);
        let failing = AnalysisReport::build(&snapshot_with_duplicate(), None, &[], None);

        let merged = clean.merged_with(failing);
        assert_eq!(merged.counts.duplicate_groups, 1);
        assert_eq!(merged.verdict, Verdict::Fail);
    }
}
