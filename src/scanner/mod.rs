//! Build-artifact scanning.
//!
//! Walks a root path for compiled units and archive containers, extracts
//! component identities, digests content, and feeds every occurrence into
//! a shared [`ComponentRegistry`]. Unreadable or malformed units are
//! recorded in the outcome and skipped; only configuration problems and an
//! unreadable root abort a scan.

mod archive;
mod class_file;
mod walk;

pub use class_file::declared_class_name;

use crate::error::{AnalysisError, Result};
use crate::model::{ComponentEntry, UnitFormat};
use crate::registry::ComponentRegistry;
use crate::utils::digest_bytes;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use walk::Candidate;

/// Candidate counts below this are scanned sequentially.
const PARALLEL_THRESHOLD: usize = 16;

/// Classification of a recorded per-unit problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The unit could not be read
    Io,
    /// The unit was read but is structurally invalid
    MalformedUnit,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => f.write_str("io"),
            Self::MalformedUnit => f.write_str("malformed"),
        }
    }
}

/// One unreadable or malformed unit, recorded without aborting the scan.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub location: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FailureRecord {
    pub(crate) fn from_error(location: String, err: &AnalysisError) -> Self {
        let kind = match err {
            AnalysisError::MalformedUnit { .. } => FailureKind::MalformedUnit,
            _ => FailureKind::Io,
        };
        Self {
            location,
            kind,
            message: err.to_string(),
        }
    }
}

/// Scanner tunables.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Deep mode: open archives and register each `.class` entry.
    /// When false, archives register whole under a synthetic key.
    pub scan_archive_entries: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scan_archive_entries: true,
        }
    }
}

/// What a scan saw and produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Candidate files fully processed.
    pub scanned_files: usize,
    /// Entries newly accepted by the registry.
    pub registered_units: usize,
    pub failures: Vec<FailureRecord>,
    /// True when the cancellation flag stopped the scan early.
    pub cancelled: bool,
}

impl ScanOutcome {
    /// A scan is clean when nothing failed; findings are judged separately
    /// against the registry snapshot.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// Walks build output and feeds the shared registry.
pub struct ComponentScanner<'a> {
    registry: &'a ComponentRegistry,
    options: ScanOptions,
    cancel: Option<Arc<AtomicBool>>,
}

enum FileScan {
    Done {
        registered: usize,
        failures: Vec<FailureRecord>,
    },
    Skipped,
}

impl<'a> ComponentScanner<'a> {
    #[must_use]
    pub fn new(registry: &'a ComponentRegistry, options: ScanOptions) -> Self {
        Self {
            registry,
            options,
            cancel: None,
        }
    }

    /// Attach a cooperative cancellation flag.
    ///
    /// The flag is checked between files, never mid-file; a set flag makes
    /// the scan return its partial outcome with `cancelled` set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Scan a root file or directory tree.
    ///
    /// Deterministic with respect to the registry's final contents and the
    /// order of recorded failures, regardless of worker scheduling.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let (candidates, walk_failures) = walk::collect_candidates(root)?;
        tracing::info!(
            "Scanning {} candidate file(s) under {} ({} mode)",
            candidates.len(),
            root.display(),
            if self.options.scan_archive_entries {
                "deep"
            } else {
                "shallow"
            }
        );

        let results: Vec<FileScan> = if candidates.len() >= PARALLEL_THRESHOLD {
            candidates.par_iter().map(|c| self.scan_file(c)).collect()
        } else {
            candidates.iter().map(|c| self.scan_file(c)).collect()
        };

        let mut outcome = ScanOutcome {
            failures: walk_failures,
            ..ScanOutcome::default()
        };
        for result in results {
            match result {
                FileScan::Done {
                    registered,
                    failures,
                } => {
                    outcome.scanned_files += 1;
                    outcome.registered_units += registered;
                    outcome.failures.extend(failures);
                }
                FileScan::Skipped => outcome.cancelled = true,
            }
        }

        tracing::info!(
            "Scan finished: {} file(s), {} new unit(s), {} failure(s)",
            outcome.scanned_files,
            outcome.registered_units,
            outcome.failures.len()
        );
        Ok(outcome)
    }

    fn scan_file(&self, candidate: &Candidate) -> FileScan {
        if self.is_cancelled() {
            return FileScan::Skipped;
        }

        let result = match candidate.format {
            UnitFormat::Class => self.scan_class_file(&candidate.path),
            _ if self.options.scan_archive_entries => {
                archive::scan_archive_entries(&candidate.path, self.registry)
                    .map(|scan| (scan.registered, scan.failures))
            }
            _ => archive::register_whole_archive(&candidate.path, self.registry)
                .map(|inserted| (usize::from(inserted), Vec::new())),
        };

        match result {
            Ok((registered, failures)) => {
                for failure in &failures {
                    tracing::warn!("Skipping {}: {}", failure.location, failure.message);
                }
                FileScan::Done {
                    registered,
                    failures,
                }
            }
            Err(err) => {
                let location = candidate.path.display().to_string();
                tracing::warn!("Skipping {location}: {err}");
                FileScan::Done {
                    registered: 0,
                    failures: vec![FailureRecord::from_error(location, &err)],
                }
            }
        }
    }

    fn scan_class_file(&self, path: &Path) -> Result<(usize, Vec<FailureRecord>)> {
        let location = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| AnalysisError::io(path, e))?;
        let identity = declared_class_name(&location, &bytes)?;
        let digest = digest_bytes(&bytes);

        let entry = ComponentEntry::new(identity.as_str(), location.as_str(), digest);
        let registered = usize::from(self.registry.put(&identity, entry));
        Ok((registered, Vec::new()))
    }
}
