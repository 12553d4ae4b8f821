//! Candidate discovery and ordering.

use super::{FailureKind, FailureRecord};
use crate::error::{AnalysisError, OptionContext, Result};
use crate::model::UnitFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file selected for scanning.
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub path: PathBuf,
    pub format: UnitFormat,
}

/// Collect scannable files under `root` in deterministic order.
///
/// A root FILE must itself be a recognized format; anything else is a
/// configuration error. A root DIRECTORY is walked recursively (symlinks
/// not followed) and unrecognized members are skipped silently. Traversal
/// problems below the root are recorded, not fatal.
pub(super) fn collect_candidates(root: &Path) -> Result<(Vec<Candidate>, Vec<FailureRecord>)> {
    let metadata = std::fs::metadata(root).map_err(|e| AnalysisError::io(root, e))?;

    if metadata.is_file() {
        let format = UnitFormat::from_path(root).with_context_none(|| {
            format!(
                "unrecognized input format for {} (expected one of: class, jar, war, ear, sar, zip, gzip)",
                root.display()
            )
        })?;
        let candidate = Candidate {
            path: root.to_path_buf(),
            format,
        };
        return Ok((vec![candidate], Vec::new()));
    }

    let mut candidates = Vec::new();
    let mut failures = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(format) = UnitFormat::from_path(entry.path()) {
                    candidates.push(Candidate {
                        path: entry.into_path(),
                        format,
                    });
                }
            }
            Err(err) => {
                let location = err
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string();
                failures.push(FailureRecord {
                    location,
                    kind: FailureKind::Io,
                    message: err.to_string(),
                });
            }
        }
    }

    sort_candidates(&mut candidates);
    Ok((candidates, failures))
}

/// Order candidates by file name length, then lexicographically by name.
///
/// The sort is stable, so ties beyond the name keep discovery order.
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        let a_name = file_name(&a.path);
        let b_name = file_name(&b.path);
        a_name
            .len()
            .cmp(&b_name.len())
            .then_with(|| a_name.cmp(b_name))
    });
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::fs;

    fn candidate(path: &str) -> Candidate {
        Candidate {
            path: PathBuf::from(path),
            format: UnitFormat::Jar,
        }
    }

    #[test]
    fn test_sort_by_name_length_then_lexicographic() {
        let mut candidates = vec![
            candidate("deep/nested/bb.jar"),
            candidate("a/zzzz.jar"),
            candidate("ab.jar"),
            candidate("x/aa.jar"),
        ];
        sort_candidates(&mut candidates);

        let names: Vec<&str> = candidates.iter().map(|c| file_name(&c.path)).collect();
        // Directory depth is irrelevant; only the file name participates.
        assert_eq!(names, ["aa.jar", "ab.jar", "bb.jar", "zzzz.jar"]);
    }

    #[test]
    fn test_root_file_must_be_recognized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "nothing").unwrap();

        let err = collect_candidates(&path).unwrap_err();
        assert!(
            matches!(err, AnalysisError::Config(_)),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_root_file_recognized_is_single_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.jar");
        fs::write(&path, "stub").unwrap();

        let (candidates, failures) = collect_candidates(&path).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].format, UnitFormat::Jar);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_directory_walk_filters_unrecognized_members() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jar"), "a").unwrap();
        fs::write(dir.path().join("readme.md"), "m").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.war"), "b").unwrap();
        fs::write(dir.path().join("sub/notes.txt"), "n").unwrap();

        let (candidates, failures) = collect_candidates(dir.path()).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| file_name(&c.path)).collect();
        assert_eq!(names, ["a.jar", "b.war"]);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let err = collect_candidates(&missing).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
