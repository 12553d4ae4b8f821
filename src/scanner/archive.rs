//! Archive container scanning.
//!
//! Deep mode opens an archive and registers every `.class` entry as its
//! own component. Shallow mode treats the archive as one opaque unit,
//! digesting its full bytes under a synthetic key built from the file name
//! and any build metadata its manifest carries.

use super::{FailureKind, FailureRecord};
use crate::error::{AnalysisError, Result, UnitErrorKind};
use crate::model::ComponentEntry;
use crate::registry::ComponentRegistry;
use crate::utils::digest_reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const CLASS_SUFFIX: &str = ".class";
const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
const BUILD_JDK_ATTR: &str = "Build-Jdk";
const BUILT_BY_ATTR: &str = "Built-By";

/// What scanning one archive produced.
#[derive(Debug, Default)]
pub(super) struct ArchiveScan {
    pub registered: usize,
    pub failures: Vec<FailureRecord>,
}

/// Deep-scan an archive: register each `.class` entry individually.
///
/// Entry-level problems are recorded in the result and the remaining
/// entries still scanned; only a failure to open the archive itself is an
/// error. Non-class entries are skipped.
pub(super) fn scan_archive_entries(
    path: &Path,
    registry: &ComponentRegistry,
) -> Result<ArchiveScan> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| map_zip_error(&display, e))?;

    let mut scan = ArchiveScan::default();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                let err = map_zip_error(&format!("{display}:#{index}"), err);
                scan.failures
                    .push(FailureRecord::from_error(format!("{display}:#{index}"), &err));
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_owned();
        let Some(identity) = class_entry_identity(&name) else {
            continue;
        };

        let location = format!("{display}:{name}");
        match digest_reader(&mut entry) {
            Ok(digest) => {
                let component = ComponentEntry::new(identity.as_str(), location.as_str(), digest)
                    .with_container(display.as_str());
                if registry.put(&identity, component) {
                    scan.registered += 1;
                }
            }
            Err(err) => scan.failures.push(FailureRecord {
                location,
                kind: FailureKind::Io,
                message: err.to_string(),
            }),
        }
    }
    Ok(scan)
}

/// Shallow-scan an archive: one entry for the whole file.
///
/// The digest always covers the raw bytes on disk. Manifest problems only
/// narrow the key to the bare file name; they never fail the unit.
/// Returns whether the registry accepted a new entry.
pub(super) fn register_whole_archive(path: &Path, registry: &ComponentRegistry) -> Result<bool> {
    let display = path.display().to_string();
    let bare_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());

    let mut key = bare_name;
    if let Some(metadata) = read_build_metadata(path) {
        if let Some(jdk) = metadata.build_jdk {
            key.push(':');
            key.push_str(&jdk);
        }
        if let Some(by) = metadata.built_by {
            key.push(':');
            key.push_str(&by);
        }
    }

    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let digest = digest_reader(BufReader::new(file)).map_err(|e| AnalysisError::io(path, e))?;

    let entry = ComponentEntry::new(key.as_str(), display.as_str(), digest);
    Ok(registry.put(&key, entry))
}

/// Identity of a `.class` archive entry: the entry path minus the suffix,
/// with `/` turned into `.`. Inner-class `$` separators are preserved.
/// `None` for non-class entries.
fn class_entry_identity(entry_name: &str) -> Option<String> {
    let stem = entry_name.strip_suffix(CLASS_SUFFIX)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace('/', "."))
}

fn map_zip_error(location: &str, err: ZipError) -> AnalysisError {
    match err {
        ZipError::Io(source) => AnalysisError::io(location, source),
        other => AnalysisError::malformed(
            location,
            UnitErrorKind::UnreadableArchive(other.to_string()),
        ),
    }
}

#[derive(Debug, Default)]
struct BuildMetadata {
    build_jdk: Option<String>,
    built_by: Option<String>,
}

/// Main-section manifest attributes, when the archive is a readable zip
/// with a manifest. Any failure along the way degrades to `None`.
fn read_build_metadata(path: &Path) -> Option<BuildMetadata> {
    let file = File::open(path).ok()?;
    let mut archive = ZipArchive::new(BufReader::new(file)).ok()?;
    let mut manifest = archive.by_name(MANIFEST_PATH).ok()?;
    let mut text = String::new();
    manifest.read_to_string(&mut text).ok()?;
    Some(parse_main_attributes(&text))
}

/// Parse the main (pre-blank-line) section of a jar manifest.
///
/// Attribute lines are `Name: value`; a line starting with a single space
/// continues the previous value with no separator.
fn parse_main_attributes(text: &str) -> BuildMetadata {
    let mut metadata = BuildMetadata::default();
    let mut current: Option<(String, String)> = None;

    for line in text.lines() {
        if line.is_empty() {
            break;
        }
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(rest);
            }
            continue;
        }
        if let Some((name, value)) = current.take() {
            assign_attribute(&mut metadata, &name, &value);
        }
        if let Some((name, value)) = line.split_once(':') {
            current = Some((name.trim().to_owned(), value.trim_start().to_owned()));
        }
    }
    if let Some((name, value)) = current.take() {
        assign_attribute(&mut metadata, &name, &value);
    }
    metadata
}

fn assign_attribute(metadata: &mut BuildMetadata, name: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    if name.eq_ignore_ascii_case(BUILD_JDK_ATTR) {
        metadata.build_jdk = Some(value.to_owned());
    } else if name.eq_ignore_ascii_case(BUILT_BY_ATTR) {
        metadata.built_by = Some(value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_entry_identity() {
        assert_eq!(
            class_entry_identity("com/example/Foo.class").as_deref(),
            Some("com.example.Foo")
        );
        assert_eq!(
            class_entry_identity("com/example/Foo$Inner.class").as_deref(),
            Some("com.example.Foo$Inner")
        );
        assert_eq!(class_entry_identity("META-INF/MANIFEST.MF"), None);
        assert_eq!(class_entry_identity("module-info.json"), None);
        assert_eq!(class_entry_identity(".class"), None);
    }

    #[test]
    fn test_manifest_main_attributes() {
        let text = "Manifest-Version: 1.0\r\nBuild-Jdk: 1.8.0_292\r\nBuilt-By: jenkins\r\n\r\nName: ignored/Section\r\nBuilt-By: someone-else\r\n";
        let meta = parse_main_attributes(text);
        assert_eq!(meta.build_jdk.as_deref(), Some("1.8.0_292"));
        assert_eq!(
            meta.built_by.as_deref(),
            Some("jenkins"),
            "per-entry sections after the blank line must not leak in"
        );
    }

    #[test]
    fn test_manifest_continuation_lines() {
        let text = "Build-Jdk: 11.0\n .2+9\nBuilt-By: ci\n";
        let meta = parse_main_attributes(text);
        assert_eq!(meta.build_jdk.as_deref(), Some("11.0.2+9"));
        assert_eq!(meta.built_by.as_deref(), Some("ci"));
    }

    #[test]
    fn test_manifest_empty_values_are_absent() {
        let text = "Build-Jdk: \nBuilt-By:\n";
        let meta = parse_main_attributes(text);
        assert!(meta.build_jdk.is_none());
        assert!(meta.built_by.is_none());
    }

    #[test]
    fn test_manifest_missing_attributes() {
        let meta = parse_main_attributes("Manifest-Version: 1.0\n");
        assert!(meta.build_jdk.is_none());
        assert!(meta.built_by.is_none());
    }
}
