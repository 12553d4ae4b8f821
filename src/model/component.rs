//! Component occurrence model.

use crate::utils::ContentDigest;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Recognized input formats, classified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitFormat {
    /// A single compiled class file
    Class,
    /// Java archive
    Jar,
    /// Web application archive
    War,
    /// Enterprise application archive
    Ear,
    /// Service archive
    Sar,
    /// Plain zip container
    Zip,
    /// Gzip-compressed artifact
    Gzip,
}

impl UnitFormat {
    /// Classify a file by its extension, case-insensitively.
    ///
    /// Returns `None` for files without a recognized extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Classify a bare extension string, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "class" => Some(Self::Class),
            "jar" => Some(Self::Jar),
            "war" => Some(Self::War),
            "ear" => Some(Self::Ear),
            "sar" => Some(Self::Sar),
            "zip" => Some(Self::Zip),
            "gzip" => Some(Self::Gzip),
            _ => None,
        }
    }

    /// Whether this format is an archive container rather than a single
    /// compiled unit.
    #[must_use]
    pub const fn is_archive(self) -> bool {
        !matches!(self, Self::Class)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Jar => "jar",
            Self::War => "war",
            Self::Ear => "ear",
            Self::Sar => "sar",
            Self::Zip => "zip",
            Self::Gzip => "gzip",
        }
    }
}

impl fmt::Display for UnitFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered occurrence of a component.
///
/// # Identity
///
/// Two entries are the same occurrence iff `identity` AND `digest` match.
/// `location` and `container` record where the occurrence was found and
/// never participate in equality or hashing: the same class found at two
/// paths with identical bytes is one component, not two.
#[derive(Debug, Clone)]
pub struct ComponentEntry {
    /// Logical identity: dotted fully-qualified class name, or a synthetic
    /// archive key in shallow scans.
    pub identity: String,
    /// Where the unit was found (`<archive>:<entry>` for archive members).
    pub location: String,
    /// Archive holding the unit, when it came from one.
    pub container: Option<String>,
    /// Content fingerprint.
    pub digest: ContentDigest,
}

impl ComponentEntry {
    /// Create an entry with no containing archive.
    pub fn new(
        identity: impl Into<String>,
        location: impl Into<String>,
        digest: ContentDigest,
    ) -> Self {
        Self {
            identity: identity.into(),
            location: location.into(),
            container: None,
            digest,
        }
    }

    /// Attach the containing archive.
    #[must_use]
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }
}

impl PartialEq for ComponentEntry {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity && self.digest == other.digest
    }
}

impl Eq for ComponentEntry {}

impl Hash for ComponentEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
        self.digest.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::digest_bytes;
    use std::collections::HashSet;

    #[test]
    fn test_format_classification() {
        assert_eq!(
            UnitFormat::from_path(Path::new("lib/app.jar")),
            Some(UnitFormat::Jar)
        );
        assert_eq!(
            UnitFormat::from_path(Path::new("Foo.CLASS")),
            Some(UnitFormat::Class)
        );
        assert_eq!(UnitFormat::from_extension("WAR"), Some(UnitFormat::War));
        assert_eq!(UnitFormat::from_path(Path::new("readme.txt")), None);
        assert_eq!(UnitFormat::from_path(Path::new("no_extension")), None);
        // Only the literal "gzip" extension is recognized, not "gz"
        assert_eq!(UnitFormat::from_extension("gz"), None);
        assert_eq!(UnitFormat::from_extension("gzip"), Some(UnitFormat::Gzip));
    }

    #[test]
    fn test_archive_classification() {
        assert!(UnitFormat::Jar.is_archive());
        assert!(UnitFormat::Gzip.is_archive());
        assert!(!UnitFormat::Class.is_archive());
    }

    #[test]
    fn test_entry_equality_ignores_location() {
        let digest = digest_bytes(b"bytecode");
        let a = ComponentEntry::new("com.example.Foo", "a/app.jar:com/example/Foo.class", digest)
            .with_container("a/app.jar");
        let b = ComponentEntry::new("com.example.Foo", "b/other.jar:com/example/Foo.class", digest)
            .with_container("b/other.jar");

        assert_eq!(a, b, "same identity and digest must compare equal");

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b), "hash set must treat them as one");
    }

    #[test]
    fn test_entry_inequality_on_digest() {
        let a = ComponentEntry::new("com.example.Foo", "a.jar:Foo.class", digest_bytes(b"one"));
        let b = ComponentEntry::new("com.example.Foo", "a.jar:Foo.class", digest_bytes(b"two"));
        assert_ne!(a, b, "divergent digests are distinct occurrences");
    }
}
