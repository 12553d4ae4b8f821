//! Version parsing and the compatibility policy for omitted dependencies.

use semver::Version;

/// A version string reduced to its numeric components.
///
/// Build-tool version strings are frequently not semver ("2.0", "1",
/// "1.2.3.RELEASE"), so parsing is lenient and keeps the leading numeric
/// segments only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionParts {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Parse a version string into numeric parts.
///
/// Tries strict semver first, then falls back to reading dot-separated
/// numeric segments until the first non-numeric one. Returns `None` when
/// the string has no leading numeric major ("unknown", "beta").
#[must_use]
pub fn parse_lenient(version: &str) -> Option<VersionParts> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = Version::parse(trimmed) {
        return Some(VersionParts {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
        });
    }

    let mut numbers = [0u64; 3];
    for (slot, segment) in trimmed.split('.').take(3).enumerate() {
        match leading_number(segment) {
            Some(n) => numbers[slot] = n,
            None if slot == 0 => return None,
            None => break,
        }
    }
    Some(VersionParts {
        major: numbers[0],
        minor: numbers[1],
        patch: numbers[2],
    })
}

/// Numeric prefix of a version segment ("8u292" -> 8), if any.
fn leading_number(segment: &str) -> Option<u64> {
    let digits: &str = segment
        .find(|c: char| !c.is_ascii_digit())
        .map_or(segment, |end| &segment[..end]);
    digits.parse().ok()
}

/// Compatibility verdict for an omitted version against the kept one.
///
/// Incompatible iff both versions parse and the omitted one is newer than
/// the kept one at major granularity, or at minor granularity within the
/// same major. Unparsable versions on either side are never incompatible,
/// so opaque version strings cannot produce findings.
#[must_use]
pub fn is_incompatible(omitted: &str, kept: &str) -> bool {
    match (parse_lenient(omitted), parse_lenient(kept)) {
        (Some(o), Some(k)) => o.major > k.major || (o.major == k.major && o.minor > k.minor),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(major: u64, minor: u64, patch: u64) -> VersionParts {
        VersionParts {
            major,
            minor,
            patch,
        }
    }

    #[test]
    fn test_parse_semver_forms() {
        assert_eq!(parse_lenient("1.2.3"), Some(parts(1, 2, 3)));
        assert_eq!(parse_lenient("1.2.3-SNAPSHOT"), Some(parts(1, 2, 3)));
        assert_eq!(parse_lenient("2.0.1+build.7"), Some(parts(2, 0, 1)));
    }

    #[test]
    fn test_parse_partial_forms() {
        assert_eq!(parse_lenient("2"), Some(parts(2, 0, 0)));
        assert_eq!(parse_lenient("2.0"), Some(parts(2, 0, 0)));
        assert_eq!(parse_lenient("2.1"), Some(parts(2, 1, 0)));
        assert_eq!(parse_lenient("1.2.3.4"), Some(parts(1, 2, 3)));
        assert_eq!(parse_lenient("1.8.0_292"), Some(parts(1, 8, 0)));
        assert_eq!(parse_lenient("1.2.RELEASE"), Some(parts(1, 2, 0)));
        assert_eq!(parse_lenient(" 3.1 "), Some(parts(3, 1, 0)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_major() {
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("unknown"), None);
        assert_eq!(parse_lenient("beta.1"), None);
        assert_eq!(parse_lenient("v1.2"), None);
    }

    #[test]
    fn test_policy_major_boundary() {
        assert!(is_incompatible("2.0", "1.9"));
        assert!(!is_incompatible("1.9", "2.0"));
    }

    #[test]
    fn test_policy_minor_boundary_within_major() {
        assert!(is_incompatible("2.1", "2.0"));
        assert!(!is_incompatible("2.0", "2.1"));
        assert!(!is_incompatible("2.0", "2.0"));
        assert!(!is_incompatible("1.5", "1.9"));
    }

    #[test]
    fn test_policy_patch_is_ignored() {
        assert!(!is_incompatible("1.2.9", "1.2.0"));
        assert!(!is_incompatible("1.2.0", "1.2.9"));
    }

    #[test]
    fn test_policy_unparsable_is_always_compatible() {
        assert!(!is_incompatible("abc", "1.0"));
        assert!(!is_incompatible("1.0", "abc"));
        assert!(!is_incompatible("abc", "xyz"));
    }
}
