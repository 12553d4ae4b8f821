//! Shared utilities.

mod digest;
mod version;

pub use digest::{digest_bytes, digest_reader, ContentDigest};
pub use version::{is_incompatible, parse_lenient, VersionParts};
