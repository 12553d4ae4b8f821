//! Content digesting.
//!
//! All component identity decisions rest on SHA-256 digests wrapped in a
//! small fixed-size type. Streams are digested in bounded chunks so archive
//! entries of any size can be fingerprinted without buffering them whole.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};

/// Read buffer size used when digesting streams.
const CHUNK_SIZE: usize = 8 * 1024;

/// A 32-byte content fingerprint.
///
/// Equality is byte equality; displays as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// First eight hex characters, for compact display.
    #[must_use]
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        hex[..8].to_string()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({self})")
    }
}

impl From<[u8; 32]> for ContentDigest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Digest an in-memory buffer.
#[must_use]
pub fn digest_bytes(data: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    ContentDigest(hasher.finalize().into())
}

/// Digest a stream in bounded chunks.
///
/// On a read error the remaining stream is drained best-effort before the
/// error is returned, so callers handing in shared archive streams are not
/// left holding a half-consumed reader. No digest is produced on failure.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<ContentDigest> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                let _ = io::copy(&mut reader, &mut io::sink());
                return Err(e);
            }
        }
    }
    Ok(ContentDigest(hasher.finalize().into()))
}
