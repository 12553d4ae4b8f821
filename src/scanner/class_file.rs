//! Class file identity extraction.
//!
//! Reads just enough of the class file format to recover the name a unit
//! declares for itself: magic and version, the constant pool, then
//! `this_class` resolved through its `Class` and `Utf8` entries. The
//! declared name is authoritative for identity; the file's path is not,
//! and the two legitimately differ for relocated or repackaged classes.

use crate::error::{AnalysisError, Result, UnitErrorKind};

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

// Constant pool tags (JVMS table 4.4-A).
const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

#[derive(Clone, Copy)]
enum PoolSlot<'a> {
    Utf8(&'a str),
    Class { name_index: u16 },
    Other,
    /// Slot 0 and the shadow slot after a Long/Double entry.
    Unusable,
}

/// Extract the declared fully-qualified dotted name from class file bytes.
///
/// `location` only labels errors; it plays no part in the identity.
pub fn declared_class_name(location: &str, bytes: &[u8]) -> Result<String> {
    let mut cur = ByteCursor::new(location, bytes);

    let magic = cur.read_u32("magic")?;
    if magic != CLASS_MAGIC {
        return Err(AnalysisError::malformed(
            location,
            UnitErrorKind::BadMagic { found: magic },
        ));
    }
    let _minor = cur.read_u16("minor version")?;
    let _major = cur.read_u16("major version")?;

    let pool_count = cur.read_u16("constant pool count")?;
    let mut pool: Vec<PoolSlot> = vec![PoolSlot::Unusable; pool_count as usize];

    // Long and Double entries occupy two pool slots; the index walk below
    // has to honor that or every later index is off by one.
    let mut index: u16 = 1;
    while index < pool_count {
        let tag = cur.read_u8("constant pool tag")?;
        let slot = match tag {
            TAG_UTF8 => {
                let len = cur.read_u16("Utf8 length")? as usize;
                let raw = cur.take(len, "Utf8 bytes")?;
                let text = std::str::from_utf8(raw).map_err(|_| {
                    AnalysisError::malformed(location, UnitErrorKind::InvalidUtf8 { index })
                })?;
                PoolSlot::Utf8(text)
            }
            TAG_CLASS => PoolSlot::Class {
                name_index: cur.read_u16("Class name index")?,
            },
            TAG_STRING | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                cur.take(2, "constant pool entry")?;
                PoolSlot::Other
            }
            TAG_METHOD_HANDLE => {
                cur.take(3, "constant pool entry")?;
                PoolSlot::Other
            }
            TAG_INTEGER | TAG_FLOAT | TAG_FIELDREF | TAG_METHODREF | TAG_INTERFACE_METHODREF
            | TAG_NAME_AND_TYPE | TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                cur.take(4, "constant pool entry")?;
                PoolSlot::Other
            }
            TAG_LONG | TAG_DOUBLE => {
                cur.take(8, "constant pool entry")?;
                PoolSlot::Other
            }
            other => {
                return Err(AnalysisError::malformed(
                    location,
                    UnitErrorKind::UnknownPoolTag { index, tag: other },
                ))
            }
        };
        pool[index as usize] = slot;
        index += if matches!(tag, TAG_LONG | TAG_DOUBLE) { 2 } else { 1 };
    }

    let _access_flags = cur.read_u16("access flags")?;
    let this_class = cur.read_u16("this_class index")?;

    let name_index = match pool.get(this_class as usize) {
        Some(PoolSlot::Class { name_index }) => *name_index,
        Some(_) => {
            return Err(AnalysisError::malformed(
                location,
                UnitErrorKind::WrongPoolKind {
                    index: this_class,
                    expected: "Class",
                },
            ))
        }
        None => {
            return Err(AnalysisError::malformed(
                location,
                UnitErrorKind::PoolIndexOutOfRange {
                    index: this_class,
                    count: pool_count,
                },
            ))
        }
    };

    match pool.get(name_index as usize) {
        Some(PoolSlot::Utf8(internal)) => Ok(internal.replace('/', ".")),
        Some(_) => Err(AnalysisError::malformed(
            location,
            UnitErrorKind::WrongPoolKind {
                index: name_index,
                expected: "Utf8",
            },
        )),
        None => Err(AnalysisError::malformed(
            location,
            UnitErrorKind::PoolIndexOutOfRange {
                index: name_index,
                count: pool_count,
            },
        )),
    }
}

/// Bounds-checked big-endian reader over a byte slice.
struct ByteCursor<'a> {
    location: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    const fn new(location: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            location,
            bytes,
            pos: 0,
        }
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                AnalysisError::malformed(self.location, UnitErrorKind::Truncated(what))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn read_u16(&mut self, what: &'static str) -> Result<u16> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal class file: one Utf8 name, a Class entry pointing at it, a
    /// Long entry to exercise the two-slot walk, and a trailing Utf8 that
    /// is only reachable if the walk stayed aligned.
    fn class_bytes(internal_name: &str) -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(&CLASS_MAGIC.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes()); // minor
        b.extend_from_slice(&52u16.to_be_bytes()); // major, Java 8

        // Slots: [1] Utf8 name, [2] Class -> 1, [3..4] Long, [5] Utf8
        b.extend_from_slice(&6u16.to_be_bytes());
        b.push(TAG_UTF8);
        b.extend_from_slice(&(internal_name.len() as u16).to_be_bytes());
        b.extend_from_slice(internal_name.as_bytes());
        b.push(TAG_CLASS);
        b.extend_from_slice(&1u16.to_be_bytes());
        b.push(TAG_LONG);
        b.extend_from_slice(&42u64.to_be_bytes());
        b.push(TAG_UTF8);
        b.extend_from_slice(&5u16.to_be_bytes());
        b.extend_from_slice(b"Extra");

        b.extend_from_slice(&0x0021u16.to_be_bytes()); // access flags
        b.extend_from_slice(&2u16.to_be_bytes()); // this_class -> slot 2
        b
    }

    #[test]
    fn test_extracts_dotted_name() {
        let bytes = class_bytes("com/example/Foo");
        let name = declared_class_name("Foo.class", &bytes).unwrap();
        assert_eq!(name, "com.example.Foo");
    }

    #[test]
    fn test_inner_class_dollar_is_preserved() {
        let bytes = class_bytes("com/example/Foo$Bar");
        let name = declared_class_name("Foo$Bar.class", &bytes).unwrap();
        assert_eq!(name, "com.example.Foo$Bar");
    }

    #[test]
    fn test_bad_magic() {
        let err = declared_class_name("x.class", &[0xDE, 0xAD, 0xBE, 0xEF, 0, 0]).unwrap_err();
        match err {
            AnalysisError::MalformedUnit {
                source: UnitErrorKind::BadMagic { found },
                ..
            } => assert_eq!(found, 0xDEAD_BEEF),
            other => panic!("expected BadMagic, got {other}"),
        }
    }

    #[test]
    fn test_truncation_anywhere_is_malformed() {
        let bytes = class_bytes("com/example/Foo");
        // Every proper prefix must fail cleanly, never panic.
        for end in 0..bytes.len() {
            let err = declared_class_name("x.class", &bytes[..end]).unwrap_err();
            assert!(
                matches!(err, AnalysisError::MalformedUnit { .. }),
                "prefix of {end} bytes gave {err}"
            );
        }
    }

    #[test]
    fn test_this_class_must_point_at_class_entry() {
        let mut bytes = class_bytes("com/example/Foo");
        let this_class_offset = bytes.len() - 2;
        // Redirect this_class to slot 1 (a Utf8, not a Class).
        bytes[this_class_offset..].copy_from_slice(&1u16.to_be_bytes());

        let err = declared_class_name("x.class", &bytes).unwrap_err();
        match err {
            AnalysisError::MalformedUnit {
                source: UnitErrorKind::WrongPoolKind { expected, .. },
                ..
            } => assert_eq!(expected, "Class"),
            other => panic!("expected WrongPoolKind, got {other}"),
        }
    }

    #[test]
    fn test_this_class_out_of_range() {
        let mut bytes = class_bytes("com/example/Foo");
        let this_class_offset = bytes.len() - 2;
        bytes[this_class_offset..].copy_from_slice(&999u16.to_be_bytes());

        let err = declared_class_name("x.class", &bytes).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedUnit {
                source: UnitErrorKind::PoolIndexOutOfRange { index: 999, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let mut b = Vec::new();
        b.extend_from_slice(&CLASS_MAGIC.to_be_bytes());
        b.extend_from_slice(&0u16.to_be_bytes());
        b.extend_from_slice(&52u16.to_be_bytes());
        b.extend_from_slice(&2u16.to_be_bytes()); // one pool slot
        b.push(99); // no such tag

        let err = declared_class_name("x.class", &b).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedUnit {
                source: UnitErrorKind::UnknownPoolTag { tag: 99, .. },
                ..
            }
        ));
    }
}
