//! Tagged SHA-256 digest primitive.
//!
//! Every digest is `SHA-256(tag || payload)`. The tag byte is unique per
//! value kind, so two kinds that happen to share a payload (an empty list
//! and an empty set, say) never collide.

use crate::error::{ObjectHashError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of every digest.
pub const DIGEST_LEN: usize = 32;

/// Kind discriminator mixed into every hash input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Null = b'n',
    Bool = b'b',
    Int = b'i',
    Float = b'f',
    Unicode = b'u',
    List = b'l',
    Set = b's',
    Dict = b'd',
}

impl Tag {
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

/// A 32-byte object hash.
///
/// Ordering is byte-wise lexicographic, which is what the set and dict
/// combinators sort by.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, the external representation of a digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse exactly 64 hex digits (either case).
    pub fn from_hex(input: &str) -> Result<Self> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(input, &mut bytes).map_err(|e| ObjectHashError::InvalidDigest {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Digest(bytes))
    }
}

/// Compute `SHA-256(tag || payload)`.
///
/// # Example
///
/// ```
/// use objecthash::digest::{tagged_hash, Tag};
///
/// let null = tagged_hash(Tag::Null, b"");
/// assert_eq!(
///     null.to_hex(),
///     "1b16b1df538ba12dc3f97edbb85caa7050d46c148134290feba80f8236c83db9"
/// );
/// ```
pub fn tagged_hash(tag: Tag, payload: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([tag.byte()]);
    hasher.update(payload);
    Digest(hasher.finalize().into())
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self:x})")
    }
}

impl FromStr for Digest {
    type Err = ObjectHashError;

    fn from_str(s: &str) -> Result<Self> {
        Digest::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_is_tag_then_payload() {
        let framed = tagged_hash(Tag::Null, b"");
        let raw: [u8; DIGEST_LEN] = Sha256::digest(b"n").into();
        assert_eq!(framed.as_bytes(), &raw);

        // Project NESSIE SHA-256 vector
        let raw: [u8; DIGEST_LEN] = Sha256::digest(b"abcdefghijklmnopqrstuvwxyz").into();
        assert_eq!(
            hex::encode(raw),
            "71c480df93d6ae2f1efad1447c66c9525e316218cf51fc8d9ed832f2daf18b73"
        );
    }

    #[test]
    fn test_tags_are_distinct() {
        let tags = [
            Tag::Null,
            Tag::Bool,
            Tag::Int,
            Tag::Float,
            Tag::Unicode,
            Tag::List,
            Tag::Set,
            Tag::Dict,
        ];
        let mut bytes: Vec<u8> = tags.iter().map(|t| t.byte()).collect();
        bytes.sort_unstable();
        bytes.dedup();
        assert_eq!(bytes.len(), tags.len());

        let empties: Vec<Digest> = tags.iter().map(|t| tagged_hash(*t, b"")).collect();
        for (i, a) in empties.iter().enumerate() {
            for b in &empties[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_hex_round_trip_and_case() {
        let d = tagged_hash(Tag::Unicode, b"bar");
        assert_eq!(
            d.to_hex(),
            "e303ce0bd0f4c1fdfe4cc1e837d7391241e2e047df10fa6101733dc120675dfe"
        );
        assert_eq!(format!("{d}"), d.to_hex());
        assert_eq!(Digest::from_hex(&d.to_hex().to_uppercase()).unwrap(), d);
        assert_eq!(d.to_hex().parse::<Digest>().unwrap(), d);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Digest::from_hex("").is_err());
        assert!(Digest::from_hex("abc").is_err());
        assert!(Digest::from_hex(&"zz".repeat(32)).is_err());
        let err = Digest::from_hex(&"00".repeat(33)).unwrap_err();
        assert_eq!(err.kind(), "invalid_digest");
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let low = Digest::from_bytes([0u8; DIGEST_LEN]);
        let mut high_bytes = [0u8; DIGEST_LEN];
        high_bytes[0] = 1;
        let high = Digest::from_bytes(high_bytes);
        let mut mid_bytes = [0u8; DIGEST_LEN];
        mid_bytes[31] = 0xff;
        let mid = Digest::from_bytes(mid_bytes);
        let mut v = vec![high, low, mid];
        v.sort();
        assert_eq!(v, vec![low, mid, high]);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let d = tagged_hash(Tag::Bool, b"1");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            "\"7dc96f776c8423e57a2785489a3f9c43fb6e756876d6ad9a9cac4aa4e72ec193\""
        );
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
