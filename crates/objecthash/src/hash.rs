//! Recursive value-to-digest transform.
//!
//! # Combinators
//!
//! ```text
//! list = H('l' || h(e0) || h(e1) || ...)             original order
//! set  = H('s' || sorted, deduplicated h(e)...)      order and duplicates ignored
//! dict = H('d' || h(k) || h(v) || ...)               pairs sorted by h(k)
//! ```
//!
//! Scalars hash their canonical payload under their own tag. A native `Int`
//! and a native `Float` of equal value hash differently; only the common
//! JSON path (or [`Value::commonize`]) unifies them.

use crate::digest::{tagged_hash, Digest, Tag, DIGEST_LEN};
use crate::error::Result;
use crate::float;
use crate::options::HashOptions;
use crate::redact::parse_marker;
use crate::value::Value;

/// Hashes values according to a fixed set of [`HashOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectHasher {
    options: HashOptions,
}

impl ObjectHasher {
    pub fn new(options: HashOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> HashOptions {
        self.options
    }

    /// Digest of any value.
    ///
    /// Recursion depth equals the nesting depth of `value`.
    pub fn hash(&self, value: &Value) -> Result<Digest> {
        match value {
            Value::Null => Ok(hash_null()),
            Value::Bool(b) => Ok(hash_bool(*b)),
            Value::Int(i) => Ok(hash_int(*i)),
            Value::Float(f) => hash_float(*f),
            Value::String(s) => self.hash_str(s),
            Value::List(items) => self.hash_list(items),
            Value::Set(items) => self.hash_set(items),
            Value::Dict(entries) => self.hash_dict(entries.iter().map(|(k, v)| (k.as_str(), v))),
            Value::Redacted(digest) => Ok(*digest),
        }
    }

    pub fn hash_list(&self, items: &[Value]) -> Result<Digest> {
        let mut buf = Vec::with_capacity(items.len() * DIGEST_LEN);
        for item in items {
            buf.extend_from_slice(self.hash(item)?.as_ref());
        }
        Ok(tagged_hash(Tag::List, &buf))
    }

    /// Set digest: element digests sorted and deduplicated.
    ///
    /// Elements with equal digests contribute once, so `{a, a, b}` and
    /// `{a, b}` hash the same. This is the only place set semantics exist.
    pub fn hash_set(&self, items: &[Value]) -> Result<Digest> {
        let mut digests = items
            .iter()
            .map(|item| self.hash(item))
            .collect::<Result<Vec<_>>>()?;
        digests.sort_unstable();
        digests.dedup();

        let mut buf = Vec::with_capacity(digests.len() * DIGEST_LEN);
        for digest in &digests {
            buf.extend_from_slice(digest.as_ref());
        }
        Ok(tagged_hash(Tag::Set, &buf))
    }

    /// Dict digest over `(key, value)` pairs in any order.
    ///
    /// Pairs are sorted by key digest; ties keep iteration order.
    pub fn hash_dict<'a, I>(&self, entries: I) -> Result<Digest>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut pairs = entries
            .into_iter()
            .map(|(k, v)| Ok((self.hash_str(k)?, self.hash(v)?)))
            .collect::<Result<Vec<(Digest, Digest)>>>()?;
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut buf = Vec::with_capacity(pairs.len() * 2 * DIGEST_LEN);
        for (key, value) in &pairs {
            buf.extend_from_slice(key.as_ref());
            buf.extend_from_slice(value.as_ref());
        }
        Ok(tagged_hash(Tag::Dict, &buf))
    }

    /// String digest, honouring redaction markers when enabled.
    pub fn hash_str(&self, s: &str) -> Result<Digest> {
        if self.options.redaction_markers {
            if let Some(redacted) = parse_marker(s) {
                return redacted;
            }
        }
        Ok(hash_unicode(s))
    }
}

pub fn hash_null() -> Digest {
    tagged_hash(Tag::Null, b"")
}

pub fn hash_bool(b: bool) -> Digest {
    tagged_hash(Tag::Bool, if b { b"1" } else { b"0" })
}

pub fn hash_int(i: i128) -> Digest {
    tagged_hash(Tag::Int, i.to_string().as_bytes())
}

pub fn hash_float(f: f64) -> Result<Digest> {
    Ok(tagged_hash(Tag::Float, float::normalize(f)?.as_bytes()))
}

/// Raw UTF-8 bytes, no Unicode normalization.
pub fn hash_unicode(s: &str) -> Digest {
    tagged_hash(Tag::Unicode, s.as_bytes())
}

/// Digest of `value` with default options.
///
/// # Example
///
/// ```
/// use objecthash::{object_hash, Value};
///
/// let digest = object_hash(&Value::list(["foo", "bar"])).unwrap();
/// assert_eq!(
///     digest.to_hex(),
///     "32ae896c413cfdc79eec68be9139c86ded8b279238467c216cf2bec4d5f1e4a2"
/// );
/// ```
pub fn object_hash(value: &Value) -> Result<Digest> {
    ObjectHasher::default().hash(value)
}

pub fn hash_list(items: &[Value]) -> Result<Digest> {
    ObjectHasher::default().hash_list(items)
}

pub fn hash_set(items: &[Value]) -> Result<Digest> {
    ObjectHasher::default().hash_set(items)
}

pub fn hash_dict<'a, I>(entries: I) -> Result<Digest>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    ObjectHasher::default().hash_dict(entries)
}
