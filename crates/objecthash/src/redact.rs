//! Redaction support.
//!
//! Because a container's digest depends only on its children's digests, any
//! subtree can be replaced by its digest ([`Value::Redacted`]) without
//! changing the digest of the whole. Two helpers build on that:
//!
//! - Marker strings, `**REDACTED**<64 hex>`, carry a redacted digest through
//!   plain JSON. They are honoured only when
//!   [`HashOptions::redaction_markers`](crate::options::HashOptions) is set.
//! - The redactable form salts every leaf with a random nonce so that a
//!   redacted low-entropy leaf (a boolean, a small integer) cannot be
//!   recovered by guessing.

use crate::digest::Digest;
use crate::error::{ObjectHashError, Result};
use crate::hash::object_hash;
use crate::value::Value;
use rand::RngCore;

/// Prefix of a redaction marker string.
pub const REDACTED_PREFIX: &str = "**REDACTED**";

/// Length of the hex nonce used by [`redactable`].
pub const NONCE_HEX_LEN: usize = 64;

/// Marker string standing in for `digest`.
pub fn redaction_marker(digest: &Digest) -> String {
    format!("{REDACTED_PREFIX}{digest}")
}

/// Digest carried by a marker string.
///
/// `None` when `s` is not a marker at all; `Some(Err(..))` when it has the
/// marker prefix but no valid digest after it.
pub fn parse_marker(s: &str) -> Option<Result<Digest>> {
    let payload = s.strip_prefix(REDACTED_PREFIX)?;
    let parsed = Digest::from_hex(payload).map_err(|_| ObjectHashError::InvalidRedaction {
        marker: s.to_string(),
    });
    if let Ok(digest) = &parsed {
        tracing::trace!(%digest, "redaction marker substituted");
    }
    Some(parsed)
}

impl Value {
    /// The redacted stand-in for this value.
    pub fn redact(&self) -> Result<Value> {
        Ok(Value::Redacted(object_hash(self)?))
    }

    /// Replace every string that is a redaction marker with the digest it
    /// carries. Dict keys cannot hold digests and are left alone; hash with
    /// marker-aware options to honour markers in keys.
    pub fn resolve_markers(self) -> Result<Value> {
        Ok(match self {
            Value::String(s) => match parse_marker(&s) {
                Some(digest) => Value::Redacted(digest?),
                None => Value::String(s),
            },
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::resolve_markers)
                    .collect::<Result<_>>()?,
            ),
            Value::Set(items) => Value::Set(
                items
                    .into_iter()
                    .map(Value::resolve_markers)
                    .collect::<Result<_>>()?,
            ),
            Value::Dict(entries) => Value::Dict(
                entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, v.resolve_markers()?)))
                    .collect::<Result<_>>()?,
            ),
            other => other,
        })
    }
}

/// Salt `value` so that each leaf can be redacted independently.
///
/// Every leaf becomes `[nonce, leaf]` and every dict key gets a nonce
/// prefix. Already-redacted subtrees are kept as they are.
pub fn redactable<R: RngCore + ?Sized>(value: &Value, rng: &mut R) -> Value {
    match value {
        Value::List(items) => Value::List(items.iter().map(|v| redactable(v, rng)).collect()),
        Value::Set(items) => Value::Set(items.iter().map(|v| redactable(v, rng)).collect()),
        Value::Dict(entries) => Value::Dict(
            entries
                .iter()
                .map(|(k, v)| (format!("{}{}", nonce(rng), k), redactable(v, rng)))
                .collect(),
        ),
        Value::Redacted(_) => value.clone(),
        leaf => Value::List(vec![Value::String(nonce(rng)), leaf.clone()]),
    }
}

/// Strip the salt added by [`redactable`].
///
/// A two-element list whose first element is a nonce-shaped string and
/// whose second is a leaf is taken to be a salted leaf. A genuine list of
/// that shape is indistinguishable and is unwrapped too.
pub fn unredactable(value: &Value) -> Value {
    match value {
        Value::List(items) => match items.as_slice() {
            [Value::String(salt), leaf] if is_nonce(salt) && leaf.is_leaf() => leaf.clone(),
            _ => Value::List(items.iter().map(unredactable).collect()),
        },
        Value::Set(items) => Value::Set(items.iter().map(unredactable).collect()),
        Value::Dict(entries) => Value::Dict(
            entries
                .iter()
                .map(|(k, v)| {
                    let key = match k.get(..NONCE_HEX_LEN) {
                        Some(prefix) if is_nonce(prefix) => k[NONCE_HEX_LEN..].to_string(),
                        _ => k.clone(),
                    };
                    (key, unredactable(v))
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

fn nonce<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; NONCE_HEX_LEN / 2];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn is_nonce(s: &str) -> bool {
    s.len() == NONCE_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}
