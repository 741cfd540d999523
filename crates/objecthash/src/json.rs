//! JSON adapters.
//!
//! Common JSON is the value space reached by a JSON round trip, where every
//! number is a float. Hashing through it makes `1` and `1.0` equivalent,
//! which native hashing deliberately does not.

use crate::digest::Digest;
use crate::error::{ObjectHashError, Result};
use crate::hash::ObjectHasher;
use crate::options::HashOptions;
use crate::value::{JsonMode, Value};
use serde::Serialize;

/// Decode JSON text into a [`Value`].
pub fn parse_json(text: &[u8], mode: JsonMode) -> Result<Value> {
    let json: serde_json::Value =
        serde_json::from_slice(text).map_err(ObjectHashError::JsonSyntax)?;
    Value::from_json(json, mode)
}

/// Digest of JSON text under `mode` with explicit options.
pub fn json_hash_with(text: &[u8], mode: JsonMode, options: HashOptions) -> Result<Digest> {
    tracing::debug!(bytes = text.len(), ?mode, ?options, "hashing JSON document");
    let value = parse_json(text, mode)?;
    ObjectHasher::new(options).hash(&value)
}

pub fn json_hash(text: impl AsRef<[u8]>, mode: JsonMode) -> Result<Digest> {
    json_hash_with(text.as_ref(), mode, HashOptions::default())
}

/// Digest of JSON text in common form.
///
/// # Example
///
/// ```
/// use objecthash::common_json_hash;
///
/// let a = common_json_hash(r#"{"k1":"v1","k2":"v2","k3":"v3"}"#).unwrap();
/// let b = common_json_hash(r#"{"k2":"v2","k1":"v1","k3":"v3"}"#).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(common_json_hash("1").unwrap(), common_json_hash("1.0").unwrap());
/// ```
pub fn common_json_hash(text: impl AsRef<[u8]>) -> Result<Digest> {
    json_hash(text, JsonMode::Common)
}

/// Like [`common_json_hash`], with `**REDACTED**<hex>` strings standing in
/// for the digests they carry.
pub fn common_redacted_json_hash(text: impl AsRef<[u8]>) -> Result<Digest> {
    json_hash_with(
        text.as_ref(),
        JsonMode::Common,
        HashOptions::default().with_redaction_markers(true),
    )
}

/// Normalize a native value by encoding it as JSON and decoding the text in
/// common form.
///
/// Types that have no JSON encoding (maps with non-string keys, values whose
/// `Serialize` impl refuses) fail with `UnsupportedType`. Note that
/// `serde_json` encodes non-finite floats of ordinary Rust types as `null`.
pub fn common_jsonify<T: Serialize + ?Sized>(native: &T) -> Result<Value> {
    let text = serde_json::to_vec(native)
        .map_err(|e| ObjectHashError::UnsupportedType(e.to_string()))?;
    parse_json(&text, JsonMode::Common)
}
