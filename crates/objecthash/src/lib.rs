//! Order-independent, kind-preserving digests of structured data.
//!
//! Two representations that differ only in map key order, set element order,
//! or (through the common JSON path) integer-vs-float spelling of the same
//! number always produce the same digest. Values of different kinds never
//! share one: an empty list, an empty set, an empty dict and null all hash
//! differently.
//!
//! ```
//! use objecthash::{common_json_hash, object_hash, Value};
//!
//! let from_json = common_json_hash(r#"["foo", "bar"]"#).unwrap();
//! let native = object_hash(&Value::list(["foo", "bar"])).unwrap();
//! assert_eq!(from_json, native);
//! assert_eq!(
//!     native.to_hex(),
//!     "32ae896c413cfdc79eec68be9139c86ded8b279238467c216cf2bec4d5f1e4a2"
//! );
//! ```
//!
//! Hashing is pure and synchronous; independent calls may run concurrently.

pub mod digest;
pub mod error;
pub mod fixture;
pub mod float;
pub mod hash;
pub mod json;
pub mod options;
pub mod redact;
pub mod value;

// Convenience re-exports
pub use digest::{tagged_hash, Digest, Tag, DIGEST_LEN};
pub use error::{FloatGuard, ObjectHashError, Result};
pub use fixture::{FixtureError, GoldenCase, GoldenCases, GoldenOutcome};
pub use hash::{hash_dict, hash_list, hash_set, object_hash, ObjectHasher};
pub use json::{
    common_json_hash, common_jsonify, common_redacted_json_hash, json_hash, json_hash_with,
    parse_json,
};
pub use options::HashOptions;
pub use redact::{redactable, redaction_marker, unredactable, REDACTED_PREFIX};
pub use value::{JsonMode, Value, ValueKind};
