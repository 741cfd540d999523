//! Hashing options.

use serde::Deserialize;

/// Behaviour switches for [`ObjectHasher`](crate::hash::ObjectHasher).
///
/// Deserializes from partial configs: absent fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashOptions {
    /// Treat `**REDACTED**<hex>` strings (keys and values) as stand-ins for
    /// the embedded digest.
    pub redaction_markers: bool,
}

impl HashOptions {
    pub fn with_redaction_markers(mut self, enabled: bool) -> Self {
        self.redaction_markers = enabled;
        self
    }
}
