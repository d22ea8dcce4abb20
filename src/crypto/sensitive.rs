// src/crypto/sensitive.rs
use crate::consts::SENSITIVE_FIELDS;

/// Exact membership test; no prefix or pattern matching
pub fn is_sensitive_field(key: &str) -> bool {
    SENSITIVE_FIELDS.contains(&key)
}

/// Sorted list of every key encrypted at rest
pub fn sensitive_fields() -> Vec<&'static str> {
    let mut fields = SENSITIVE_FIELDS.to_vec();
    fields.sort_unstable();
    fields
}
