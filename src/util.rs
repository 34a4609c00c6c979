//! Defaulting for nullish values.

use crate::value::Value;

/// The value itself unless it is nullish, in which case the default.
///
/// Falsy but non-nullish values (`NaN`, `0`, `false`, the empty string) are
/// kept.
pub fn default_to(value: &Value, default: &Value) -> Value {
    if value.is_nullish() {
        default.clone()
    } else {
        value.clone()
    }
}
