//! Partitioning and bounded extraction of arrays.

use crate::value::Value;

/// Split an array into chunks of `size` elements, the last possibly shorter.
///
/// `size` defaults to 1 when `Undefined` and is floored after numeric
/// coercion; a non-positive or unparsable size yields an empty result, as
/// does a nullish or non-array input.
pub fn chunk(array: &Value, size: &Value) -> Value {
    let size = if size.is_undefined() {
        1
    } else {
        let n = size.to_number();
        if n.is_finite() && n >= 1.0 {
            n.floor() as usize
        } else {
            0
        }
    };

    let Value::Array(items) = array else {
        return Value::array(Vec::new());
    };
    if size == 0 {
        return Value::array(Vec::new());
    }

    let items = items.borrow();
    let chunks = items.chunks(size).map(|c| Value::array(c.to_vec())).collect();
    Value::array(chunks)
}

/// Extract the elements from `start` up to, but not including, `end`.
///
/// Mirrors standard bounded-range extraction: negative offsets count from the
/// end, out-of-range offsets clamp, `start >= end` yields an empty array.
/// `Undefined` bounds default to the full range; a nullish or non-array input
/// yields an empty array.
pub fn slice(array: &Value, start: &Value, end: &Value) -> Value {
    let Value::Array(items) = array else {
        return Value::array(Vec::new());
    };
    let items = items.borrow();
    let len = items.len();

    let start = offset(start, 0, len);
    let end = offset(end, len, len);
    if start >= end {
        return Value::array(Vec::new());
    }
    Value::array(items[start..end].to_vec())
}

/// Coerce a bound to an index within `0..=len`, counting negative values
/// from the end.
fn offset(bound: &Value, fallback: usize, len: usize) -> usize {
    if bound.is_undefined() {
        return fallback;
    }
    let n = bound.to_number();
    let n = if n.is_nan() { 0.0 } else { n.trunc() };
    let index = if n < 0.0 {
        (len as f64 + n).max(0.0)
    } else {
        n.min(len as f64)
    };
    index as usize
}
