//! Arithmetic over loose values.

use crate::value::Value;

/// Add two loose values.
///
/// `add(Undefined, x)` is `x`; two `Undefined` operands yield `0`.
pub fn add(a: &Value, b: &Value) -> Value {
    operation(a, b, |x, y| x + y, 0.0)
}

/// Divide two loose values.
///
/// Division by zero follows IEEE semantics. `divide(Undefined, x)` is `x`;
/// two `Undefined` operands yield `1`.
pub fn divide(a: &Value, b: &Value) -> Value {
    operation(a, b, |x, y| x / y, 1.0)
}

/// An `Undefined` operand stands in for the operation's identity: the other
/// operand is returned verbatim, uncoerced. Otherwise both sides coerce to
/// numbers.
fn operation(
    a: &Value,
    b: &Value,
    op: impl FnOnce(f64, f64) -> f64,
    identity: f64,
) -> Value {
    match (a.is_undefined(), b.is_undefined()) {
        (true, true) => Value::Number(identity),
        (true, false) => b.clone(),
        (false, true) => a.clone(),
        (false, false) => Value::Number(op(a.to_number(), b.to_number())),
    }
}
