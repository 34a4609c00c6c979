//! Tolerant resolution of paths through nested values.

use crate::value::{format_number, Value};

/// Parse a path expression into its ordered key tokens.
///
/// Accepts a textual expression (`"a[0].b.c"`) or a pre-tokenized array whose
/// elements are strings or numbers. Returns `None` when the path is nullish,
/// of an unsupported type, or contains a non-scalar element; resolution then
/// falls back to the caller's default.
pub fn parse(path: &Value) -> Option<Vec<String>> {
    match path {
        Value::String(text) => Some(tokenize(text)),
        Value::Array(elements) => {
            let elements = elements.borrow();
            let mut tokens = Vec::with_capacity(elements.len());
            for element in elements.iter() {
                match element {
                    Value::String(s) => tokens.push(s.to_string()),
                    Value::Number(n) => tokens.push(format_number(*n)),
                    _ => return None,
                }
            }
            Some(tokens)
        }
        _ => None,
    }
}

/// Split a textual path on `.` and bracket pairs.
///
/// Bracket contents are taken literally, numeric-looking or not. Leading and
/// adjacent dots produce no empty tokens.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                tokens.push(inner);
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Resolve a path inside `root`, yielding `Undefined` on any miss.
pub fn get(root: &Value, path: &Value) -> Value {
    get_or(root, path, Value::Undefined)
}

/// Resolve a path inside `root`, yielding `default` on any miss.
///
/// Never fails: a nullish root, an unparsable path, a missing intermediate
/// and a final value that is literally `Undefined` all degrade to the
/// default. The last case makes "not found" and "found but undefined"
/// indistinguishable, which mirrors the reference behavior.
pub fn get_or(root: &Value, path: &Value, default: Value) -> Value {
    let Some(tokens) = parse(path) else {
        return default;
    };
    if root.is_nullish() {
        return default;
    }

    let mut current = root.clone();
    for token in &tokens {
        if current.is_nullish() {
            return default;
        }
        current = current.member(token);
    }

    if current.is_undefined() {
        default
    } else {
        current
    }
}
