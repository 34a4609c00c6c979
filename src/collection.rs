//! Null-safe iteration primitives.
//!
//! Arrays iterate by index, objects by insertion-ordered key. A nullish or
//! non-iterable collection is treated as empty. Predicates and iteratees
//! receive `(value, index_or_key, collection)`.

use crate::value::Value;

/// Whether the predicate holds for every element. Vacuously true for empty
/// and nullish collections.
pub fn every(collection: &Value, predicate: &Value) -> bool {
    entries(collection)
        .into_iter()
        .all(|(key, value)| apply(predicate, &[value, key, collection.clone()]).truthy())
}

/// The elements for which the predicate holds, as a fresh array.
pub fn filter(collection: &Value, predicate: &Value) -> Value {
    let kept = entries(collection)
        .into_iter()
        .filter(|(key, value)| {
            apply(predicate, &[value.clone(), key.clone(), collection.clone()]).truthy()
        })
        .map(|(_, value)| value)
        .collect();
    Value::array(kept)
}

/// Fold the collection with `iteratee(accumulator, value, index_or_key)`.
///
/// Without an accumulator, the first element seeds the fold and iteration
/// starts at the second; an empty collection then yields `Undefined`.
pub fn reduce(collection: &Value, iteratee: &Value, accumulator: Option<Value>) -> Value {
    let mut iter = entries(collection).into_iter();
    let mut accumulated = match accumulator {
        Some(seed) => seed,
        None => match iter.next() {
            Some((_, value)) => value,
            None => return Value::Undefined,
        },
    };
    for (key, value) in iter {
        accumulated = apply(iteratee, &[accumulated, value, key, collection.clone()]);
    }
    accumulated
}

/// Snapshot the collection's entries so that user functions may mutate the
/// collection without tripping the `RefCell`.
fn entries(collection: &Value) -> Vec<(Value, Value)> {
    match collection {
        Value::Array(items) => items
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, value)| (Value::Number(i as f64), value.clone()))
            .collect(),
        Value::Object(map) => map
            .borrow()
            .iter()
            .map(|(key, value)| (Value::string(key.clone()), value.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Call a function value, falling back to the identity of the first argument
/// when the iteratee is not callable.
fn apply(f: &Value, args: &[Value]) -> Value {
    match f {
        Value::Function(f) => f(args),
        _ => args.first().cloned().unwrap_or(Value::Undefined),
    }
}
