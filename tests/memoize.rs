use std::cell::Cell;
use std::rc::Rc;

use loosely::{memoize, CacheKey, Value};

/// A `values`-like function that records how often it actually runs.
fn counted_values(counter: Rc<Cell<usize>>) -> Value {
    Value::function(move |args| {
        counter.set(counter.get() + 1);
        match args.first() {
            Some(Value::Object(map)) => {
                Value::array(map.borrow().values().cloned().collect())
            }
            _ => Value::array(Vec::new()),
        }
    })
}

/// A three-argument sum that records how often it actually runs.
fn counted_sum(counter: Rc<Cell<usize>>) -> Value {
    Value::function(move |args| {
        counter.set(counter.get() + 1);
        Value::from(args.iter().map(Value::to_number).sum::<f64>())
    })
}

fn set_property(object: &Value, key: &str, value: Value) {
    if let Value::Object(map) = object {
        map.borrow_mut().insert(key.into(), value);
    }
}

#[test]
fn computes_each_object_key_at_most_once() {
    let counter = Rc::new(Cell::new(0));
    let mut values = memoize(&counted_values(counter.clone()), None).unwrap();

    let object = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
    let other = Value::object([("c", Value::from(3)), ("d", Value::from(4))]);

    assert_eq!(
        values.call(&[object.clone()]),
        Value::array(vec![Value::from(1), Value::from(2)]),
    );
    assert_eq!(
        values.call(&[other.clone()]),
        Value::array(vec![Value::from(3), Value::from(4)]),
    );
    assert_eq!(counter.get(), 2);

    // Mutating an object that already served as a key does not invalidate
    // its entry: the stale result is served and the target stays cold.
    set_property(&object, "a", Value::from(2));
    assert_eq!(
        values.call(&[object.clone()]),
        Value::array(vec![Value::from(1), Value::from(2)]),
    );
    assert_eq!(counter.get(), 2);

    // Entries seeded directly through the exposed store win.
    values.cache().set(
        CacheKey::from(&object),
        Value::array(vec![Value::from("a"), Value::from("b")]),
    );
    assert_eq!(
        values.call(&[object]),
        Value::array(vec![Value::from("a"), Value::from("b")]),
    );
    assert_eq!(counter.get(), 2);
}

#[test]
fn rejects_non_callable_targets() {
    assert!(memoize(&Value::from(true), None).is_err());
    assert!(memoize(&Value::Null, None).is_err());
    assert!(memoize(&Value::from(1), None).is_err());
}

#[test]
fn rejects_non_callable_resolvers() {
    let target = Value::function(|_| Value::Undefined);
    assert!(memoize(&target, Some(&Value::from("nope"))).is_err());
}

#[test]
fn resolver_derives_keys_from_all_arguments() {
    let counter = Rc::new(Cell::new(0));
    let resolver = Value::function(|args| {
        let joined: Vec<String> = args.iter().map(Value::to_string).collect();
        Value::from(joined.join("_"))
    });
    let mut adder = memoize(&counted_sum(counter.clone()), Some(&resolver)).unwrap();

    let args = [Value::from(1), Value::from(2), Value::from(3)];
    assert_eq!(adder.call(&args), Value::from(6));
    assert_eq!(adder.call(&args), Value::from(6));
    assert_eq!(counter.get(), 1);

    // Overwriting the derived key through the store changes the result of
    // subsequent calls without running the target.
    adder.cache().set(CacheKey::from(&Value::from("1_2_3")), Value::from(123));
    assert_eq!(adder.call(&args), Value::from(123));
    assert_eq!(counter.get(), 1);
}

#[test]
fn resolver_may_return_null_as_a_key() {
    let counter = Rc::new(Cell::new(0));
    let resolver = Value::function(|args| {
        if args.is_empty() {
            Value::Null
        } else {
            Value::array(args.to_vec())
        }
    });
    let mut values = memoize(&counted_values(counter.clone()), Some(&resolver)).unwrap();

    let object = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
    assert_eq!(
        values.call(&[object]),
        Value::array(vec![Value::from(1), Value::from(2)]),
    );
    assert_eq!(values.call(&[]), Value::array(Vec::new()));

    values.cache().set(CacheKey::Null, Value::from("empty"));
    assert_eq!(values.call(&[]), Value::from("empty"));
}

#[test]
fn no_arguments_key_as_undefined() {
    let counter = Rc::new(Cell::new(0));
    let mut nullary = memoize(&counted_sum(counter.clone()), None).unwrap();

    assert_eq!(nullary.call(&[]), Value::from(0));
    assert_eq!(nullary.call(&[]), Value::from(0));
    assert_eq!(counter.get(), 1);
    assert!(nullary.cache().has(&CacheKey::Undefined));
}

#[test]
fn primitive_keys_compare_by_value() {
    let counter = Rc::new(Cell::new(0));
    let mut double = memoize(
        &{
            let counter = counter.clone();
            Value::function(move |args| {
                counter.set(counter.get() + 1);
                Value::from(args[0].to_number() * 2.0)
            })
        },
        None,
    )
    .unwrap();

    assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
    assert_eq!(double.call(&[Value::from(2)]), Value::from(4));
    assert_eq!(double.call(&[Value::from(4)]), Value::from(8));
    assert_eq!(counter.get(), 2);
}

#[test]
fn deleting_an_entry_forces_recomputation() {
    let counter = Rc::new(Cell::new(0));
    let mut values = memoize(&counted_values(counter.clone()), None).unwrap();

    let object = Value::object([("a", Value::from(1))]);
    values.call(&[object.clone()]);
    assert!(values.cache().delete(&CacheKey::from(&object)));
    values.call(&[object]);
    assert_eq!(counter.get(), 2);
}
