use std::cell::RefCell;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// A native function operating on loose values.
///
/// Functions receive the full argument list of a call and always produce a
/// value. Identity is pointer identity.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Value>;

/// An insertion-ordered property map.
pub type Properties = IndexMap<String, Value, FxBuildHasher>;

/// A loosely-typed value.
///
/// Composite values (`Array`, `Object`) are shared and interiorly mutable so
/// that reference identity and caller-visible mutation behave like they do in
/// the dynamic data model this crate targets. Cloning a composite clones the
/// handle, not the contents.
#[derive(Clone)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<Properties>>),
    Function(NativeFn),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Self::String(s.into())
    }

    /// Create an array value from its elements.
    pub fn array(items: Vec<Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(items)))
    }

    /// Create an object value from key/value pairs, preserving their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::Object(Rc::new(RefCell::new(map)))
    }

    /// Create a function value.
    pub fn function(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self::Function(Rc::new(f))
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this is `Null` or `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Loose truthiness: `Null`, `Undefined`, `false`, `0`, `NaN` and the
    /// empty string are falsy, everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null | Self::Undefined => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Loose numeric coercion.
    ///
    /// `Null` is zero, booleans are zero or one, strings are trimmed and
    /// parsed (the empty string is zero, garbage is NaN). Arrays defer to
    /// their single element, or are zero when empty and NaN otherwise.
    /// Everything else is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Null => 0.0,
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Array(items) => {
                let items = items.borrow();
                match items.as_slice() {
                    [] => 0.0,
                    [single] => single.to_number(),
                    _ => f64::NAN,
                }
            }
            _ => f64::NAN,
        }
    }

    /// Look up a member by string key.
    ///
    /// Objects are looked up by property name, arrays by the numeric reading
    /// of the key. Everything else, including a missing member, yields
    /// `Undefined`.
    pub fn member(&self, key: &str) -> Value {
        match self {
            Self::Object(map) => {
                map.borrow().get(key).cloned().unwrap_or(Value::Undefined)
            }
            Self::Array(items) => match key.parse::<usize>() {
                Ok(index) => {
                    items.borrow().get(index).cloned().unwrap_or(Value::Undefined)
                }
                Err(_) => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }
}

/// Render a number the way the dynamic data model does: integral values
/// without a fractional part, non-finite values by name.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".into()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).into()
    } else if n == n.trunc() && n.abs() < 9.007_199_254_740_992e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Undefined => f.pad("undefined"),
            Self::Bool(b) => Display::fmt(b, f),
            Self::Number(n) => f.pad(&format_number(*n)),
            Self::String(s) => f.pad(s),
            Self::Array(items) => {
                // Arrays stringify as their comma-joined elements, with
                // nullish elements rendered empty.
                let items = items.borrow();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_nullish() {
                        Display::fmt(item, f)?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.pad("[object Object]"),
            Self::Function(_) => f.pad("[object Function]"),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Undefined => f.pad("undefined"),
            Self::Bool(b) => Debug::fmt(b, f),
            Self::Number(n) => Debug::fmt(n, f),
            Self::String(s) => Debug::fmt(s, f),
            Self::Array(items) => f.debug_list().entries(items.borrow().iter()).finish(),
            Self::Object(map) => f.debug_map().entries(map.borrow().iter()).finish(),
            Self::Function(_) => f.pad("Function(..)"),
        }
    }
}

// Deep structural equality for primitives and containers, pointer identity
// for functions. Used by assertions, not by cache keying (see `CacheKey`).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Undefined, Self::Undefined) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Self::Object(a), Self::Object(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}
