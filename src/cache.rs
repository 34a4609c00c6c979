//! Pluggable key/value stores backing memoization.

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::value::{NativeFn, Properties, Value};

/// The process-wide factory for the stores of freshly created memoizers.
///
/// `None` means the built-in [`EqualityMap`]. Only the factory lives behind
/// the lock; the stores it produces are ordinary single-threaded values.
static DEFAULT_STORE: RwLock<Option<StoreFactory>> = RwLock::new(None);

/// Constructs an empty cache store.
pub type StoreFactory = fn() -> Box<dyn CacheStore>;

/// Select the store implementation that future memoizers instantiate.
///
/// Passing `None` restores the built-in [`EqualityMap`]. Memoizers bind the
/// factory current at their construction; already constructed ones are
/// unaffected.
pub fn set_default_store(factory: Option<StoreFactory>) {
    *DEFAULT_STORE.write() = factory;
}

/// The currently configured default store factory.
pub(crate) fn default_store() -> StoreFactory {
    DEFAULT_STORE.read().unwrap_or(equality_map)
}

fn equality_map() -> Box<dyn CacheStore> {
    Box::new(EqualityMap::new())
}

/// A minimal key/value store.
///
/// Implementations may organize storage however they like; callers never
/// assume that `has`, `get` and `set` share state, so each call stands on
/// its own.
pub trait CacheStore {
    /// Whether an entry exists for `key`.
    fn has(&self, key: &CacheKey) -> bool;

    /// The entry for `key`, if any.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Insert or replace the entry for `key`, returning the store for
    /// chaining.
    fn set(&mut self, key: CacheKey, value: Value) -> &mut dyn CacheStore;

    /// Remove the entry for `key`, reporting whether one existed.
    fn delete(&mut self, key: &CacheKey) -> bool;
}

/// A cache key.
///
/// A single store may mix key types freely: primitives compare by value
/// (numbers by same-value-zero, so `NaN` keys match and `-0` equals `0`),
/// while arrays, objects and functions compare by reference identity. `Null`
/// and `Undefined` are ordinary keys.
#[derive(Clone)]
pub enum CacheKey {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<Properties>>),
    Function(NativeFn),
}

impl From<&Value> for CacheKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Undefined => Self::Undefined,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(*n),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(rc) => Self::Array(rc.clone()),
            Value::Object(rc) => Self::Object(rc.clone()),
            Value::Function(rc) => Self::Function(rc.clone()),
        }
    }
}

/// Bit pattern for same-value-zero comparison: all zeros collapse to `+0`
/// and all NaNs to one canonical NaN.
fn canonical_bits(n: f64) -> u64 {
    if n == 0.0 {
        0
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Undefined, Self::Undefined) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => {
                canonical_bits(*a) == canonical_bits(*b)
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null | Self::Undefined => {}
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => canonical_bits(*n).hash(state),
            Self::String(s) => s.hash(state),
            Self::Array(rc) => (Rc::as_ptr(rc) as usize).hash(state),
            Self::Object(rc) => (Rc::as_ptr(rc) as usize).hash(state),
            Self::Function(rc) => (Rc::as_ptr(rc) as *const () as usize).hash(state),
        }
    }
}

impl Debug for CacheKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Null => f.pad("null"),
            Self::Undefined => f.pad("undefined"),
            Self::Bool(b) => Debug::fmt(b, f),
            Self::Number(n) => Debug::fmt(n, f),
            Self::String(s) => Debug::fmt(s, f),
            Self::Array(rc) => write!(f, "Array({:p})", Rc::as_ptr(rc)),
            Self::Object(rc) => write!(f, "Object({:p})", Rc::as_ptr(rc)),
            Self::Function(_) => f.pad("Function(..)"),
        }
    }
}

/// The built-in store: an insertion-ordered, equality-keyed map.
#[derive(Default)]
pub struct EqualityMap {
    map: IndexMap<CacheKey, Value, FxBuildHasher>,
}

impl EqualityMap {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl CacheStore for EqualityMap {
    fn has(&self, key: &CacheKey) -> bool {
        self.map.contains_key(key)
    }

    fn get(&self, key: &CacheKey) -> Option<Value> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: CacheKey, value: Value) -> &mut dyn CacheStore {
        self.map.insert(key, value);
        self
    }

    fn delete(&mut self, key: &CacheKey) -> bool {
        // Preserves the insertion order of the remaining entries.
        self.map.shift_remove(key).is_some()
    }
}
