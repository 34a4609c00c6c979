//! Memoization with pluggable stores and customizable key derivation.

use thiserror::Error;

use crate::cache::{default_store, CacheKey, CacheStore, StoreFactory};
use crate::value::{NativeFn, Value};

/// The target or resolver passed to [`memoize`] was not callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a function")]
pub struct InvalidArgument;

/// Wrap a function so that each distinct cache key is computed at most once.
///
/// The cache key of a call is the resolver's return value when a resolver is
/// given (verbatim, `Null` included), and the first argument otherwise. Keyed
/// results are served from the wrapper's store without invoking the target
/// again; mutating an object that already served as a key does not invalidate
/// its entry.
///
/// The wrapper binds the process-wide default store factory current at this
/// moment (see [`set_default_store`](crate::set_default_store)) and
/// instantiates its store lazily on first access.
pub fn memoize(target: &Value, resolver: Option<&Value>) -> Result<Memoized, InvalidArgument> {
    memoize_with(target, resolver, default_store())
}

/// Like [`memoize`], but with an explicit store factory instead of the
/// process-wide default.
pub fn memoize_with(
    target: &Value,
    resolver: Option<&Value>,
    factory: StoreFactory,
) -> Result<Memoized, InvalidArgument> {
    let Value::Function(target) = target else {
        return Err(InvalidArgument);
    };
    let resolver = match resolver {
        Some(Value::Function(resolver)) => Some(resolver.clone()),
        Some(_) => return Err(InvalidArgument),
        None => None,
    };
    Ok(Memoized {
        target: target.clone(),
        resolver,
        factory,
        store: None,
    })
}

/// A memoized function.
pub struct Memoized {
    /// The wrapped function.
    target: NativeFn,
    /// Derives cache keys from call arguments, if given.
    resolver: Option<NativeFn>,
    /// Bound at construction, used to instantiate the store on first access.
    factory: StoreFactory,
    /// The store, once accessed.
    store: Option<Box<dyn CacheStore>>,
}

impl Memoized {
    /// Invoke the wrapper.
    ///
    /// On a key hit the stored value is returned and the target is not
    /// invoked. On a miss the target runs with the full argument list and its
    /// result is stored. Failures of the target propagate unmodified.
    pub fn call(&mut self, args: &[Value]) -> Value {
        let key = match self.resolver.clone() {
            Some(resolver) => CacheKey::from(&resolver(args)),
            None => CacheKey::from(args.first().unwrap_or(&Value::Undefined)),
        };

        if self.cache().has(&key) {
            return self.cache().get(&key).unwrap_or(Value::Undefined);
        }

        let target = self.target.clone();
        let output = target(args);
        self.cache().set(key, output.clone());
        output
    }

    /// The wrapper's store, for pre-seeding or invalidating entries.
    ///
    /// Instantiated from the bound factory on first access.
    pub fn cache(&mut self) -> &mut dyn CacheStore {
        let factory = self.factory;
        self.store.get_or_insert_with(factory).as_mut()
    }

    /// Replace the wrapper's store wholesale.
    pub fn set_cache(&mut self, store: Box<dyn CacheStore>) {
        self.store = Some(store);
    }
}
