//! Tolerant path resolution and configurable memoization for loosely-typed
//! values.
//!
//! The crate models the dynamic data it operates on as a [`Value`] sum type
//! and provides two core facilities on top of it:
//!
//! - [`get`] / [`get_or`] resolve a textual or pre-tokenized path through
//!   arbitrarily nested values, degrading to a default on any miss instead of
//!   failing.
//! - [`memoize`] wraps a function value with a pluggable [`CacheStore`] and a
//!   customizable key derivation, computing each distinct key at most once.
//!
//! ```
//! use loosely::{get, Value};
//!
//! let object = Value::object([(
//!     "a",
//!     Value::array(vec![Value::object([(
//!         "b",
//!         Value::object([("c", Value::from(3))]),
//!     )])]),
//! )]);
//!
//! assert_eq!(get(&object, &Value::from("a[0].b.c")), Value::from(3));
//! assert_eq!(get(&object, &Value::from("a[1].b.c")), Value::Undefined);
//! ```
//!
//! A handful of loose-value companions (`add`, `divide`, `chunk`, `slice`,
//! `every`, `filter`, `reduce`, `default_to`) round out the toolkit.

mod array;
mod cache;
mod collection;
mod math;
mod memoize;
mod path;
mod util;
mod value;

pub use crate::array::{chunk, slice};
pub use crate::cache::{set_default_store, CacheKey, CacheStore, EqualityMap, StoreFactory};
pub use crate::collection::{every, filter, reduce};
pub use crate::math::{add, divide};
pub use crate::memoize::{memoize, memoize_with, InvalidArgument, Memoized};
pub use crate::path::{get, get_or, parse};
pub use crate::util::default_to;
pub use crate::value::{NativeFn, Properties, Value};
