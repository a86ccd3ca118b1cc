//! The string-keyed container backing `Value::Mapping`.
//!
//! With the `indexmap` feature (enabled by default) keys keep the order in
//! which the querystring first wrote them. Without it, keys are sorted.

#[cfg(feature = "indexmap")]
pub use indexmap::map::Entry;
#[cfg(feature = "indexmap")]
pub type Map<K, V> = indexmap::IndexMap<K, V>;

#[cfg(not(feature = "indexmap"))]
pub use std::collections::btree_map::Entry;
#[cfg(not(feature = "indexmap"))]
pub type Map<K, V> = std::collections::BTreeMap<K, V>;
