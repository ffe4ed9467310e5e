use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Insertion ordered set, same hashing as `FxIndexMap`
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
