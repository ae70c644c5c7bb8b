use itertools::Itertools;
use proptest::{
    collection::hash_set,
    prelude::{prop::collection::vec, *},
    sample::SizeRange,
};

/// Generates an arbitrary key sequence, duplicates included.
pub fn key_sequences(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<i64>> {
    vec(any::<i64>(), size)
}

/// Generates a sorted collection of distinct keys.
pub fn distinct_keys(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<i64>> {
    hash_set(any::<i64>(), size).prop_map(|keys| keys.into_iter().sorted().collect_vec())
}

/// Generates distinct keys in an arbitrary insertion order.
pub fn shuffled_distinct_keys(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<i64>> {
    distinct_keys(size).prop_shuffle()
}
