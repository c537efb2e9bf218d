#![allow(dead_code)]

use proptest::prelude::*;

/// Strategy for a single lower-case module path segment
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Strategy for dotted module paths with one to four segments
pub fn module_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=4).prop_map(|segments| segments.join("."))
}

/// Strategy for config class names with an upper-case initial
pub fn class_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,12}Config"
}

/// Strategy for a set of distinct config class names
pub fn class_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(class_name_strategy(), 0..6)
        .prop_map(|names| names.into_iter().collect())
}

/// Strategy for class names together with at least two of them to mark as default
pub fn conflicting_defaults_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::hash_set(class_name_strategy(), 2..6).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        (Just(names.clone()), prop::sample::subsequence(names, 2..=count))
    })
}
