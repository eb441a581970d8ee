// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shingle generation and set arithmetic.

use std::collections::HashSet;

use claimcheck::text::{shingle, NgramSet, DEFAULT_NGRAM_LENGTH};

#[test]
fn test_iphone_trigrams() {
    let set: HashSet<String> = shingle("iphone", 3).iter().map(String::from).collect();
    let expected: HashSet<String> = ["iph", "pho", "hon", "one"].map(String::from).into();
    assert_eq!(set, expected);
}

#[test]
fn test_banana_has_ana_once() {
    let grams = shingle("banana", DEFAULT_NGRAM_LENGTH);
    assert_eq!(grams.iter().filter(|g| *g == "ana").count(), 1);
}

#[test]
fn test_spaces_removed_before_windowing() {
    assert_eq!(shingle("iphone 13", 3), shingle("iphone13", 3));
    assert_eq!(
        shingle("iphone 13", 3).as_slice(),
        ["iph", "pho", "hon", "one", "ne1", "e13"]
    );
}

#[test]
fn test_one_substitution_keeps_overlap() {
    for (a, b) in [("iphone", "ifone"), ("mochila", "mochila"), ("carteira", "carteura")] {
        let sa = shingle(a, 3);
        let sb = shingle(b, 3);
        assert!(sa.jaccard(&sb) > 0.0, "{a} vs {b}");
    }
}

#[test]
fn test_jaccard_identity_and_disjoint() {
    let a = shingle("notebook", 3);
    assert_eq!(a.jaccard(&a), 1.0);
    assert_eq!(a.jaccard(&shingle("iphone", 3)), 0.0);
}

#[test]
fn test_short_form_matches_only_itself() {
    let short = shingle("tv", 3);
    assert_eq!(short.as_slice(), ["tv"]);
    assert_eq!(short.overlap(&shingle("TV!", 3)), 1);
    assert_eq!(short.overlap(&shingle("tvs", 3)), 0);
}

#[test]
fn test_set_insert_and_extend() {
    let mut set = NgramSet::new();
    assert!(set.insert("abc"));
    assert!(!set.insert("abc"));
    set.extend_from(&["bcd", "abc", "cde"].into_iter().collect());
    assert_eq!(set.as_slice(), ["abc", "bcd", "cde"]);
    assert!(set.contains("cde"));
    assert_eq!(set.len(), 3);
}
