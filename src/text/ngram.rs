// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character shingles: the fuzzy-match unit.
//!
//! There is no edit-distance computation anywhere in this crate. Typo
//! tolerance falls out of shingle overlap: "iphone" and "ifone" share
//! `one` and `hon`, so they still intersect. One substituted character can
//! destroy at most `length` shingles, so a word of `2 * length` characters
//! or more always keeps some of them.
//!
//! Shingles span word boundaries (spaces are removed before windowing), so
//! "iphone 13" and "iphone13" produce the same set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::normalize;

/// Default shingle length (trigrams).
pub const DEFAULT_NGRAM_LENGTH: usize = 3;

/// An ordered set of shingles.
///
/// **Invariant**: no duplicates; iteration order is first-occurrence order.
/// Deserialization goes through `From<Vec<String>>`, so a stored list with
/// duplicates is deduplicated on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NgramSet {
    grams: Vec<String>,
    lookup: HashSet<String>,
}

impl NgramSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shingle. Returns false if it was already present.
    pub fn insert(&mut self, gram: impl Into<String>) -> bool {
        let gram = gram.into();
        if self.lookup.contains(&gram) {
            return false;
        }
        self.lookup.insert(gram.clone());
        self.grams.push(gram);
        true
    }

    /// Append every shingle of `other` not already present, keeping order.
    pub fn extend_from(&mut self, other: &Self) {
        for gram in &other.grams {
            self.insert(gram.as_str());
        }
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    pub fn contains(&self, gram: &str) -> bool {
        self.lookup.contains(gram)
    }

    /// Shingles in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grams.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.grams
    }

    /// Shingles present in both sets, in `self`'s order.
    pub fn intersection<'a>(&'a self, other: &Self) -> Vec<&'a str> {
        self.iter().filter(|gram| other.contains(gram)).collect()
    }

    /// Size of the intersection.
    pub fn overlap(&self, other: &Self) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|gram| large.contains(gram)).count()
    }

    /// Jaccard similarity |A ∩ B| / |A ∪ B|. Two empty sets score 0.
    pub fn jaccard(&self, other: &Self) -> f64 {
        let shared = self.overlap(other);
        let union = self.len() + other.len() - shared;
        if union == 0 {
            0.0
        } else {
            shared as f64 / union as f64
        }
    }
}

impl<S: Into<String>> FromIterator<S> for NgramSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for gram in iter {
            set.insert(gram);
        }
        set
    }
}

impl From<Vec<String>> for NgramSet {
    fn from(grams: Vec<String>) -> Self {
        grams.into_iter().collect()
    }
}

impl From<NgramSet> for Vec<String> {
    fn from(set: NgramSet) -> Self {
        set.grams
    }
}

impl<'a> IntoIterator for &'a NgramSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.grams.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

/// Normalize `text` and cut it into shingles of `length` characters.
///
/// - Spaces are removed before windowing, so shingles cross word boundaries.
/// - If the space-stripped text is shorter than `length`, the whole
///   normalized string (spaces kept) becomes the only shingle, so very short
///   titles like "ab" still participate. Empty text gives an empty set.
/// - A `length` of zero gives an empty set.
///
/// ```
/// use claimcheck::shingle;
///
/// let set = shingle("iPhone", 3);
/// let grams: Vec<&str> = set.iter().collect();
/// assert_eq!(grams, ["iph", "pho", "hon", "one"]);
/// ```
pub fn shingle(text: &str, length: usize) -> NgramSet {
    shingle_normalized(&normalize(text), length)
}

/// Shingle text that is already normalized.
///
/// Used by the projection, which has the normalized title in hand and
/// should not fold it twice.
pub fn shingle_normalized(normalized: &str, length: usize) -> NgramSet {
    if length == 0 {
        return NgramSet::new();
    }

    let chars: Vec<char> = normalized.chars().filter(|c| *c != ' ').collect();
    if chars.len() < length {
        // INVARIANT: short non-empty input is kept whole, spaces included
        return if normalized.is_empty() {
            NgramSet::new()
        } else {
            std::iter::once(normalized).collect()
        };
    }

    chars
        .windows(length)
        .map(|window| window.iter().collect::<String>())
        .collect()
}
