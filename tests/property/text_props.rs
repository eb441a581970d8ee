// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Folding and shingling properties.
//!
//! strsim serves as the edit-distance oracle: shingle overlap is how typos
//! are tolerated, so a single edit must never make two words disjoint once
//! the word is long enough.

use proptest::prelude::*;

use claimcheck::text::is_normalized;
use claimcheck::{normalize, shingle};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Latin text with accents, digits and punctuation (no × or ÷).
fn listing_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9À-ÖØ-öø-ÿ ,.!?@#()-]{0,40}").unwrap()
}

/// A lowercase word and a copy with exactly one letter substituted.
fn word_with_typo() -> impl Strategy<Value = (String, String)> {
    prop::string::string_regex("[a-z]{6,14}")
        .unwrap()
        .prop_flat_map(|word| {
            let len = word.len();
            (Just(word), 0..len, prop::char::range('a', 'z'))
        })
        .prop_filter_map("substitution must change the word", |(word, pos, c)| {
            let mut chars: Vec<char> = word.chars().collect();
            if chars[pos] == c {
                return None;
            }
            chars[pos] = c;
            Some((word, chars.into_iter().collect()))
        })
}

// ============================================================================
// NORMALIZATION
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: normalizing twice changes nothing.
    #[test]
    fn prop_normalize_idempotent(text in listing_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(is_normalized(&once));
    }

    /// Property: output is lowercase word characters separated by single
    /// spaces, never padded.
    #[test]
    fn prop_normalize_shape(text in listing_text()) {
        let out = normalize(&text);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(out.chars().all(|c| c == ' ' || c.is_alphanumeric() || c == '_'));
    }

    /// Property: case and accents never matter.
    #[test]
    fn prop_case_insensitive(text in "[a-z ]{0,30}") {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text));
    }
}

// ============================================================================
// SHINGLES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: every shingle has exactly `length` characters once the
    /// stripped text is long enough, and the count is bounded by the number
    /// of windows.
    #[test]
    fn prop_shingles_well_formed(text in listing_text(), length in 1usize..=5) {
        let folded = normalize(&text);
        let stripped = folded.chars().filter(|c| *c != ' ').count();
        let grams = shingle(&text, length);

        if stripped >= length {
            prop_assert!(grams.iter().all(|g| g.chars().count() == length));
            prop_assert!(grams.len() <= stripped - length + 1);
        } else if folded.is_empty() {
            prop_assert!(grams.is_empty());
        } else {
            prop_assert_eq!(grams.as_slice(), [folded]);
        }
    }

    /// Property: shingles never repeat.
    #[test]
    fn prop_shingles_unique(text in listing_text()) {
        let grams = shingle(&text, 3);
        let mut seen = std::collections::HashSet::new();
        for gram in grams.iter() {
            prop_assert!(seen.insert(gram), "duplicate shingle {:?}", gram);
        }
    }

    /// Property: spaces between words do not change the shingle set.
    #[test]
    fn prop_spacing_irrelevant(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let spaced = words.join(" ");
        let glued = words.concat();
        if glued.len() >= 3 {
            prop_assert_eq!(shingle(&spaced, 3), shingle(&glued, 3));
        }
    }

    /// Property: one substitution in a word of six or more letters keeps
    /// some shared trigram.
    #[test]
    fn prop_single_typo_keeps_overlap((word, typo) in word_with_typo()) {
        prop_assert_eq!(strsim::levenshtein(&word, &typo), 1);
        let a = shingle(&word, 3);
        let b = shingle(&typo, 3);
        prop_assert!(a.overlap(&b) > 0, "{} vs {}", word, typo);
        prop_assert!(a.jaccard(&b) > 0.0);
    }

    /// Property: Jaccard is symmetric and in [0, 1]; identical non-empty
    /// sets score 1.
    #[test]
    fn prop_jaccard_bounds(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let (sa, sb) = (shingle(&a, 3), shingle(&b, 3));
        let j = sa.jaccard(&sb);
        prop_assert!((0.0..=1.0).contains(&j));
        prop_assert_eq!(j, sb.jaccard(&sa));
        if !sa.is_empty() {
            prop_assert_eq!(sa.jaccard(&sa), 1.0);
        }
    }
}
