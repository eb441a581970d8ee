// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the scoring pipeline.
//!
//! These are debug-mode assertions that verify the invariants documented in
//! `types` and `scoring`. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//! 3. Catch stored projections that drifted from their raw fields
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function       | Property                                         |
//! |-------------------------|--------------------------------------------------|
//! | `check_normalized`      | `normalize(s) == s`                              |
//! | `check_ngram_set`       | every gram is `length` chars, or the short form  |
//! | `check_projection`      | derived fields equal recomputation               |
//! | `check_ranking_sorted`  | scores positive and non-increasing               |
//!
//! # Usage
//!
//! ```ignore
//! use claimcheck::contracts::*;
//!
//! // In debug builds, this panics if the stored projection is stale
//! check_projection(&item);
//!
//! // In release builds, this is a no-op
//! ```

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

use crate::geo::{DEFAULT_GEOHASH_PRECISION, MAX_GEOHASH_PRECISION};
use crate::scoring::{
    DEFAULT_BUILDING_BOOST, DEFAULT_CAMPUS_BOOST, DEFAULT_DECAY, DEFAULT_DISTANCE_TIERS,
    DEFAULT_NGRAM_WEIGHT, DEFAULT_TAG_BOOST, DEFAULT_TITLE_BOOST,
};
use crate::text::{is_normalized, normalize, shingle_normalized, NgramSet, DEFAULT_NGRAM_LENGTH};
use crate::types::{ScoredResult, SearchableItem};

/// Static assertions on the default weights.
/// If one fails, the crate won't build.
const _: () = {
    // INVARIANT: scores are non-negative, so every additive weight is too
    assert!(DEFAULT_NGRAM_WEIGHT > 0.0);
    assert!(DEFAULT_TITLE_BOOST >= 0.0);
    assert!(DEFAULT_TAG_BOOST >= 0.0);
    assert!(DEFAULT_CAMPUS_BOOST >= 0.0);
    assert!(DEFAULT_BUILDING_BOOST >= 0.0);

    // INVARIANT: decay only ever shrinks a score, and older means smaller
    assert!(DEFAULT_DECAY[0].0 < DEFAULT_DECAY[1].0);
    assert!(DEFAULT_DECAY[0].1 > 0.0 && DEFAULT_DECAY[0].1 <= 1.0);
    assert!(DEFAULT_DECAY[1].1 > 0.0 && DEFAULT_DECAY[1].1 <= DEFAULT_DECAY[0].1);

    // INVARIANT: distance tiers ascend by radius, nearer never earns less
    assert!(DEFAULT_DISTANCE_TIERS[0].0 < DEFAULT_DISTANCE_TIERS[1].0);
    assert!(DEFAULT_DISTANCE_TIERS[1].0 < DEFAULT_DISTANCE_TIERS[2].0);
    assert!(DEFAULT_DISTANCE_TIERS[0].1 >= DEFAULT_DISTANCE_TIERS[1].1);
    assert!(DEFAULT_DISTANCE_TIERS[1].1 >= DEFAULT_DISTANCE_TIERS[2].1);
    assert!(DEFAULT_DISTANCE_TIERS[2].1 >= 0.0);

    // INVARIANT: each axis's decoded bits fit in an f64 mantissa
    assert!((MAX_GEOHASH_PRECISION * 5 + 1) / 2 <= 52);
    assert!(DEFAULT_GEOHASH_PRECISION <= MAX_GEOHASH_PRECISION);

    assert!(DEFAULT_NGRAM_LENGTH > 0);
};

// ============================================================================
// TEXT CONTRACTS
// ============================================================================

/// Check that a string is in normalized form.
///
/// # Panics (debug builds only)
/// Panics if `normalize(value) != value`.
#[inline]
pub fn check_normalized(value: &str) {
    debug_assert!(
        is_normalized(value),
        "Contract violation: normalized - {:?} normalizes to {:?}",
        value,
        normalize(value)
    );
}

/// Check the shape of a shingle set built from normalized text.
///
/// Every gram must be exactly `length` chars and space-free, except the
/// single whole-string gram produced for short input.
#[inline]
pub fn check_ngram_set(set: &NgramSet, length: usize) {
    for gram in set {
        let chars = gram.chars().count();
        let short_form = set.len() == 1 && gram.chars().filter(|c| *c != ' ').count() < length;
        debug_assert!(
            short_form || (chars == length && !gram.contains(' ')),
            "Contract violation: ngram shape - {:?} is not a {}-gram",
            gram,
            length
        );
    }
}

// ============================================================================
// PROJECTION CONTRACTS
// ============================================================================

/// Check that every derived field of `item` matches its raw field,
/// recomputed with the options the item records.
pub fn check_projection(item: &SearchableItem) {
    if !cfg!(debug_assertions) {
        return;
    }
    let record = item.record();
    let ngram_length = item.projection().ngram_length;

    debug_assert_eq!(
        item.title_n(),
        normalize(&record.title),
        "Contract violation: projection - stale title_n for {}",
        record.id
    );
    debug_assert_eq!(
        item.desc_n(),
        normalize(&record.description),
        "Contract violation: projection - stale desc_n for {}",
        record.id
    );

    let tags_n: Vec<String> = record.tags.iter().map(|t| normalize(t)).collect();
    debug_assert_eq!(
        item.tags_n(),
        tags_n.as_slice(),
        "Contract violation: projection - stale tags_n for {}",
        record.id
    );

    let mut expected = shingle_normalized(item.title_n(), ngram_length);
    for tag in &tags_n {
        expected.extend_from(&shingle_normalized(tag, ngram_length));
    }
    debug_assert_eq!(
        item.ngrams(),
        &expected,
        "Contract violation: projection - stale ngrams for {}",
        record.id
    );
}

// ============================================================================
// RANKING CONTRACTS
// ============================================================================

/// Check ranker output: positive scores, highest first.
#[inline]
pub fn check_ranking_sorted(results: &[ScoredResult]) {
    for (i, result) in results.iter().enumerate() {
        debug_assert!(
            result.score > 0.0,
            "Contract violation: ranking - results[{}] ({}) has score {}",
            i,
            result.id,
            result.score
        );
    }
    for (i, pair) in results.windows(2).enumerate() {
        debug_assert!(
            pair[0].score >= pair[1].score,
            "Contract violation: ranking - results[{}] score {} < results[{}] score {}",
            i,
            pair[0].score,
            i + 1,
            pair[1].score
        );
    }
}
