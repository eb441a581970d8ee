// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for text folding and shingling.
//!
//! Normalization never fails, so every byte string is fair input. What comes
//! out must be a fixed point and its shingles must be well formed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use claimcheck::{normalize, shingle};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let text: String = text.chars().take(200).collect();

    let once = normalize(&text);

    // INVARIANT 1: normalization is idempotent
    assert_eq!(normalize(&once), once, "not idempotent for {:?}", text);

    // INVARIANT 2: no padding, no runs of spaces
    assert!(!once.starts_with(' ') && !once.ends_with(' '));
    assert!(!once.contains("  "));

    // INVARIANT 3: shingles have the window length and never repeat
    let stripped = once.chars().filter(|c| *c != ' ').count();
    for length in 1..=4 {
        let grams = shingle(&text, length);
        let unique: std::collections::HashSet<&str> = grams.iter().collect();
        assert_eq!(unique.len(), grams.len());
        if stripped >= length {
            assert!(grams.iter().all(|g| g.chars().count() == length));
        } else {
            assert!(grams.len() <= 1);
        }
    }
});
