// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text folding: accents, case, punctuation, whitespace.
//!
//! Everything that gets compared (titles, tags, descriptions, queries) goes
//! through `normalize` first, so "Câmera Canon!" and "camera canon" end up as
//! the same string. The output is the canonical comparable form every other
//! module assumes.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching: strip diacritics, lowercase, drop
/// punctuation and symbols, collapse whitespace.
///
/// - "café" → "cafe"
/// - "São Paulo" → "sao paulo"
/// - "olá, mundo!" → "ola mundo"
/// - "R$ 100,00" → "r 10000"
///
/// # Algorithm
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Lowercase, then decompose again (lowercasing can reintroduce a mark,
///   e.g. `İ`)
/// 3. Filter out combining marks
/// 4. Keep letters, digits, `_` and whitespace from any script
/// 5. Collapse whitespace
///
/// Never fails. Empty, whitespace-only and symbol-only input all yield "".
pub fn normalize(value: &str) -> String {
    let folded: String = value
        .nfd()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Letters and digits from any script, plus underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Is this string already in normalized form?
pub fn is_normalized(value: &str) -> bool {
    normalize(value) == value
}
