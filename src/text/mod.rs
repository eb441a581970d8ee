// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text processing: folding and shingling.
//!
//! Item text is run through here once at write time (see
//! `SearchableItem::project`), query text once per request. Both sides must
//! use the same shingle length or nothing will ever intersect.

mod ngram;
mod normalize;

pub use ngram::{shingle, shingle_normalized, NgramSet, DEFAULT_NGRAM_LENGTH};
pub use normalize::{is_normalized, is_word_char, normalize};
