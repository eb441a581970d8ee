// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how items get their numbers.
//!
//! Text overlap is the gate. Everything else (field, campus, age, distance)
//! only adjusts the score of items that already share a shingle with the
//! query.

mod core;
pub mod ranking;

pub use core::*;
pub use ranking::{compare_results, rank, rank_filtered, sort_recent_first, RankedItem};
