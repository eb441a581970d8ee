// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking properties.
//!
//! Every factor is a boost or a shrink in one direction only, so each
//! property holds the rest of the inputs fixed and moves one of them.

use proptest::prelude::*;

use claimcheck::{explain, rank, score, QueryContext, SearchableItem};

use super::common::{make_item_with_id, now, ORIGIN};

// ============================================================================
// STRATEGIES
// ============================================================================

const VOCABULARY: &[&str] = &[
    "iphone", "celular", "mochila", "carteira", "chave", "garrafa", "azul", "preta",
    "notebook", "fone", "oculos", "casaco", "guarda-chuva", "caderno",
];

fn phrase(max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 1..=max_words)
        .prop_map(|words| words.join(" "))
}

fn tags() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..3)
}

fn item(title: &str, tags: &[&str], age_days: i64) -> SearchableItem {
    make_item_with_id(title, title, tags, age_days)
}

fn query(text: &str) -> QueryContext {
    QueryContext::new(text).at(now())
}

fn shelf() -> impl Strategy<Value = Vec<(String, Vec<&'static str>, i64)>> {
    prop::collection::vec((phrase(3), tags(), 0i64..120), 0..30)
}

// ============================================================================
// SCORE PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: scores are never negative, and zero exactly when no
    /// shingle is shared.
    #[test]
    fn prop_zero_iff_disjoint(title in phrase(3), tags in tags(), text in phrase(2), age in 0i64..120) {
        let item = item(&title, &tags, age);
        let q = query(&text);
        let s = score(&item, &q);
        prop_assert!(s >= 0.0);
        let shared = q.ngrams().overlap(item.ngrams());
        prop_assert_eq!(s == 0.0, shared == 0);
    }

    /// Property: the breakdown adds up to the total.
    #[test]
    fn prop_breakdown_consistent(title in phrase(3), tags in tags(), text in phrase(2), age in 0i64..120) {
        let item = item(&title, &tags, age);
        let b = explain(&item, &query(&text).in_campus("campus-1"));
        prop_assert_eq!(b.total, b.subtotal() * b.decay + b.distance);
        prop_assert_eq!(b.ngram, 2.0 * b.overlap() as f64);
    }

    /// Property: an older copy of an item never outscores a newer one.
    #[test]
    fn prop_decay_monotone(
        title in phrase(3),
        text in phrase(2),
        younger in 0i64..120,
        extra in 0i64..120,
    ) {
        let q = query(&text);
        let fresh = score(&item(&title, &[], younger), &q);
        let stale = score(&item(&title, &[], younger + extra), &q);
        prop_assert!(fresh >= stale, "{} < {}", fresh, stale);
    }

    /// Property: matching the campus never lowers a score.
    #[test]
    fn prop_campus_never_hurts(title in phrase(3), text in phrase(2), age in 0i64..120) {
        let item = item(&title, &[], age);
        let plain = score(&item, &query(&text));
        let local = score(&item, &query(&text).in_campus("campus-1").in_building("building-1"));
        prop_assert!(local >= plain);
        if plain > 0.0 {
            prop_assert!(local > plain);
        }
    }

    /// Property: moving the requester closer never lowers a score.
    #[test]
    fn prop_distance_monotone(
        title in phrase(3),
        text in phrase(2),
        near in 0.0f64..0.05,
        further in 0.0f64..0.05,
    ) {
        let item = item(&title, &[], 0);
        let at = |offset: f64| query(&text).located_at(ORIGIN.0 + offset, ORIGIN.1);
        let close = score(&item, &at(near));
        let far = score(&item, &at(near + further));
        prop_assert!(close >= far, "{} < {}", close, far);
    }
}

// ============================================================================
// RANKING PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: rankings are sorted, contain no zero scores, and report
    /// the same score `score` computes for each item.
    #[test]
    fn prop_rank_sorted_and_faithful(rows in shelf(), text in phrase(2)) {
        let items: Vec<SearchableItem> = rows
            .iter()
            .enumerate()
            .map(|(i, (title, tags, age))| make_item_with_id(&format!("item-{i}"), title, tags, *age))
            .collect();
        let q = query(&text);
        let results = rank(&items, &q);

        prop_assert!(results.len() <= items.len());
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for result in &results {
            prop_assert!(result.score > 0.0);
            let item = items.iter().find(|item| item.id() == result.id).unwrap();
            prop_assert_eq!(result.score, score(item, &q));
        }

        let expected = items.iter().filter(|item| score(item, &q) > 0.0).count();
        prop_assert_eq!(results.len(), expected);
    }
}
