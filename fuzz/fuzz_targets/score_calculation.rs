// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite, non-negative, and deterministic. Rankings must be
//! sorted and contain only positive scores.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use claimcheck::{
    explain, rank, score, GeoPoint, ItemKind, ItemRecord, ItemStatus, ProjectionOptions,
    QueryContext, SearchableItem,
};

#[derive(Debug, Arbitrary)]
struct FuzzItem {
    title: String,
    tags: Vec<String>,
    age_days: u16,
    campus: u8,
    offset: Option<(i16, i16)>,
}

#[derive(Debug, Arbitrary)]
struct ScoreInput {
    query: String,
    campus: Option<u8>,
    items: Vec<FuzzItem>,
}

fuzz_target!(|input: ScoreInput| {
    let Some(now) = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single() else {
        return;
    };
    let options = ProjectionOptions::default();

    let items: Vec<SearchableItem> = input
        .items
        .iter()
        .take(64)
        .enumerate()
        .map(|(i, item)| {
            let record = ItemRecord {
                id: i.to_string(),
                kind: ItemKind::Found,
                status: ItemStatus::Open,
                title: item.title.chars().take(100).collect(),
                description: String::new(),
                category: None,
                tags: item.tags.iter().take(8).cloned().collect(),
                campus_id: format!("campus-{}", item.campus % 4),
                building_id: None,
                geo: item.offset.map(|(dy, dx)| {
                    GeoPoint::new(-15.78 + f64::from(dy) * 1e-4, -47.93 + f64::from(dx) * 1e-4)
                }),
                created_at: now - Duration::days(i64::from(item.age_days)),
            };
            SearchableItem::project(record, &options)
        })
        .collect();

    let text: String = input.query.chars().take(200).collect();
    let mut query = QueryContext::new(text).at(now).located_at(-15.78, -47.93);
    if let Some(campus) = input.campus {
        query = query.in_campus(format!("campus-{}", campus % 4));
    }

    for item in &items {
        let s = score(item, &query);

        // INVARIANT 1: finite and non-negative
        assert!(s.is_finite() && s >= 0.0, "bad score {s}");

        // INVARIANT 2: deterministic
        assert_eq!(s.to_bits(), score(item, &query).to_bits());

        // INVARIANT 3: breakdown agrees with the score
        let b = explain(item, &query);
        assert_eq!(b.total, s);
        assert!(b.decay > 0.0 && b.decay <= 1.0);
    }

    // INVARIANT 4: rankings sorted, positive, no more than the input
    let results = rank(&items, &query);
    assert!(results.len() <= items.len());
    assert!(results.iter().all(|r| r.score > 0.0));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
});
