// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scores for the reference listing.
//!
//! "iPhone 13 Pro", tags [celular, apple, azul], campus-1 / building-1,
//! reported at (-15.7801, -47.9292).

use claimcheck::{explain, score, Scorer, ScoringWeights};

use super::common::{approx, listing, make_item, make_query, ORIGIN};

#[test]
fn test_exact_query_scores_high() {
    // 9 shared trigrams × 2 + title
    let s = score(&listing(0), &make_query("iphone 13 pro"));
    assert!(s > 2.0);
    assert!(approx(s, 21.0), "{s}");
}

#[test]
fn test_unrelated_query_scores_zero() {
    assert_eq!(score(&listing(0), &make_query("notebook dell")), 0.0);
}

#[test]
fn test_typo_still_matches() {
    let s = score(&listing(0), &make_query("ifone 13"));
    assert!(s > 1.0);
    assert!(approx(s, 9.0), "{s}");
}

#[test]
fn test_campus_and_building_boosts() {
    let item = listing(0);
    let base = score(&item, &make_query("iphone"));
    let same_campus = score(&item, &make_query("iphone").in_campus("campus-1"));
    let other_campus = score(&item, &make_query("iphone").in_campus("campus-2"));
    let same_building = score(
        &item,
        &make_query("iphone").in_campus("campus-1").in_building("building-1"),
    );

    assert!(approx(base, 11.0));
    assert!(approx(same_campus, 16.0));
    assert!(approx(other_campus, 11.0));
    assert!(approx(same_building, 19.0));
    assert!(same_campus > other_campus);
}

#[test]
fn test_age_decay() {
    let fresh = score(&listing(1), &make_query("iphone"));
    let week_old = score(&listing(7), &make_query("iphone"));
    let ten_days = score(&listing(10), &make_query("iphone"));
    let month_old = score(&listing(30), &make_query("iphone"));
    let two_months = score(&listing(60), &make_query("iphone"));

    assert!(approx(fresh, 11.0));
    assert!(approx(week_old, 11.0));
    assert!(approx(ten_days, 9.9));
    assert!(approx(month_old, 9.9));
    assert!(approx(two_months, 7.7));
    assert!(fresh > two_months);
}

#[test]
fn test_distance_boost() {
    let item = listing(0);
    let here = score(&item, &make_query("iphone").located_at(ORIGIN.0, ORIGIN.1));
    let three_km = score(&item, &make_query("iphone").located_at(-15.8000, -47.9500));
    assert!(approx(here, 15.0));
    assert!(approx(three_km, 11.0));
}

#[test]
fn test_distance_monotonic() {
    let item = listing(0);
    // ~5 km, ~1.5 km, ~0.75 km, ~0.3 km due north
    let scores: Vec<f64> = [0.045, 0.0135, 0.00675, 0.0027]
        .iter()
        .map(|dlat| score(&item, &make_query("iphone").located_at(ORIGIN.0 + dlat, ORIGIN.1)))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{scores:?}");
    assert!(scores[3] > scores[0]);
}

#[test]
fn test_zero_coordinates_are_honored() {
    let mut record = super::common::make_record("gulf", "Mochila", &[], 0);
    record.geo = Some(claimcheck::GeoPoint::new(0.0, 0.0));
    let item = super::common::project(record);
    let s = score(&item, &make_query("mochila").located_at(0.0, 0.0));
    let plain = score(&item, &make_query("mochila"));
    assert!(approx(s - plain, 4.0));
}

#[test]
fn test_nan_requester_gets_no_distance_boost() {
    let item = listing(0);
    for query in [
        make_query("iphone").located_at(f64::NAN, ORIGIN.1),
        make_query("iphone").located_at(ORIGIN.0, f64::NAN),
    ] {
        let b = explain(&item, &query);
        assert_eq!(b.distance, 0.0);
        assert!(b.total.is_finite());
        assert!(approx(b.total, 11.0), "{}", b.total);
        assert!(approx(score(&item, &query), 11.0));
    }
}

#[test]
fn test_tag_only_match() {
    let item = make_item("Celular", &["iphone", "apple", "smartphone"], 0);
    assert!(approx(score(&item, &make_query("iphone")), 10.0));
}

#[test]
fn test_everything_at_once() {
    let item = make_item("iPhone 13 Pro Azul", &["apple", "smartphone"], 1);
    let query = make_query("iphone azul")
        .in_campus("campus-1")
        .located_at(ORIGIN.0, ORIGIN.1);
    let b = explain(&item, &query);
    // "nea" and "eaz" span the gap in the query but not in the title
    assert_eq!(b.matched, ["iph", "pho", "hon", "one", "azu", "zul"]);
    assert!(approx(b.ngram, 12.0));
    assert!(approx(b.title, 3.0));
    // "smartphone" contains "pho"
    assert!(approx(b.tag, 2.0));
    assert!(approx(b.campus, 5.0));
    assert!(approx(b.distance, 4.0));
    assert!(approx(b.total, 26.0), "{}", b.total);
}

#[test]
fn test_breakdown_sums_to_total() {
    let item = listing(45);
    let query = make_query("celular iphone")
        .in_campus("campus-1")
        .in_building("building-1")
        .located_at(ORIGIN.0 + 0.005, ORIGIN.1);
    let b = explain(&item, &query);
    assert!(approx(b.subtotal() * b.decay + b.distance, b.total));
    assert!(b.tag > 0.0 && b.title > 0.0);
}

#[test]
fn test_tuned_weights() {
    let scorer = Scorer::new(ScoringWeights {
        campus_boost: 50.0,
        ..ScoringWeights::default()
    });
    let s = scorer.score(&listing(0), &make_query("iphone").in_campus("campus-1"));
    assert!(approx(s, 61.0));
}
