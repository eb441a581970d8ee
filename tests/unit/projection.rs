// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The write-time projection and its update path.

use claimcheck::contracts::check_projection;
use claimcheck::text::shingle;
use claimcheck::{GeoPoint, ItemUpdate, ProjectionOptions};

use super::common::{listing, make_record, project, record_at};

#[test]
fn test_listing_projection() {
    let item = listing(0);
    assert_eq!(item.title_n(), "iphone 13 pro");
    assert_eq!(item.tags_n(), ["celular", "apple", "azul"]);

    let mut expected = shingle("iPhone 13 Pro", 3);
    for tag in ["celular", "apple", "azul"] {
        expected.extend_from(&shingle(tag, 3));
    }
    assert_eq!(item.ngrams(), &expected);
    check_projection(&item);
}

#[test]
fn test_geohash_stored_at_configured_precision() {
    let record = record_at("r", "Chave", 57.64911, 10.40744);
    let options = ProjectionOptions {
        geohash_precision: 5,
        ..ProjectionOptions::default()
    };
    let item = claimcheck::SearchableItem::project(record, &options);
    assert_eq!(item.geo().and_then(GeoPoint::geohash), Some("u4pru"));
}

#[test]
fn test_incoming_geohash_is_recomputed() {
    let mut record = make_record("r", "Chave", &[], 0);
    record.geo = serde_json::from_str(r#"{"lat": 57.64911, "lng": 10.40744, "geohash": "zzzzzzz"}"#)
        .unwrap();
    let item = project(record);
    assert_eq!(item.geo().and_then(GeoPoint::geohash), Some("u4pruyd"));
}

#[test]
fn test_update_recomputes_every_derived_field() {
    let options = ProjectionOptions::default();
    let mut item = listing(0);
    item.apply(
        ItemUpdate {
            title: Some("Notebook Dell".into()),
            description: Some("Deixado no Laboratório".into()),
            tags: Some(vec!["Informática".into()]),
            geo: Some(Some(GeoPoint::new(57.64911, 10.40744))),
            ..ItemUpdate::default()
        },
        &options,
    );
    assert_eq!(item.title_n(), "notebook dell");
    assert_eq!(item.desc_n(), "deixado no laboratorio");
    assert_eq!(item.tags_n(), ["informatica"]);
    assert!(item.ngrams().contains("not"));
    assert!(item.ngrams().contains("inf"));
    assert!(!item.ngrams().contains("iph"));
    assert_eq!(item.geo().and_then(GeoPoint::geohash), Some("u4pruyd"));
    check_projection(&item);
}

#[test]
fn test_update_can_clear_location() {
    let mut item = listing(0);
    item.apply(
        ItemUpdate {
            geo: Some(None),
            ..ItemUpdate::default()
        },
        &ProjectionOptions::default(),
    );
    assert!(item.geo().is_none());
    assert_eq!(item.title_n(), "iphone 13 pro");
}
