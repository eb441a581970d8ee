// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for geohash encoding, decoding and neighbor lookup.
//!
//! Decoding arbitrary strings must fail cleanly, never panic. Encoding any
//! valid coordinate must produce a cell that contains it.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use claimcheck::{
    decode_geohash, encode_geohash, geohash_neighbors, GeoPoint, MAX_GEOHASH_PRECISION,
};

#[derive(Debug, Arbitrary)]
struct GeoInput {
    lat: f64,
    lng: f64,
    precision: u8,
    raw_hash: String,
}

fuzz_target!(|input: GeoInput| {
    // Arbitrary strings: errors are fine, panics are not
    if let Ok(bounds) = decode_geohash(&input.raw_hash) {
        assert!(bounds.min_lat <= bounds.max_lat);
        assert!(bounds.min_lng <= bounds.max_lng);
        let _ = geohash_neighbors(&input.raw_hash);
    }

    if GeoPoint::try_new(input.lat, input.lng).is_err() {
        return;
    }
    let precision = 1 + (input.precision as usize % MAX_GEOHASH_PRECISION);

    let hash = encode_geohash(input.lat, input.lng, precision);

    // INVARIANT 1: the cell contains the point
    let bounds = decode_geohash(&hash).expect("encoded hash must decode");
    assert!(bounds.contains(input.lat, input.lng), "{hash} misses {input:?}");

    // INVARIANT 2: neighbors have the same precision and differ from the cell
    let neighbors = geohash_neighbors(&hash).expect("encoded hash must have neighbors");
    for (_, cell) in neighbors.iter() {
        assert_eq!(cell.len(), precision);
        assert_ne!(cell, hash);
    }
});
