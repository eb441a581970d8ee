// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Geohash and distance properties.

use proptest::prelude::*;

use claimcheck::geo::EARTH_RADIUS_KM;
use claimcheck::{
    decode_geohash, encode_geohash, geohash_neighbor, haversine_km, Direction,
    MAX_GEOHASH_PRECISION,
};

fn latitude() -> impl Strategy<Value = f64> {
    -89.999f64..89.999
}

fn longitude() -> impl Strategy<Value = f64> {
    -179.999f64..179.999
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: the decoded cell contains the encoded point.
    #[test]
    fn prop_cell_contains_point(
        lat in latitude(),
        lng in longitude(),
        precision in 1usize..=MAX_GEOHASH_PRECISION,
    ) {
        let hash = encode_geohash(lat, lng, precision);
        prop_assert_eq!(hash.len(), precision);
        let bounds = decode_geohash(&hash).unwrap();
        prop_assert!(bounds.contains(lat, lng), "{} does not contain ({}, {})", hash, lat, lng);
    }

    /// Property: a longer hash refines a shorter one.
    #[test]
    fn prop_prefix_refinement(lat in latitude(), lng in longitude(), precision in 2usize..=10) {
        let fine = encode_geohash(lat, lng, precision);
        let coarse = encode_geohash(lat, lng, precision - 1);
        prop_assert!(fine.starts_with(&coarse));
    }

    /// Property: stepping to a neighbor and back returns to the start,
    /// away from the poles and the antimeridian.
    #[test]
    fn prop_neighbor_round_trip(
        lat in -80.0f64..80.0,
        lng in -170.0f64..170.0,
        precision in 2usize..=8,
        which in 0usize..8,
    ) {
        let hash = encode_geohash(lat, lng, precision);
        let direction = Direction::ALL[which];
        let there = geohash_neighbor(&hash, direction).unwrap().unwrap();
        prop_assert_ne!(&there, &hash);
        let back = geohash_neighbor(&there, direction.opposite()).unwrap().unwrap();
        prop_assert_eq!(back, hash);
    }

    /// Property: distance is a non-negative symmetric measure bounded by
    /// half the circumference.
    #[test]
    fn prop_haversine_metric(
        lat1 in latitude(), lng1 in longitude(),
        lat2 in latitude(), lng2 in longitude(),
    ) {
        let d = haversine_km(lat1, lng1, lat2, lng2);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        prop_assert!((d - haversine_km(lat2, lng2, lat1, lng1)).abs() < 1e-9);
        prop_assert!(haversine_km(lat1, lng1, lat1, lng1) < 1e-9);
    }
}
