// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Geospatial primitives: points, geohashes and distances.
//!
//! Items store a `GeoPoint` whose geohash is computed once at projection
//! time. Scoring only ever needs the raw coordinates (for haversine); the
//! geohash is carried for callers that bucket items by cell.

mod distance;
mod geohash;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use geohash::{
    decode_geohash, encode_geohash, geohash_neighbor, geohash_neighbors, geohash_with_neighbors,
    Direction, GeoBounds, Neighbors, BASE32, DEFAULT_GEOHASH_PRECISION, MAX_GEOHASH_PRECISION,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from geohash decoding and coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("geohash is empty")]
    EmptyGeohash,

    #[error("invalid geohash character {ch:?} at position {position}")]
    InvalidGeohashChar { ch: char, position: usize },

    #[error("geohash precision {precision} exceeds maximum {max}")]
    PrecisionTooHigh { precision: usize, max: usize },

    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}

/// A latitude/longitude pair with an optional cached geohash.
///
/// `new` accepts anything (the core never validates coordinates); use
/// `try_new` at trust boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geohash: Option<String>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            geohash: None,
        }
    }

    /// Validating constructor: latitude in [-90, 90], longitude in
    /// [-180, 180], both finite.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self::new(lat, lng))
        } else {
            Err(GeoError::OutOfRange { lat, lng })
        }
    }

    /// Recompute the cached geohash at `precision` from the coordinates.
    pub fn with_geohash(mut self, precision: usize) -> Self {
        self.geohash = Some(encode_geohash(self.lat, self.lng, precision));
        self
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Cached geohash, if one was computed.
    pub fn geohash(&self) -> Option<&str> {
        self.geohash.as_deref()
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }
}
