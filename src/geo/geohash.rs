// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Geohash encoding, decoding and neighbor expansion.
//!
//! A geohash is a binary search over the globe written in base 32. Each bit
//! halves the current longitude or latitude interval (longitude first, then
//! alternating); every five bits become one character. Seven characters
//! give a cell of roughly 150 m × 150 m, which is the precision items are
//! stored with.
//!
//! ```text
//!   bit:   0    1    2    3    4  | 5    6    7    8    9  | ...
//!   axis: lng  lat  lng  lat  lng | lat  lng  lat  lng  lat | ...
//!         └──── char 0 ─────────┘ └──── char 1 ─────────┘
//! ```
//!
//! Encoding does no validation: coordinates outside [-90, 90] × [-180, 180]
//! still produce `precision` characters, they just don't mean anything.
//! Decoding is strict, since a stored hash with a bad character is data
//! corruption.

use super::GeoError;

/// Geohash base-32 alphabet (no `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Default precision: 7 characters, ~150 m cells.
pub const DEFAULT_GEOHASH_PRECISION: usize = 7;

/// Longest hash we decode. 12 characters = 30 bits per axis.
pub const MAX_GEOHASH_PRECISION: usize = 12;

const BITS_PER_CHAR: usize = 5;

/// Encode a coordinate as a geohash of exactly `precision` characters.
///
/// A coordinate strictly above an interval's midpoint takes the upper half.
///
/// ```
/// use claimcheck::encode_geohash;
///
/// assert_eq!(encode_geohash(57.64911, 10.40744, 7), "u4pruyd");
/// ```
pub fn encode_geohash(lat: f64, lng: f64, precision: usize) -> String {
    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lng_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);

    let mut is_lng = true;
    for _ in 0..precision {
        let mut index = 0usize;
        for bit in (0..BITS_PER_CHAR).rev() {
            let (range, value) = if is_lng {
                (&mut lng_range, lng)
            } else {
                (&mut lat_range, lat)
            };
            let mid = (range.0 + range.1) / 2.0;
            if value > mid {
                index |= 1 << bit;
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            is_lng = !is_lng;
        }
        hash.push(char::from(BASE32[index]));
    }

    hash
}

/// The rectangle a geohash covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Cell center as (lat, lng).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Cell height in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Cell width in degrees of longitude.
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Does the (closed) rectangle contain this coordinate?
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

fn char_index(c: char) -> Option<usize> {
    let byte = u8::try_from(c).ok()?;
    BASE32.iter().position(|&b| b == byte)
}

/// Decode a geohash into the bounds of its cell.
pub fn decode_geohash(hash: &str) -> Result<GeoBounds, GeoError> {
    if hash.is_empty() {
        return Err(GeoError::EmptyGeohash);
    }
    let precision = hash.chars().count();
    if precision > MAX_GEOHASH_PRECISION {
        return Err(GeoError::PrecisionTooHigh {
            precision,
            max: MAX_GEOHASH_PRECISION,
        });
    }

    let mut bounds = GeoBounds {
        min_lat: -90.0,
        max_lat: 90.0,
        min_lng: -180.0,
        max_lng: 180.0,
    };

    let mut is_lng = true;
    for (position, c) in hash.chars().enumerate() {
        let index = char_index(c).ok_or(GeoError::InvalidGeohashChar { ch: c, position })?;
        for bit in (0..BITS_PER_CHAR).rev() {
            let on = (index >> bit) & 1 == 1;
            let (min, max) = if is_lng {
                (&mut bounds.min_lng, &mut bounds.max_lng)
            } else {
                (&mut bounds.min_lat, &mut bounds.max_lat)
            };
            let mid = (*min + *max) / 2.0;
            if on {
                *min = mid;
            } else {
                *max = mid;
            }
            is_lng = !is_lng;
        }
    }

    Ok(bounds)
}

/// Compass direction to an adjacent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Cell offset as (rows north, columns east).
    fn offset(self) -> (f64, f64) {
        match self {
            Self::North => (1.0, 0.0),
            Self::NorthEast => (1.0, 1.0),
            Self::East => (0.0, 1.0),
            Self::SouthEast => (-1.0, 1.0),
            Self::South => (-1.0, 0.0),
            Self::SouthWest => (-1.0, -1.0),
            Self::West => (0.0, -1.0),
            Self::NorthWest => (1.0, -1.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

/// The eight cells around a geohash, in `Direction::ALL` order.
///
/// A neighbor is `None` when it would lie past a pole. Longitude wraps, so
/// cells on the antimeridian always have east/west neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbors {
    cells: [Option<String>; 8],
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        let slot = Direction::ALL
            .iter()
            .position(|d| *d == direction)
            .unwrap_or_default();
        self.cells[slot].as_deref()
    }

    /// Existing neighbors with their direction.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::ALL
            .iter()
            .zip(self.cells.iter())
            .filter_map(|(d, cell)| cell.as_deref().map(|c| (*d, c)))
    }
}

/// The neighbor of `hash` in one direction, at the same precision.
pub fn geohash_neighbor(hash: &str, direction: Direction) -> Result<Option<String>, GeoError> {
    let bounds = decode_geohash(hash)?;
    Ok(neighbor_of(&bounds, hash.chars().count(), direction))
}

fn neighbor_of(bounds: &GeoBounds, precision: usize, direction: Direction) -> Option<String> {
    let (center_lat, center_lng) = bounds.center();
    let (rows, cols) = direction.offset();

    let lat = center_lat + rows * bounds.lat_span();
    if !(-90.0..=90.0).contains(&lat) {
        return None;
    }

    let mut lng = center_lng + cols * bounds.lng_span();
    if lng > 180.0 {
        lng -= 360.0;
    } else if lng < -180.0 {
        lng += 360.0;
    }

    // Neighbor centers sit mid-cell, so encoding them never hits a boundary
    Some(encode_geohash(lat, lng, precision))
}

/// All eight neighbors of a geohash.
///
/// ```
/// use claimcheck::{geohash_neighbors, Direction};
///
/// let neighbors = geohash_neighbors("gbsuv").unwrap();
/// assert_eq!(neighbors.get(Direction::North), Some("gbsvj"));
/// assert_eq!(neighbors.get(Direction::West), Some("gbsuu"));
/// ```
pub fn geohash_neighbors(hash: &str) -> Result<Neighbors, GeoError> {
    let bounds = decode_geohash(hash)?;
    let precision = hash.chars().count();
    let cells = Direction::ALL.map(|direction| neighbor_of(&bounds, precision, direction));
    Ok(Neighbors { cells })
}

/// The cell itself followed by every existing neighbor: the set of cells to
/// scan for a proximity lookup around a point stored under `hash`.
pub fn geohash_with_neighbors(hash: &str) -> Result<Vec<String>, GeoError> {
    let neighbors = geohash_neighbors(hash)?;
    let mut cells = Vec::with_capacity(9);
    cells.push(hash.to_string());
    cells.extend(neighbors.iter().map(|(_, cell)| cell.to_string()));
    Ok(cells)
}
