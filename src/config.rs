// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tunable settings: scoring weights and projection parameters.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "weights": { "campusBoost": 8.0 }, "geohashPrecision": 6 }
//! ```
//!
//! Resolution order for the CLI: `--config <path>`, then the file named by
//! `CLAIMCHECK_CONFIG`, then the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{DEFAULT_GEOHASH_PRECISION, MAX_GEOHASH_PRECISION};
use crate::scoring::{Scorer, ScoringWeights};
use crate::text::DEFAULT_NGRAM_LENGTH;
use crate::types::ProjectionOptions;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "CLAIMCHECK_CONFIG";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("weight {name} = {value} is invalid: {reason}")]
    InvalidWeight {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("{name} tiers must be strictly ascending")]
    UnorderedTiers { name: &'static str },

    #[error("{name} must not increase from one tier to the next")]
    RisingTiers { name: &'static str },

    #[error("shingle length must be at least 1")]
    InvalidShingleLength,

    #[error("geohash precision must be between 1 and {max}, got {precision}")]
    InvalidGeohashPrecision { precision: usize, max: usize },
}

/// Scoring and projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub weights: ScoringWeights,
    /// Shingle length for items and queries alike.
    pub shingle_length: usize,
    /// Characters in stored geohashes.
    pub geohash_precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            shingle_length: DEFAULT_NGRAM_LENGTH,
            geohash_precision: DEFAULT_GEOHASH_PRECISION,
        }
    }
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `explicit` if given, else `$CLAIMCHECK_CONFIG` if set, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Reject weights that would break the scoring invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("ngramWeight", w.ngram_weight),
            ("titleBoost", w.title_boost),
            ("tagBoost", w.tag_boost),
            ("campusBoost", w.campus_boost),
            ("buildingBoost", w.building_boost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidWeight {
                    name,
                    value,
                    reason: "must be finite and non-negative",
                });
            }
        }

        for tier in &w.decay {
            if !(tier.factor > 0.0 && tier.factor <= 1.0) {
                return Err(ConfigError::InvalidWeight {
                    name: "decay.factor",
                    value: tier.factor,
                    reason: "must be in (0, 1]",
                });
            }
        }
        if !w.decay.windows(2).all(|p| p[0].after_days < p[1].after_days) {
            return Err(ConfigError::UnorderedTiers { name: "decay" });
        }
        // Older items never decay less than newer ones.
        if !w.decay.windows(2).all(|p| p[0].factor >= p[1].factor) {
            return Err(ConfigError::RisingTiers {
                name: "decay.factor",
            });
        }

        for tier in &w.distance_tiers {
            if !(tier.boost.is_finite() && tier.boost >= 0.0) {
                return Err(ConfigError::InvalidWeight {
                    name: "distanceTiers.boost",
                    value: tier.boost,
                    reason: "must be finite and non-negative",
                });
            }
        }
        if !w
            .distance_tiers
            .windows(2)
            .all(|p| p[0].within_km < p[1].within_km)
        {
            return Err(ConfigError::UnorderedTiers {
                name: "distanceTiers",
            });
        }
        if !w.distance_tiers.windows(2).all(|p| p[0].boost >= p[1].boost) {
            return Err(ConfigError::RisingTiers {
                name: "distanceTiers.boost",
            });
        }

        if self.shingle_length == 0 {
            return Err(ConfigError::InvalidShingleLength);
        }
        if !(1..=MAX_GEOHASH_PRECISION).contains(&self.geohash_precision) {
            return Err(ConfigError::InvalidGeohashPrecision {
                precision: self.geohash_precision,
                max: MAX_GEOHASH_PRECISION,
            });
        }
        Ok(())
    }

    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.weights.clone())
    }

    pub fn projection(&self) -> ProjectionOptions {
        ProjectionOptions {
            ngram_length: self.shingle_length,
            geohash_precision: self.geohash_precision,
        }
    }
}
