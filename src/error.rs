// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crate-level error type.
//!
//! The ranking core itself never fails: empty text normalizes to an empty
//! string, a non-matching item scores zero. Errors only come from the edges,
//! where geohashes are decoded, configuration is loaded, or item files are
//! read from disk. Each concern has its own enum; this one wraps them for
//! callers that touch more than one.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::geo::GeoError;
use crate::types::ProjectionOptions;

/// Errors surfaced by loaders, configuration and geohash decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// Geohash decoding or coordinate validation failed.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain the JSON shape we expected.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing output failed.
    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A projected item was built with different projection options.
    #[error(
        "item '{id}' in {} was projected with shingle length {} and geohash precision {}, \
         but the current config uses {} and {}; re-run `claimcheck project`",
        path.display(),
        stored.ngram_length,
        stored.geohash_precision,
        expected.ngram_length,
        expected.geohash_precision
    )]
    ProjectionMismatch {
        path: PathBuf,
        id: String,
        stored: ProjectionOptions,
        expected: ProjectionOptions,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// A specialized `Result` for claimcheck operations.
pub type Result<T> = std::result::Result<T, Error>;
