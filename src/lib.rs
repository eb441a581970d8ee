// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search ranking for lost & found reports.
//!
//! Someone types "ifone azul" into a search box; somewhere in the database is
//! a report titled "iPhone 13 Pro" with the tag "azul", handed in at the
//! library on the same campus two days ago. This crate decides that the
//! report is a good answer and how good, relative to every other report.
//!
//! There is no index here. Every candidate is scored against the query and
//! the scores are sorted. What makes that cheap is the projection: each item's
//! text is normalized and cut into character shingles once, when it is
//! written, so scoring is a set intersection plus a handful of comparisons.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │   text       │────▶│   types      │────▶│   scoring     │
//! │ (normalize,  │     │ (project,    │     │ (explain,     │
//! │  shingle)    │     │ QueryContext)│     │  rank)        │
//! └──────────────┘     └──────────────┘     └───────────────┘
//!        ▲                    ▲                     │
//!        │                    │                     ▼
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │   geo        │     │   build      │     │ filter,alerts │
//! │ (geohash,    │     │ (records,    │     │ (pre-filters, │
//! │  haversine)  │     │  loaders)    │     │ saved queries)│
//! └──────────────┘     └──────────────┘     └───────────────┘
//! ```
//!
//! | Module      | Role                                                    |
//! |-------------|---------------------------------------------------------|
//! | `text`      | Accent/case/punctuation folding, shingle sets           |
//! | `geo`       | Geohash encode/decode/neighbors, great-circle distance  |
//! | `types`     | `SearchableItem` projection, `QueryContext`, results    |
//! | `scoring`   | Multi-factor score with breakdown, stable ranking       |
//! | `filter`    | Status/kind/campus/building pre-filters                 |
//! | `alerts`    | Standing queries evaluated against new items            |
//! | `config`    | Tunable weights, loaded from JSON                       |
//! | `build`     | Record types, JSON loaders, batch projection            |
//! | `contracts` | Debug-build checks of the invariants above              |
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use claimcheck::{rank, ItemKind, ItemRecord, ItemStatus, ProjectionOptions, QueryContext,
//!                  SearchableItem};
//!
//! let record = ItemRecord {
//!     id: "r1".into(),
//!     kind: ItemKind::Found,
//!     status: ItemStatus::Open,
//!     title: "iPhone 13 Pro".into(),
//!     description: String::new(),
//!     category: None,
//!     tags: vec!["azul".into()],
//!     campus_id: "campus-1".into(),
//!     building_id: None,
//!     geo: None,
//!     created_at: Utc::now(),
//! };
//! let items = vec![SearchableItem::project(record, &ProjectionOptions::default())];
//!
//! let results = rank(&items, &QueryContext::new("ifone azul").in_campus("campus-1"));
//! assert_eq!(results[0].id, "r1");
//! ```

pub mod alerts;
pub mod build;
pub mod config;
pub mod contracts;
mod error;
mod filter;
pub mod geo;
pub mod scoring;
pub mod testing;
pub mod text;
mod types;

pub use alerts::{match_alerts, Alert};
pub use build::{ItemRecord, ItemUpdate};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use filter::ItemFilter;
pub use geo::{
    decode_geohash, encode_geohash, geohash_neighbor, geohash_neighbors, geohash_with_neighbors,
    haversine_km, Direction, GeoBounds, GeoError, GeoPoint, Neighbors, DEFAULT_GEOHASH_PRECISION,
    MAX_GEOHASH_PRECISION,
};
pub use scoring::{
    compare_results, explain, rank, rank_filtered, score, sort_recent_first, RankedItem,
    ScoreBreakdown, Scorer, ScoringWeights,
};
pub use text::{normalize, shingle, NgramSet, DEFAULT_NGRAM_LENGTH};
pub use types::{
    ItemKind, ItemStatus, ProjectionOptions, QueryContext, ScoredResult, SearchableItem,
};
