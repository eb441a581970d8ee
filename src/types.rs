// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The values the scorer works on.
//!
//! | Type              | Role                                              |
//! |-------------------|---------------------------------------------------|
//! | `SearchableItem`  | A record plus its derived (normalized) fields     |
//! | `QueryContext`    | Query text, shingles, requester location, clock   |
//! | `ScoredResult`    | (item id, score) pair, ranker output              |
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SearchableItem**: `title_n == normalize(title)`, same for the
//!   description and every tag, and `ngrams` is the union of the title's and
//!   the tags' shingles. The derived fields are private and only written by
//!   `project`, so a record edit can never leave them stale. Each item
//!   remembers the `ProjectionOptions` it was built with;
//!   `build::load_items_matching` refuses a file whose options differ from
//!   the caller's.
//!
//! - **QueryContext**: `ngrams == shingle(text, ngram_length)`. Changing the
//!   length through `with_ngram_length` recomputes them.
//!
//! - **ScoredResult**: `score > 0`. Zero-score items never leave the ranker.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::build::{ItemRecord, ItemUpdate};
use crate::contracts;
use crate::geo::{GeoPoint, DEFAULT_GEOHASH_PRECISION};
use crate::text::{normalize, shingle, shingle_normalized, NgramSet, DEFAULT_NGRAM_LENGTH};

// =============================================================================
// RECORD ENUMS
// =============================================================================

/// Was the item found by someone, or lost by its owner?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemKind {
    Found,
    Lost,
}

/// Lifecycle of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    #[default]
    Open,
    Resolved,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "FOUND",
            Self::Lost => "LOST",
        })
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "OPEN",
            Self::Resolved => "RESOLVED",
        })
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FOUND" => Ok(Self::Found),
            "LOST" => Ok(Self::Lost),
            _ => Err(format!("unknown item kind '{s}' (expected FOUND or LOST)")),
        }
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "RESOLVED" => Ok(Self::Resolved),
            _ => Err(format!(
                "unknown item status '{s}' (expected OPEN or RESOLVED)"
            )),
        }
    }
}

// =============================================================================
// PROJECTION
// =============================================================================

/// Parameters of the write-time projection.
///
/// Stored with every projected item, so a file built with one shingle length
/// can be refused by a search configured with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionOptions {
    /// Shingle length. Must match the length queries are shingled with.
    pub ngram_length: usize,
    /// Characters in the stored geohash.
    pub geohash_precision: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            ngram_length: DEFAULT_NGRAM_LENGTH,
            geohash_precision: DEFAULT_GEOHASH_PRECISION,
        }
    }
}

/// An item record with its derived search fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    #[serde(flatten)]
    record: ItemRecord,
    title_n: String,
    desc_n: String,
    tags_n: Vec<String>,
    ngrams: NgramSet,
    /// Files written before this field existed used the defaults.
    #[serde(default)]
    projection: ProjectionOptions,
}

impl SearchableItem {
    /// Compute every derived field from `record`.
    ///
    /// The n-gram set is the title's shingles followed by each tag's, with
    /// duplicates dropped. The description is normalized but not shingled:
    /// it is too noisy to match against.
    pub fn project(record: ItemRecord, options: &ProjectionOptions) -> Self {
        let title_n = normalize(&record.title);
        contracts::check_normalized(&title_n);
        let desc_n = normalize(&record.description);
        let tags_n: Vec<String> = record.tags.iter().map(|tag| normalize(tag)).collect();

        let mut ngrams = shingle_normalized(&title_n, options.ngram_length);
        for tag in &tags_n {
            ngrams.extend_from(&shingle_normalized(tag, options.ngram_length));
        }

        let mut record = record;
        record.geo = record
            .geo
            .map(|point| point.with_geohash(options.geohash_precision));

        Self {
            record,
            title_n,
            desc_n,
            tags_n,
            ngrams,
            projection: *options,
        }
    }

    /// Apply an edit and re-project. Derived fields never go stale.
    pub fn apply(&mut self, update: ItemUpdate, options: &ProjectionOptions) {
        let mut record = self.record.clone();
        update.apply_to(&mut record);
        *self = Self::project(record, options);
        contracts::check_projection(self);
    }

    pub fn record(&self) -> &ItemRecord {
        &self.record
    }

    /// The options the derived fields were computed with.
    pub fn projection(&self) -> &ProjectionOptions {
        &self.projection
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn kind(&self) -> ItemKind {
        self.record.kind
    }

    pub fn status(&self) -> ItemStatus {
        self.record.status
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn title_n(&self) -> &str {
        &self.title_n
    }

    pub fn desc_n(&self) -> &str {
        &self.desc_n
    }

    pub fn tags_n(&self) -> &[String] {
        &self.tags_n
    }

    pub fn ngrams(&self) -> &NgramSet {
        &self.ngrams
    }

    pub fn campus_id(&self) -> &str {
        &self.record.campus_id
    }

    pub fn building_id(&self) -> Option<&str> {
        self.record.building_id.as_deref()
    }

    pub fn geo(&self) -> Option<&GeoPoint> {
        self.record.geo.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    /// Age in whole days at `now`, truncated. Negative for future timestamps.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.record.created_at).num_days()
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A search request, normalized and shingled once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    text: String,
    normalized: String,
    ngram_length: usize,
    ngrams: NgramSet,
    location: Option<GeoPoint>,
    campus_id: Option<String>,
    building_id: Option<String>,
    now: DateTime<Utc>,
}

impl QueryContext {
    /// A query evaluated at the current wall-clock time.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        let ngrams = shingle_normalized(&normalized, DEFAULT_NGRAM_LENGTH);
        contracts::check_ngram_set(&ngrams, DEFAULT_NGRAM_LENGTH);
        Self {
            text,
            normalized,
            ngram_length: DEFAULT_NGRAM_LENGTH,
            ngrams,
            location: None,
            campus_id: None,
            building_id: None,
            now: Utc::now(),
        }
    }

    /// Re-shingle with a different length.
    pub fn with_ngram_length(mut self, length: usize) -> Self {
        self.ngram_length = length;
        self.ngrams = shingle(&self.text, length);
        contracts::check_ngram_set(&self.ngrams, length);
        self
    }

    /// Requester coordinates.
    pub fn located_at(self, lat: f64, lng: f64) -> Self {
        self.with_location(Some(GeoPoint::new(lat, lng)))
    }

    pub fn with_location(mut self, location: Option<GeoPoint>) -> Self {
        self.location = location;
        self
    }

    /// Requester campus. An empty id counts as absent.
    pub fn in_campus(mut self, campus_id: impl Into<String>) -> Self {
        self.campus_id = non_empty(campus_id.into());
        self
    }

    /// Requester building. An empty id counts as absent.
    pub fn in_building(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = non_empty(building_id.into());
        self
    }

    /// Evaluate ages relative to `now` instead of the wall clock.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn ngram_length(&self) -> usize {
        self.ngram_length
    }

    pub fn ngrams(&self) -> &NgramSet {
        &self.ngrams
    }

    pub fn location(&self) -> Option<&GeoPoint> {
        self.location.as_ref()
    }

    pub fn campus_id(&self) -> Option<&str> {
        self.campus_id.as_deref()
    }

    pub fn building_id(&self) -> Option<&str> {
        self.building_id.as_deref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub score: f64,
}
