// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind item ranking.
//!
//! A score is built in five steps, in this order:
//!
//! ```text
//!   ngram    = ngram_weight · |query ∩ item|        (0 overlap ⇒ score 0, stop)
//!   + title  if a shared shingle occurs in the normalized title
//!   + tag    if a shared shingle occurs in a normalized tag
//!   + campus if requester and item share a campus
//!       + building if they also share a building
//!   × decay  by age in whole days (> 7 d, > 30 d)
//!   + distance boost by great-circle distance tier
//! ```
//!
//! Two things follow from the order. Decay applies to everything before it,
//! so an old exact match can still lose to a fresh partial one. The distance
//! boost is added after decay, so proximity counts the same no matter how old
//! the report is.
//!
//! Text overlap gates everything: an item on the requester's own campus, a
//! meter away, still scores 0 if no shingle matches.
//!
//! # Default weights
//!
//! | Factor            | Value | Applied                           |
//! |-------------------|-------|-----------------------------------|
//! | per shared gram   | 2.0   | × overlap count                   |
//! | title             | 3.0   | once                              |
//! | tag               | 2.0   | once                              |
//! | campus            | 5.0   | once                              |
//! | building          | 3.0   | once, only with campus            |
//! | age > 7 days      | ×0.9  | to running total                  |
//! | age > 30 days     | ×0.7  | to running total (replaces 0.9)   |
//! | < 0.5 / 1 / 2 km  | 4/2/1 | after decay                       |

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::types::{QueryContext, SearchableItem};

// =============================================================================
// DEFAULT CONSTANTS
// =============================================================================

/// Points per shingle shared between query and item.
pub const DEFAULT_NGRAM_WEIGHT: f64 = 2.0;

/// Flat boost when a shared shingle occurs in the title.
pub const DEFAULT_TITLE_BOOST: f64 = 3.0;

/// Flat boost when a shared shingle occurs in any tag.
pub const DEFAULT_TAG_BOOST: f64 = 2.0;

/// Flat boost when requester and item share a campus.
pub const DEFAULT_CAMPUS_BOOST: f64 = 5.0;

/// Extra boost when they also share a building.
pub const DEFAULT_BUILDING_BOOST: f64 = 3.0;

/// (age strictly greater than N days, multiplier), ascending by age.
pub const DEFAULT_DECAY: [(i64, f64); 2] = [(7, 0.9), (30, 0.7)];

/// (distance strictly below N km, boost), ascending by distance.
pub const DEFAULT_DISTANCE_TIERS: [(f64, f64); 3] = [(0.5, 4.0), (1.0, 2.0), (2.0, 1.0)];

// =============================================================================
// WEIGHTS
// =============================================================================

/// Multiplier applied once an item is older than `after_days` whole days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayTier {
    pub after_days: i64,
    pub factor: f64,
}

/// Boost for an item closer than `within_km` to the requester.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceTier {
    pub within_km: f64,
    pub boost: f64,
}

/// Every tunable number the scorer uses.
///
/// Decay tiers are ascending by `after_days` and the oldest matching tier
/// wins. Distance tiers are ascending by `within_km` and the nearest matching
/// tier wins. `Config::validate` enforces both orderings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringWeights {
    pub ngram_weight: f64,
    pub title_boost: f64,
    pub tag_boost: f64,
    pub campus_boost: f64,
    pub building_boost: f64,
    pub decay: Vec<DecayTier>,
    pub distance_tiers: Vec<DistanceTier>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            ngram_weight: DEFAULT_NGRAM_WEIGHT,
            title_boost: DEFAULT_TITLE_BOOST,
            tag_boost: DEFAULT_TAG_BOOST,
            campus_boost: DEFAULT_CAMPUS_BOOST,
            building_boost: DEFAULT_BUILDING_BOOST,
            decay: DEFAULT_DECAY
                .iter()
                .map(|&(after_days, factor)| DecayTier { after_days, factor })
                .collect(),
            distance_tiers: DEFAULT_DISTANCE_TIERS
                .iter()
                .map(|&(within_km, boost)| DistanceTier { within_km, boost })
                .collect(),
        }
    }
}

impl ScoringWeights {
    /// Multiplier for an item `age_days` old. 1.0 when no tier applies.
    pub fn decay_factor(&self, age_days: i64) -> f64 {
        self.decay
            .iter()
            .rev()
            .find(|tier| age_days > tier.after_days)
            .map_or(1.0, |tier| tier.factor)
    }

    /// Boost for an item `km` away. 0.0 beyond the last tier.
    pub fn distance_boost(&self, km: f64) -> f64 {
        self.distance_tiers
            .iter()
            .find(|tier| km < tier.within_km)
            .map_or(0.0, |tier| tier.boost)
    }
}

// =============================================================================
// SCORING
// =============================================================================

/// Every factor that went into one score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Shared shingles, in query order.
    pub matched: Vec<String>,
    pub ngram: f64,
    pub title: f64,
    pub tag: f64,
    pub campus: f64,
    pub building: f64,
    pub age_days: i64,
    /// Multiplier applied to the sum of the text and location factors.
    pub decay: f64,
    /// Requester-to-item distance, when both carry coordinates.
    pub distance_km: Option<f64>,
    pub distance: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Number of shared shingles.
    pub fn overlap(&self) -> usize {
        self.matched.len()
    }

    /// Text and location factors before decay.
    pub fn subtotal(&self) -> f64 {
        self.ngram + self.title + self.tag + self.campus + self.building
    }
}

/// Scores items with a fixed weight set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `item` against `query`, keeping every factor.
    pub fn explain(&self, item: &SearchableItem, query: &QueryContext) -> ScoreBreakdown {
        let w = &self.weights;

        let matched = query.ngrams().intersection(item.ngrams());
        if matched.is_empty() {
            return ScoreBreakdown {
                decay: 1.0,
                ..ScoreBreakdown::default()
            };
        }

        let ngram = w.ngram_weight * matched.len() as f64;

        let in_title = matched.iter().any(|gram| item.title_n().contains(gram));
        let in_tag = matched
            .iter()
            .any(|gram| item.tags_n().iter().any(|tag| tag.contains(gram)));
        let title = if in_title { w.title_boost } else { 0.0 };
        let tag = if in_tag { w.tag_boost } else { 0.0 };

        let same_campus = query.campus_id() == Some(item.campus_id());
        let campus = if same_campus { w.campus_boost } else { 0.0 };
        let building = match (query.building_id(), item.building_id()) {
            (Some(wanted), Some(actual)) if same_campus && wanted == actual => w.building_boost,
            _ => 0.0,
        };

        let age_days = item.age_days(query.now());
        let decay = w.decay_factor(age_days);

        let distance_km = match (query.location(), item.geo()) {
            (Some(from), Some(to)) => Some(from.distance_km(to)),
            _ => None,
        };
        let distance = distance_km.map_or(0.0, |km| w.distance_boost(km));

        let subtotal = ngram + title + tag + campus + building;
        let total = subtotal * decay + distance;

        ScoreBreakdown {
            matched: matched.into_iter().map(str::to_string).collect(),
            ngram,
            title,
            tag,
            campus,
            building,
            age_days,
            decay,
            distance_km,
            distance,
            total,
        }
    }

    /// Score `item` against `query`. 0.0 means "not a match".
    pub fn score(&self, item: &SearchableItem, query: &QueryContext) -> f64 {
        self.explain(item, query).total
    }
}

/// Shared scorer with the default weights.
pub fn default_scorer() -> &'static Scorer {
    static DEFAULT: OnceLock<Scorer> = OnceLock::new();
    DEFAULT.get_or_init(Scorer::default)
}

/// Score with the default weights.
pub fn score(item: &SearchableItem, query: &QueryContext) -> f64 {
    default_scorer().score(item, query)
}

/// Explain a score computed with the default weights.
pub fn explain(item: &SearchableItem, query: &QueryContext) -> ScoreBreakdown {
    default_scorer().explain(item, query)
}
