// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Saved searches that fire when a matching item is reported.
//!
//! An alert is a standing query. When a new item comes in, every active
//! alert is evaluated against it with the same scorer the search screen
//! uses. The hard constraints (campus, radius) are checked first and reject
//! outright; after that an alert fires iff its query scores above zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::scoring::{compare_results, default_scorer, Scorer};
use crate::types::{QueryContext, ScoredResult, SearchableItem};

fn default_active() -> bool {
    true
}

/// A standing query owned by one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Only items on this campus can fire the alert.
    #[serde(default)]
    pub campus_id: Option<String>,
    /// Point the radius is measured from; also the requester location.
    #[serde(default)]
    pub origin: Option<GeoPoint>,
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Alert {
    /// The query this alert stands for, evaluated at `now`.
    ///
    /// Text is the query text followed by the tags, so a tag-only alert
    /// still has something to match.
    pub fn query(&self, now: DateTime<Utc>) -> QueryContext {
        let mut text = self.query_text.clone();
        for tag in &self.tags {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(tag);
        }

        let query = QueryContext::new(text)
            .at(now)
            .with_location(self.origin.clone());
        match &self.campus_id {
            Some(campus) => query.in_campus(campus.as_str()),
            None => query,
        }
    }

    /// Does the item pass the hard constraints (active, campus, radius)?
    pub fn admits(&self, item: &SearchableItem) -> bool {
        if !self.active {
            return false;
        }
        if let Some(campus) = &self.campus_id {
            if campus != item.campus_id() {
                return false;
            }
        }
        if let (Some(origin), Some(radius)) = (&self.origin, self.radius_km) {
            return item
                .geo()
                .is_some_and(|point| origin.distance_km(point) <= radius);
        }
        true
    }

    /// Score `item` with the default weights. `None` when the alert does not
    /// fire.
    pub fn evaluate(&self, item: &SearchableItem, now: DateTime<Utc>) -> Option<f64> {
        self.evaluate_with(default_scorer(), item, &self.query(now))
    }

    /// Score `item` against a prepared query (see `Alert::query`).
    pub fn evaluate_with(
        &self,
        scorer: &Scorer,
        item: &SearchableItem,
        query: &QueryContext,
    ) -> Option<f64> {
        if !self.admits(item) {
            return None;
        }
        let score = scorer.score(item, query);
        (score > 0.0).then_some(score)
    }
}

/// Every alert that fires for `item`, highest score first. Ties keep the
/// order of `alerts`.
pub fn match_alerts(alerts: &[Alert], item: &SearchableItem, now: DateTime<Utc>) -> Vec<ScoredResult> {
    let mut fired: Vec<ScoredResult> = alerts
        .iter()
        .filter_map(|alert| {
            alert.evaluate(item, now).map(|score| ScoredResult {
                id: alert.id.clone(),
                score,
            })
        })
        .collect();
    fired.sort_by(compare_results);

    tracing::debug!(
        item = item.id(),
        alerts = alerts.len(),
        fired = fired.len(),
        "matched alerts"
    );
    fired
}
