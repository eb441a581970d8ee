// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::build::ItemRecord;
use crate::geo::GeoPoint;
use crate::types::{ItemKind, ItemStatus, ProjectionOptions, QueryContext, SearchableItem};

/// Campus every `make_*` item lives on.
pub const CAMPUS: &str = "campus-1";

/// Building every `make_*` item lives in.
pub const BUILDING: &str = "building-1";

/// Where every `make_*` item was reported (Brasília, Esplanada).
pub const ORIGIN: (f64, f64) = (-15.7801, -47.9292);

/// The fixed "now" all helpers measure ages against.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A raw record with the canonical campus, building and location, created
/// `age_days` before `now()`.
pub fn make_record(id: &str, title: &str, tags: &[&str], age_days: i64) -> ItemRecord {
    ItemRecord {
        id: id.to_string(),
        kind: ItemKind::Found,
        status: ItemStatus::Open,
        title: title.to_string(),
        description: String::new(),
        category: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        campus_id: CAMPUS.to_string(),
        building_id: Some(BUILDING.to_string()),
        geo: Some(GeoPoint::new(ORIGIN.0, ORIGIN.1)),
        created_at: now() - Duration::days(age_days),
    }
}

/// A projected item. The id is the title.
pub fn make_item(title: &str, tags: &[&str], age_days: i64) -> SearchableItem {
    SearchableItem::project(
        make_record(title, title, tags, age_days),
        &ProjectionOptions::default(),
    )
}

/// A projected item with an explicit id.
pub fn make_item_with_id(id: &str, title: &str, tags: &[&str], age_days: i64) -> SearchableItem {
    SearchableItem::project(
        make_record(id, title, tags, age_days),
        &ProjectionOptions::default(),
    )
}

/// A query evaluated at `now()`.
pub fn make_query(text: &str) -> QueryContext {
    QueryContext::new(text).at(now())
}
