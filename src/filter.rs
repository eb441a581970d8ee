// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured pre-filters applied before scoring.

use serde::{Deserialize, Serialize};

use crate::types::{ItemKind, ItemStatus, SearchableItem};

/// Exact-match criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub kind: Option<ItemKind>,
    pub campus_id: Option<String>,
    pub building_id: Option<String>,
}

impl ItemFilter {
    /// Only open reports: what a search screen shows by default.
    pub fn open() -> Self {
        Self {
            status: Some(ItemStatus::Open),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, item: &SearchableItem) -> bool {
        self.status.map_or(true, |s| s == item.status())
            && self.kind.map_or(true, |k| k == item.kind())
            && self
                .campus_id
                .as_deref()
                .map_or(true, |c| c == item.campus_id())
            && self
                .building_id
                .as_deref()
                .map_or(true, |b| Some(b) == item.building_id())
    }
}
