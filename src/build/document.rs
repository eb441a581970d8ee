// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::types::{ItemKind, ItemStatus};

/// A raw item record as reported: the fields a person types in.
///
/// Nothing here is derived. `SearchableItem::project` turns a record into
/// something the scorer can use.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub status: ItemStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub campus_id: String,
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub geo: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

/// A partial edit of an `ItemRecord`. `None` leaves the field alone.
///
/// The nullable fields (`category`, `buildingId`, `geo`) use a double
/// `Option`: `Some(None)` clears the field.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub building_id: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub geo: Option<Option<GeoPoint>>,
}

impl ItemUpdate {
    /// Write every set field into `record`.
    pub fn apply_to(self, record: &mut ItemRecord) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
        if let Some(campus_id) = self.campus_id {
            record.campus_id = campus_id;
        }
        if let Some(building_id) = self.building_id {
            record.building_id = building_id;
        }
        if let Some(geo) = self.geo {
            record.geo = geo;
        }
    }

    /// Does this update touch any field that feeds a derived field?
    pub fn touches_text(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.tags.is_some()
    }
}

/// Distinguishes a missing key (outer `None`) from an explicit `null`
/// (`Some(None)`).
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
