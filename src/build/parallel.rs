// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel projection of raw records.
//!
//! Projecting a record (normalize three fields, shingle title and tags,
//! encode a geohash) touches nothing but the record itself, so a batch is
//! embarrassingly parallel. Rayon's `par_iter` over the records, collected in
//! input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::types::{ProjectionOptions, SearchableItem};

use super::ItemRecord;

/// Project every record. Output order matches input order.
pub fn project_all(records: Vec<ItemRecord>, options: &ProjectionOptions) -> Vec<SearchableItem> {
    #[cfg(feature = "parallel")]
    let items: Vec<SearchableItem> = records
        .into_par_iter()
        .map(|record| SearchableItem::project(record, options))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let items: Vec<SearchableItem> = records
        .into_iter()
        .map(|record| SearchableItem::project(record, options))
        .collect();

    tracing::debug!(count = items.len(), "projected records");
    items
}

/// `project_all`, ticking `progress` as records complete.
#[cfg(feature = "parallel")]
pub fn project_all_with_progress(
    records: Vec<ItemRecord>,
    options: &ProjectionOptions,
    progress: &ProgressBar,
) -> Vec<SearchableItem> {
    let counter = AtomicUsize::new(0);
    let total = records.len();

    let items: Vec<SearchableItem> = records
        .into_par_iter()
        .map(|record| {
            let item = SearchableItem::project(record, options);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.inc(1);
            if count % 100 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            item
        })
        .collect();

    tracing::debug!(count = items.len(), "projected records");
    items
}
