// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored items get ordered.
//!
//! Each item is scored on its own, zero scores are dropped, and what remains
//! is sorted by score, highest first. The sort is stable, so equal scores keep
//! the caller's input order. Callers that want "newest first" among ties
//! should run `sort_recent_first` on the candidates before ranking.
//!
//! Under the `parallel` feature the score map runs on rayon's pool. The
//! collect preserves input order and the sort is sequential, so output is
//! identical with or without the feature.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::core::{default_scorer, Scorer};
use crate::filter::ItemFilter;
use crate::types::{QueryContext, ScoredResult, SearchableItem};

/// Compare two results for ranking: higher score first.
///
/// Returns `Equal` for equal scores so a stable sort keeps input order.
pub fn compare_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score.total_cmp(&a.score)
}

/// Order items newest first, the tie-break convention for ranking.
pub fn sort_recent_first(items: &mut [SearchableItem]) {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

/// One ranked item, borrowed from the slice that was ranked.
pub type RankedItem<'a> = (&'a SearchableItem, f64);

impl Scorer {
    /// Score every item, drop zeros, sort descending.
    pub fn rank(&self, items: &[SearchableItem], query: &QueryContext) -> Vec<ScoredResult> {
        into_results(self.rank_where(items, query, |_| true))
    }

    /// `rank` over the items that pass `filter`.
    pub fn rank_filtered(
        &self,
        items: &[SearchableItem],
        query: &QueryContext,
        filter: &ItemFilter,
    ) -> Vec<ScoredResult> {
        into_results(self.rank_items(items, query, filter))
    }

    /// `rank_filtered`, returning the items themselves instead of their ids.
    ///
    /// Ids are not required to be unique, so callers that need the item
    /// behind a hit should use this rather than looking ids up.
    pub fn rank_items<'a>(
        &self,
        items: &'a [SearchableItem],
        query: &QueryContext,
        filter: &ItemFilter,
    ) -> Vec<RankedItem<'a>> {
        self.rank_where(items, query, |item| filter.matches(item))
    }

    fn rank_where<'a, F>(
        &self,
        items: &'a [SearchableItem],
        query: &QueryContext,
        keep: F,
    ) -> Vec<RankedItem<'a>>
    where
        F: Fn(&SearchableItem) -> bool + Sync,
    {
        let score_one = |item: &'a SearchableItem| {
            if !keep(item) {
                return None;
            }
            let score = self.score(item, query);
            // INVARIANT: only positive scores leave the ranker
            (score > 0.0).then_some((item, score))
        };

        #[cfg(feature = "parallel")]
        let mut ranked: Vec<RankedItem<'a>> = items.par_iter().filter_map(score_one).collect();
        #[cfg(not(feature = "parallel"))]
        let mut ranked: Vec<RankedItem<'a>> = items.iter().filter_map(score_one).collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        tracing::debug!(
            candidates = items.len(),
            hits = ranked.len(),
            query = query.normalized(),
            "ranked items"
        );
        ranked
    }
}

fn into_results(ranked: Vec<RankedItem<'_>>) -> Vec<ScoredResult> {
    let results: Vec<ScoredResult> = ranked
        .into_iter()
        .map(|(item, score)| ScoredResult {
            id: item.id().to_string(),
            score,
        })
        .collect();
    crate::contracts::check_ranking_sorted(&results);
    results
}

/// Rank with the default weights.
pub fn rank(items: &[SearchableItem], query: &QueryContext) -> Vec<ScoredResult> {
    default_scorer().rank(items, query)
}

/// Rank the items passing `filter` with the default weights.
pub fn rank_filtered(
    items: &[SearchableItem],
    query: &QueryContext,
    filter: &ItemFilter,
) -> Vec<ScoredResult> {
    default_scorer().rank_filtered(items, query, filter)
}
