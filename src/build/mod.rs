// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading records from disk and writing projected item files.
//!
//! Input files are JSON arrays. A malformed file is an error; a malformed
//! element is logged and skipped, so one bad report does not block a batch.

mod document;
mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;

use crate::alerts::Alert;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ProjectionOptions, SearchableItem};

pub use document::*;
pub use parallel::*;

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Read a JSON array, keeping the elements that parse as `T`.
fn load_json_array<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;

    let total = values.len();
    let parsed: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(path = %path.display(), index, error = %e, "skipping invalid {what}");
                None
            }
        })
        .collect();

    tracing::debug!(
        path = %path.display(),
        loaded = parsed.len(),
        skipped = total - parsed.len(),
        "loaded {what}s"
    );
    Ok(parsed)
}

/// Load raw item records.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ItemRecord>> {
    load_json_array(path.as_ref(), "record")
}

/// Load projected items, as written by `run_project`.
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<SearchableItem>> {
    load_json_array(path.as_ref(), "item")
}

/// Load projected items, refusing any projected with options other than
/// `expected`.
///
/// Query shingles must have the same length as item shingles, or nothing
/// overlaps and every item scores zero.
pub fn load_items_matching(
    path: impl AsRef<Path>,
    expected: &ProjectionOptions,
) -> Result<Vec<SearchableItem>> {
    let path = path.as_ref();
    let items = load_items(path)?;
    if let Some(item) = items.iter().find(|i| i.projection() != expected) {
        return Err(Error::ProjectionMismatch {
            path: path.to_path_buf(),
            id: item.id().to_string(),
            stored: *item.projection(),
            expected: *expected,
        });
    }
    Ok(items)
}

/// Load alert definitions.
pub fn load_alerts(path: impl AsRef<Path>) -> Result<Vec<Alert>> {
    load_json_array(path.as_ref(), "alert")
}

/// What `run_project` wrote.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub path: PathBuf,
    pub items: usize,
    pub ngrams: usize,
    pub bytes: usize,
}

/// Content-hash file name for a projected item file.
pub fn items_file_name(bytes: &[u8]) -> String {
    format!("items-{:08x}.json", crc32fast::hash(bytes))
}

/// Project every record in `input` and write the result to `output_dir`.
///
/// The output file is named by the CRC32 of its contents, so re-running on
/// unchanged input produces the same file name.
pub fn run_project(input: &Path, output_dir: &Path, config: &Config) -> Result<ProjectSummary> {
    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();

    // 1. Load records
    let records = load_records(input)?;

    // 2. Project in parallel with progress bar
    #[cfg(feature = "parallel")]
    let items = {
        let pb = multi.add(ProgressBar::new(records.len() as u64));
        pb.set_style(create_progress_style());
        pb.set_prefix("Projecting");
        pb.set_message("records...");
        let items = project_all_with_progress(records, &config.projection(), &pb);
        pb.finish_with_message(format!("projected {} items", items.len()));
        items
    };

    #[cfg(not(feature = "parallel"))]
    let items = project_all(records, &config.projection());

    if items.is_empty() {
        tracing::warn!(path = %input.display(), "no valid records to project");
    }

    // 3. Serialize and write under a content-hash name
    let bytes = serde_json::to_vec_pretty(&items).map_err(Error::Serialize)?;
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let path = output_dir.join(items_file_name(&bytes));
    fs::write(&path, &bytes).map_err(|e| Error::io(&path, e))?;

    let summary = ProjectSummary {
        path,
        items: items.len(),
        ngrams: items.iter().map(|i| i.ngrams().len()).sum(),
        bytes: bytes.len(),
    };

    eprintln!("  ✓ {}", summary.path.display());
    eprintln!();
    eprintln!("✅ Projection complete");
    eprintln!(
        "   {} items │ {} n-grams │ {}",
        summary.items,
        summary.ngrams,
        format_bytes(summary.bytes)
    );

    Ok(summary)
}

pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
