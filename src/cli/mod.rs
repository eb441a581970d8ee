// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the claimcheck command-line interface.
//!
//! `project` turns raw reports into a searchable item file, `search` ranks
//! that file against a query, `alerts` runs saved searches against it. The
//! remaining two are inspection tools for the text and geo primitives.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use claimcheck::{ItemKind, ItemStatus};

#[derive(Parser)]
#[command(
    name = "claimcheck",
    about = "Fuzzy search and alert matching for lost & found reports",
    version
)]
pub struct Cli {
    /// JSON config file (weights, shingle length, geohash precision).
    /// Defaults to $CLAIMCHECK_CONFIG when set.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project raw item records into a searchable item file
    Project {
        /// JSON array of item records
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the items-<crc32>.json file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rank projected items against a query
    #[command(allow_negative_numbers = true)]
    Search {
        /// Projected item file (from `claimcheck project`)
        file: PathBuf,

        /// Free-text query
        query: String,

        /// Requester campus id
        #[arg(long)]
        campus: Option<String>,

        /// Requester building id (only counts with --campus)
        #[arg(long)]
        building: Option<String>,

        /// Requester latitude
        #[arg(long, requires = "lng")]
        lat: Option<f64>,

        /// Requester longitude
        #[arg(long, requires = "lat")]
        lng: Option<f64>,

        /// Only items with this status (OPEN, RESOLVED)
        #[arg(long)]
        status: Option<ItemStatus>,

        /// Only items of this kind (FOUND, LOST)
        #[arg(long)]
        kind: Option<ItemKind>,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show every score factor
        #[arg(long)]
        explain: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a coordinate as a geohash
    #[command(allow_negative_numbers = true)]
    Geohash {
        lat: f64,
        lng: f64,

        /// Characters in the hash (1-12)
        #[arg(short, long, default_value = "7")]
        precision: usize,

        /// Also print the eight surrounding cells
        #[arg(long)]
        neighbors: bool,
    },

    /// Show the normalized form and shingles of a string
    Normalize {
        text: String,

        /// Shingle length
        #[arg(short, long, default_value = "3")]
        length: usize,
    },

    /// Evaluate saved alerts against projected items
    Alerts {
        /// JSON array of alerts
        alerts: PathBuf,

        /// Projected item file
        items: PathBuf,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
}
