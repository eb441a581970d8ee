// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use claimcheck::{
    build::{load_alerts, load_items_matching, run_project},
    encode_geohash, geohash_neighbors, normalize, shingle, sort_recent_first, Config, Direction,
    GeoPoint, ItemFilter, ItemKind, ItemStatus, QueryContext, ScoreBreakdown, SearchableItem,
    MAX_GEOHASH_PRECISION,
};

mod cli;
use cli::display::{self, row, section_bot, section_mid, section_top, themed};
use cli::{Cli, Commands};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by CLAIMCHECK_LOG, then RUST_LOG, then `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLAIMCHECK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Project { input, output } => {
            run_project(&input, &output, &config)
                .with_context(|| format!("projecting {}", input.display()))?;
        }
        Commands::Search {
            file,
            query,
            campus,
            building,
            lat,
            lng,
            status,
            kind,
            limit,
            explain,
            json,
        } => {
            let filter = ItemFilter {
                status,
                kind,
                ..ItemFilter::default()
            };
            let requester = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(GeoPoint::try_new(lat, lng)?),
                _ => None,
            };
            let query = QueryContext::new(query)
                .with_ngram_length(config.shingle_length)
                .with_location(requester)
                .in_campus(campus.unwrap_or_default())
                .in_building(building.unwrap_or_default());
            search(&config, &file, &query, &filter, limit, explain, json)?;
        }
        Commands::Geohash {
            lat,
            lng,
            precision,
            neighbors,
        } => geohash(lat, lng, precision, neighbors)?,
        Commands::Normalize { text, length } => normalize_text(&text, length),
        Commands::Alerts {
            alerts,
            items,
            json,
        } => run_alerts(&config, &alerts, &items, json)?,
    }

    Ok(())
}

// ============================================================================
// search
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit<'a> {
    id: &'a str,
    title: &'a str,
    kind: ItemKind,
    status: ItemStatus,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

fn search(
    config: &Config,
    file: &Path,
    query: &QueryContext,
    filter: &ItemFilter,
    limit: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    let mut items = load_items_matching(file, &config.projection())
        .with_context(|| format!("loading items from {}", file.display()))?;
    sort_recent_first(&mut items);

    let scorer = config.scorer();
    let mut ranked = scorer.rank_items(&items, query, filter);
    let total = ranked.len();
    ranked.truncate(limit);

    let hits: Vec<(SearchHit, &SearchableItem)> = ranked
        .into_iter()
        .map(|(item, score)| {
            let hit = SearchHit {
                id: item.id(),
                title: item.title(),
                kind: item.kind(),
                status: item.status(),
                score,
                breakdown: explain.then(|| scorer.explain(item, query)),
            };
            (hit, item)
        })
        .collect();

    if json {
        let hits: Vec<&SearchHit> = hits.iter().map(|(h, _)| h).collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    section_top(&format!("RESULTS \"{}\"", display::truncate(query.text(), 40)));
    if hits.is_empty() {
        row(&themed(display::GRAY, &[], " no matches"));
    }
    for (rank, (hit, item)) in hits.iter().enumerate() {
        row(&format!(
            " {:>3}. {} {} {} {}",
            rank + 1,
            display::score_value(hit.score),
            display::kind_label(&hit.kind.to_string()),
            display::pad_right(&display::truncate(hit.title, 40), 40),
            display::truncate(item.campus_id(), 14),
        ));
        if let Some(b) = &hit.breakdown {
            explain_rows(b);
        }
    }
    section_bot();
    eprintln!("  {} of {} matches shown ({} items searched)", hits.len(), total, items.len());
    Ok(())
}

fn explain_rows(b: &ScoreBreakdown) {
    row(&format!(
        "        {} {} {} {} {}",
        display::factor("ngram", b.ngram),
        display::factor("title", b.title),
        display::factor("tag", b.tag),
        display::factor("campus", b.campus),
        display::factor("bldg", b.building),
    ));
    let distance = match b.distance_km {
        Some(km) => format!("{} ({})", display::factor("near", b.distance), display::distance(km)),
        None => display::factor("near", b.distance),
    };
    row(&format!(
        "        age {}d ×{:.1}  {}  shared: {}",
        b.age_days,
        b.decay,
        distance,
        display::truncate(&b.matched.join(" "), 30),
    ));
}

// ============================================================================
// geohash
// ============================================================================

fn geohash(lat: f64, lng: f64, precision: usize, neighbors: bool) -> Result<()> {
    if !(1..=MAX_GEOHASH_PRECISION).contains(&precision) {
        bail!("precision must be between 1 and {MAX_GEOHASH_PRECISION}, got {precision}");
    }
    GeoPoint::try_new(lat, lng)?;
    let hash = encode_geohash(lat, lng, precision);

    if !neighbors {
        println!("{hash}");
        return Ok(());
    }

    let grid = geohash_neighbors(&hash)?;
    section_top("GEOHASH");
    row(&format!(" {lat}, {lng} → {}", display::cell(Some(hash.as_str()), true)));
    section_mid("NEIGHBORS");
    let layout = [
        [Some(Direction::NorthWest), Some(Direction::North), Some(Direction::NorthEast)],
        [Some(Direction::West), None, Some(Direction::East)],
        [Some(Direction::SouthWest), Some(Direction::South), Some(Direction::SouthEast)],
    ];
    for line in layout {
        let cells: Vec<String> = line
            .iter()
            .map(|slot| match slot {
                Some(direction) => display::cell(grid.get(*direction), false),
                None => display::cell(Some(hash.as_str()), true),
            })
            .map(|c| display::pad_right(&c, precision.max(6) + 2))
            .collect();
        row(&format!(" {}", cells.concat()));
    }
    section_bot();
    Ok(())
}

// ============================================================================
// normalize
// ============================================================================

fn normalize_text(text: &str, length: usize) {
    let normalized = normalize(text);
    let grams = shingle(text, length);
    println!("{normalized}");
    let grams: Vec<&str> = grams.iter().collect();
    println!("{}", grams.join(" "));
}

// ============================================================================
// alerts
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertHit<'a> {
    alert_id: &'a str,
    owner: &'a str,
    item_id: &'a str,
    score: f64,
}

fn run_alerts(config: &Config, alerts_path: &Path, items_path: &Path, json: bool) -> Result<()> {
    let alerts = load_alerts(alerts_path)
        .with_context(|| format!("loading alerts from {}", alerts_path.display()))?;
    let items = load_items_matching(items_path, &config.projection())
        .with_context(|| format!("loading items from {}", items_path.display()))?;

    let now = Utc::now();
    let scorer = config.scorer();
    let queries: Vec<QueryContext> = alerts
        .iter()
        .map(|a| a.query(now).with_ngram_length(config.shingle_length))
        .collect();

    let mut hits = Vec::new();
    for item in &items {
        let mut fired: Vec<AlertHit> = alerts
            .iter()
            .zip(&queries)
            .filter_map(|(alert, query)| {
                alert
                    .evaluate_with(&scorer, item, query)
                    .map(|score| AlertHit {
                        alert_id: &alert.id,
                        owner: &alert.owner,
                        item_id: item.id(),
                        score,
                    })
            })
            .collect();
        fired.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.extend(fired);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    section_top("ALERTS");
    if hits.is_empty() {
        row(&themed(display::GRAY, &[], " no alerts fired"));
    }
    for hit in &hits {
        row(&format!(
            " {} {} → {}",
            display::score_value(hit.score),
            display::pad_right(&display::truncate(hit.alert_id, 20), 20),
            display::truncate(hit.item_id, 40),
        ));
    }
    section_bot();
    eprintln!(
        "  {} alerts fired ({} alerts × {} items)",
        hits.len(),
        alerts.len(),
        items.len()
    );
    Ok(())
}
