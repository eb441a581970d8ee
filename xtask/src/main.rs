//! Custom cargo commands for the claimcheck crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests, with and without default features
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (markers + tests + clippy + weight table)
  test      Run all Rust tests, parallel and sequential builds
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("claimcheck Verification Suite");
    println!("==========================================\n");

    // Step 1: Check invariant markers
    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    // Step 2: Run tests with rayon
    println!("[2/5] Running Rust tests (parallel)...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    // Step 3: Run tests without rayon
    println!("[3/5] Running Rust tests (sequential)...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build agrees\n");

    // Step 4: Clippy
    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    // Step 5: Default weights match their documentation
    println!("[5/5] Verifying default weights against the scoring docs...");
    verify_constants()?;
    println!("✓ Constants aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "INVARIANT:", "--include=*.rs"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output.stdout.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();

    if count < 5 {
        bail!(
            "Expected at least 5 INVARIANT markers, found {}. Someone may have removed safety comments!",
            count
        );
    }

    Ok(())
}

/// The `# Default weights` table in src/scoring/core.rs is what people read
/// when tuning a config file. Fail if it drifts from the constants.
fn verify_constants() -> Result<()> {
    let root = project_root()?;
    let core_rs = std::fs::read_to_string(root.join("src/scoring/core.rs"))
        .context("Failed to read src/scoring/core.rs")?;

    let scalars = [
        ("DEFAULT_NGRAM_WEIGHT", "per shared gram"),
        ("DEFAULT_TITLE_BOOST", "title"),
        ("DEFAULT_TAG_BOOST", "tag"),
        ("DEFAULT_CAMPUS_BOOST", "campus"),
        ("DEFAULT_BUILDING_BOOST", "building"),
    ];
    for (constant, row) in scalars {
        let code = extract_const(&core_rs, constant)
            .with_context(|| format!("{constant} not found"))?;
        let documented = extract_table_value(&core_rs, row)
            .with_context(|| format!("no '{row}' row in the weights table"))?;
        if (code - documented).abs() > f64::EPSILON {
            bail!("{constant}={code} but the weights table says {row}={documented}");
        }
    }

    for (days, factor) in extract_decay(&core_rs).context("DEFAULT_DECAY not found")? {
        let row = format!("age > {days} days");
        let documented = extract_table_value(&core_rs, &row)
            .with_context(|| format!("no '{row}' row in the weights table"))?;
        if (factor - documented).abs() > f64::EPSILON {
            bail!("DEFAULT_DECAY has ({days}, {factor}) but the weights table says ×{documented}");
        }
    }

    Ok(())
}

/// Value of `pub const NAME: f64 = 2.0;`
fn extract_const(content: &str, name: &str) -> Option<f64> {
    let prefix = format!("pub const {}:", name);
    content
        .lines()
        .find(|line| line.trim_start().starts_with(&prefix))
        .and_then(|line| line.split('=').nth(1))
        .and_then(|value| value.trim().trim_end_matches(';').parse().ok())
}

/// Pairs of `pub const DEFAULT_DECAY: [(i64, f64); N] = [(7, 0.9), (30, 0.7)];`
fn extract_decay(content: &str) -> Option<Vec<(i64, f64)>> {
    let line = content
        .lines()
        .find(|line| line.trim_start().starts_with("pub const DEFAULT_DECAY:"))?;
    let body = line.rsplit('=').next()?.trim().trim_end_matches(';');
    let body = body.trim_start_matches('[').trim_end_matches(']');

    body.split("),")
        .map(|pair| {
            let pair = pair.trim().trim_start_matches('(').trim_end_matches(')');
            let mut parts = pair.split(',');
            let days = parts.next()?.trim().parse().ok()?;
            let factor = parts.next()?.trim().parse().ok()?;
            Some((days, factor))
        })
        .collect()
}

/// Second column of `//! | row | 3.0 | ... |`, with any leading × removed.
fn extract_table_value(content: &str, row: &str) -> Option<f64> {
    content.lines().find_map(|line| {
        let line = line.trim_start().strip_prefix("//!")?.trim();
        let mut cells = line.split('|').map(str::trim).filter(|c| !c.is_empty());
        if cells.next()? != row {
            return None;
        }
        cells.next()?.trim_start_matches('×').parse().ok()
    })
}
