// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the claimcheck CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `CLAIMCHECK_THEME` first (for explicit control), then `COLORFGBG` (set by
//! some terminals), then defaults to dark.
//!
//! Colors are dropped entirely when `NO_COLOR` is set or stdout is not a TTY,
//! so piping `claimcheck search` into a file gives plain boxes.

use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg_num) = bg.parse::<u8>() {
            if bg_num >= 7 && bg_num != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    let explicit = std::env::var("CLAIMCHECK_THEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    parse_theme(explicit.as_deref(), colorfgbg.as_deref())
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (NO_COLOR, TTY detection)
pub fn use_colors() -> bool {
    static USE: OnceLock<bool> = OnceLock::new();
    *USE.get_or_init(|| std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout))
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border() -> (String, &'static str) {
    if use_colors() {
        (GRAY(), RESET)
    } else {
        (String::new(), "")
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` chars, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let (b, reset) = border();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{reset}{content}{}{b}│{reset}", " ".repeat(pad));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (b, reset) = border();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}┌{reset}{label_part}{b}{}┐{reset}", "─".repeat(remaining));
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let (b, reset) = border();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}├{reset}{label_part}{b}{}┤{reset}", "─".repeat(remaining));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let (b, reset) = border();
    println!("{b}└{}┘{reset}", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded score, right-aligned to 7 columns.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.2}", score);
    let color = if score >= 20.0 {
        BRIGHT_GREEN
    } else if score >= 10.0 {
        GREEN
    } else if score >= 5.0 {
        YELLOW
    } else {
        GRAY
    };
    themed(color, &[], &text)
}

/// FOUND in green, LOST in yellow.
pub fn kind_label(kind: &str) -> String {
    let color = match kind {
        "FOUND" => GREEN,
        "LOST" => YELLOW,
        _ => GRAY,
    };
    themed(color, &[], &format!("{:<5}", kind))
}

/// A score factor: dimmed when it contributed nothing.
pub fn factor(name: &str, value: f64) -> String {
    let text = format!("{name} {value:+.1}");
    if value == 0.0 {
        themed(GRAY, &[DIM], &text)
    } else {
        themed(BLUE, &[], &text)
    }
}

/// Distance with a unit that fits its magnitude.
pub fn distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.1} km", km)
    }
}

/// A geohash cell, highlighted when it is the center of a grid.
pub fn cell(hash: Option<&str>, center: bool) -> String {
    match hash {
        Some(h) if center => themed(MAGENTA, &[BOLD], h),
        Some(h) => h.to_string(),
        None => themed(GRAY, &[DIM], "(pole)"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
