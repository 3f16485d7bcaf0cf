// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the provision CLI.
//!
//! Plain ANSI styling, switched off for pipelines (non-TTY stdout) and when
//! `NO_COLOR` is set.

use std::io::IsTerminal;
use std::sync::OnceLock;

use provision::SearchResultView;

// Width of the divider lines and the content preview.
pub const LINE_WIDTH: usize = 80;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

static COLORS: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    *COLORS.get_or_init(|| std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal())
}

/// Apply styles if colors are on, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Shorten `text` to at most `max_chars` characters, collapsing whitespace.
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Color-coded score. Hybrid scores sit in [0, 1]; raw scores run higher.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.3}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 1.0 {
        GREEN
    } else if score >= 0.5 {
        YELLOW
    } else {
        GRAY
    };
    format!("{}{}{}", color, text, RESET)
}

pub fn divider() {
    println!("{}", styled(&[GRAY], &"─".repeat(LINE_WIDTH)));
}

/// Print one ranked result as a short block.
pub fn result_block(rank: usize, result: &SearchResultView) {
    let heading = format!(
        "{:>2}. {}  {}",
        rank,
        score_value(result.score),
        styled(&[BOLD], &result.id)
    );
    println!("{}", heading);

    let mut source = result.source.title.clone();
    if let Some(section) = &result.section_number {
        source.push_str(&format!(" s.{}", section));
    }
    if let Some(title) = &result.section_title {
        source.push_str(&format!(" ({})", title));
    }
    if !result.source.sector.is_empty() {
        source.push_str(&format!(" [{}]", result.source.sector));
    }
    if !source.is_empty() {
        println!("    {}", styled(&[CYAN], &source));
    }

    println!("    {}", preview(&result.content, LINE_WIDTH - 4));

    let matched: Vec<&str> = result.matched_terms.iter().map(String::as_str).collect();
    println!("    {}", styled(&[DIM], &format!("matched: {}", matched.join(", "))));
}
