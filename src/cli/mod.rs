// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the provision command-line interface.
//!
//! Two subcommands: `search` ranks passages from a JSON corpus file, and
//! `stats` builds the index and reports what went into it. Engine settings
//! not exposed as flags come from the `PROVISION_*` environment variables.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use provision::SearchMethod;

#[derive(Parser)]
#[command(
    name = "provision",
    about = "BM25 / TF-IDF ranking over legislative passages",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank passages for a query
    Search {
        /// Search query
        query: String,

        /// JSON corpus file (falls back to PROVISION_CORPUS_PATH)
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// JSON object of synonyms, replacing the built-in table
        ///
        /// Format: `{ "trigger phrase": ["synonym", ...], ... }`. Keys are
        /// matched as substrings of the lowercased query.
        #[arg(long)]
        synonyms: Option<PathBuf>,

        /// Ranking method: bm25, tfidf or hybrid
        #[arg(short, long, default_value = "bm25")]
        method: SearchMethod,

        /// Maximum number of results to return
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,

        /// Drop results scoring below this
        #[arg(long, default_value = "0.1")]
        min_score: f64,

        /// Only return passages from this sector
        #[arg(long)]
        sector: Option<String>,

        /// Search the query as typed, without synonym expansion
        #[arg(long)]
        no_expand: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the index and print its statistics as JSON
    Stats {
        /// JSON corpus file (falls back to PROVISION_CORPUS_PATH)
        #[arg(short, long)]
        corpus: Option<PathBuf>,
    },
}
