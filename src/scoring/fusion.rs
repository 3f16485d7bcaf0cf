// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hybrid fusion: BM25 and TF-IDF blended into one ranking.
//!
//! Raw BM25 and TF-IDF scores live on different scales, so each candidate set
//! is first divided by its own maximum, putting both into `[0, 1]`. Documents
//! are then unioned and combined linearly:
//!
//! ```text
//! fused(d) = w_bm25 * bm25(d) / max(bm25) + w_tfidf * tfidf(d) / max(tfidf)
//! ```
//!
//! A document missing from one candidate set gets 0 from that side. With the
//! default weights (0.6 / 0.4) every fused score lies in `[0, 1]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contracts::check_fused_scores_bounded;
use crate::corpus::CorpusStatistics;
use crate::types::ScoredResult;

use super::bm25::Bm25Ranker;
use super::core::Ranker;
use super::ranking::sort_results;
use super::tfidf::TfIdfRanker;

/// Default weight of the BM25 side.
pub const DEFAULT_BM25_WEIGHT: f64 = 0.6;

/// Default weight of the TF-IDF side.
pub const DEFAULT_TFIDF_WEIGHT: f64 = 0.4;

/// Each ranker is asked for this many times `top_k` candidates.
pub const CANDIDATE_OVERSAMPLE: usize = 2;

/// Linear fusion weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub bm25: f64,
    pub tfidf: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            bm25: DEFAULT_BM25_WEIGHT,
            tfidf: DEFAULT_TFIDF_WEIGHT,
        }
    }
}

/// Largest score in a set, or 1.0 for an empty set.
fn max_score(results: &[ScoredResult]) -> f64 {
    results
        .iter()
        .map(|r| r.score)
        .reduce(f64::max)
        .unwrap_or(1.0)
}

/// Normalize two candidate sets, union them by document and keep the best `top_k`.
pub fn fuse(
    bm25: &[ScoredResult],
    tfidf: &[ScoredResult],
    weights: &FusionWeights,
    top_k: usize,
) -> Vec<ScoredResult> {
    let bm25_max = max_score(bm25);
    let tfidf_max = max_score(tfidf);

    // Keyed by doc_index so iteration order is deterministic.
    let mut merged: BTreeMap<usize, ScoredResult> = BTreeMap::new();

    for result in bm25 {
        let entry = merged
            .entry(result.doc_index)
            .or_insert_with(|| empty_result(result.doc_index));
        entry.score += weights.bm25 * (result.score / bm25_max);
        entry.matched_terms.extend(result.matched_terms.iter().cloned());
    }

    for result in tfidf {
        let entry = merged
            .entry(result.doc_index)
            .or_insert_with(|| empty_result(result.doc_index));
        entry.score += weights.tfidf * (result.score / tfidf_max);
        entry.matched_terms.extend(result.matched_terms.iter().cloned());
    }

    let mut fused: Vec<ScoredResult> = merged
        .into_values()
        .filter(|r| r.score > 0.0)
        .collect();
    sort_results(&mut fused);
    fused.truncate(top_k);

    check_fused_scores_bounded(&fused, weights);
    fused
}

fn empty_result(doc_index: usize) -> ScoredResult {
    ScoredResult {
        doc_index,
        score: 0.0,
        matched_terms: Default::default(),
    }
}

/// Runs BM25 and TF-IDF over an oversampled candidate set and fuses them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HybridRanker {
    bm25: Bm25Ranker,
    tfidf: TfIdfRanker,
    weights: FusionWeights,
}

impl HybridRanker {
    pub fn new(bm25: Bm25Ranker, weights: FusionWeights) -> Self {
        Self {
            bm25,
            tfidf: TfIdfRanker,
            weights,
        }
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    pub fn search(
        &self,
        query_terms: &[String],
        corpus: &CorpusStatistics,
        top_k: usize,
    ) -> Vec<ScoredResult> {
        if top_k == 0 {
            return Vec::new();
        }
        let candidates = top_k.saturating_mul(CANDIDATE_OVERSAMPLE);
        let bm25 = self.bm25.search(query_terms, corpus, candidates);
        let tfidf = self.tfidf.search(query_terms, corpus, candidates);
        fuse(&bm25, &tfidf, &self.weights, top_k)
    }
}
