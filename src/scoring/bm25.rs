// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 (Okapi) scoring.
//!
//! ```text
//! idf(t)      = ln((N - df + 0.5) / (df + 0.5) + 1)
//! score(t, d) = idf(t) * tf * (k1 + 1) / (tf + k1 * (1 - b + b * dl / avgdl))
//! ```
//!
//! The `+ 1` inside the logarithm keeps idf positive even for a term that
//! appears in every document, so on a small corpus a ubiquitous term still
//! adds a little instead of pulling the score negative. Both offsets of 0.5
//! keep the ratio defined when `df == 0` or `df == N`.

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusStatistics;

use super::core::Ranker;

/// Default term-frequency saturation.
pub const DEFAULT_K1: f64 = 1.5;

/// Default length-normalization strength.
pub const DEFAULT_B: f64 = 0.75;

/// Tunable BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term-frequency saturation. Higher lets repeated terms keep adding score.
    pub k1: f64,
    /// Length normalization in `[0, 1]`. 0 ignores length, 1 normalizes fully.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

/// BM25 inverse document frequency.
#[inline]
pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    let n = doc_count as f64;
    let df = doc_freq as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Contribution of one term with frequency `tf` to a document of length `doc_len`.
#[inline]
pub fn term_score(idf: f64, tf: f64, doc_len: f64, avg_doc_length: f64, params: &Bm25Params) -> f64 {
    let norm = 1.0 - params.b + params.b * (doc_len / avg_doc_length);
    idf * (tf * (params.k1 + 1.0)) / (tf + params.k1 * norm)
}

/// BM25 ranker with fixed parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bm25Ranker {
    params: Bm25Params,
}

impl Bm25Ranker {
    pub fn new(params: Bm25Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Bm25Params {
        &self.params
    }
}

impl Ranker for Bm25Ranker {
    fn score(&self, query_terms: &[String], corpus: &CorpusStatistics, doc_index: usize) -> f64 {
        let Some(document) = corpus.documents.get(doc_index) else {
            return 0.0;
        };
        let doc_len = corpus.doc_lengths[doc_index] as f64;

        query_terms
            .iter()
            .filter_map(|term| {
                let tf = document.term_frequency(term);
                // Absent terms contribute nothing: skip the idf lookup entirely.
                (tf > 0).then(|| {
                    let term_idf = idf(corpus.len(), corpus.doc_freq(term));
                    term_score(term_idf, tf as f64, doc_len, corpus.avg_doc_length, &self.params)
                })
            })
            .sum()
    }
}
