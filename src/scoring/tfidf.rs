// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Classic TF-IDF scoring.
//!
//! ```text
//! idf(t)      = ln(N / df)
//! score(t, d) = (1 + ln tf) * idf(t)      for tf > 0
//! ```
//!
//! Unlike BM25 there is no floor: a term present in every document has idf 0
//! and contributes nothing. A document that only matches such terms scores 0
//! and is left out of the results.

use crate::corpus::CorpusStatistics;

use super::core::Ranker;

/// Classic inverse document frequency. Zero when `doc_freq` is zero.
#[inline]
pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    if doc_freq == 0 {
        return 0.0;
    }
    (doc_count as f64 / doc_freq as f64).ln()
}

/// Sublinear term-frequency weight, `1 + ln tf`.
#[inline]
pub fn tf_weight(tf: u32) -> f64 {
    if tf == 0 {
        0.0
    } else {
        1.0 + f64::from(tf).ln()
    }
}

/// TF-IDF ranker. Stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TfIdfRanker;

impl Ranker for TfIdfRanker {
    fn score(&self, query_terms: &[String], corpus: &CorpusStatistics, doc_index: usize) -> f64 {
        let Some(document) = corpus.documents.get(doc_index) else {
            return 0.0;
        };

        query_terms
            .iter()
            .filter_map(|term| {
                let tf = document.term_frequency(term);
                (tf > 0).then(|| tf_weight(tf) * idf(corpus.len(), corpus.doc_freq(term)))
            })
            .sum()
    }
}
