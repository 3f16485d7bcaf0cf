// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranker seam.
//!
//! A ranker only has to say how one document scores against a query. The
//! search loop, zero-score exclusion, ordering and truncation are shared and
//! come for free from [`Ranker::search`].

use crate::corpus::CorpusStatistics;
use crate::types::ScoredResult;

use super::ranking::rank_documents;

/// A per-document relevance function over a corpus snapshot.
pub trait Ranker {
    /// Score document `doc_index` for `query_terms`. Zero means "no match".
    ///
    /// Query terms are taken as a sequence: a repeated term contributes once
    /// per repetition.
    fn score(&self, query_terms: &[String], corpus: &CorpusStatistics, doc_index: usize) -> f64;

    /// Rank every document and return the best `top_k` with positive scores.
    fn search(
        &self,
        query_terms: &[String],
        corpus: &CorpusStatistics,
        top_k: usize,
    ) -> Vec<ScoredResult> {
        rank_documents(query_terms, corpus, top_k, |doc_index| {
            self.score(query_terms, corpus, doc_index)
        })
    }
}
