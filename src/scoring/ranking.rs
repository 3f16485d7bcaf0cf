// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted and cut.
//!
//! Every ranker shares the same discipline: score every document, drop the
//! zeros, sort by score descending with corpus order as the tiebreaker, keep
//! the top K. Keeping that in one place means BM25, TF-IDF and the fused list
//! all order ties the same way.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::contracts::check_ranked_results;
use crate::corpus::{CorpusStatistics, TokenizedDocument};
use crate::types::ScoredResult;

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Score** - descending (higher wins)
/// 2. **Doc index** - ascending, so ties keep corpus order
pub fn compare_results(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.doc_index.cmp(&b.doc_index),
        ord => ord,
    }
}

/// Sort results in ranking order.
pub fn sort_results(results: &mut [ScoredResult]) {
    results.sort_by(compare_results);
}

/// Query terms (deduplicated) that occur in `document`.
pub fn matched_terms(query_terms: &[String], document: &TokenizedDocument) -> BTreeSet<String> {
    query_terms
        .iter()
        .filter(|term| document.contains(term))
        .cloned()
        .collect()
}

/// Score every document with `score_doc`, keep positive scores, sort, truncate.
pub fn rank_documents<F>(
    query_terms: &[String],
    corpus: &CorpusStatistics,
    top_k: usize,
    mut score_doc: F,
) -> Vec<ScoredResult>
where
    F: FnMut(usize) -> f64,
{
    if top_k == 0 || query_terms.is_empty() || corpus.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<ScoredResult> = (0..corpus.len())
        .filter_map(|doc_index| {
            let score = score_doc(doc_index);
            (score > 0.0).then(|| ScoredResult {
                doc_index,
                score,
                matched_terms: matched_terms(query_terms, &corpus.documents[doc_index]),
            })
        })
        .collect();

    sort_results(&mut results);
    results.truncate(top_k);

    check_ranked_results(&results, query_terms, corpus);
    results
}
