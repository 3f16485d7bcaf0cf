// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the index and ranking invariants.
//!
//! Debug-mode assertions that fail early when a build or a ranking pass breaks
//! an invariant the rest of the crate relies on. They compile to nothing in
//! release builds (`debug_assert!`).
//!
//! | Contract Function            | Invariant                                           |
//! |------------------------------|-----------------------------------------------------|
//! | `check_corpus_well_formed`   | aligned arrays, mean length, bounded doc frequency  |
//! | `check_ranked_results`       | positive scores, matched terms subset, sorted       |
//! | `check_fused_scores_bounded` | hybrid scores within `[0, bm25 + tfidf weight]`     |

use crate::corpus::CorpusStatistics;
use crate::scoring::FusionWeights;
use crate::types::ScoredResult;

/// Tolerance for floating-point comparisons.
const EPSILON: f64 = 1e-9;

/// Fusion weights must not be negative; their sum bounds every fused score.
const _: () = {
    const BM25: f64 = crate::scoring::fusion::DEFAULT_BM25_WEIGHT;
    const TFIDF: f64 = crate::scoring::fusion::DEFAULT_TFIDF_WEIGHT;
    assert!(BM25 >= 0.0 && TFIDF >= 0.0);
    assert!(BM25 + TFIDF <= 1.0);
};

// ============================================================================
// CORPUS CONTRACTS
// ============================================================================

/// Check the corpus statistics invariants.
///
/// # Panics (debug builds only)
/// Panics if the arrays are misaligned, the average length is not the mean,
/// or a document frequency is zero or exceeds the corpus size.
#[inline]
pub fn check_corpus_well_formed(corpus: &CorpusStatistics) {
    debug_assert_eq!(
        corpus.passages.len(),
        corpus.documents.len(),
        "Contract violation: passages and documents misaligned"
    );
    debug_assert_eq!(
        corpus.documents.len(),
        corpus.doc_lengths.len(),
        "Contract violation: documents and doc_lengths misaligned"
    );

    if cfg!(debug_assertions) {
        let expected_avg = if corpus.doc_lengths.is_empty() {
            1.0
        } else {
            corpus.doc_lengths.iter().sum::<usize>() as f64 / corpus.doc_lengths.len() as f64
        };
        debug_assert!(
            (corpus.avg_doc_length - expected_avg).abs() < EPSILON,
            "Contract violation: avg_doc_length {} != mean {}",
            corpus.avg_doc_length,
            expected_avg
        );

        for (term, &df) in &corpus.doc_freq {
            debug_assert!(
                df > 0 && df <= corpus.len(),
                "Contract violation: doc_freq[{:?}] = {} outside 1..={}",
                term,
                df,
                corpus.len()
            );
        }
    }
}

// ============================================================================
// RANKING CONTRACTS
// ============================================================================

/// Check a ranked result list against the query that produced it.
///
/// # Panics (debug builds only)
/// Panics if a score is not positive and finite, a matched term is not both a
/// query term and a document term, or results are out of order.
#[inline]
pub fn check_ranked_results(
    results: &[ScoredResult],
    query_terms: &[String],
    corpus: &CorpusStatistics,
) {
    if !cfg!(debug_assertions) {
        return;
    }

    for result in results {
        debug_assert!(
            result.score > 0.0 && result.score.is_finite(),
            "Contract violation: doc {} has non-positive score {}",
            result.doc_index,
            result.score
        );
        debug_assert!(
            result.doc_index < corpus.len(),
            "Contract violation: doc_index {} >= corpus size {}",
            result.doc_index,
            corpus.len()
        );
        debug_assert!(
            !result.matched_terms.is_empty(),
            "Contract violation: doc {} scored without matching any term",
            result.doc_index
        );
        for term in &result.matched_terms {
            debug_assert!(
                query_terms.contains(term),
                "Contract violation: matched term {:?} is not a query term",
                term
            );
            debug_assert!(
                corpus
                    .documents
                    .get(result.doc_index)
                    .is_some_and(|doc| doc.contains(term)),
                "Contract violation: matched term {:?} absent from doc {}",
                term,
                result.doc_index
            );
        }
    }

    check_sorted_descending(results);
}

/// Check that results are sorted by descending score.
#[inline]
pub fn check_sorted_descending(results: &[ScoredResult]) {
    for pair in results.windows(2) {
        debug_assert!(
            pair[0].score >= pair[1].score,
            "Contract violation: results not sorted ({} before {})",
            pair[0].score,
            pair[1].score
        );
    }
}

/// Check that every fused score lies within `[0, bm25 + tfidf]` weight.
#[inline]
pub fn check_fused_scores_bounded(results: &[ScoredResult], weights: &FusionWeights) {
    let upper = weights.bm25 + weights.tfidf + EPSILON;
    for result in results {
        debug_assert!(
            result.score >= 0.0 && result.score <= upper,
            "Contract violation: fused score {} outside [0, {}]",
            result.score,
            upper
        );
    }
    check_sorted_descending(results);
}
