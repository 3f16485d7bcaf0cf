// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite, positive, sorted and deterministic for every ranker,
//! and hybrid scores must stay within [0, 1]. This catches floating-point edge
//! cases (empty documents, ubiquitous terms, repeated query terms) that
//! hand-written tests miss.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use provision::testing::make_passage;
use provision::{build_corpus, tokenize, Bm25Ranker, HybridRanker, Ranker, TfIdfRanker};

#[derive(Debug, Arbitrary)]
struct Input {
    documents: Vec<String>,
    query: String,
    top_k: u8,
}

fuzz_target!(|input: Input| {
    let passages = input
        .documents
        .iter()
        .take(64)
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| make_passage(&i.to_string(), text))
        .collect();
    let corpus = build_corpus(passages);
    let query = tokenize(&input.query);
    let top_k = usize::from(input.top_k);

    let ranked = [
        Bm25Ranker::default().search(&query, &corpus, top_k),
        TfIdfRanker.search(&query, &corpus, top_k),
        HybridRanker::default().search(&query, &corpus, top_k),
    ];

    for results in &ranked {
        assert!(results.len() <= top_k);
        for result in results {
            assert!(result.score.is_finite() && result.score > 0.0, "bad score {}", result.score);
            assert!(result.matched_terms.iter().all(|t| query.contains(t)));
        }
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    for result in &ranked[2] {
        assert!(result.score <= 1.0 + 1e-9, "hybrid score {} above 1", result.score);
    }

    // Same input, same ranking.
    assert_eq!(ranked[0], Bm25Ranker::default().search(&query, &corpus, top_k));
});
