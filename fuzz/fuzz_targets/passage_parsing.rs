// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for passage validation.
//!
//! Arbitrary bytes from a corpus file must either fail to parse or split
//! cleanly into accepted, rejected and skipped passages. Nothing in between may panic,
//! and every accepted passage must satisfy the passage invariants.

#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use provision::{build_corpus, decode_corpus, prepare_passages};

fuzz_target!(|data: &[u8]| {
    let Ok(fetched) = decode_corpus(data) else {
        return;
    };
    let decoded = fetched.passages.len();
    let prepared = prepare_passages(fetched.passages);

    assert_eq!(prepared.passages.len() + prepared.skipped.len(), decoded);

    let mut seen = HashSet::new();
    for passage in &prepared.passages {
        assert!(!passage.id.trim().is_empty());
        assert!(!passage.content.trim().is_empty());
        assert!(seen.insert(passage.id.clone()), "duplicate id {:?} accepted", passage.id);
    }

    let corpus = build_corpus(prepared.passages);
    assert_eq!(corpus.len(), corpus.doc_lengths.len());
});
