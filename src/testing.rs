// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixture builders so tests do not each invent their own.

#![doc(hidden)]

use crate::corpus::{build_corpus, CorpusStatistics};
use crate::types::{Passage, RawPassage, SourceMetadata};

/// Create a validated passage with a generic title and no sector.
pub fn make_passage(id: &str, content: &str) -> Passage {
    make_passage_in_sector(id, content, "")
}

/// Create a validated passage belonging to `sector`.
pub fn make_passage_in_sector(id: &str, content: &str, sector: &str) -> Passage {
    Passage {
        id: id.to_string(),
        content: content.to_string(),
        source: SourceMetadata {
            title: format!("Act {}", id),
            source_type: "legislation".to_string(),
            sector: sector.to_string(),
            ..SourceMetadata::default()
        },
    }
}

/// Create a raw passage as a corpus source would deliver it.
pub fn make_raw(id: &str, content: &str) -> RawPassage {
    RawPassage::new(id, content)
        .with_metadata("title", format!("Act {}", id))
        .with_metadata("type", "legislation")
}

/// Create a raw passage tagged with `sector`.
pub fn make_raw_in_sector(id: &str, content: &str, sector: &str) -> RawPassage {
    make_raw(id, content).with_metadata("sector", sector)
}

/// Build a corpus from bare texts, ids assigned `"0"`, `"1"`, ...
pub fn corpus_from_texts(texts: &[&str]) -> CorpusStatistics {
    build_corpus(
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| make_passage(&i.to_string(), text))
            .collect(),
    )
}

/// Owned query terms from string literals.
pub fn terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
