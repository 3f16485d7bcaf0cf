// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus statistics: everything the rankers need, computed in one pass.
//!
//! A build tokenizes every passage once and derives document lengths, the
//! average length, and document frequency per term. There is no incremental
//! update: a rebuild starts from scratch and produces a fresh
//! [`CorpusStatistics`] that replaces the old one wholesale.
//!
//! # Invariants
//!
//! 1. **AVG_LEN**: `avg_doc_length == mean(doc_lengths)`, or `1.0` for an empty corpus.
//! 2. **DOC_FREQ_BOUNDED**: `0 < doc_freq[t] <= passages.len()` for every indexed term.
//! 3. **DOC_FREQ_SET**: a document bumps `doc_freq[t]` once, however often it repeats `t`.
//! 4. **ALIGNED**: `passages`, `documents` and `doc_lengths` have equal length.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::contracts::check_corpus_well_formed;
use crate::error::PassageError;
use crate::tokenize::tokenize;
use crate::types::{Passage, RawPassage};

/// The terms of one passage plus a term-frequency table derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizedDocument {
    /// Terms in document order, repetitions kept.
    pub terms: Vec<String>,
    term_freq: HashMap<String, u32>,
}

impl TokenizedDocument {
    pub fn from_text(text: &str) -> Self {
        Self::from_terms(tokenize(text))
    }

    pub fn from_terms(terms: Vec<String>) -> Self {
        let mut term_freq: HashMap<String, u32> = HashMap::new();
        for term in &terms {
            *term_freq.entry(term.clone()).or_insert(0) += 1;
        }
        Self { terms, term_freq }
    }

    /// Document length in tokens.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Occurrences of `term` in this document (0 if absent).
    #[inline]
    pub fn term_frequency(&self, term: &str) -> u32 {
        self.term_freq.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.term_freq.contains_key(term)
    }

    /// Distinct terms, in no particular order.
    pub fn unique_terms(&self) -> impl Iterator<Item = &str> {
        self.term_freq.keys().map(String::as_str)
    }
}

/// An immutable, fully built index snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStatistics {
    pub passages: Vec<Passage>,
    pub documents: Vec<TokenizedDocument>,
    pub doc_lengths: Vec<usize>,
    pub avg_doc_length: f64,
    pub doc_freq: HashMap<String, usize>,
}

impl Default for CorpusStatistics {
    fn default() -> Self {
        Self::empty()
    }
}

impl CorpusStatistics {
    pub fn empty() -> Self {
        Self {
            passages: Vec::new(),
            documents: Vec::new(),
            doc_lengths: Vec::new(),
            avg_doc_length: 1.0,
            doc_freq: HashMap::new(),
        }
    }

    /// Number of documents (N).
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Documents containing `term` at least once.
    #[inline]
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.passages.iter().position(|p| p.id == id)
    }
}

/// Build statistics for `passages`, tokenizing sequentially.
pub fn build_corpus(passages: Vec<Passage>) -> CorpusStatistics {
    let documents: Vec<TokenizedDocument> = passages
        .iter()
        .map(|p| TokenizedDocument::from_text(&p.content))
        .collect();
    assemble(passages, documents)
}

/// Build statistics for `passages`, tokenizing on the rayon pool.
///
/// Produces exactly what [`build_corpus`] produces; only tokenization runs in
/// parallel, aggregation stays sequential so document order is preserved.
#[cfg(feature = "parallel")]
pub fn build_corpus_parallel(passages: Vec<Passage>) -> CorpusStatistics {
    let documents: Vec<TokenizedDocument> = passages
        .par_iter()
        .map(|p| TokenizedDocument::from_text(&p.content))
        .collect();
    assemble(passages, documents)
}

fn assemble(passages: Vec<Passage>, documents: Vec<TokenizedDocument>) -> CorpusStatistics {
    let doc_lengths: Vec<usize> = documents.iter().map(TokenizedDocument::len).collect();

    // INVARIANT: DOC_FREQ_SET - count unique terms per document
    let mut doc_freq: HashMap<String, usize> = HashMap::new();
    for document in &documents {
        for term in document.unique_terms() {
            *doc_freq.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    // INVARIANT: AVG_LEN - defined as 1.0 when there is nothing to average
    let avg_doc_length = if doc_lengths.is_empty() {
        1.0
    } else {
        doc_lengths.iter().sum::<usize>() as f64 / doc_lengths.len() as f64
    };

    let corpus = CorpusStatistics {
        passages,
        documents,
        doc_lengths,
        avg_doc_length,
        doc_freq,
    };
    check_corpus_well_formed(&corpus);
    corpus
}

/// A passage that failed validation, with its position in the fetched batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPassage {
    pub position: usize,
    pub id: String,
    pub reason: PassageError,
}

/// Outcome of validating a fetched batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedPassages {
    pub passages: Vec<Passage>,
    pub skipped: Vec<SkippedPassage>,
}

/// Validate raw passages, skipping malformed ones and later duplicates of an id.
///
/// One bad passage never sinks the batch; it is reported in `skipped` instead.
pub fn prepare_passages(raw: Vec<RawPassage>) -> PreparedPassages {
    let mut prepared = PreparedPassages::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (position, raw_passage) in raw.into_iter().enumerate() {
        let id = raw_passage.id.clone();
        let validated = Passage::try_from(raw_passage).and_then(|passage| {
            if seen.insert(passage.id.clone()) {
                Ok(passage)
            } else {
                Err(PassageError::DuplicateId(passage.id))
            }
        });

        match validated {
            Ok(passage) => prepared.passages.push(passage),
            Err(reason) => prepared.skipped.push(SkippedPassage {
                position,
                id,
                reason,
            }),
        }
    }

    prepared
}
