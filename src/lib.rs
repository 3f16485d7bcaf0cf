// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical ranking over legislative and regulatory passages.
//!
//! Passages are pulled from a [`CorpusSource`], tokenized once into an
//! immutable [`CorpusStatistics`] snapshot, and ranked per query with BM25,
//! TF-IDF, or a normalized blend of the two. The snapshot is cached and rebuilt
//! when it outlives its TTL.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  source.rs   │────▶│   cache.rs   │────▶│    search.rs     │
//! │ (CorpusSource│     │ (IndexCache, │     │  (SearchEngine,  │
//! │  RawPassage) │     │  Arc swap)   │     │  SearchOptions)  │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//!                             │                      │
//!                             ▼                      ▼
//!                      ┌──────────────┐     ┌──────────────────┐
//!                      │  corpus.rs   │     │    expand.rs     │
//!                      │ (statistics, │     │ (domain synonyms)│
//!                      │  validation) │     └──────────────────┘
//!                      └──────────────┘              │
//!                             │                      ▼
//!                             ▼              ┌──────────────────┐
//!                      ┌──────────────┐     │    scoring/      │
//!                      │ tokenize.rs  │────▶│ bm25 tfidf fusion│
//!                      └──────────────┘     └──────────────────┘
//! ```
//!
//! # Invariants
//!
//! | Module      | Property                                               |
//! |-------------|--------------------------------------------------------|
//! | `corpus`    | avg length is the mean; `0 < df(t) <= N`               |
//! | `scoring`   | results have positive scores, sorted descending        |
//! | `scoring`   | matched terms ⊆ query terms ∩ document terms           |
//! | `fusion`    | hybrid scores in `[0, 1]` with the default weights     |
//! | `cache`     | a search never observes a partially built snapshot     |
//!
//! Each is checked in debug builds by [`contracts`].
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use provision::{MemorySource, RawPassage, SearchEngine, SearchOptions};
//!
//! let source = MemorySource::new(vec![
//!     RawPassage::new("1", "Workers must complete a worker screening check before starting duties."),
//!     RawPassage::new("2", "Providers must notify the commission of a reportable incident."),
//! ]);
//! let engine = SearchEngine::with_defaults(Arc::new(source)).unwrap();
//!
//! let results = engine.search("screening check", &SearchOptions::default()).unwrap();
//! assert_eq!(results[0].id, "1");
//! ```

pub mod cache;
pub mod config;
pub mod contracts;
pub mod corpus;
pub mod error;
pub mod expand;
pub mod scoring;
pub mod search;
pub mod source;
pub mod testing;
pub mod tokenize;
pub mod types;

pub use cache::{CacheState, IndexCache, IndexStats};
pub use config::EngineConfig;
pub use corpus::{
    build_corpus, prepare_passages, CorpusStatistics, PreparedPassages, SkippedPassage,
    TokenizedDocument,
};
#[cfg(feature = "parallel")]
pub use corpus::build_corpus_parallel;
pub use error::{Error, FetchError, PassageError, Result};
pub use expand::{expand_query, DomainSynonyms};
pub use scoring::{Bm25Params, Bm25Ranker, FusionWeights, HybridRanker, Ranker, TfIdfRanker};
pub use search::{SearchEngine, SearchMethod, SearchOptions};
pub use source::{decode_corpus, CorpusSource, FetchedPassages, JsonFileSource, MemorySource};
pub use tokenize::tokenize;
pub use types::{Passage, RawPassage, ScoredResult, SearchResultView, SourceMetadata, SourceView};
