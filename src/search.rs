// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search facade: the one entry point callers use.
//!
//! A query flows through:
//!
//! ```text
//! query ─► ensure fresh index ─► expand ─► tokenize ─► rank (2 × top_k)
//!       ─► min_score filter ─► sector filter ─► top_k ─► SearchResultView
//! ```
//!
//! The engine holds no global state. Two engines over two sources are fully
//! independent, each with its own [`IndexCache`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cache::{IndexCache, IndexStats};
use crate::config::EngineConfig;
use crate::corpus::CorpusStatistics;
use crate::error::Result;
use crate::expand::{expand_query, DomainSynonyms};
use crate::scoring::fusion::CANDIDATE_OVERSAMPLE;
use crate::scoring::{Bm25Ranker, HybridRanker, Ranker, TfIdfRanker};
use crate::source::CorpusSource;
use crate::tokenize::tokenize;
use crate::types::{ScoredResult, SearchResultView};

/// Which ranker scores the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    #[default]
    Bm25,
    Tfidf,
    Hybrid,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 3] = [SearchMethod::Bm25, SearchMethod::Tfidf, SearchMethod::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Bm25 => "bm25",
            SearchMethod::Tfidf => "tfidf",
            SearchMethod::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bm25" => Ok(SearchMethod::Bm25),
            "tfidf" | "tf-idf" => Ok(SearchMethod::Tfidf),
            "hybrid" => Ok(SearchMethod::Hybrid),
            other => Err(format!(
                "unknown search method {other:?} (expected bm25, tfidf or hybrid)"
            )),
        }
    }
}

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

/// Per-call search options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub top_k: usize,
    pub expand_query: bool,
    pub method: SearchMethod,
    /// Results scoring below this are dropped. Compared against the raw score
    /// of the chosen method.
    pub min_score: f64,
    /// Keep only passages whose `source.sector` equals this exactly.
    pub sector: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            expand_query: true,
            method: SearchMethod::Bm25,
            min_score: DEFAULT_MIN_SCORE,
            sector: None,
        }
    }
}

impl SearchOptions {
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn expand_query(mut self, expand: bool) -> Self {
        self.expand_query = expand;
        self
    }

    pub fn method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }
}

/// Ranks passages from one corpus source.
#[derive(Debug)]
pub struct SearchEngine {
    cache: IndexCache,
    bm25: Bm25Ranker,
    tfidf: TfIdfRanker,
    hybrid: HybridRanker,
    synonyms: DomainSynonyms,
}

impl SearchEngine {
    /// Build an engine over `source`. Fails on invalid configuration; the
    /// corpus itself is not fetched until the first search.
    pub fn new(source: Arc<dyn CorpusSource>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        source.check_config()?;

        let bm25 = Bm25Ranker::new(config.bm25);
        Ok(Self {
            cache: IndexCache::from_config(source, &config),
            bm25,
            tfidf: TfIdfRanker,
            hybrid: HybridRanker::new(bm25, config.fusion),
            synonyms: config.synonyms,
        })
    }

    pub fn with_defaults(source: Arc<dyn CorpusSource>) -> Result<Self> {
        Self::new(source, EngineConfig::default())
    }

    /// Rank passages for `query`.
    ///
    /// An empty corpus, a query with no indexable terms, or `top_k == 0` all
    /// give an empty list, not an error.
    #[instrument(skip_all, fields(method = %options.method, top_k = options.top_k))]
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResultView>> {
        let corpus = self.cache.ensure_fresh()?;
        if options.top_k == 0 || corpus.is_empty() {
            return Ok(Vec::new());
        }

        let query_text = if options.expand_query {
            expand_query(query, &self.synonyms)
        } else {
            query.to_string()
        };
        let query_terms = tokenize(&query_text);
        if query_terms.is_empty() {
            debug!("query has no indexable terms");
            return Ok(Vec::new());
        }

        let candidates = self.rank(
            options.method,
            &query_terms,
            &corpus,
            options.top_k.saturating_mul(CANDIDATE_OVERSAMPLE),
        );
        let candidate_count = candidates.len();

        let views: Vec<SearchResultView> = candidates
            .into_iter()
            .filter(|result| result.score >= options.min_score)
            .filter(|result| sector_matches(&corpus, result, options.sector.as_deref()))
            .take(options.top_k)
            .map(|result| {
                let passage = &corpus.passages[result.doc_index];
                SearchResultView::from_scored(passage, result)
            })
            .collect();

        debug!(
            terms = query_terms.len(),
            candidates = candidate_count,
            returned = views.len(),
            "search complete"
        );
        Ok(views)
    }

    /// Run one ranker against a snapshot.
    pub fn rank(
        &self,
        method: SearchMethod,
        query_terms: &[String],
        corpus: &CorpusStatistics,
        top_k: usize,
    ) -> Vec<ScoredResult> {
        match method {
            SearchMethod::Bm25 => self.bm25.search(query_terms, corpus, top_k),
            SearchMethod::Tfidf => self.tfidf.search(query_terms, corpus, top_k),
            SearchMethod::Hybrid => self.hybrid.search(query_terms, corpus, top_k),
        }
    }

    /// Drop the cached index; the next search rebuilds it.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    /// Rebuild the index now and report the result.
    pub fn refresh_index(&self) -> Result<IndexStats> {
        self.cache.refresh()?;
        Ok(self.cache.stats())
    }

    pub fn index_stats(&self) -> IndexStats {
        self.cache.stats()
    }

    pub fn synonyms(&self) -> &DomainSynonyms {
        &self.synonyms
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }
}

fn sector_matches(corpus: &CorpusStatistics, result: &ScoredResult, sector: Option<&str>) -> bool {
    match sector {
        None => true,
        Some(sector) => corpus
            .passages
            .get(result.doc_index)
            .is_some_and(|passage| passage.source.sector == sector),
    }
}
