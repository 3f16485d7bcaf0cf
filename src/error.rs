// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the engine.
//!
//! Only two things can actually go wrong on a search call: the engine is
//! misconfigured, or the corpus source failed. Everything else (empty corpus,
//! a query made entirely of stop words, documents that score zero) is an
//! ordinary outcome and comes back as an empty result list.

use std::time::Duration;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`SearchEngine`](crate::SearchEngine) and
/// [`IndexCache`](crate::IndexCache).
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration. Raised before any fetch is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The corpus source failed while fetching passages.
    #[error("failed to fetch corpus from {origin}: {cause}")]
    CorpusFetch {
        /// Name of the source that failed.
        origin: String,
        #[source]
        cause: FetchError,
    },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// True for errors that a cached snapshot can paper over.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::CorpusFetch { .. })
    }
}

/// Failure reported by a [`CorpusSource`](crate::CorpusSource).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed corpus payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fetch exceeded timeout of {0:?}")]
    Timeout(Duration),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Why a single passage was left out of an index build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PassageError {
    #[error("passage has a blank id")]
    BlankId,

    #[error("passage {0:?} has no content")]
    EmptyContent(String),

    #[error("passage id {0:?} already appeared earlier in the corpus")]
    DuplicateId(String),

    #[error("passage {id:?} has invalid metadata: {message}")]
    Metadata { id: String, message: String },

    /// The entry at `position` could not be decoded as a passage at all.
    #[error("entry {position} is not a valid passage: {message}")]
    Malformed { position: usize, message: String },
}
