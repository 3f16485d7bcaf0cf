// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus sources: where passages come from.
//!
//! The engine never talks to storage directly. It asks a [`CorpusSource`] for
//! the full passage list on every rebuild and keeps nothing from the previous
//! fetch except the built snapshot.
//!
//! - [`MemorySource`]: in-process list, replaceable at runtime. Tests and embedding.
//! - [`JsonFileSource`]: a JSON array of passages on disk.
//!
//! A source hands back a [`FetchedPassages`]: the entries it could decode and
//! the ones it could not. Rejected entries are counted as skipped passages;
//! they never fail the fetch.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::Value;

use crate::corpus::SkippedPassage;
use crate::error::{Error, FetchError, PassageError, Result};
use crate::types::RawPassage;

/// Environment variable naming the corpus file for [`JsonFileSource::from_env`].
pub const ENV_CORPUS_PATH: &str = "PROVISION_CORPUS_PATH";

/// A provider of raw passages.
///
/// Implementations must be shareable across threads: one source backs one
/// cache, and any thread may trigger a rebuild.
pub trait CorpusSource: Send + Sync {
    /// Short human-readable name, used in logs and error messages.
    fn name(&self) -> String;

    /// Verify the source is usable before fetching. A failure here is a
    /// configuration error and is never papered over by a cached snapshot.
    fn check_config(&self) -> Result<()> {
        Ok(())
    }

    /// Fetch every passage. Must give up with [`FetchError::Timeout`] once
    /// `timeout` has elapsed.
    fn fetch_passages(&self, timeout: Duration) -> std::result::Result<Vec<RawPassage>, FetchError>;

    /// Fetch every passage along with the entries that could not be decoded.
    /// Sources that only ever produce well-typed passages keep the default.
    fn fetch(&self, timeout: Duration) -> std::result::Result<FetchedPassages, FetchError> {
        self.fetch_passages(timeout).map(FetchedPassages::from)
    }
}

/// Result of one fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedPassages {
    pub passages: Vec<RawPassage>,
    /// Entries that did not decode into a [`RawPassage`].
    pub rejected: Vec<SkippedPassage>,
}

impl From<Vec<RawPassage>> for FetchedPassages {
    fn from(passages: Vec<RawPassage>) -> Self {
        Self {
            passages,
            rejected: Vec::new(),
        }
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Passages held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    passages: RwLock<Vec<RawPassage>>,
}

impl MemorySource {
    pub fn new(passages: Vec<RawPassage>) -> Self {
        Self {
            passages: RwLock::new(passages),
        }
    }

    /// Swap the whole corpus. Takes effect on the next rebuild.
    pub fn replace(&self, passages: Vec<RawPassage>) {
        *self.passages.write() = passages;
    }

    pub fn push(&self, passage: RawPassage) {
        self.passages.write().push(passage);
    }

    pub fn len(&self) -> usize {
        self.passages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.read().is_empty()
    }
}

impl CorpusSource for MemorySource {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn fetch_passages(&self, _timeout: Duration) -> std::result::Result<Vec<RawPassage>, FetchError> {
        Ok(self.passages.read().clone())
    }
}

// =============================================================================
// JSON FILE
// =============================================================================

/// Decode a corpus payload: a bare array, or an object wrapping one under
/// `passages`.
///
/// Entries are decoded one at a time. An entry with the wrong shape (a numeric
/// `content`, an array for `metadata`) lands in `rejected` and the rest of the
/// file still loads. Only a payload that is not JSON, or not one of the two
/// accepted shapes, is a [`FetchError::Parse`].
pub fn decode_corpus(bytes: &[u8]) -> std::result::Result<FetchedPassages, FetchError> {
    let entries = match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("passages") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(unexpected_shape()),
        },
        _ => return Err(unexpected_shape()),
    };

    let mut fetched = FetchedPassages::default();
    for (position, entry) in entries.into_iter().enumerate() {
        let id = entry_id(&entry);
        match serde_json::from_value::<RawPassage>(entry) {
            Ok(passage) => fetched.passages.push(passage),
            Err(err) => fetched.rejected.push(SkippedPassage {
                position,
                id,
                reason: PassageError::Malformed {
                    position,
                    message: err.to_string(),
                },
            }),
        }
    }
    Ok(fetched)
}

fn unexpected_shape() -> FetchError {
    FetchError::Parse(<serde_json::Error as serde::de::Error>::custom(
        "expected an array of passages or an object with a `passages` array",
    ))
}

// Best-effort id for log lines about an entry that failed to decode.
fn entry_id(entry: &Value) -> String {
    match entry.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// Passages read from a JSON file, re-read on every rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `PROVISION_CORPUS_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_CORPUS_PATH) {
            Some(path) if !path.trim().is_empty() => Ok(Self::new(path.trim())),
            _ => Err(Error::configuration(format!(
                "{ENV_CORPUS_PATH} is not set"
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CorpusSource for JsonFileSource {
    fn name(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn check_config(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::configuration("corpus path is empty"));
        }
        if self.path.is_dir() {
            return Err(Error::configuration(format!(
                "corpus path {} is a directory",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn fetch_passages(&self, timeout: Duration) -> std::result::Result<Vec<RawPassage>, FetchError> {
        self.fetch(timeout).map(|fetched| fetched.passages)
    }

    fn fetch(&self, timeout: Duration) -> std::result::Result<FetchedPassages, FetchError> {
        let started = Instant::now();
        let bytes = fs::read(&self.path)?;
        let fetched = decode_corpus(&bytes)?;

        // Blocking reads cannot be interrupted; an overrun is reported once the read returns.
        if started.elapsed() > timeout {
            return Err(FetchError::Timeout(timeout));
        }
        Ok(fetched)
    }
}
