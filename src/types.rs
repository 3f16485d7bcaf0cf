// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a passage index.
//!
//! Passages arrive from a corpus source as loosely typed JSON ([`RawPassage`]),
//! get validated into [`Passage`]s with structured [`SourceMetadata`], and come
//! back out of a search as [`SearchResultView`]s. The ranking math never looks
//! at metadata; it only rides along so callers can cite where a passage came from.
//!
//! | Type               | Produced by         | Lifetime                     |
//! |--------------------|---------------------|------------------------------|
//! | `RawPassage`       | corpus source       | one fetch                    |
//! | `Passage`          | validation          | one index snapshot           |
//! | `ScoredResult`     | rankers             | one query                    |
//! | `SearchResultView` | search facade       | handed to the caller         |
//!
//! # Invariants
//!
//! - **Passage**: `id` is non-blank and unique within a snapshot; `content` is non-blank.
//! - **ScoredResult**: `score > 0` and `matched_terms ⊆ query_terms ∩ terms(passage)`.

use std::collections::BTreeSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::PassageError;

// =============================================================================
// INPUT
// =============================================================================

/// A passage as delivered by a corpus source, before validation.
///
/// `id` accepts either a string or a number on the wire. `metadata` is an open
/// JSON object; it is turned into [`SourceMetadata`] during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPassage {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub metadata: Map<String, Value>,
}

impl RawPassage {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata key. Chainable.
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Descriptive data about where a passage came from.
///
/// Keys are read in snake_case with camelCase aliases, so both
/// `section_title` and `sectionTitle` work. Anything unrecognised lands in
/// `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMetadata {
    #[serde(alias = "source_title", alias = "sourceTitle")]
    pub title: String,
    #[serde(rename = "type", alias = "source_type", alias = "sourceType")]
    pub source_type: String,
    pub sector: String,
    #[serde(alias = "sectionTitle", skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(
        alias = "sectionNumber",
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_number: Option<String>,
    #[serde(alias = "chunkIndex", skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u32>,
    /// Provider-specific keys with no structured home.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated, indexable unit of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passage {
    pub id: String,
    pub content: String,
    pub source: SourceMetadata,
}

impl TryFrom<RawPassage> for Passage {
    type Error = PassageError;

    fn try_from(raw: RawPassage) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(PassageError::BlankId);
        }
        if raw.content.trim().is_empty() {
            return Err(PassageError::EmptyContent(raw.id));
        }

        let source = serde_json::from_value::<SourceMetadata>(Value::Object(raw.metadata))
            .map_err(|e| PassageError::Metadata {
                id: raw.id.clone(),
                message: e.to_string(),
            })?;

        Ok(Passage {
            id: raw.id,
            content: raw.content,
            source,
        })
    }
}

// =============================================================================
// RANKING OUTPUT
// =============================================================================

/// One ranked document, referenced by its position in the corpus snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    /// Index into `CorpusStatistics::passages`.
    pub doc_index: usize,
    pub score: f64,
    /// Query terms that occur in the document.
    pub matched_terms: BTreeSet<String>,
}

/// Source block of a [`SearchResultView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceView {
    pub title: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub sector: String,
}

/// A search hit as handed to callers.
///
/// Scores are method-dependent: BM25 and TF-IDF scores are unbounded, hybrid
/// scores lie in `[0, 1]`. Scores are not comparable across methods or across
/// index rebuilds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultView {
    pub id: String,
    pub content: String,
    pub score: f64,
    pub matched_terms: BTreeSet<String>,
    pub source: SourceView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u32>,
}

impl SearchResultView {
    /// Denormalize a scored passage into a view.
    pub fn from_scored(passage: &Passage, result: ScoredResult) -> Self {
        let source = &passage.source;
        SearchResultView {
            id: passage.id.clone(),
            content: passage.content.clone(),
            score: result.score,
            matched_terms: result.matched_terms,
            source: SourceView {
                title: source.title.clone(),
                source_type: source.source_type.clone(),
                sector: source.sector.clone(),
            },
            section_title: source.section_title.clone(),
            section_number: source.section_number.clone(),
            chunk_index: source.chunk_index,
        }
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    optional_string_or_number(deserializer).map(Option::unwrap_or_default)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {}",
            json_kind(&other)
        ))),
    }
}

fn null_as_empty_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
