// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Domain query expansion.
//!
//! Legislation says "worker screening clearance" where a user types
//! "background check". Expansion widens the query with synonym phrases before
//! tokenization. Matching is by substring on the lowercased query, not by
//! token: "plans" triggers the `plan` entry. False positives only add extra
//! scoreable terms, and the corpus is small, so recall wins.
//!
//! Expansion only ever appends. Every BM25 idf is positive and every TF-IDF
//! idf is non-negative, so an appended term can add score but never remove any.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map from trigger phrase to the synonym phrases it appends.
///
/// Keys are stored lowercased and visited in sorted order, so the same query
/// always expands to the same string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct DomainSynonyms {
    entries: BTreeMap<String, Vec<String>>,
}

impl DomainSynonyms {
    /// An empty table: expansion becomes a lowercase pass.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add (or replace) an entry. The key is lowercased.
    pub fn insert<I, S>(&mut self, key: &str, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            key.to_lowercase(),
            phrases.into_iter().map(Into::into).collect(),
        );
    }

    /// Parse a JSON object of `{ "key": ["phrase", ...] }`.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, phrases)| (key.as_str(), phrases.as_slice()))
    }
}

/// Synonyms for disability services, worker screening and transport
/// legislation.
impl Default for DomainSynonyms {
    fn default() -> Self {
        let mut synonyms = Self::empty();
        synonyms.insert("ndis", ["national disability insurance scheme"]);
        synonyms.insert("worker screening", ["background check", "clearance"]);
        synonyms.insert("screening", ["clearance", "check"]);
        synonyms.insert(
            "restrictive practice",
            ["restraint", "seclusion", "behaviour support"],
        );
        synonyms.insert("participant", ["person with disability", "client"]);
        synonyms.insert("provider", ["registered provider", "service provider"]);
        synonyms.insert("complaint", ["grievance", "feedback"]);
        synonyms.insert("incident", ["reportable incident", "serious incident"]);
        synonyms.insert("plan", ["support plan", "funding"]);
        synonyms.insert("transport", ["vehicle", "passenger"]);
        synonyms.insert("safeguard", ["protection", "quality"]);
        synonyms.insert("code of conduct", ["obligations", "standards"]);
        synonyms.insert("penalty", ["fine", "offence"]);
        synonyms.insert("accreditation", ["registration", "certification"]);
        synonyms
    }
}

impl From<BTreeMap<String, Vec<String>>> for DomainSynonyms {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        let mut synonyms = Self::empty();
        for (key, phrases) in entries {
            synonyms.insert(&key, phrases);
        }
        synonyms
    }
}

impl From<DomainSynonyms> for BTreeMap<String, Vec<String>> {
    fn from(synonyms: DomainSynonyms) -> Self {
        synonyms.entries
    }
}

/// Lowercase `query` and append the synonyms of every key it contains.
pub fn expand_query(query: &str, synonyms: &DomainSynonyms) -> String {
    let mut expanded = query.to_lowercase();
    let additions: Vec<&str> = synonyms
        .iter()
        .filter(|(key, _)| expanded.contains(key))
        .flat_map(|(_, phrases)| phrases.iter().map(String::as_str))
        .collect();

    for phrase in additions {
        expanded.push(' ');
        expanded.push_str(phrase);
    }
    expanded
}
