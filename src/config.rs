// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Everything tunable lives in [`EngineConfig`]: cache lifetime, fetch timeout,
//! BM25 parameters, fusion weights and the synonym table. Defaults are what a
//! fresh engine uses; [`EngineConfig::from_env`] overlays environment variables
//! on top of them.
//!
//! | Variable                       | Field                | Default |
//! |--------------------------------|----------------------|---------|
//! | `PROVISION_CACHE_TTL_SECS`     | `cache_ttl_secs`     | 300     |
//! | `PROVISION_FETCH_TIMEOUT_SECS` | `fetch_timeout_secs` | 30      |
//! | `PROVISION_BM25_K1`            | `bm25.k1`            | 1.5     |
//! | `PROVISION_BM25_B`             | `bm25.b`             | 0.75    |
//! | `PROVISION_FUSION_BM25`        | `fusion.bm25`        | 0.6     |
//! | `PROVISION_FUSION_TFIDF`       | `fusion.tfidf`       | 0.4     |

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::expand::DomainSynonyms;
use crate::scoring::{Bm25Params, FusionWeights};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

pub const ENV_CACHE_TTL_SECS: &str = "PROVISION_CACHE_TTL_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "PROVISION_FETCH_TIMEOUT_SECS";
pub const ENV_BM25_K1: &str = "PROVISION_BM25_K1";
pub const ENV_BM25_B: &str = "PROVISION_BM25_B";
pub const ENV_FUSION_BM25: &str = "PROVISION_FUSION_BM25";
pub const ENV_FUSION_TFIDF: &str = "PROVISION_FUSION_TFIDF";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long a built index stays fresh.
    pub cache_ttl_secs: u64,
    /// Upper bound on a single corpus fetch.
    pub fetch_timeout_secs: u64,
    pub bm25: Bm25Params,
    pub fusion: FusionWeights,
    pub synonyms: DomainSynonyms,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            bm25: Bm25Params::default(),
            fusion: FusionWeights::default(),
            synonyms: DomainSynonyms::default(),
        }
    }
}

impl EngineConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Defaults overlaid with whatever `PROVISION_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Separated from [`from_env`](Self::from_env)
    /// so tests do not have to mutate the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env_parse(&lookup, ENV_CACHE_TTL_SECS)? {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = env_parse(&lookup, ENV_FETCH_TIMEOUT_SECS)? {
            self.fetch_timeout_secs = v;
        }
        if let Some(v) = env_parse(&lookup, ENV_BM25_K1)? {
            self.bm25.k1 = v;
        }
        if let Some(v) = env_parse(&lookup, ENV_BM25_B)? {
            self.bm25.b = v;
        }
        if let Some(v) = env_parse(&lookup, ENV_FUSION_BM25)? {
            self.fusion.bm25 = v;
        }
        if let Some(v) = env_parse(&lookup, ENV_FUSION_TFIDF)? {
            self.fusion.tfidf = v;
        }
        Ok(self)
    }

    /// Reject values the rankers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            return Err(Error::configuration(
                "fetch_timeout_secs must be at least 1",
            ));
        }

        let Bm25Params { k1, b } = self.bm25;
        if !k1.is_finite() || k1 < 0.0 {
            return Err(Error::configuration(format!(
                "bm25.k1 must be a non-negative number, got {k1}"
            )));
        }
        if !b.is_finite() || !(0.0..=1.0).contains(&b) {
            return Err(Error::configuration(format!(
                "bm25.b must lie in [0, 1], got {b}"
            )));
        }

        let FusionWeights { bm25, tfidf } = self.fusion;
        if !bm25.is_finite() || !tfidf.is_finite() || bm25 < 0.0 || tfidf < 0.0 {
            return Err(Error::configuration(format!(
                "fusion weights must be non-negative, got bm25={bm25} tfidf={tfidf}"
            )));
        }
        if bm25 + tfidf == 0.0 {
            return Err(Error::configuration("fusion weights must not both be zero"));
        }
        Ok(())
    }
}

fn env_parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::configuration(format!("{key}={raw:?}: {e}"))),
    }
}
