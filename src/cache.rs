// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index cache: one immutable corpus snapshot, rebuilt when it goes stale.
//!
//! Readers clone an `Arc<CorpusStatistics>` out from under a short read lock
//! and rank against it for as long as they like. A rebuild builds a whole new
//! snapshot off to the side and swaps the `Arc` under a short write lock, so a
//! search never sees a half-built index.
//!
//! ```text
//!            ensure_fresh / refresh
//!   EMPTY ─────────────────────────► BUILDING ──► READY
//!     ▲                                 ▲           │ ttl elapsed
//!     │ invalidate (from any state)     └─ STALE ◄──┘
//! ```
//!
//! # Concurrency
//!
//! - The rebuild mutex is taken with `try_lock`. Whoever gets it rebuilds.
//!   Everyone else returns the previous snapshot if there is one, or waits for
//!   the in-flight build on a cold start.
//! - `invalidate` bumps an epoch under the write lock. A rebuild that started
//!   under an older epoch hands its result to its own caller but never
//!   installs it.
//! - A fetch failure with a previous snapshot is logged, counted and papered
//!   over. The old snapshot keeps serving and the next call retries.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, MutexGuard, RwLock};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[cfg(not(feature = "parallel"))]
use crate::corpus::build_corpus;
#[cfg(feature = "parallel")]
use crate::corpus::build_corpus_parallel;
use crate::config::EngineConfig;
use crate::corpus::{prepare_passages, CorpusStatistics, PreparedPassages, SkippedPassage};
use crate::error::{Error, FetchError, Result};
use crate::source::{CorpusSource, FetchedPassages};

/// Lifecycle state of an [`IndexCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// No snapshot. Initial state and the state after `invalidate`.
    Empty,
    /// A rebuild is in flight.
    Building,
    /// A snapshot younger than the TTL is installed.
    Ready,
    /// A snapshot is installed but older than the TTL.
    Stale,
}

/// Point-in-time view of the cache, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_documents: usize,
    /// True once a snapshot is installed (even an empty one).
    pub indexed: bool,
    pub cache_age_ms: Option<u64>,
    pub state: CacheState,
    /// Passages left out of the current snapshot as malformed.
    pub skipped_passages: usize,
    /// Rebuilds that failed to fetch since the cache was created.
    pub failed_rebuilds: u64,
    /// Message of the most recent failed rebuild, cleared by a successful one.
    pub last_error: Option<String>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    corpus: Arc<CorpusStatistics>,
    built_at: Instant,
    skipped: usize,
}

/// Sets a flag for as long as it lives.
struct BuildingFlag<'a>(&'a AtomicBool);

impl<'a> BuildingFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for BuildingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the current corpus snapshot for one engine.
pub struct IndexCache {
    source: Arc<dyn CorpusSource>,
    ttl: Duration,
    fetch_timeout: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    rebuild_lock: Mutex<()>,
    building: AtomicBool,
    epoch: AtomicU64,
    failed_rebuilds: AtomicU64,
    last_error: RwLock<Option<String>>,
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("source", &self.source.name())
            .field("ttl", &self.ttl)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("state", &self.state())
            .finish()
    }
}

impl IndexCache {
    pub fn new(source: Arc<dyn CorpusSource>, ttl: Duration, fetch_timeout: Duration) -> Self {
        Self {
            source,
            ttl,
            fetch_timeout,
            snapshot: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
            building: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            failed_rebuilds: AtomicU64::new(0),
            last_error: RwLock::new(None),
        }
    }

    pub fn from_config(source: Arc<dyn CorpusSource>, config: &EngineConfig) -> Self {
        Self::new(source, config.cache_ttl(), config.fetch_timeout())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The installed snapshot, fresh or not.
    pub fn current(&self) -> Option<Arc<CorpusStatistics>> {
        self.snapshot
            .read()
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.corpus))
    }

    fn fresh_snapshot(&self) -> Option<Arc<CorpusStatistics>> {
        self.snapshot
            .read()
            .as_ref()
            .filter(|snapshot| snapshot.built_at.elapsed() < self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.corpus))
    }

    /// Return a snapshot no older than the TTL, rebuilding if needed.
    pub fn ensure_fresh(&self) -> Result<Arc<CorpusStatistics>> {
        if let Some(corpus) = self.fresh_snapshot() {
            return Ok(corpus);
        }

        let guard = match self.rebuild_lock.try_lock() {
            Some(guard) => guard,
            None => {
                if let Some(previous) = self.current() {
                    debug!("rebuild in progress, serving previous snapshot");
                    return Ok(previous);
                }
                // Cold start: nothing to serve, wait for the in-flight build.
                self.rebuild_lock.lock()
            }
        };

        // Another caller may have finished a rebuild while we were getting here.
        if let Some(corpus) = self.fresh_snapshot() {
            return Ok(corpus);
        }
        self.rebuild_locked(guard)
    }

    /// Rebuild unconditionally, waiting for any in-flight rebuild first.
    pub fn refresh(&self) -> Result<Arc<CorpusStatistics>> {
        let guard = self.rebuild_lock.lock();
        self.rebuild_locked(guard)
    }

    /// Drop the installed snapshot. An in-flight rebuild will not install its result.
    pub fn invalidate(&self) {
        let mut slot = self.snapshot.write();
        self.epoch.fetch_add(1, Ordering::AcqRel);
        *slot = None;
        info!("index cache invalidated");
    }

    pub fn state(&self) -> CacheState {
        if self.building.load(Ordering::Acquire) {
            return CacheState::Building;
        }
        match self.snapshot.read().as_ref() {
            None => CacheState::Empty,
            Some(snapshot) if snapshot.built_at.elapsed() >= self.ttl => CacheState::Stale,
            Some(_) => CacheState::Ready,
        }
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.state();
        let snapshot = self.snapshot.read().clone();
        IndexStats {
            total_documents: snapshot.as_ref().map_or(0, |s| s.corpus.len()),
            indexed: snapshot.is_some(),
            cache_age_ms: snapshot
                .as_ref()
                .map(|s| u64::try_from(s.built_at.elapsed().as_millis()).unwrap_or(u64::MAX)),
            state,
            skipped_passages: snapshot.as_ref().map_or(0, |s| s.skipped),
            failed_rebuilds: self.failed_rebuilds.load(Ordering::Relaxed),
            last_error: self.last_error.read().clone(),
        }
    }

    fn rebuild_locked(&self, _guard: MutexGuard<'_, ()>) -> Result<Arc<CorpusStatistics>> {
        let epoch = self.epoch.load(Ordering::Acquire);
        let _building = BuildingFlag::raise(&self.building);

        match self.build_snapshot() {
            Ok(snapshot) => {
                let corpus = Arc::clone(&snapshot.corpus);
                let mut slot = self.snapshot.write();
                if self.epoch.load(Ordering::Acquire) == epoch {
                    *slot = Some(snapshot);
                    *self.last_error.write() = None;
                } else {
                    debug!("cache invalidated during rebuild, result not installed");
                }
                Ok(corpus)
            }
            Err(err) if err.is_fetch() => {
                self.failed_rebuilds.fetch_add(1, Ordering::Relaxed);
                *self.last_error.write() = Some(err.to_string());
                match self.current() {
                    Some(previous) => {
                        warn!("rebuild failed, serving previous snapshot: {}", err);
                        Ok(previous)
                    }
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip_all, fields(source = %self.source.name()))]
    fn build_snapshot(&self) -> Result<Snapshot> {
        self.source.check_config()?;

        let started = Instant::now();
        let fetch_error = |cause: FetchError| Error::CorpusFetch {
            origin: self.source.name(),
            cause,
        };
        let FetchedPassages { passages: raw, rejected } = self
            .source
            .fetch(self.fetch_timeout)
            .map_err(fetch_error)?;
        if started.elapsed() > self.fetch_timeout {
            return Err(fetch_error(FetchError::Timeout(self.fetch_timeout)));
        }

        let PreparedPassages { passages, skipped } = prepare_passages(raw);
        let skipped: Vec<SkippedPassage> = rejected.into_iter().chain(skipped).collect();
        for passage in &skipped {
            warn!(
                position = passage.position,
                id = %passage.id,
                "skipping malformed passage: {}",
                passage.reason
            );
        }

        #[cfg(feature = "parallel")]
        let corpus = build_corpus_parallel(passages);
        #[cfg(not(feature = "parallel"))]
        let corpus = build_corpus(passages);

        info!(
            documents = corpus.len(),
            skipped = skipped.len(),
            vocabulary = corpus.vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "index rebuilt"
        );

        Ok(Snapshot {
            corpus: Arc::new(corpus),
            built_at: Instant::now(),
            skipped: skipped.len(),
        })
    }
}
