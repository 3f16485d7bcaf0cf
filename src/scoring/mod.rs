// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how passages get their numbers.
//!
//! Two classic lexical rankers share one [`Ranker`] seam. BM25 is the primary
//! signal: its term-frequency saturation and length normalization suit short
//! legislative passages. TF-IDF is the corroborating signal. Hybrid fusion
//! rescales both into `[0, 1]` and blends them.

mod core;
pub mod bm25;
pub mod fusion;
pub mod ranking;
pub mod tfidf;

pub use self::core::Ranker;
pub use bm25::{Bm25Params, Bm25Ranker};
pub use fusion::{fuse, FusionWeights, HybridRanker};
pub use ranking::{compare_results, sort_results};
pub use tfidf::TfIdfRanker;
