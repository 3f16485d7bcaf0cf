// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text to terms.
//!
//! Every score in the crate is computed over the output of [`tokenize`], so the
//! index side and the query side must agree exactly. There is one tokenizer and
//! both sides call it.
//!
//! # Rules
//!
//! 1. Lowercase.
//! 2. Anything that is not a letter, digit or whitespace becomes a space, so
//!    `"s.12(3)"` splits into `s`, `12`, `3` instead of gluing into `s123`.
//! 3. Split on whitespace.
//! 4. Drop tokens of [`MIN_TOKEN_CHARS`] characters or fewer.
//! 5. Drop stop words.
//!
//! Order and repetition are preserved: term frequency depends on them.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens this short (in characters) or shorter are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

/// English stop words: articles, conjunctions, auxiliaries, prepositions and
/// pronouns. Words of two characters or fewer are listed for completeness even
/// though the length rule already removes them.
const STOP_WORD_LIST: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need",
    "dare", "ought", "used", "it", "its", "this", "that", "these", "those", "i", "you", "he",
    "she", "we", "they", "what", "which", "who", "whom", "whose", "where", "when", "why", "how",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORD_LIST.iter().copied().collect());

/// Check if a (lowercased) word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

#[inline]
fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace()
}

/// Split text into normalized, filtered terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_term_char(c) { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_owned)
        .collect()
}
