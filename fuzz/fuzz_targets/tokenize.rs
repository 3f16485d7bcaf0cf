// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for tokenizer invariants.
//!
//! Every token must be longer than the minimum, made only of alphanumeric
//! characters, and never a stop word, whatever bytes come in.

#![no_main]

use libfuzzer_sys::fuzz_target;
use provision::tokenize::{is_stop_word, tokenize, MIN_TOKEN_CHARS};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let tokens = tokenize(&text);

    for token in &tokens {
        assert!(
            token.chars().count() > MIN_TOKEN_CHARS,
            "token {:?} too short",
            token
        );
        assert!(
            token.chars().all(char::is_alphanumeric),
            "token {:?} has a separator in it",
            token
        );
        assert!(!is_stop_word(token), "stop word {:?} survived", token);
    }

    // Same input, same tokens.
    assert_eq!(tokens, tokenize(&text));
});
