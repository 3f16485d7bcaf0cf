//! Shared proptest strategies.

use proptest::prelude::*;

/// Word drawn from a small vocabulary so terms actually repeat across
/// documents. Every word survives tokenization (long enough, no stop words).
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "levy", "operator", "passenger", "permit", "provider", "participant", "incident",
        "screening", "clearance", "penalty", "notice", "register", "tribunal", "appeal",
        "section", "schedule",
    ])
    .prop_map(str::to_string)
}

/// Document text of 1 to 12 words.
pub fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..12).prop_map(|words| words.join(" "))
}

/// A corpus of 1 to 8 documents.
pub fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(document_strategy(), 1..8)
}

/// Query of 1 to 4 terms, possibly repeated.
pub fn query_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 1..4)
}

/// A sector label for a passage.
pub fn sector_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["transport", "disability", "screening"]).prop_map(str::to_string)
}
