//! Identical calls on an unchanged corpus return identical ordered results.

use crate::common::{engine_over, engine_with_ttl, legislation_corpus, make_raw};
use provision::{SearchMethod, SearchOptions};

const QUERIES: &[&str] = &[
    "screening check",
    "provider complaint",
    "passenger transport operator levy",
    "reportable incident",
    "participant support plan",
];

#[test]
fn test_repeated_searches_are_identical() {
    let (_, engine) = engine_over(legislation_corpus());
    for method in SearchMethod::ALL {
        let options = SearchOptions::default().method(method).min_score(0.0);
        for query in QUERIES {
            let first = engine.search(query, &options).unwrap();
            let second = engine.search(query, &options).unwrap();
            assert_eq!(first, second, "{} / {:?}", method, query);
        }
    }
}

#[test]
fn test_rebuild_of_unchanged_corpus_is_identical() {
    // TTL of zero forces a rebuild on every call.
    let (_, engine) = engine_with_ttl(legislation_corpus(), 0);
    for method in SearchMethod::ALL {
        let options = SearchOptions::default().method(method).min_score(0.0);
        for query in QUERIES {
            let first = engine.search(query, &options).unwrap();
            let second = engine.search(query, &options).unwrap();
            assert_eq!(first, second, "{} / {:?}", method, query);
        }
    }
}

#[test]
fn test_ties_keep_corpus_order() {
    let passages = ["c", "a", "b"]
        .iter()
        .map(|id| make_raw(id, "identical levy wording"))
        .collect();
    let (_, engine) = engine_over(passages);

    let options = SearchOptions::default().min_score(0.0);
    let ids: Vec<String> = engine
        .search("levy", &options)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}
