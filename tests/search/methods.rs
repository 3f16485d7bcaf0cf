//! Per-method ranking behavior through the engine.

use crate::common::{engine_over, legislation_corpus, make_raw};
use provision::{SearchMethod, SearchOptions};

fn unfiltered(method: SearchMethod) -> SearchOptions {
    SearchOptions::default()
        .method(method)
        .min_score(0.0)
        .expand_query(false)
        .top_k(10)
}

#[test]
fn test_every_method_finds_the_obvious_match() {
    let (_, engine) = engine_over(legislation_corpus());
    for method in SearchMethod::ALL {
        let results = engine
            .search("accreditation transport operator", &unfiltered(method))
            .unwrap();
        assert_eq!(results[0].id, "tr-2", "method {}", method);
    }
}

#[test]
fn test_results_sorted_descending() {
    let (_, engine) = engine_over(legislation_corpus());
    for method in SearchMethod::ALL {
        let results = engine
            .search("provider operator passenger incident", &unfiltered(method))
            .unwrap();
        for pair in results.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "{}: {} before {}",
                method,
                pair[0].score,
                pair[1].score
            );
        }
    }
}

#[test]
fn test_hybrid_scores_within_unit_interval() {
    let (_, engine) = engine_over(legislation_corpus());
    let results = engine
        .search("provider operator passenger incident", &unfiltered(SearchMethod::Hybrid))
        .unwrap();
    assert!(!results.is_empty());
    for result in &results {
        assert!(result.score > 0.0 && result.score <= 1.0, "score {}", result.score);
    }
}

#[test]
fn test_tfidf_ignores_terms_in_every_passage() {
    let (_, engine) = engine_over(vec![
        make_raw("1", "section levy payable"),
        make_raw("2", "section exemption granted"),
    ]);

    let tfidf = engine
        .search("section", &unfiltered(SearchMethod::Tfidf))
        .unwrap();
    assert!(tfidf.is_empty());

    // BM25 idf stays positive for the same term.
    let bm25 = engine
        .search("section", &unfiltered(SearchMethod::Bm25))
        .unwrap();
    assert_eq!(bm25.len(), 2);
}

#[test]
fn test_repeated_term_ranks_higher() {
    let (_, engine) = engine_over(vec![
        make_raw("once", "penalty applies to operator"),
        make_raw("thrice", "penalty penalty penalty operator"),
        make_raw("none", "unrelated clause about vehicles"),
    ]);
    for method in SearchMethod::ALL {
        let results = engine.search("penalty", &unfiltered(method)).unwrap();
        assert_eq!(results[0].id, "thrice", "method {}", method);
    }
}
