//! End-to-end scenarios over small fixed corpora.

use crate::common::{engine_over, legislation_corpus, make_raw, make_raw_in_sector};
use provision::{CacheState, SearchMethod, SearchOptions};

#[test]
fn test_worker_screening_passage_wins() {
    let (_, engine) = engine_over(legislation_corpus());
    let options = SearchOptions::default().method(SearchMethod::Bm25).top_k(1);

    let results = engine.search("screening check", &options).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "ws-1");
    assert!(results[0].matched_terms.contains("screening"));
    assert!(results[0].matched_terms.contains("check"));
    assert!(results[0].score >= options.min_score);
}

#[test]
fn test_screening_check_over_two_passages() {
    let (_, engine) = engine_over(vec![
        make_raw("1", "Workers must complete a worker screening check before starting duties."),
        make_raw("2", "The participant has a right to make informed choices about their support."),
    ]);
    let options = SearchOptions::default().method(SearchMethod::Bm25).top_k(1);

    let results = engine.search("screening check", &options).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
    assert!(results[0].matched_terms.contains("screening"));
    assert!(results[0].matched_terms.contains("check"));
}

#[test]
fn test_empty_source_gives_empty_results() {
    let (_, engine) = engine_over(Vec::new());

    let results = engine.search("levy", &SearchOptions::default()).unwrap();
    assert!(results.is_empty());

    let stats = engine.index_stats();
    assert_eq!(stats.total_documents, 0);
    assert!(stats.indexed);
    assert_eq!(stats.state, CacheState::Ready);
}

#[test]
fn test_stop_word_query_gives_empty_results() {
    let (_, engine) = engine_over(legislation_corpus());
    for method in SearchMethod::ALL {
        let options = SearchOptions::default().method(method);
        assert!(engine.search("the a of", &options).unwrap().is_empty());
        assert!(engine.search("", &options).unwrap().is_empty());
        assert!(engine.search("  ,;!  ", &options).unwrap().is_empty());
    }
}

#[test]
fn test_sector_filter_keeps_only_matching_sector() {
    let (_, engine) = engine_over(vec![
        make_raw_in_sector("t", "Operators display the fare schedule.", "transport"),
        make_raw_in_sector("d", "Operators display the fare schedule.", "ndis"),
    ]);
    let options = SearchOptions::default().sector("transport");

    let results = engine.search("fare schedule", &options).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "t");
    assert_eq!(results[0].source.sector, "transport");
}

#[test]
fn test_unknown_sector_gives_empty_results() {
    let (_, engine) = engine_over(legislation_corpus());
    let options = SearchOptions::default().sector("mining");
    assert!(engine.search("operator levy", &options).unwrap().is_empty());
}

#[test]
fn test_reportable_incident_query() {
    let (_, engine) = engine_over(legislation_corpus());
    let results = engine
        .search("notify reportable incident", &SearchOptions::default())
        .unwrap();
    assert_eq!(results[0].id, "ndis-7");
}
