//! Search option handling: top_k, min_score, expansion.

use crate::common::{engine_over, legislation_corpus, make_raw};
use provision::{SearchMethod, SearchOptions};

#[test]
fn test_top_k_truncates() {
    let passages = (0..12)
        .map(|i| make_raw(&format!("p{}", i), &format!("levy clause number {}", i)))
        .collect();
    let (_, engine) = engine_over(passages);

    for top_k in [1, 3, 5, 12, 50] {
        let options = SearchOptions::default().top_k(top_k).min_score(0.0);
        let results = engine.search("levy", &options).unwrap();
        assert_eq!(results.len(), top_k.min(12), "top_k = {}", top_k);
    }
}

#[test]
fn test_top_k_zero() {
    let (_, engine) = engine_over(legislation_corpus());
    let results = engine
        .search("levy", &SearchOptions::default().top_k(0))
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_min_score_is_a_floor() {
    let (_, engine) = engine_over(legislation_corpus());
    let all = engine
        .search("operator passenger levy", &SearchOptions::default().min_score(0.0))
        .unwrap();
    assert!(all.len() >= 2);

    let floor = all[0].score;
    let filtered = engine
        .search("operator passenger levy", &SearchOptions::default().min_score(floor))
        .unwrap();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|r| r.score >= floor));
    assert!(filtered.len() < all.len());
}

#[test]
fn test_expansion_adds_synonym_terms() {
    let (_, engine) = engine_over(legislation_corpus());

    let plain = engine
        .search("screening", &SearchOptions::default().expand_query(false))
        .unwrap();
    assert_eq!(plain[0].id, "ws-1");
    assert!(!plain[0].matched_terms.contains("check"));

    // "screening" expands with "clearance check".
    let expanded = engine
        .search("screening", &SearchOptions::default())
        .unwrap();
    assert_eq!(expanded[0].id, "ws-1");
    assert!(expanded[0].matched_terms.contains("check"));
    assert!(expanded[0].score > plain[0].score);
}

#[test]
fn test_expansion_reaches_passages_without_query_words() {
    // "complaint" expands to "grievance"; only the expanded query can match.
    let (_, engine) = engine_over(vec![
        make_raw("g", "A grievance may be lodged in writing."),
        make_raw("x", "Unrelated text about vehicles."),
    ]);

    let plain = engine
        .search("complaint", &SearchOptions::default().expand_query(false))
        .unwrap();
    assert!(plain.is_empty());

    let expanded = engine
        .search("complaint", &SearchOptions::default())
        .unwrap();
    assert_eq!(expanded.len(), 1);
    assert_eq!(expanded[0].id, "g");
}

#[test]
fn test_matched_terms_are_query_terms() {
    let (_, engine) = engine_over(legislation_corpus());
    for method in SearchMethod::ALL {
        let options = SearchOptions::default().method(method).expand_query(false);
        let results = engine.search("operator passenger accreditation", &options).unwrap();
        for result in &results {
            assert!(!result.matched_terms.is_empty());
            for term in &result.matched_terms {
                assert!(
                    ["operator", "passenger", "accreditation"].contains(&term.as_str()),
                    "{} matched foreign term {:?}",
                    method,
                    term
                );
            }
        }
    }
}
