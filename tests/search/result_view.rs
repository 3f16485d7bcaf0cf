//! Shape of the results handed back to callers.

use crate::common::{engine_over, legislation_corpus};
use provision::SearchOptions;

#[test]
fn test_view_carries_source_metadata() {
    let (_, engine) = engine_over(legislation_corpus());
    let results = engine
        .search("worker screening", &SearchOptions::default().top_k(1))
        .unwrap();

    let top = &results[0];
    assert_eq!(top.id, "ws-1");
    assert!(top.content.starts_with("Workers must complete"));
    assert_eq!(top.source.title, "Act ws-1");
    assert_eq!(top.source.source_type, "legislation");
    assert_eq!(top.source.sector, "disability");
    assert_eq!(top.section_number.as_deref(), Some("12"));
    assert_eq!(top.section_title.as_deref(), Some("Screening requirement"));
    assert_eq!(top.chunk_index, None);
}

#[test]
fn test_view_serializes_camel_case() {
    let (_, engine) = engine_over(legislation_corpus());
    let results = engine
        .search("worker screening", &SearchOptions::default().top_k(1))
        .unwrap();

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["id"], "ws-1");
    assert!(json["matchedTerms"].is_array());
    assert_eq!(json["source"]["type"], "legislation");
    assert_eq!(json["sectionNumber"], "12");
    assert_eq!(json["sectionTitle"], "Screening requirement");
    assert!(json.get("chunkIndex").is_none());
}
