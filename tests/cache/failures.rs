//! Fetch and configuration failures.

use std::sync::Arc;

use crate::common::{legislation_corpus, FlakySource, MisconfiguredSource};
use provision::{
    CacheState, EngineConfig, Error, FetchError, SearchEngine, SearchMethod, SearchOptions,
};

fn zero_ttl() -> EngineConfig {
    EngineConfig {
        cache_ttl_secs: 0,
        ..EngineConfig::default()
    }
}

#[test]
fn test_cold_start_failure_surfaces() {
    let source = Arc::new(FlakySource::new(legislation_corpus()));
    source.set_failing(true);
    let engine = SearchEngine::with_defaults(source.clone()).unwrap();

    let err = engine
        .search("levy", &SearchOptions::default())
        .unwrap_err();
    match err {
        Error::CorpusFetch { origin, cause } => {
            assert_eq!(origin, "flaky");
            assert!(matches!(cause, FetchError::Unavailable(_)));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }

    let stats = engine.index_stats();
    assert_eq!(stats.state, CacheState::Empty);
    assert_eq!(stats.failed_rebuilds, 1);
    assert!(stats.last_error.unwrap().contains("backend offline"));
}

#[test]
fn test_failed_rebuild_serves_previous_snapshot() {
    let source = Arc::new(FlakySource::new(legislation_corpus()));
    let engine = SearchEngine::new(source.clone(), zero_ttl()).unwrap();
    let options = SearchOptions::default().method(SearchMethod::Hybrid);

    let before = engine.search("screening check", &options).unwrap();
    assert!(!before.is_empty());

    source.set_failing(true);
    let during = engine.search("screening check", &options).unwrap();
    assert_eq!(before, during);

    let stats = engine.index_stats();
    assert!(stats.indexed);
    assert_eq!(stats.total_documents, 6);
    assert_eq!(stats.failed_rebuilds, 1);
    assert!(stats.last_error.is_some());
}

#[test]
fn test_recovery_clears_last_error() {
    let source = Arc::new(FlakySource::new(legislation_corpus()));
    let engine = SearchEngine::new(source.clone(), zero_ttl()).unwrap();
    let options = SearchOptions::default();

    engine.search("levy", &options).unwrap();
    source.set_failing(true);
    engine.search("levy", &options).unwrap();
    engine.search("levy", &options).unwrap();
    assert_eq!(engine.index_stats().failed_rebuilds, 2);

    source.set_failing(false);
    engine.search("levy", &options).unwrap();
    let stats = engine.index_stats();
    assert_eq!(stats.failed_rebuilds, 2);
    assert_eq!(stats.last_error, None);
    assert_eq!(source.fetch_count(), 4);
}

#[test]
fn test_refresh_failure_keeps_snapshot() {
    let source = Arc::new(FlakySource::new(legislation_corpus()));
    let engine = SearchEngine::with_defaults(source.clone()).unwrap();
    engine.refresh_index().unwrap();

    source.set_failing(true);
    let stats = engine.refresh_index().unwrap();
    assert_eq!(stats.total_documents, 6);
    assert_eq!(stats.failed_rebuilds, 1);
}

#[test]
fn test_misconfigured_source_rejected_at_construction() {
    let err = SearchEngine::with_defaults(Arc::new(MisconfiguredSource)).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("missing credentials"));
}

#[test]
fn test_invalid_engine_config_rejected() {
    let mut config = EngineConfig::default();
    config.fusion.bm25 = -0.5;
    let err = SearchEngine::new(Arc::new(FlakySource::default()), config).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}
