//! Ranking properties shared by every method.

use proptest::prelude::*;
use provision::{Bm25Ranker, HybridRanker, Ranker, TfIdfRanker};

use crate::common::corpus_from_texts;
use crate::strategies::{corpus_strategy, query_strategy, word_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every result has a positive score and matched terms drawn
    /// from both the query and the document.
    #[test]
    fn prop_results_positive_and_matched(
        texts in corpus_strategy(),
        query in query_strategy(),
        top_k in 1usize..10,
    ) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let corpus = corpus_from_texts(&refs);

        let ranked = [
            Bm25Ranker::default().search(&query, &corpus, top_k),
            TfIdfRanker.search(&query, &corpus, top_k),
            HybridRanker::default().search(&query, &corpus, top_k),
        ];
        for results in &ranked {
            prop_assert!(results.len() <= top_k);
            for result in results {
                prop_assert!(result.score > 0.0);
                prop_assert!(!result.matched_terms.is_empty());
                for term in &result.matched_terms {
                    prop_assert!(query.contains(term));
                    prop_assert!(corpus.documents[result.doc_index].contains(term));
                }
            }
            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    /// Property: BM25 returns every document sharing a term with the query
    /// (up to top_k), since BM25 idf is always positive.
    #[test]
    fn prop_bm25_recalls_every_match(texts in corpus_strategy(), query in query_strategy()) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let corpus = corpus_from_texts(&refs);

        let matching = corpus
            .documents
            .iter()
            .filter(|doc| query.iter().any(|t| doc.contains(t)))
            .count();
        let results = Bm25Ranker::default().search(&query, &corpus, corpus.len());
        prop_assert_eq!(results.len(), matching);
    }

    /// Property: hybrid scores lie in [0, 1] with the default weights.
    #[test]
    fn prop_hybrid_bounded(texts in corpus_strategy(), query in query_strategy(), top_k in 1usize..10) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let corpus = corpus_from_texts(&refs);

        for result in HybridRanker::default().search(&query, &corpus, top_k) {
            prop_assert!(result.score > 0.0 && result.score <= 1.0 + 1e-12, "score {}", result.score);
        }
    }

    /// Property: one more occurrence of a single matching query term never
    /// lowers that document's BM25 or TF-IDF score.
    #[test]
    fn prop_single_term_monotonic(
        texts in corpus_strategy(),
        term in word_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = pick.index(texts.len());
        let mut base = texts.clone();
        base[target] = format!("{} {}", base[target], term);
        let mut boosted = base.clone();
        boosted[target] = format!("{} {}", boosted[target], term);

        let base_refs: Vec<&str> = base.iter().map(String::as_str).collect();
        let boosted_refs: Vec<&str> = boosted.iter().map(String::as_str).collect();
        let before = corpus_from_texts(&base_refs);
        let after = corpus_from_texts(&boosted_refs);

        let query = vec![term];
        let bm25 = Bm25Ranker::default();
        prop_assert!(
            bm25.score(&query, &after, target) >= bm25.score(&query, &before, target) - 1e-12
        );
        prop_assert!(
            TfIdfRanker.score(&query, &after, target) >= TfIdfRanker.score(&query, &before, target) - 1e-12
        );
    }

    /// Property: ranking is a pure function of its inputs.
    #[test]
    fn prop_ranking_deterministic(texts in corpus_strategy(), query in query_strategy()) {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let corpus = corpus_from_texts(&refs);
        let hybrid = HybridRanker::default();

        prop_assert_eq!(hybrid.search(&query, &corpus, 5), hybrid.search(&query, &corpus, 5));
        prop_assert_eq!(
            Bm25Ranker::default().search(&query, &corpus, 5),
            Bm25Ranker::default().search(&query, &corpus, 5)
        );
    }
}
