use proptest::prelude::*;
use vecspace_core::{Idf, Index, QueryConfig, QueryOutcome, TextNormalizer};

#[derive(Debug, Clone, Copy)]
struct Whitespace;

impl TextNormalizer for Whitespace {
    fn normalize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }
}

fn corpus() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-f]", 0..12), 1..25)
}

fn build(docs: &[Vec<String>]) -> Index<Whitespace> {
    Index::build_with(
        docs.iter().enumerate().map(|(i, terms)| (format!("doc{i:02}"), terms.join(" "))),
        Whitespace,
    )
}

proptest! {
    #[test]
    fn idf_is_sentinel_exactly_for_unseen_terms(docs in corpus(), term in "[a-h]") {
        let index = build(&docs);
        let df = index.document_frequency(&term);
        match index.idf(&term) {
            Idf::Unseen => {
                prop_assert_eq!(df, 0);
            }
            Idf::Seen(v) => {
                prop_assert!(df > 0);
                prop_assert_eq!(v, (docs.len() as f64 / df as f64).log10());
            }
        }
    }

    #[test]
    fn nonempty_vectors_have_unit_length(docs in corpus()) {
        let index = build(&docs);
        for (_, weights) in index.vectors().iter() {
            if weights.is_empty() {
                continue;
            }
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            prop_assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn df_matches_documents_containing_term(docs in corpus()) {
        let index = build(&docs);
        for term in ["a", "b", "c", "d", "e", "f"] {
            let expected = docs.iter().filter(|d| d.iter().any(|t| t == term)).count() as u32;
            prop_assert_eq!(index.document_frequency(term), expected);
        }
    }

    #[test]
    fn postings_mirror_vectors(docs in corpus()) {
        let index = build(&docs);
        let mut stored = 0;
        for (doc, weights) in index.vectors().iter() {
            for (term, w) in weights {
                prop_assert_eq!(index.postings().get(term, doc), Some(*w));
                stored += 1;
            }
        }
        prop_assert_eq!(index.postings().num_postings(), stored);
    }

    #[test]
    fn rebuilding_is_idempotent(docs in corpus()) {
        let first = build(&docs);
        let second = build(&docs);
        prop_assert_eq!(first.frequencies(), second.frequencies());
        prop_assert_eq!(first.vectors(), second.vectors());
        prop_assert_eq!(first.postings(), second.postings());
    }

    #[test]
    fn exact_answers_match_exhaustive_scan(
        docs in corpus(),
        query in prop::collection::vec("[a-h]", 0..5),
        top_k in 1usize..6,
    ) {
        let index = build(&docs).with_config(QueryConfig::new(top_k).unwrap()).unwrap();
        let text = query.join(" ");
        let bounded = index.query(&text);
        let full = index.query_exhaustive(&text);
        match &bounded {
            QueryOutcome::Match { score, .. } => {
                prop_assert!((score - full.score()).abs() < 1e-12, "{} vs {}", bounded, full);
            }
            QueryOutcome::NoMatch => {
                prop_assert_eq!(&full, &QueryOutcome::NoMatch);
            }
            QueryOutcome::FetchMore => {
                prop_assert!(full.is_exact());
            }
        }
    }
}
