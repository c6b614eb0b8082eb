use crate::frequency::DocumentFrequency;
use crate::vectors::TfIdfVectors;
use crate::DocId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f64, // normalized tf-idf weight
}

/// Ranking order of a posting list: weight descending, then document
/// identifier ascending so that equal weights always come out the same way.
pub fn rank_order(a: &Posting, b: &Posting) -> Ordering {
    b.weight.total_cmp(&a.weight).then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// term -> postings, kept in [`rank_order`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostingIndex {
    postings: HashMap<String, Vec<Posting>>,
}

impl PostingIndex {
    pub fn build(df: &DocumentFrequency, vectors: &TfIdfVectors) -> Self {
        let mut postings: HashMap<String, Vec<Posting>> =
            df.terms().map(|term| (term.clone(), Vec::new())).collect();
        for (doc_id, weights) in vectors.iter() {
            for (term, &weight) in weights {
                postings
                    .entry(term.clone())
                    .or_default()
                    .push(Posting { doc_id: doc_id.clone(), weight });
            }
        }
        for list in postings.values_mut() {
            list.sort_by(rank_order);
        }
        Self { postings }
    }

    /// The `k` highest-weighted postings of `term`; empty for unknown terms.
    pub fn top_k(&self, term: &str, k: usize) -> &[Posting] {
        match self.postings.get(term) {
            Some(list) => &list[..k.min(list.len())],
            None => &[],
        }
    }

    /// Full posting list of `term` in rank order.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, term: &str, doc: &str) -> Option<f64> {
        self.postings(term).iter().find(|p| p.doc_id == doc).map(|p| p.weight)
    }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_postings(&self) -> usize { self.postings.values().map(Vec::len).sum() }
}
