use crate::DocId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Occurrence count of each term inside one document, in term order.
pub type TermCounts = BTreeMap<String, u32>;

/// document -> (term -> count)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TermFrequencyTable {
    docs: HashMap<DocId, TermCounts>,
}

impl TermFrequencyTable {
    pub fn get(&self, doc: &str) -> Option<&TermCounts> { self.docs.get(doc) }

    pub fn count(&self, doc: &str, term: &str) -> u32 {
        self.docs.get(doc).and_then(|counts| counts.get(term)).copied().unwrap_or(0)
    }

    pub fn contains_document(&self, doc: &str) -> bool { self.docs.contains_key(doc) }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &TermCounts)> {
        self.docs.iter()
    }
}

/// term -> number of distinct documents containing it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentFrequency {
    counts: HashMap<String, u32>,
}

impl DocumentFrequency {
    pub fn get(&self, term: &str) -> u32 { self.counts.get(term).copied().unwrap_or(0) }

    pub fn contains(&self, term: &str) -> bool { self.get(term) > 0 }

    pub fn num_terms(&self) -> usize { self.counts.len() }

    pub fn terms(&self) -> impl Iterator<Item = &String> { self.counts.keys() }

    /// Additive merge: every count in `other` is added to ours.
    pub fn merge(&mut self, other: &DocumentFrequency) {
        for (term, n) in &other.counts {
            *self.counts.entry(term.clone()).or_insert(0) += n;
        }
    }

    /// The df contribution of a single document: one per distinct term.
    fn of_document(counts: &TermCounts) -> Self {
        Self { counts: counts.keys().map(|t| (t.clone(), 1)).collect() }
    }

    fn retract(&mut self, counts: &TermCounts) {
        for term in counts.keys() {
            if let Some(n) = self.counts.get_mut(term) {
                *n -= 1;
                if *n == 0 { self.counts.remove(term); }
            }
        }
    }
}

/// Both frequency tables produced by one indexing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frequencies {
    pub tf: TermFrequencyTable,
    pub df: DocumentFrequency,
}

impl Frequencies {
    /// Count terms for every document. Identifiers are expected to be unique;
    /// a repeated identifier replaces the earlier document.
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (DocId, Vec<String>)>,
    {
        let mut out = Frequencies::default();
        for (doc_id, terms) in documents {
            out.add_document(doc_id, terms);
        }
        out
    }

    fn add_document(&mut self, doc_id: DocId, terms: Vec<String>) {
        let mut counts = TermCounts::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        self.df.merge(&DocumentFrequency::of_document(&counts));
        if let Some(previous) = self.tf.docs.insert(doc_id.clone(), counts) {
            tracing::warn!(doc_id = %doc_id, "duplicate document identifier, replacing earlier entry");
            self.df.retract(&previous);
        }
    }
}
