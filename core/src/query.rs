//! Bounded top-1 cosine query.
//!
//! For each query term only the `top_k` heaviest postings are consulted.
//! A document missing from a term's top list is credited with the smallest
//! weight in that list, which can only overestimate its true contribution.
//! The best scoring document is therefore reported only when it sits in every
//! term's top list, i.e. when its score was computed from real weights alone.

use crate::config::QueryConfig;
use crate::frequency::DocumentFrequency;
use crate::postings::{Posting, PostingIndex};
use crate::vectors::{log_tf, TfIdfVectors, TermWeights};
use crate::DocId;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Result of a single-best-match query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The best document, with a score known to be its exact cosine similarity.
    Match { document: DocId, score: f64 },
    /// A best candidate exists but the bounded search cannot certify it.
    FetchMore,
    /// No query term occurs in the corpus.
    NoMatch,
}

impl QueryOutcome {
    pub const FETCH_MORE: &'static str = "fetch more";

    pub fn score(&self) -> f64 {
        match self {
            QueryOutcome::Match { score, .. } => *score,
            QueryOutcome::FetchMore | QueryOutcome::NoMatch => 0.0,
        }
    }

    /// Name shown for this outcome: the document, `"fetch more"`, or nothing.
    pub fn document(&self) -> Option<&str> {
        match self {
            QueryOutcome::Match { document, .. } => Some(document),
            QueryOutcome::FetchMore => Some(Self::FETCH_MORE),
            QueryOutcome::NoMatch => None,
        }
    }

    pub fn is_exact(&self) -> bool { matches!(self, QueryOutcome::Match { .. }) }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:.12})", self.document().unwrap_or("None"), self.score())
    }
}

/// Normalized query weights, built from the query's own term counts.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    // ordered so that score sums are always accumulated in the same order
    weights: BTreeMap<String, f64>,
}

impl QueryVector {
    pub fn from_terms<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        // Every distinct term counts toward the magnitude, in or out of the
        // vocabulary, and its squared weight is scaled by its count.
        let magnitude = counts
            .values()
            .map(|&c| {
                let w = log_tf(c);
                w * w * c as f64
            })
            .sum::<f64>()
            .sqrt();
        let weights = counts
            .into_iter()
            .map(|(term, c)| {
                let w = if magnitude == 0.0 { 0.0 } else { log_tf(c) / magnitude };
                (term, w)
            })
            .collect();
        Self { weights }
    }

    pub fn weight(&self, term: &str) -> f64 { self.weights.get(term).copied().unwrap_or(0.0) }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }

    /// Terms that occur in at least one document, in term order.
    pub fn valid_terms<'q>(&'q self, df: &DocumentFrequency) -> Vec<(&'q str, f64)> {
        self.iter().filter(|(t, _)| df.contains(t)).collect()
    }
}

struct TermBound<'a> {
    term: &'a str,
    query_weight: f64,
    // identifiers of the top-k postings
    top: HashSet<&'a str>,
    // smallest weight among the top-k postings
    bound: f64,
}

impl<'a> TermBound<'a> {
    fn new(term: &'a str, query_weight: f64, top: &'a [Posting]) -> Self {
        let bound = top.last().map(|p| p.weight).unwrap_or(0.0);
        let top = top.iter().map(|p| p.doc_id.as_str()).collect();
        Self { term, query_weight, top, bound }
    }

    fn contains(&self, doc: &str) -> bool { self.top.contains(doc) }

    fn contribution(&self, doc: &str, weights: &TermWeights) -> f64 {
        let w = if self.contains(doc) {
            weights.get(self.term).copied().unwrap_or(0.0)
        } else {
            self.bound
        };
        self.query_weight * w
    }
}

/// Documents present in every top list.
fn exact_set<'a>(bounds: &[TermBound<'a>]) -> HashSet<&'a str> {
    let mut iter = bounds.iter();
    let mut set: HashSet<&'a str> = match iter.next() {
        Some(first) => first.top.clone(),
        None => return HashSet::new(),
    };
    for tb in iter {
        set.retain(|doc| tb.top.contains(doc));
    }
    set
}

/// Keep the higher score; on equal scores the smaller identifier wins.
fn better<'a>(best: Option<(&'a DocId, f64)>, doc: &'a DocId, score: f64) -> Option<(&'a DocId, f64)> {
    match best {
        Some((best_doc, best_score)) => {
            let ord = score.total_cmp(&best_score).then_with(|| best_doc.cmp(doc));
            if ord.is_gt() { Some((doc, score)) } else { best }
        }
        None => Some((doc, score)),
    }
}

/// Read-only view over the built structures that evaluates queries.
pub struct QueryEngine<'a> {
    df: &'a DocumentFrequency,
    vectors: &'a TfIdfVectors,
    postings: &'a PostingIndex,
    config: QueryConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        df: &'a DocumentFrequency,
        vectors: &'a TfIdfVectors,
        postings: &'a PostingIndex,
        config: QueryConfig,
    ) -> Self {
        Self { df, vectors, postings, config }
    }

    pub fn evaluate(&self, query: &QueryVector) -> QueryOutcome {
        let bounds: Vec<TermBound<'_>> = query
            .valid_terms(self.df)
            .into_iter()
            .map(|(term, query_weight)| {
                TermBound::new(term, query_weight, self.postings.top_k(term, self.config.top_k))
            })
            .collect();
        if bounds.is_empty() {
            return QueryOutcome::NoMatch;
        }

        let mut best = None;
        for (doc, weights) in self.vectors.iter() {
            let score: f64 = bounds.iter().map(|tb| tb.contribution(doc, weights)).sum();
            best = better(best, doc, score);
        }
        let Some((winner, score)) = best else {
            return QueryOutcome::NoMatch;
        };

        let exact = exact_set(&bounds);
        tracing::debug!(
            valid_terms = bounds.len(),
            exact_candidates = exact.len(),
            winner = %winner,
            score,
            "bounded query evaluated"
        );
        if exact.contains(winner.as_str()) {
            QueryOutcome::Match { document: winner.clone(), score }
        } else {
            QueryOutcome::FetchMore
        }
    }

    /// Full cosine similarity against every document, no top-k bound.
    pub fn evaluate_exhaustive(&self, query: &QueryVector) -> QueryOutcome {
        let terms = query.valid_terms(self.df);
        if terms.is_empty() {
            return QueryOutcome::NoMatch;
        }
        let mut best = None;
        for (doc, weights) in self.vectors.iter() {
            let score: f64 = terms
                .iter()
                .map(|(term, qw)| qw * weights.get(*term).copied().unwrap_or(0.0))
                .sum();
            best = better(best, doc, score);
        }
        match best {
            Some((document, score)) => QueryOutcome::Match { document: document.clone(), score },
            None => QueryOutcome::NoMatch,
        }
    }
}
