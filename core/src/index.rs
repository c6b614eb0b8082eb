use crate::config::QueryConfig;
use crate::frequency::Frequencies;
use crate::postings::PostingIndex;
use crate::query::{QueryEngine, QueryOutcome, QueryVector};
use crate::tokenizer::{EnglishNormalizer, TextNormalizer};
use crate::vectors::{idf, Idf, TfIdfVectors};
use crate::{DocId, Result};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
}

/// A corpus indexed once and queried read-only afterwards.
#[derive(Debug, Clone)]
pub struct Index<N = EnglishNormalizer> {
    freq: Frequencies,
    vectors: TfIdfVectors,
    postings: PostingIndex,
    normalizer: N,
    config: QueryConfig,
}

/// Build an index over `(document identifier, raw text)` pairs with the
/// default English normalizer.
pub fn build_index<I, D, T>(corpus: I) -> Index
where
    I: IntoIterator<Item = (D, T)>,
    D: Into<DocId>,
    T: AsRef<str>,
{
    Index::build_with(corpus, EnglishNormalizer)
}

impl<N: TextNormalizer> Index<N> {
    pub fn build_with<I, D, T>(corpus: I, normalizer: N) -> Self
    where
        I: IntoIterator<Item = (D, T)>,
        D: Into<DocId>,
        T: AsRef<str>,
    {
        let start = Instant::now();
        let freq = Frequencies::from_documents(
            corpus
                .into_iter()
                .map(|(id, text)| (id.into(), normalizer.normalize(text.as_ref()))),
        );
        let vectors = TfIdfVectors::build(&freq);
        let postings = PostingIndex::build(&freq.df, &vectors);
        let index = Self { freq, vectors, postings, normalizer, config: QueryConfig::default() };
        let stats = index.stats();
        tracing::info!(
            num_docs = stats.num_docs,
            num_terms = stats.num_terms,
            num_postings = stats.num_postings,
            took_s = start.elapsed().as_secs_f64(),
            "index built"
        );
        index
    }

    pub fn with_config(mut self, config: QueryConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &QueryConfig { &self.config }

    /// Idf of an already normalized term.
    pub fn idf(&self, term: &str) -> Idf {
        idf(&self.freq.df, self.num_docs(), term)
    }

    /// Normalized weight of an already normalized term in `doc`.
    pub fn weight(&self, doc: &str, term: &str) -> Result<f64> {
        self.vectors.weight(doc, term)
    }

    /// Bounded top-1 query; see [`crate::query`].
    pub fn query(&self, text: &str) -> QueryOutcome {
        let start = Instant::now();
        let outcome = self.engine().evaluate(&self.query_vector(text));
        tracing::debug!(query = text, took_s = start.elapsed().as_secs_f64(), %outcome, "query");
        outcome
    }

    /// Unbounded scan: never answers [`QueryOutcome::FetchMore`].
    pub fn query_exhaustive(&self, text: &str) -> QueryOutcome {
        self.engine().evaluate_exhaustive(&self.query_vector(text))
    }

    pub fn query_vector(&self, text: &str) -> QueryVector {
        QueryVector::from_terms(self.normalizer.normalize(text))
    }

    pub fn term_frequency(&self, doc: &str, term: &str) -> u32 { self.freq.tf.count(doc, term) }

    pub fn document_frequency(&self, term: &str) -> u32 { self.freq.df.get(term) }

    pub fn num_docs(&self) -> usize { self.freq.tf.num_docs() }

    pub fn contains_document(&self, doc: &str) -> bool { self.vectors.contains_document(doc) }

    /// Document identifiers in ascending order.
    pub fn documents(&self) -> Vec<&str> {
        let mut docs: Vec<&str> = self.vectors.iter().map(|(d, _)| d.as_str()).collect();
        docs.sort_unstable();
        docs
    }

    pub fn frequencies(&self) -> &Frequencies { &self.freq }

    pub fn vectors(&self) -> &TfIdfVectors { &self.vectors }

    pub fn postings(&self) -> &PostingIndex { &self.postings }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_docs: self.num_docs(),
            num_terms: self.freq.df.num_terms(),
            num_postings: self.postings.num_postings(),
        }
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.freq.df, &self.vectors, &self.postings, self.config)
    }
}
