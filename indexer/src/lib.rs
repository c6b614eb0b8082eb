pub mod corpus;

use anyhow::Result;
use serde::Serialize;
use vecspace_core::{Index, QueryOutcome};

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub took_s: f64,
    pub outcome: QueryOutcome,
    /// Exhaustive answer, filled in when the bounded search asked to fetch more.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<QueryOutcome>,
}

#[derive(Debug, Serialize)]
pub struct IdfReport {
    pub term: String,
    pub idf: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightReport {
    pub document: String,
    pub term: String,
    pub weight: f64,
}

pub fn run_query(index: &Index, query: &str, fallback: bool) -> QueryReport {
    let start = std::time::Instant::now();
    let outcome = index.query(query);
    let fallback = if fallback && outcome == QueryOutcome::FetchMore {
        tracing::info!(query, "bounded search inconclusive, scanning all postings");
        Some(index.query_exhaustive(query))
    } else {
        None
    };
    QueryReport { query: query.to_string(), took_s: start.elapsed().as_secs_f64(), outcome, fallback }
}

pub fn run_idf(index: &Index, term: &str) -> IdfReport {
    IdfReport { term: term.to_string(), idf: index.idf(term).value() }
}

pub fn run_weight(index: &Index, document: &str, term: &str) -> Result<WeightReport> {
    let weight = index.weight(document, term)?;
    Ok(WeightReport { document: document.to_string(), term: term.to_string(), weight })
}

impl QueryReport {
    /// `(document, score)` with twelve decimals, plus the fallback answer if any.
    pub fn to_text(&self) -> String {
        match &self.fallback {
            Some(full) => format!("{} -> {}", self.outcome, full),
            None => self.outcome.to_string(),
        }
    }
}
