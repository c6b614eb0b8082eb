//! Batch-built TF-IDF vector space index with a bounded top-1 cosine query.
//!
//! ```
//! use vecspace_core::{build_index, QueryOutcome};
//!
//! let index = build_index(vec![
//!     ("a.txt", "health insurance health"),
//!     ("b.txt", "health wall street"),
//!     ("c.txt", "foreign policy"),
//! ]);
//! match index.query("health") {
//!     QueryOutcome::Match { document, .. } => assert_eq!(document, "a.txt"),
//!     other => panic!("unexpected {other}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod frequency;
pub mod index;
pub mod postings;
pub mod query;
pub mod tokenizer;
pub mod vectors;

/// Stable document identifier, e.g. a file name.
pub type DocId = String;

pub use config::QueryConfig;
pub use error::{Error, Result};
pub use frequency::{DocumentFrequency, Frequencies, TermFrequencyTable};
pub use index::{build_index, Index, IndexStats};
pub use postings::{Posting, PostingIndex};
pub use query::{QueryEngine, QueryOutcome, QueryVector};
pub use tokenizer::{tokenize, EnglishNormalizer, TextNormalizer};
pub use vectors::{Idf, TfIdfVectors};
