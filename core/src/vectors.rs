use crate::frequency::{DocumentFrequency, Frequencies};
use crate::{DocId, Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Inverse document frequency of a term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Idf {
    /// `log10(N / df)`; zero when the term occurs in every document.
    Seen(f64),
    /// The term never occurred in the corpus.
    Unseen,
}

impl Idf {
    /// Numeric stand-in for [`Idf::Unseen`]. Never a real idf, which is >= 0.
    pub const UNSEEN_VALUE: f64 = -1.0;

    pub fn compute(num_docs: usize, df: u32) -> Idf {
        if df == 0 {
            Idf::Unseen
        } else {
            Idf::Seen((num_docs as f64 / df as f64).log10())
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Idf::Seen(v) => v,
            Idf::Unseen => Self::UNSEEN_VALUE,
        }
    }

    pub fn is_seen(self) -> bool { matches!(self, Idf::Seen(_)) }
}

pub fn idf(df: &DocumentFrequency, num_docs: usize, term: &str) -> Idf {
    Idf::compute(num_docs, df.get(term))
}

/// `1 + log10(count)`; callers only pass counts >= 1.
pub fn log_tf(count: u32) -> f64 {
    1.0 + (count as f64).log10()
}

pub fn magnitude<I: IntoIterator<Item = f64>>(weights: I) -> f64 {
    weights.into_iter().map(|w| w * w).sum::<f64>().sqrt()
}

/// term -> normalized tf-idf weight for one document
///
/// Ordered so the magnitude is summed in the same order on every build.
pub type TermWeights = BTreeMap<String, f64>;

/// document -> L2-normalized tf-idf vector
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TfIdfVectors {
    docs: HashMap<DocId, TermWeights>,
}

impl TfIdfVectors {
    pub fn build(freq: &Frequencies) -> Self {
        let num_docs = freq.tf.num_docs();
        let mut docs = HashMap::with_capacity(num_docs);
        let mut skipped = 0usize;
        for (doc_id, counts) in freq.tf.iter() {
            let raw: TermWeights = counts
                .iter()
                .map(|(term, &count)| {
                    // every counted term has df >= 1, so idf is never the sentinel here
                    let w = log_tf(count) * idf(&freq.df, num_docs, term).value();
                    (term.clone(), w)
                })
                .collect();
            let norm = magnitude(raw.values().copied());
            let normalized = if norm == 0.0 {
                skipped += 1;
                TermWeights::new()
            } else {
                raw.into_iter().map(|(term, w)| (term, w / norm)).collect()
            };
            docs.insert(doc_id.clone(), normalized);
        }
        if skipped > 0 {
            tracing::debug!(skipped, "documents with zero magnitude left unnormalized");
        }
        Self { docs }
    }

    pub fn get(&self, doc: &str) -> Option<&TermWeights> { self.docs.get(doc) }

    /// Stored weight of `term` in `doc`, 0.0 when the term is absent.
    pub fn weight(&self, doc: &str, term: &str) -> Result<f64> {
        let vector = self.docs.get(doc).ok_or_else(|| Error::DocumentNotFound(doc.to_string()))?;
        Ok(vector.get(term).copied().unwrap_or(0.0))
    }

    pub fn contains_document(&self, doc: &str) -> bool { self.docs.contains_key(doc) }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &TermWeights)> {
        self.docs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(docs: &[(&str, &str)]) -> Frequencies {
        Frequencies::from_documents(
            docs.iter().map(|(id, text)| (id.to_string(), text.split_whitespace().map(String::from).collect())),
        )
    }

    #[test]
    fn idf_sentinel_and_zero() {
        assert_eq!(Idf::compute(4, 0), Idf::Unseen);
        assert_eq!(Idf::compute(4, 0).value(), -1.0);
        assert_eq!(Idf::compute(4, 4), Idf::Seen(0.0));
        assert!((Idf::compute(4, 1).value() - 4f64.log10()).abs() < 1e-15);
    }

    #[test]
    fn weights_follow_log_tf_times_idf_then_normalize() {
        // N = 2; "a" only in d1 (idf log10 2), "b" in both (idf 0)
        let f = freq(&[("d1", "a a a a a a a a a a b"), ("d2", "b c")]);
        let v = TfIdfVectors::build(&f);
        let d1 = v.get("d1").unwrap();
        // raw a = 2 * log10(2), raw b = 0, so a normalizes to 1
        assert!((d1["a"] - 1.0).abs() < 1e-12);
        assert_eq!(d1["b"], 0.0);
        let d2 = v.get("d2").unwrap();
        assert!((d2["c"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unequal_weights_normalize_to_unit_length() {
        let f = freq(&[("d1", "a b b"), ("d2", "c"), ("d3", "c b")]);
        let v = TfIdfVectors::build(&f);
        let d1 = v.get("d1").unwrap();
        let raw_a = 3f64.log10();
        let raw_b = (1.0 + 2f64.log10()) * 1.5f64.log10();
        let norm = (raw_a * raw_a + raw_b * raw_b).sqrt();
        assert!((d1["a"] - raw_a / norm).abs() < 1e-12);
        assert!((d1["b"] - raw_b / norm).abs() < 1e-12);
        assert!((magnitude(d1.values().copied()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_magnitude_documents_stay_empty() {
        // a single document: every idf is zero
        let f = freq(&[("only", "x y y")]);
        let v = TfIdfVectors::build(&f);
        assert!(v.get("only").unwrap().is_empty());
        let f = freq(&[("empty", ""), ("other", "x")]);
        let v = TfIdfVectors::build(&f);
        assert!(v.get("empty").unwrap().is_empty());
    }

    #[test]
    fn rebuilding_gives_bit_identical_weights() {
        let docs: Vec<(&str, &str)> = vec![
            ("d1", "a b c d e e f"),
            ("d2", "a a c e f f f"),
            ("d3", "b d d e"),
            ("d4", "c f a"),
        ];
        let first = TfIdfVectors::build(&freq(&docs));
        for _ in 0..20 {
            assert_eq!(TfIdfVectors::build(&freq(&docs)), first);
        }
    }

    #[test]
    fn weight_lookup() {
        let f = freq(&[("d1", "a"), ("d2", "b")]);
        let v = TfIdfVectors::build(&f);
        assert!((v.weight("d1", "a").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(v.weight("d1", "b").unwrap(), 0.0);
        assert_eq!(v.weight("nope", "a"), Err(Error::DocumentNotFound("nope".into())));
    }
}
