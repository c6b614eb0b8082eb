use vecspace_core::tokenizer::tokenize;
use vecspace_core::{EnglishNormalizer, TextNormalizer};

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners RUN! The café's menu.");
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));
    // Only ASCII letters form tokens: café -> caf, the trailing 's' is a stopword
    assert!(words.contains(&"caf".to_string()));
    assert!(!words.contains(&"s".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn it_keeps_token_order() {
    let words = tokenize("street wall street");
    assert_eq!(words, vec!["street", "wall", "street"]);
}

#[test]
fn hyphens_and_apostrophes_separate_tokens() {
    let words = tokenize("well-known don't");
    // "don" and "t" are both stopwords
    assert_eq!(words, vec!["well", "known"]);
}

#[test]
fn normalizer_matches_tokenize() {
    let text = "Health insurance, Wall Street!";
    assert_eq!(EnglishNormalizer.normalize(text), tokenize(text));
}
