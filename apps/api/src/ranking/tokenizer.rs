//! Word tokenizer shared by the vectorizer and the keyword extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::ranking::stopwords::is_stop_word;

/// A token is a maximal run of letters/digits, optionally joined by inner apostrophes.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{Nd}]+(?:['’][\p{Alphabetic}\p{Nd}]+)*")
        .expect("token pattern is a valid regex")
});

/// Minimum token length in characters. Shorter tokens never enter a vocabulary.
const MIN_TOKEN_CHARS: usize = 2;

/// Lowercases `text` and splits it into tokens, in order, keeping duplicates.
/// Stop words and single-character tokens are dropped.
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}
