//! Keyword overlap between a job description and one resume.
//!
//! Fits its own small vocabulary over exactly the two texts. This fit is separate from
//! the scoring fit and uses a lower cap, so its feature set can differ from the one that
//! produced the candidate's score.

use std::collections::HashSet;

use crate::ranking::vectorizer::TfidfVectorizer;

/// Vocabulary cap used for keyword overlap.
pub const KEYWORD_MAX_FEATURES: usize = 2000;

/// Default number of matched keywords returned per candidate.
pub const DEFAULT_TOP_K: usize = 10;

/// Returns up to `top_k` distinct terms present in both texts after tokenization and
/// stop-word filtering.
///
/// Terms come back in vocabulary order (first appearance in `jd_text`). No importance
/// ranking is applied; `top_k` is a count cap only.
pub fn extract_keyword_matches(jd_text: &str, resume_text: &str, top_k: usize) -> Vec<String> {
    let vectorizer = TfidfVectorizer::new(KEYWORD_MAX_FEATURES);
    let fitted = vectorizer.fit_transform(&[jd_text, resume_text]);
    if fitted.vocabulary.is_empty() {
        return Vec::new();
    }

    let resume_tokens: HashSet<String> = vectorizer
        .analyze(resume_text)
        .into_iter()
        .filter(|t| fitted.vocabulary.contains(t))
        .collect();
    if resume_tokens.is_empty() {
        return Vec::new();
    }
    let jd_tokens: HashSet<String> = vectorizer.analyze(jd_text).into_iter().collect();

    fitted
        .vocabulary
        .terms()
        .iter()
        .filter(|term| jd_tokens.contains(*term) && resume_tokens.contains(*term))
        .take(top_k)
        .cloned()
        .collect()
}
