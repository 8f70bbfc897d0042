//! Cosine similarity between a reference document and a batch of candidates.

use tracing::debug;

use crate::ranking::vectorizer::{SparseVector, TfidfVectorizer};

/// Vocabulary cap used when scoring a batch of resumes against a job description.
pub const SCORING_MAX_FEATURES: usize = 5000;

/// Cosine similarity of two non-negative vectors, in `[0, 1]`.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Scores every document against `reference` within one shared vector space.
///
/// The reference is fitted together with the documents (`[reference] + documents`) so
/// both sides use the same vocabulary and IDF weights. Scores come back in input order.
/// An empty batch returns an empty result without fitting anything.
pub fn score_against_reference(reference: &str, documents: &[&str]) -> Vec<f64> {
    if documents.is_empty() {
        return Vec::new();
    }

    let mut batch: Vec<&str> = Vec::with_capacity(documents.len() + 1);
    batch.push(reference);
    batch.extend_from_slice(documents);

    let fitted = TfidfVectorizer::new(SCORING_MAX_FEATURES).fit_transform(&batch);
    debug!(
        "Fitted scoring vocabulary: {} terms over {} documents",
        fitted.vocabulary.len(),
        batch.len()
    );

    let Some((reference_vec, candidate_vecs)) = fitted.vectors.split_first() else {
        return vec![0.0; documents.len()];
    };

    candidate_vecs
        .iter()
        .map(|v| cosine_similarity(reference_vec, v))
        .collect()
}
