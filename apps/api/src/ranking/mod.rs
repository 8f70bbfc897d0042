//! Relevance ranking — scores resumes against a job description with TF-IDF cosine
//! similarity and extracts the terms they share.
//!
//! Pure, synchronous, no I/O. Every call fits its own vocabulary.

pub mod keywords;
pub mod similarity;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;

pub use keywords::{extract_keyword_matches, DEFAULT_TOP_K};

use crate::models::candidate::CandidateRecord;
use crate::ranking::similarity::score_against_reference;

/// A record that can be ranked: exposes its text and carries a writable score.
pub trait Rankable {
    /// Resume text. Records without text return "".
    fn raw_text(&self) -> &str;
    fn score(&self) -> f64;
    fn set_score(&mut self, score: f64);
}

impl Rankable for CandidateRecord {
    fn raw_text(&self) -> &str {
        self.text()
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn set_score(&mut self, score: f64) {
        self.score = score;
    }
}

/// Scores every candidate against `jd_text` and returns them sorted by descending score.
///
/// Side effect: each candidate's score field is overwritten in place with its cosine
/// similarity in `[0, 1]`. The returned view holds every input candidate exactly once.
/// Equal scores keep their input order. An empty slice returns an empty view.
pub fn rank_candidates<'a, T: Rankable>(jd_text: &str, candidates: &'a mut [T]) -> Vec<&'a T> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let scores = {
        let texts: Vec<&str> = candidates.iter().map(Rankable::raw_text).collect();
        score_against_reference(jd_text, &texts)
    };
    for (candidate, score) in candidates.iter_mut().zip(scores) {
        candidate.set_score(score);
    }

    let candidates: &'a [T] = candidates;
    let mut ranked: Vec<&'a T> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked
}
