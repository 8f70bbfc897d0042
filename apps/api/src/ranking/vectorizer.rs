//! TF-IDF vectorizer — fits a bounded vocabulary over a batch of documents and
//! projects each document into that shared sparse vector space.
//!
//! Every call to [`TfidfVectorizer::fit_transform`] starts from scratch. Nothing is cached
//! between calls, so two fits over different batches produce unrelated feature spaces.

use std::collections::{HashMap, HashSet};

use crate::ranking::tokenizer::analyze;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Sparse document vector: `(term index, weight)` pairs sorted by term index.
/// Weights are non-negative. An empty vector is the all-zero vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_unsorted(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(idx, _)| *idx);
        Self { entries }
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalized(self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self;
        }
        Self {
            entries: self.entries.into_iter().map(|(i, w)| (i, w / norm)).collect(),
        }
    }
}

/// Terms retained by one fit, in first-appearance order, with their IDF weights.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }
}

/// Result of a single fit: the vocabulary plus one vector per input document, same order.
#[derive(Debug, Clone)]
pub struct FittedCorpus {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<SparseVector>,
}

// ────────────────────────────────────────────────────────────────────────────
// Vectorizer
// ────────────────────────────────────────────────────────────────────────────

/// TF-IDF vectorizer with English stop-word filtering and a vocabulary cap.
///
/// Weighting:
/// - tf = raw count of the term in the document
/// - idf = ln((1 + n) / (1 + df)) + 1, so corpus-universal terms still weigh 1.0
/// - each document vector is then L2-normalized
#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Tokenization pipeline used by this vectorizer, exposed on its own.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        analyze(text)
    }

    /// Fits a fresh vocabulary over `documents` and returns one vector per document.
    pub fn fit_transform(&self, documents: &[&str]) -> FittedCorpus {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();
        let vocabulary = self.fit_vocabulary(&tokenized);
        let vectors = tokenized
            .iter()
            .map(|tokens| transform_tokens(&vocabulary, tokens))
            .collect();
        FittedCorpus {
            vocabulary,
            vectors,
        }
    }

    fn fit_vocabulary(&self, tokenized: &[Vec<String>]) -> Vocabulary {
        // (term, document frequency) in first-appearance order across the batch
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for tokens in tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                if !seen.insert(token.as_str()) {
                    continue;
                }
                match position.get(token) {
                    Some(&pos) => order[pos].1 += 1,
                    None => {
                        position.insert(token.clone(), order.len());
                        order.push((token.clone(), 1));
                    }
                }
            }
        }

        if order.len() > self.max_features {
            // Stable sort keeps first-appearance order among equal document frequencies.
            let mut ranked: Vec<usize> = (0..order.len()).collect();
            ranked.sort_by(|a, b| order[*b].1.cmp(&order[*a].1));
            let mut keep: Vec<usize> = ranked.into_iter().take(self.max_features).collect();
            keep.sort_unstable();
            order = keep.into_iter().map(|i| order[i].clone()).collect();
        }

        let n_docs = tokenized.len() as f64;
        let mut vocabulary = Vocabulary::default();
        for (i, (term, df)) in order.into_iter().enumerate() {
            vocabulary
                .idf
                .push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.index.insert(term.clone(), i);
            vocabulary.terms.push(term);
        }
        vocabulary
    }
}

fn transform_tokens(vocabulary: &Vocabulary, tokens: &[String]) -> SparseVector {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for token in tokens {
        if let Some(idx) = vocabulary.index_of(token) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }
    let weighted = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * vocabulary.idf[idx]))
        .collect();
    SparseVector::from_unsorted(weighted).l2_normalized()
}
