//! TF-IDF vectorization over a small document set
//!
//! Follows scikit-learn's `TfidfVectorizer` defaults: tokens are runs of two or
//! more word characters, term frequency is the raw count, idf is smoothed as
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized. The vocabulary
//! is sorted alphabetically and column `j` of every row belongs to
//! `vocabulary[j]`.

use crate::error::{Result, ResumeScreenerError};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

pub struct TfidfVectorizer {
    token_regex: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfVectorizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token_regex: Regex::new(r"\b\w\w+\b")?,
        })
    }

    fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Learn the vocabulary and idf weights of `documents` and return their
    /// weighted vectors.
    ///
    /// Fails with [`ResumeScreenerError::VectorizationFailed`] when no
    /// document contributes a single token.
    pub fn fit_transform(&self, documents: &[String]) -> Result<TfidfMatrix> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            return Err(ResumeScreenerError::VectorizationFailed(
                "empty vocabulary; the documents may only contain stop words".to_string(),
            ));
        }

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut counts = Vec::with_capacity(tokenized.len());
        let mut document_frequency = vec![0usize; vocabulary.len()];

        for tokens in &tokenized {
            let mut term_counts: HashMap<usize, usize> = HashMap::new();
            for token in tokens {
                *term_counts.entry(index[token.as_str()]).or_insert(0) += 1;
            }
            for &column in term_counts.keys() {
                document_frequency[column] += 1;
            }
            counts.push(term_counts);
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|term_counts| {
                let mut row = vec![0.0; vocabulary.len()];
                for (column, count) in term_counts {
                    row[column] = count as f64 * idf[column];
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|x| *x /= norm);
    }
}

impl TfidfMatrix {
    /// Feature names, alphabetically ordered
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn row(&self, document: usize) -> Option<&[f64]> {
        self.rows.get(document).map(Vec::as_slice)
    }

    /// Number of vectorized documents
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Cosine similarity of two equally sized vectors; zero vectors score 0
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ResumeScreenerError::AnalysisFailed(format!(
            "Vector dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
