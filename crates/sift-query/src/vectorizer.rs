//! Token-count vectorizer and TF-IDF weighting.

use std::collections::HashMap;

use sift_text::StopWords;

/// Maps token streams to count vectors over a vocabulary learned at fit time.
#[derive(Debug, Clone, Default)]
pub struct TokenCountVectorizer {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
}

impl TokenCountVectorizer {
    /// Learn the vocabulary from `samples` in first-seen order, skipping
    /// stopwords.
    #[must_use]
    pub fn fit(samples: &[Vec<String>], stop_words: &StopWords) -> Self {
        let mut vectorizer = Self::default();
        for token in samples.iter().flatten() {
            if stop_words.is_stop_word(token) || vectorizer.index.contains_key(token) {
                continue;
            }
            vectorizer
                .index
                .insert(token.clone(), vectorizer.vocabulary.len());
            vectorizer.vocabulary.push(token.clone());
        }
        vectorizer
    }

    /// Count vector for `tokens`; unknown tokens are ignored.
    #[must_use]
    pub fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(&i) = self.index.get(token) {
                counts[i] += 1.0;
            }
        }
        counts
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

/// Inverse document frequency weights, `idf = ln(n_samples / df)`.
#[derive(Debug, Clone, Default)]
pub struct TfIdfTransformer {
    idf: Vec<f64>,
}

impl TfIdfTransformer {
    #[must_use]
    pub fn fit(counts: &[Vec<f64>]) -> Self {
        let n_features = counts.first().map_or(0, Vec::len);
        #[allow(clippy::cast_precision_loss)]
        let n_samples = counts.len() as f64;

        let idf = (0..n_features)
            .map(|j| {
                let df = counts.iter().filter(|row| row[j] > 0.0).count();
                if df == 0 {
                    0.0
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let df = df as f64;
                    (n_samples / df).ln()
                }
            })
            .collect();
        Self { idf }
    }

    /// Weight a count vector in place.
    pub fn transform(&self, counts: &mut [f64]) {
        for (value, idf) in counts.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}
