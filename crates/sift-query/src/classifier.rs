//! Hybrid query-type classifier.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use sift_text::{StopWords, stem_tokenize};

use crate::dictionary::PhraseDictionary;
use crate::lexical::lexical_matches;
use crate::naive_bayes::MultinomialNb;
use crate::vectorizer::{TfIdfTransformer, TokenCountVectorizer};

/// Deduplicated set of category labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    labels: BTreeSet<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.labels.into_iter().collect()
    }
}

impl FromIterator<String> for ClassificationResult {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Stage B model trained on one dictionary.
#[derive(Debug)]
pub struct StatisticalModel {
    labels: Vec<String>,
    vectorizer: TokenCountVectorizer,
    tfidf: TfIdfTransformer,
    nb: MultinomialNb,
}

impl StatisticalModel {
    /// Train on one sample per phrase. Returns `None` for a dictionary
    /// without phrases.
    #[must_use]
    pub fn train(dictionary: &PhraseDictionary) -> Option<Self> {
        if dictionary.is_empty() {
            return None;
        }

        let mut labels: Vec<String> = Vec::new();
        let mut samples = Vec::new();
        let mut targets = Vec::new();
        for (label, phrase) in dictionary.phrases() {
            let class = match labels.iter().position(|l| l == label) {
                Some(i) => i,
                None => {
                    labels.push(label.to_owned());
                    labels.len() - 1
                }
            };
            samples.push(stem_tokenize(phrase));
            targets.push(class);
        }

        let vectorizer = TokenCountVectorizer::fit(&samples, &StopWords::english());
        let mut features: Vec<Vec<f64>> = samples.iter().map(|s| vectorizer.transform(s)).collect();
        let tfidf = TfIdfTransformer::fit(&features);
        for row in &mut features {
            tfidf.transform(row);
        }
        let nb = MultinomialNb::fit(&features, &targets, labels.len());

        tracing::debug!(
            classes = labels.len(),
            samples = samples.len(),
            features = vectorizer.vocabulary().len(),
            "trained query-type model"
        );

        Some(Self {
            labels,
            vectorizer,
            tfidf,
            nb,
        })
    }

    /// Best label for a stemmed query.
    #[must_use]
    pub fn predict(&self, stems: &[String]) -> Option<&str> {
        let mut x = self.vectorizer.transform(stems);
        self.tfidf.transform(&mut x);
        self.nb.predict(&x).map(|i| self.labels[i].as_str())
    }
}

/// Classify a normalized query against `dictionary`, training the
/// statistical stage from scratch.
#[must_use]
pub fn classify(normalized_query: &str, dictionary: &PhraseDictionary) -> ClassificationResult {
    combine(normalized_query, dictionary, |stems| {
        StatisticalModel::train(dictionary).and_then(|m| m.predict(stems).map(str::to_owned))
    })
}

fn combine(
    normalized_query: &str,
    dictionary: &PhraseDictionary,
    statistical: impl FnOnce(&[String]) -> Option<String>,
) -> ClassificationResult {
    let stems = stem_tokenize(normalized_query);
    if stems.is_empty() || dictionary.is_empty() {
        return ClassificationResult::default();
    }

    let mut labels = lexical_matches(&stems, dictionary);
    let lexical = labels.len();
    if let Some(label) = statistical(&stems) {
        labels.insert(label);
    }

    tracing::debug!(query = normalized_query, lexical, labels = ?labels, "classified query");
    ClassificationResult { labels }
}

/// Classifier that keeps trained models per dictionary content.
#[derive(Debug, Default)]
pub struct CachedClassifier {
    models: RwLock<HashMap<blake3::Hash, Option<Arc<StatisticalModel>>>>,
}

impl CachedClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same result as [`classify`], reusing a previously trained model.
    #[must_use]
    pub fn classify(&self, normalized_query: &str, dictionary: &PhraseDictionary) -> ClassificationResult {
        combine(normalized_query, dictionary, |stems| {
            self.model(dictionary)
                .and_then(|m| m.predict(stems).map(str::to_owned))
        })
    }

    /// Number of cached models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn model(&self, dictionary: &PhraseDictionary) -> Option<Arc<StatisticalModel>> {
        let key = dictionary.fingerprint();
        if let Some(model) = self
            .models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return model.clone();
        }

        let model = StatisticalModel::train(dictionary).map(Arc::new);
        self.models
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(model)
            .clone()
    }
}
