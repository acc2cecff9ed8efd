//! Query-type classification.
//!
//! Maps a normalized natural-language query to the set of entity-type labels
//! it most likely refers to. A lexical stage matches dictionary phrases
//! against the query's stemmed unigrams and bigrams; a statistical stage
//! trains a TF-IDF weighted multinomial Naive Bayes model on the same
//! dictionary and always contributes its single best label.

pub mod classifier;
pub mod dictionary;
pub mod lexical;
pub mod naive_bayes;
pub mod vectorizer;

pub use classifier::{CachedClassifier, ClassificationResult, classify};
pub use dictionary::{Category, PhraseDictionary};
