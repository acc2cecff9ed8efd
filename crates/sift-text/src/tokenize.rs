//! Word and stemming tokenizers.

use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

static ENGLISH: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Minimum number of characters for a word to survive [`word_tokenize`].
const MIN_WORD_CHARS: usize = 2;

/// Split `text` on Unicode word boundaries without stemming.
///
/// Single-character words are dropped, so `"a b cd"` yields `["cd"]`.
#[must_use]
pub fn word_tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
        .map(str::to_owned)
        .collect()
}

/// Split `text` on whitespace, strip non-alphanumeric characters from each
/// piece, drop empty pieces and reduce the rest to their English stem.
#[must_use]
pub fn stem_tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(ENGLISH.stem(&cleaned).into_owned())
            }
        })
        .collect()
}
