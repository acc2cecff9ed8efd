//! English stopword set with optional project-specific additions.

use std::collections::HashSet;

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Case-insensitive stopword lookup.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in English list.
    #[must_use]
    pub fn english() -> Self {
        Self {
            words: ENGLISH.iter().map(|w| (*w).to_owned()).collect(),
        }
    }

    /// The English list extended with `extra` words.
    #[must_use]
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::english();
        set.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        set
    }

    #[must_use]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// Remove every token contained in `stop_words`, keeping order.
#[must_use]
pub fn strip_stopwords(tokens: Vec<String>, stop_words: &StopWords) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !stop_words.is_stop_word(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_contains_common_words() {
        let sw = StopWords::english();
        assert!(sw.is_stop_word("the"));
        assert!(sw.is_stop_word("The"));
        assert!(!sw.is_stop_word("plugin"));
    }

    #[test]
    fn extra_words_are_lowercased_and_trimmed() {
        let sw = StopWords::with_extra(["  Spryker ", "", "Project"]);
        assert!(sw.is_stop_word("spryker"));
        assert!(sw.is_stop_word("PROJECT"));
        assert_eq!(sw.len(), StopWords::english().len() + 2);
    }

    #[test]
    fn strip_keeps_order() {
        let tokens = vec!["show".into(), "me".into(), "the".into(), "config".into()];
        assert_eq!(
            strip_stopwords(tokens, &StopWords::english()),
            vec!["show", "config"]
        );
    }

    #[test]
    fn strip_empty() {
        assert!(strip_stopwords(Vec::new(), &StopWords::english()).is_empty());
    }
}
