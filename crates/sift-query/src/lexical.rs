//! Lexical stage: exact phrase matches on stemmed n-grams.

use std::collections::{BTreeSet, HashSet};

use sift_text::{stem_tokenize, word_tokenize};

use crate::dictionary::PhraseDictionary;

/// Canonical stemmed form of a dictionary phrase, tokens joined by one space.
#[must_use]
pub fn canonical_phrase(phrase: &str) -> String {
    let words = word_tokenize(&phrase.trim().to_lowercase()).join(" ");
    stem_tokenize(&words).join(" ")
}

/// Unigrams and adjacent bigrams of a stemmed token stream.
#[must_use]
pub fn ngrams(stems: &[String]) -> HashSet<String> {
    let mut set: HashSet<String> = stems.iter().cloned().collect();
    set.extend(stems.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    set
}

/// Labels of every category with a phrase found among the query's n-grams.
#[must_use]
pub fn lexical_matches(stems: &[String], dictionary: &PhraseDictionary) -> BTreeSet<String> {
    let grams = ngrams(stems);
    dictionary
        .phrases()
        .filter(|(_, phrase)| {
            let canonical = canonical_phrase(phrase);
            !canonical.is_empty() && grams.contains(&canonical)
        })
        .map(|(label, _)| label.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stems(q: &str) -> Vec<String> {
        stem_tokenize(q)
    }

    #[test]
    fn canonical_phrase_stems_words() {
        assert_eq!(canonical_phrase("  Event Dispatcher "), "event dispatch");
        assert_eq!(canonical_phrase("configuration"), "configur");
        assert_eq!(canonical_phrase("a"), "");
    }

    #[test]
    fn ngrams_include_bigrams() {
        let grams = ngrams(&stems("event dispatcher config"));
        assert!(grams.contains("event"));
        assert!(grams.contains("event dispatch"));
        assert!(grams.contains("dispatch config"));
        assert!(!grams.contains("event config"));
    }

    #[test]
    fn environment_matches_config() {
        let dict = PhraseDictionary::builtin();
        let labels = lexical_matches(&stems("environment"), &dict);
        assert_eq!(labels.into_iter().collect::<Vec<_>>(), ["Config"]);
    }

    #[test]
    fn bigram_phrase_matches() {
        let dict = PhraseDictionary::builtin();
        let labels = lexical_matches(&stems("need event dispatcher config"), &dict);
        assert!(labels.contains("Plugin"));
        assert!(labels.contains("Config"));
    }

    #[test]
    fn trigram_phrase_never_matches() {
        let dict = PhraseDictionary::from_pairs([("F", vec!["business logic facade"])]);
        assert!(lexical_matches(&stems("business logic facade"), &dict).is_empty());
    }

    #[test]
    fn empty_inputs() {
        assert!(lexical_matches(&[], &PhraseDictionary::builtin()).is_empty());
        assert!(lexical_matches(&stems("config"), &PhraseDictionary::default()).is_empty());
    }
}
