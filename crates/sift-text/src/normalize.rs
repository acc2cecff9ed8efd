use crate::stopwords::{StopWords, strip_stopwords};
use crate::tokenize::word_tokenize;

/// Lowercase, word-tokenize and drop stopwords from a raw user query.
///
/// The result is the single-space joined token list; an empty string means
/// nothing searchable was left.
#[must_use]
pub fn normalize_query(raw: &str, stop_words: &StopWords) -> String {
    let lowered = raw.trim().to_lowercase();
    strip_stopwords(word_tokenize(&lowered), stop_words).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_stopwords_and_short_words() {
        let sw = StopWords::english();
        assert_eq!(
            normalize_query("  I need the Event Dispatcher config ", &sw),
            "need event dispatcher config"
        );
    }

    #[test]
    fn normalize_applies_extra_stopwords() {
        let sw = StopWords::with_extra(["spryker", "project"]);
        assert_eq!(
            normalize_query("Spryker project facade", &sw),
            "facade"
        );
    }

    #[test]
    fn normalize_only_stopwords_is_empty() {
        assert_eq!(normalize_query("is it the", &StopWords::english()), "");
        assert_eq!(normalize_query("", &StopWords::english()), "");
    }

    mod proptest_normalize {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn normalized_output_is_stable(input in "[a-zA-Z ,.!?]{0,60}") {
                let sw = StopWords::english();
                let once = normalize_query(&input, &sw);
                let twice = normalize_query(&once, &sw);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
