//! Text primitives shared by the extraction and query pipelines.
//!
//! Dictionary phrases and user queries go through the same stemming
//! tokenizer so that lexical matching is symmetric on both sides.

pub mod normalize;
pub mod stopwords;
pub mod tokenize;

pub use normalize::normalize_query;
pub use stopwords::{StopWords, strip_stopwords};
pub use tokenize::{stem_tokenize, word_tokenize};
