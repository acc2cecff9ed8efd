//! Source entity extraction for PHP projects.
//!
//! A file is parsed through the [`syntax::Grammar`] seam, the first type-like
//! declaration is located, and each of its methods becomes a
//! [`extractor::SourceEntity`] carrying a canonical, pretty-printed body and
//! a summary of its doc block. [`discovery`] selects candidate files per
//! [`kind::EntityKind`].

pub mod discovery;
pub mod doc_comment;
pub mod error;
pub mod extractor;
pub mod kind;
pub mod php;
pub(crate) mod printer;
pub mod syntax;

pub use error::{IndexError, Result};
pub use extractor::{Extractor, SourceEntity};
pub use kind::EntityKind;
