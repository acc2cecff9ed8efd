//! Error types for sift-index.

/// Errors that can occur while discovering or extracting source entities.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// IO error reading source files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text violates the grammar.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// The grammar could not be loaded into the parser.
    #[error("grammar error: {0}")]
    Grammar(String),

    /// Directory walk failure.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Result type alias using `IndexError`.
pub type Result<T> = std::result::Result<T, IndexError>;
