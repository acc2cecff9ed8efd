//! Orchestration for sift: layered configuration, the project indexing
//! pipeline and the interactive search session.

pub mod config;
pub mod indexer;
pub mod search;

pub use config::Config;
pub use indexer::{IndexReport, ProjectIndexer};
pub use search::{SearchOutcome, SearchSession};
