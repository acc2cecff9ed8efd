use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sift_query::PhraseDictionary;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub mcp: McpConfig,
}

fn default_project_name() -> String {
    "project".into()
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_src_dirs() -> Vec<String> {
    vec!["src".into()]
}

/// The indexed project. Its name doubles as the collection name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default = "default_project_root")]
    pub root: PathBuf,
    /// Source directories relative to `root`.
    #[serde(default = "default_src_dirs")]
    pub src_dirs: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            root: default_project_root(),
            src_dirs: default_src_dirs(),
        }
    }
}

fn default_embedding_url() -> String {
    "http://localhost:11434".into()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_url(),
            model: default_embedding_model(),
        }
    }
}

fn default_store_url() -> String {
    "http://localhost:8000".into()
}

fn default_tenant() -> String {
    sift_store::chroma::DEFAULT_TENANT.into()
}

fn default_database() -> String {
    sift_store::chroma::DEFAULT_DATABASE.into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub url: String,
    #[serde(default = "default_tenant")]
    pub tenant: String,
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            tenant: default_tenant(),
            database: default_database(),
        }
    }
}

fn default_batch_size() -> usize {
    100
}

fn default_concurrency() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Records embedded and upserted per request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Files parsed in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_results() -> usize {
    10
}

fn default_page_size() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Hits shown before asking to continue.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            page_size: default_page_size(),
        }
    }
}

fn default_stop_words() -> Vec<String> {
    vec!["spryker".into(), "project".into()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Removed from queries in addition to the English list.
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
    #[serde(default = "PhraseDictionary::builtin")]
    pub categories: PhraseDictionary,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            categories: PhraseDictionary::builtin(),
        }
    }
}

fn default_num_results() -> usize {
    15
}

/// The `search_in_project` tool served by `sift mcp`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct McpConfig {
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            num_results: default_num_results(),
        }
    }
}
