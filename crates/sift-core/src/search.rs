use std::sync::Arc;

use anyhow::Context;
use sift_query::{CachedClassifier, ClassificationResult, PhraseDictionary};
use sift_store::{Embedder, SearchHit, StoreError, TypeFilter, VectorStore};
use sift_text::{StopWords, normalize_query};

use crate::config::Config;

/// Inputs that end an interactive search loop.
pub const EXIT_COMMANDS: [&str; 4] = ["exit", "quit", "q", "end"];

#[must_use]
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    input.is_empty() || EXIT_COMMANDS.iter().any(|c| input.eq_ignore_ascii_case(c))
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// Nothing searchable was left after normalization.
    Unprocessable,
    Hits {
        types: Vec<String>,
        hits: Vec<SearchHit>,
    },
}

/// Classifies queries and runs filtered nearest-neighbour lookups against
/// the project collection.
pub struct SearchSession {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    dictionary: PhraseDictionary,
    stop_words: StopWords,
    classifier: CachedClassifier,
    collection: String,
    max_results: usize,
}

impl SearchSession {
    #[must_use]
    pub fn new(config: &Config, embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            dictionary: config.query.categories.clone(),
            stop_words: config.stop_words(),
            classifier: CachedClassifier::new(),
            collection: config.project.name.clone(),
            max_results: config.search.max_results,
        }
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        normalize_query(raw, &self.stop_words)
    }

    #[must_use]
    pub fn classify(&self, normalized: &str) -> ClassificationResult {
        self.classifier.classify(normalized, &self.dictionary)
    }

    /// Run one query end to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection does not exist or the embedding or
    /// store request fails.
    pub async fn search(&self, raw: &str) -> anyhow::Result<SearchOutcome> {
        let normalized = self.normalize(raw);
        if normalized.is_empty() {
            tracing::debug!(raw, "query is empty after normalization");
            return Ok(SearchOutcome::Unprocessable);
        }

        let types = self.classify(&normalized).into_vec();
        tracing::info!(query = %normalized, ?types, "classified query");

        let hits = self.lookup(&normalized, &types, self.max_results).await?;
        Ok(SearchOutcome::Hits { types, hits })
    }

    /// Nearest neighbours of `query` restricted to caller-chosen `types`,
    /// without normalization or classification. Empty `types` searches every
    /// kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection does not exist or the embedding or
    /// store request fails.
    pub async fn search_with_types(
        &self,
        query: &str,
        types: &[String],
        limit: usize,
    ) -> anyhow::Result<Vec<SearchHit>> {
        tracing::info!(query, ?types, limit, "explicit type search");
        self.lookup(query.trim(), types, limit).await
    }

    async fn lookup(&self, text: &str, types: &[String], limit: usize) -> anyhow::Result<Vec<SearchHit>> {
        let collection_id = self
            .store
            .collection_id(&self.collection)
            .await?
            .ok_or_else(|| StoreError::CollectionNotFound(self.collection.clone()))
            .context("project has not been indexed")?;

        let embedding = self
            .embedder
            .embed(text)
            .await
            .context("failed to embed query")?;
        let filter = (!types.is_empty()).then(|| TypeFilter::new(types.iter().cloned()));
        self.store
            .query(&collection_id, embedding, limit, filter)
            .await
            .context("vector store query failed")
    }
}
