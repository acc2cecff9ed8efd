//! Project indexing pipeline: discover → extract → embed → upsert.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use futures::{StreamExt, stream};
use sift_index::discovery::discover;
use sift_index::php::PhpGrammar;
use sift_index::{EntityKind, Extractor, SourceEntity};
use sift_store::{Embedder, IndexRecord, RecordMetadata, VectorStore};

use crate::config::Config;

/// Summary of an indexing run.
#[derive(Debug, Default)]
pub struct IndexReport {
    pub files_scanned: usize,
    pub files_indexed: usize,
    pub entities: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

/// Indexes the configured project into one vector-store collection.
pub struct ProjectIndexer {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    extractor: Arc<Extractor<PhpGrammar>>,
    collection: String,
    project_root: PathBuf,
    roots: Vec<PathBuf>,
    batch_size: usize,
    concurrency: usize,
}

impl ProjectIndexer {
    #[must_use]
    pub fn new(config: &Config, embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            extractor: Arc::new(Extractor::php()),
            collection: config.project.name.clone(),
            project_root: config.project.root.clone(),
            roots: config.source_roots(),
            batch_size: config.index.batch_size.max(1),
            concurrency: config.index.concurrency.max(1),
        }
    }

    /// Index every file matching `kinds`.
    ///
    /// Files that fail to read or parse are skipped and listed in
    /// [`IndexReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be created, discovery fails,
    /// or an embedding or upsert request fails.
    pub async fn index_project(&self, kinds: &[EntityKind]) -> anyhow::Result<IndexReport> {
        let start = Instant::now();
        let mut report = IndexReport::default();

        let collection_id = self
            .store
            .ensure_collection(&self.collection)
            .await
            .with_context(|| format!("failed to ensure collection {}", self.collection))?;
        let mut seen = HashSet::new();

        for &kind in kinds {
            let roots = self.roots.clone();
            let files = tokio::task::spawn_blocking(move || discover(&roots, kind))
                .await
                .context("discovery task failed")?
                .with_context(|| format!("failed to discover {kind} files"))?;

            report.files_scanned += files.len();
            tracing::info!(kind = %kind, files = files.len(), "indexing started");

            let mut records = Vec::new();
            for (path, outcome) in self.extract_all(files).await {
                let entities = match outcome {
                    Ok(entities) => entities,
                    Err(e) => {
                        tracing::warn!(file = %path.display(), "skipping file: {e:#}");
                        report.errors.push(format!("{}: {e:#}", path.display()));
                        continue;
                    }
                };
                tracing::debug!(file = %path.display(), entities = entities.len(), "extracted");
                if !entities.is_empty() {
                    report.files_indexed += 1;
                }
                for entity in entities {
                    if !seen.insert(entity.identity.clone()) {
                        tracing::warn!(id = %entity.identity, file = %path.display(), "duplicate entity id, skipping");
                        continue;
                    }
                    records.push(self.record(kind, &path, entity));
                }
            }

            let total = records.len();
            let mut done = 0;
            for batch in records.chunks(self.batch_size) {
                self.embed_and_upsert(&collection_id, batch.to_vec()).await?;
                done += batch.len();
                tracing::info!(
                    kind = %kind,
                    done,
                    total,
                    "batch stored"
                );
            }
            report.entities += total;
        }

        report.duration_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        Ok(report)
    }

    async fn extract_all(
        &self,
        files: Vec<PathBuf>,
    ) -> Vec<(PathBuf, anyhow::Result<Vec<SourceEntity>>)> {
        stream::iter(files)
            .map(|path| {
                let extractor = Arc::clone(&self.extractor);
                async move {
                    let task_path = path.clone();
                    let outcome =
                        tokio::task::spawn_blocking(move || extract_file(&extractor, &task_path))
                            .await;
                    let outcome = match outcome {
                        Ok(result) => result.map_err(anyhow::Error::from),
                        Err(e) => Err(anyhow::anyhow!("extraction task failed: {e}")),
                    };
                    (path, outcome)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    fn record(&self, kind: EntityKind, path: &Path, entity: SourceEntity) -> IndexRecord {
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        let file_reference = format!(
            "{}/{}:{}",
            self.project_root.display().to_string().trim_end_matches('/'),
            relative.display(),
            entity.source_line
        );
        IndexRecord {
            id: entity.identity.clone(),
            document: entity.canonical_source_text.clone(),
            embedding: Vec::new(),
            metadata: RecordMetadata {
                name: entity.identity,
                kind: kind.label().to_owned(),
                file_reference,
                code: entity.canonical_source_text,
            },
        }
    }

    async fn embed_and_upsert(&self, collection_id: &str, mut batch: Vec<IndexRecord>) -> anyhow::Result<()> {
        let texts = batch.iter().map(|r| r.document.clone()).collect();
        let embeddings = self
            .embedder
            .embed_batch(texts)
            .await
            .context("embedding request failed")?;
        for (record, embedding) in batch.iter_mut().zip(embeddings) {
            record.embedding = embedding;
        }
        self.store
            .upsert(collection_id, batch)
            .await
            .context("vector store upsert failed")?;
        Ok(())
    }
}

fn extract_file(extractor: &Extractor<PhpGrammar>, path: &Path) -> sift_index::Result<Vec<SourceEntity>> {
    let source = std::fs::read_to_string(path)?;
    extractor.extract(&source)
}
