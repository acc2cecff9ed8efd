use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::vector_store::{
    BoxFuture, IndexRecord, RecordMetadata, SearchHit, TypeFilter, VectorStore,
};

struct StoredRecord {
    id: String,
    embedding: Vec<f32>,
    metadata: RecordMetadata,
}

/// Records in insertion order; collection id equals its name.
#[derive(Default)]
struct InMemoryCollection {
    records: Vec<StoredRecord>,
}

/// Process-local [`VectorStore`] ranking by cosine distance.
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, InMemoryCollection>>,
}

impl InMemoryVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records in a collection, `None` if it does not exist.
    #[must_use]
    pub fn len(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.records.len())
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryVectorStore").finish_non_exhaustive()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorStore for InMemoryVectorStore {
    fn ensure_collection(&self, name: &str) -> BoxFuture<'_, Result<String>> {
        let name = name.to_owned();
        Box::pin(async move {
            let mut cols = self
                .collections
                .write()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            cols.entry(name.clone()).or_default();
            Ok(name)
        })
    }

    fn collection_id(&self, name: &str) -> BoxFuture<'_, Result<Option<String>>> {
        let name = name.to_owned();
        Box::pin(async move {
            let cols = self
                .collections
                .read()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            Ok(cols.contains_key(&name).then_some(name))
        })
    }

    fn upsert(&self, collection_id: &str, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<()>> {
        let collection_id = collection_id.to_owned();
        Box::pin(async move {
            let mut cols = self
                .collections
                .write()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            let col = cols
                .get_mut(&collection_id)
                .ok_or_else(|| StoreError::CollectionNotFound(collection_id.clone()))?;
            for record in records {
                let stored = StoredRecord {
                    id: record.id,
                    embedding: record.embedding,
                    metadata: record.metadata,
                };
                match col.records.iter_mut().find(|r| r.id == stored.id) {
                    Some(existing) => *existing = stored,
                    None => col.records.push(stored),
                }
            }
            Ok(())
        })
    }

    fn query(
        &self,
        collection_id: &str,
        embedding: Vec<f32>,
        limit: usize,
        filter: Option<TypeFilter>,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>>> {
        let collection_id = collection_id.to_owned();
        Box::pin(async move {
            let cols = self
                .collections
                .read()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            let col = cols
                .get(&collection_id)
                .ok_or_else(|| StoreError::CollectionNotFound(collection_id.clone()))?;
            let filter = filter.unwrap_or_default();

            let mut hits: Vec<SearchHit> = col
                .records
                .iter()
                .filter(|r| filter.matches(&r.metadata.kind))
                .map(|r| SearchHit {
                    id: r.id.clone(),
                    distance: Some(1.0 - cosine_similarity(&embedding, &r.embedding)),
                    metadata: r.metadata.clone(),
                })
                .collect();

            hits.sort_by(|a, b| {
                a.distance
                    .partial_cmp(&b.distance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            hits.truncate(limit);
            Ok(hits)
        })
    }

    fn delete_collection(&self, name: &str) -> BoxFuture<'_, Result<()>> {
        let name = name.to_owned();
        Box::pin(async move {
            let mut cols = self
                .collections
                .write()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            cols.remove(&name);
            Ok(())
        })
    }
}
