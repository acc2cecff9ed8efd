//! Chroma v2 REST backend.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::http::{default_client, read_body};
use crate::vector_store::{
    BoxFuture, IndexRecord, RecordMetadata, SearchHit, TypeFilter, VectorStore,
};

pub const DEFAULT_TENANT: &str = "default_tenant";
pub const DEFAULT_DATABASE: &str = "default_database";

const QUERY_INCLUDE: [&str; 3] = ["distances", "metadatas", "documents"];

#[derive(Serialize)]
struct CreateCollection<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct Collection {
    id: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    ids: Vec<&'a str>,
    embeddings: Vec<&'a [f32]>,
    documents: Vec<&'a str>,
    metadatas: Vec<&'a RecordMetadata>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_embeddings: [&'a [f32]; 1],
    n_results: usize,
    include: [&'static str; 3],
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    filter: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    ids: Vec<Vec<String>>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f32>>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<RecordMetadata>>>>,
}

/// Vector store speaking the Chroma v2 HTTP API.
#[derive(Debug, Clone)]
pub struct ChromaStore {
    client: reqwest::Client,
    base: String,
}

impl ChromaStore {
    /// Store rooted at `{url}/api/v2/tenants/{tenant}/databases/{database}`.
    #[must_use]
    pub fn new(url: &str, tenant: &str, database: &str) -> Self {
        Self::with_client(default_client(), url, tenant, database)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, url: &str, tenant: &str, database: &str) -> Self {
        Self {
            client,
            base: format!(
                "{}/api/v2/tenants/{tenant}/databases/{database}",
                url.trim_end_matches('/')
            ),
        }
    }

    fn collections_url(&self) -> String {
        format!("{}/collections", self.base)
    }

    async fn create(&self, name: &str) -> Result<String> {
        let response = self
            .client
            .post(self.collections_url())
            .json(&CreateCollection { name })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!(collection = name, "collection already exists");
            return self
                .lookup(name)
                .await?
                .ok_or_else(|| StoreError::CollectionNotFound(name.to_owned()));
        }

        let body = read_body(response).await?;
        let collection: Collection = serde_json::from_str(&body)?;
        tracing::info!(collection = name, id = %collection.id, "collection created");
        Ok(collection.id)
    }

    async fn lookup(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(format!("{}/{name}", self.collections_url()))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = read_body(response).await?;
        let collection: Collection = serde_json::from_str(&body)?;
        Ok(Some(collection.id))
    }

    async fn upsert_records(&self, collection_id: &str, records: &[IndexRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let request = UpsertRequest {
            ids: records.iter().map(|r| r.id.as_str()).collect(),
            embeddings: records.iter().map(|r| r.embedding.as_slice()).collect(),
            documents: records.iter().map(|r| r.document.as_str()).collect(),
            metadatas: records.iter().map(|r| &r.metadata).collect(),
        };
        let response = self
            .client
            .post(format!("{}/{collection_id}/upsert", self.collections_url()))
            .json(&request)
            .send()
            .await?;
        read_body(response).await?;
        tracing::debug!(collection_id, count = records.len(), "upserted records");
        Ok(())
    }

    async fn query_records(
        &self,
        collection_id: &str,
        embedding: &[f32],
        limit: usize,
        filter: Option<&TypeFilter>,
    ) -> Result<Vec<SearchHit>> {
        let request = QueryRequest {
            query_embeddings: [embedding],
            n_results: limit,
            include: QUERY_INCLUDE,
            filter: filter.and_then(TypeFilter::to_where),
        };
        let response = self
            .client
            .post(format!("{}/{collection_id}/query", self.collections_url()))
            .json(&request)
            .send()
            .await?;
        let body = read_body(response).await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;

        let ids = parsed.ids.into_iter().next().unwrap_or_default();
        let mut distances = parsed
            .distances
            .and_then(|d| d.into_iter().next())
            .unwrap_or_default()
            .into_iter();
        let mut metadatas = parsed
            .metadatas
            .and_then(|m| m.into_iter().next())
            .unwrap_or_default()
            .into_iter();

        Ok(ids
            .into_iter()
            .map(|id| SearchHit {
                id,
                distance: distances.next().flatten(),
                metadata: metadatas.next().flatten().unwrap_or_default(),
            })
            .collect())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/{name}", self.collections_url()))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        read_body(response).await?;
        tracing::info!(collection = name, "collection deleted");
        Ok(())
    }
}

impl VectorStore for ChromaStore {
    fn ensure_collection(&self, name: &str) -> BoxFuture<'_, Result<String>> {
        let name = name.to_owned();
        Box::pin(async move { self.create(&name).await })
    }

    fn collection_id(&self, name: &str) -> BoxFuture<'_, Result<Option<String>>> {
        let name = name.to_owned();
        Box::pin(async move { self.lookup(&name).await })
    }

    fn upsert(&self, collection_id: &str, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<()>> {
        let collection_id = collection_id.to_owned();
        Box::pin(async move { self.upsert_records(&collection_id, &records).await })
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
            self.query_records(&collection_id, &embedding, limit, filter.as_ref())
                .await
        })
    }

    fn delete_collection(&self, name: &str) -> BoxFuture<'_, Result<()>> {
        let name = name.to_owned();
        Box::pin(async move { self.delete(&name).await })
    }
}
