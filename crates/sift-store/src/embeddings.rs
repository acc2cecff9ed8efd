//! Text embedding clients.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::http::{default_client, read_body};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns text into embedding vectors.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> BoxFuture<'_, Result<Vec<f32>>>;

    /// Embed several texts; the result has one vector per input, in order.
    fn embed_batch(&self, texts: Vec<String>) -> BoxFuture<'_, Result<Vec<Vec<f32>>>>;
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct EmbedBatchRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedBatchResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

/// Ollama embeddings API client.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(default_client(), base_url, model)
    }

    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;
        let body = read_body(response).await?;
        let parsed: EmbeddingResponse = serde_json::from_str(&body)?;
        if parsed.embedding.is_empty() {
            return Err(StoreError::EmptyResponse { endpoint: url });
        }
        Ok(parsed.embedding)
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/api/embed", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbedBatchRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?;
        let body = read_body(response).await?;
        let parsed: EmbedBatchResponse = serde_json::from_str(&body)?;
        if parsed.embeddings.len() != texts.len() || parsed.embeddings.iter().any(Vec::is_empty) {
            tracing::warn!(
                expected = texts.len(),
                got = parsed.embeddings.len(),
                "embedding batch size mismatch"
            );
            return Err(StoreError::EmptyResponse { endpoint: url });
        }
        tracing::debug!(count = texts.len(), model = %self.model, "embedded batch");
        Ok(parsed.embeddings)
    }
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, text: &str) -> BoxFuture<'_, Result<Vec<f32>>> {
        let text = text.to_owned();
        Box::pin(async move { self.embed_one(&text).await })
    }

    fn embed_batch(&self, texts: Vec<String>) -> BoxFuture<'_, Result<Vec<Vec<f32>>>> {
        Box::pin(async move { self.embed_many(&texts).await })
    }
}
