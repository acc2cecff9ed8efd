//! Error types for sift-store.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status with the response body.
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// A successful response without the expected payload.
    #[error("empty response from {endpoint}")]
    EmptyResponse { endpoint: String },

    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
