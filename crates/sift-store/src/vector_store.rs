use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata stored with every indexed entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub name: String,
    /// Entity kind label, stored under `type`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `<project path>/<relative path>:<line>`.
    #[serde(default)]
    pub file_reference: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub id: String,
    pub document: String,
    pub embedding: Vec<f32>,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    /// Store-defined distance; smaller is closer.
    pub distance: Option<f32>,
    pub metadata: RecordMetadata,
}

/// Restricts a query to records whose `type` is one of `types`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    pub types: Vec<String>,
}

impl TypeFilter {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn matches(&self, kind: &str) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| t == kind)
    }

    /// Chroma `where` clause, `None` when the filter is empty.
    #[must_use]
    pub fn to_where(&self) -> Option<serde_json::Value> {
        if self.types.is_empty() {
            return None;
        }
        Some(serde_json::json!({ "type": { "$in": self.types } }))
    }
}

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait VectorStore: Send + Sync {
    /// Create the collection if missing and return its id.
    fn ensure_collection(&self, name: &str) -> BoxFuture<'_, Result<String>>;

    fn collection_id(&self, name: &str) -> BoxFuture<'_, Result<Option<String>>>;

    /// Insert or replace records by id in the collection with `collection_id`.
    fn upsert(&self, collection_id: &str, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<()>>;

    /// Up to `limit` nearest records, closest first.
    fn query(
        &self,
        collection_id: &str,
        embedding: Vec<f32>,
        limit: usize,
        filter: Option<TypeFilter>,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>>>;

    fn delete_collection(&self, name: &str) -> BoxFuture<'_, Result<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_renders_in_clause() {
        let filter = TypeFilter::new(["Config", "Plugin"]);
        assert_eq!(
            filter.to_where().unwrap(),
            serde_json::json!({"type": {"$in": ["Config", "Plugin"]}})
        );
    }

    #[test]
    fn empty_filter_is_omitted_and_matches_all() {
        let filter = TypeFilter::default();
        assert!(filter.to_where().is_none());
        assert!(filter.matches("anything"));
    }

    #[test]
    fn filter_matches_listed_types_only() {
        let filter = TypeFilter::new(["Config"]);
        assert!(filter.matches("Config"));
        assert!(!filter.matches("Plugin"));
    }

    #[test]
    fn metadata_uses_type_key() {
        let meta = RecordMetadata {
            name: "Foo::bar".into(),
            kind: "Plugin".into(),
            file_reference: "/p/src/Foo.php:3".into(),
            code: "function bar();".into(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["type"], "Plugin");
        let back: RecordMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn partial_metadata_deserializes() {
        let meta: RecordMetadata = serde_json::from_value(serde_json::json!({"name": "x"})).unwrap();
        assert_eq!(meta.name, "x");
        assert!(meta.kind.is_empty());
    }
}
