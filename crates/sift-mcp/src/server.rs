use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use sift_core::SearchSession;
use sift_index::EntityKind;
use sift_store::SearchHit;

pub const TOOL_NAME: &str = "search_in_project";

const QUERY_MIN_CHARS: usize = 5;
const QUERY_MAX_CHARS: usize = 120;

/// Arguments of [`TOOL_NAME`].
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

impl SearchArgs {
    fn from_arguments(arguments: Option<JsonObject>) -> Result<Self, McpError> {
        let value = serde_json::Value::Object(arguments.unwrap_or_default());
        let args: Self = serde_json::from_value(value)
            .map_err(|e| McpError::invalid_params(format!("invalid arguments: {e}"), None))?;

        let len = args.query.chars().count();
        if !(QUERY_MIN_CHARS..=QUERY_MAX_CHARS).contains(&len) {
            return Err(McpError::invalid_params(
                format!("query must be {QUERY_MIN_CHARS} to {QUERY_MAX_CHARS} characters, got {len}"),
                None,
            ));
        }
        Ok(args)
    }

    /// Requested types as canonical labels; unknown names are rejected.
    fn type_labels(&self) -> Result<Vec<String>, McpError> {
        self.types
            .iter()
            .flatten()
            .map(|t| {
                t.parse::<EntityKind>()
                    .map(|kind| kind.label().to_owned())
                    .map_err(|e| McpError::invalid_params(e, None))
            })
            .collect()
    }
}

/// Serves the project search tool. Cloned per MCP session; state is shared.
#[derive(Clone)]
pub struct SearchServer {
    session: Arc<SearchSession>,
    project: String,
    num_results: usize,
}

impl SearchServer {
    pub fn new(session: Arc<SearchSession>, project: impl Into<String>, num_results: usize) -> Self {
        Self {
            session,
            project: project.into(),
            num_results,
        }
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        Tool {
            name: Cow::Borrowed(TOOL_NAME),
            title: None,
            description: Some(Cow::Owned(format!(
                "To search classes and methods in {}",
                self.project
            ))),
            input_schema: input_schema(),
            output_schema: None,
            annotations: Some(ToolAnnotations::new().read_only(true)),
            execution: None,
            icons: None,
            meta: None,
        }
    }

    /// Run [`TOOL_NAME`] with raw JSON arguments.
    ///
    /// Search failures are reported as an error result, not a protocol error.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_params` error for a missing or out-of-range query
    /// or an unknown type.
    pub async fn search(&self, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let args = SearchArgs::from_arguments(arguments)?;
        let types = args.type_labels()?;
        tracing::info!(query = %args.query, ?types, "processing search_in_project");

        match self
            .session
            .search_with_types(&args.query, &types, self.num_results)
            .await
        {
            Ok(hits) => {
                tracing::info!(hits = hits.len(), "search_in_project done");
                Ok(CallToolResult::success(vec![Content::text(format_hits(&hits, &types))]))
            }
            Err(e) => {
                tracing::error!("semantic search failed: {e:#}");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error performing semantic search: {e:#}"
                ))]))
            }
        }
    }
}

fn input_schema() -> Arc<JsonObject> {
    let labels: Vec<&str> = EntityKind::ALL.iter().map(|k| k.label()).collect();
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "minLength": QUERY_MIN_CHARS,
                "maxLength": QUERY_MAX_CHARS,
                "description": "The natural language query that contains class or method names"
            },
            "types": {
                "type": "array",
                "items": { "type": "string", "enum": labels },
                "description": "Optional types to filter by; leave empty to search every type"
            }
        },
        "required": ["query"]
    });
    match schema {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn format_hits(hits: &[SearchHit], types: &[String]) -> String {
    let codes: Vec<&str> = hits.iter().map(|h| h.metadata.code.as_str()).collect();
    let types_json = serde_json::to_string(types).unwrap_or_default();
    let codes_json = serde_json::to_string_pretty(&codes).unwrap_or_default();
    format!(
        "Found {} results matching your query with type filters {types_json} that contain \
         code references to method names and their annotations.\n```json\n{codes_json}\n```",
        hits.len()
    )
}

impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sift".to_string(),
                title: Some(format!("sift: {}", self.project)),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Semantic search over the {} codebase among method and class names. \
                 Results are short code references (class name, method signature and \
                 doc summary), not full file contents.",
                self.project
            )),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(vec![self.tool()])))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        (name == TOOL_NAME).then(|| self.tool())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if request.name != TOOL_NAME {
            return Err(McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("no tool registered with name: {}", request.name),
                None,
            ));
        }
        self.search(request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use sift_core::Config;
    use sift_store::{Embedder, InMemoryVectorStore, IndexRecord, RecordMetadata, VectorStore};

    use super::*;

    type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

    struct ConstEmbedder;

    impl Embedder for ConstEmbedder {
        fn embed(&self, _text: &str) -> BoxFuture<'_, sift_store::Result<Vec<f32>>> {
            Box::pin(async { Ok(vec![1.0, 0.0]) })
        }

        fn embed_batch(&self, texts: Vec<String>) -> BoxFuture<'_, sift_store::Result<Vec<Vec<f32>>>> {
            Box::pin(async move { Ok(vec![vec![1.0, 0.0]; texts.len()]) })
        }
    }

    fn record(id: &str, kind: &str) -> IndexRecord {
        IndexRecord {
            id: id.into(),
            document: id.into(),
            embedding: vec![1.0, 0.0],
            metadata: RecordMetadata {
                name: id.into(),
                kind: kind.into(),
                file_reference: format!("/p/{id}.php:1"),
                code: format!("{id}\nfunction x();"),
            },
        }
    }

    async fn server(indexed: bool) -> SearchServer {
        let mut config = Config::default();
        config.project.name = "shop".into();
        let store = Arc::new(InMemoryVectorStore::new());
        if indexed {
            let id = store.ensure_collection("shop").await.unwrap();
            store
                .upsert(
                    &id,
                    vec![
                        record("CartConfig::getLimit", "Config"),
                        record("EventPlugin::handle", "Plugin"),
                    ],
                )
                .await
                .unwrap();
        }
        let session = SearchSession::new(&config, Arc::new(ConstEmbedder), store);
        SearchServer::new(Arc::new(session), "shop", 15)
    }

    fn args(value: serde_json::Value) -> Option<JsonObject> {
        match value {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn text(result: &CallToolResult) -> &str {
        let RawContent::Text(t) = &result.content[0].raw else {
            panic!("expected text content");
        };
        &t.text
    }

    #[tokio::test]
    async fn tool_descriptor_lists_query_and_types() {
        let tool = server(false).await.tool();
        assert_eq!(tool.name, TOOL_NAME);
        assert!(tool.description.unwrap().contains("shop"));
        assert_eq!(tool.input_schema["required"], serde_json::json!(["query"]));
        assert_eq!(tool.input_schema["properties"]["query"]["maxLength"], 120);
        assert_eq!(
            tool.input_schema["properties"]["types"]["items"]["enum"]
                .as_array()
                .unwrap()
                .len(),
            6
        );
    }

    #[tokio::test]
    async fn explicit_types_filter_results() {
        let server = server(true).await;
        let result = server
            .search(args(serde_json::json!({"query": "cart limit", "types": ["config"]})))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        let text = text(&result);
        assert!(text.starts_with("Found 1 results"), "{text}");
        assert!(text.contains("[\"Config\"]"), "{text}");
        assert!(text.contains("CartConfig::getLimit"), "{text}");
        assert!(!text.contains("EventPlugin"), "{text}");
    }

    #[tokio::test]
    async fn missing_types_search_everything() {
        let server = server(true).await;
        let result = server
            .search(args(serde_json::json!({"query": "cart limit"})))
            .await
            .unwrap();
        assert!(text(&result).starts_with("Found 2 results"));
    }

    #[tokio::test]
    async fn query_length_is_bounded() {
        let server = server(true).await;
        for query in ["abcd".to_owned(), "x".repeat(121)] {
            let err = server
                .search(args(serde_json::json!({ "query": query })))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        }
        assert!(
            server
                .search(args(serde_json::json!({"query": "x".repeat(120)})))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn unknown_type_and_missing_query_are_rejected() {
        let server = server(true).await;
        let err = server
            .search(args(serde_json::json!({"query": "cart limit", "types": ["Controller"]})))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = server.search(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unindexed_project_is_an_error_result() {
        let server = server(false).await;
        let result = server
            .search(args(serde_json::json!({"query": "cart limit"})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).starts_with("Error performing semantic search"));
    }

    #[tokio::test]
    async fn get_tool_matches_name_only() {
        let server = server(false).await;
        assert!(server.get_tool(TOOL_NAME).is_some());
        assert!(server.get_tool("search").is_none());
    }
}
