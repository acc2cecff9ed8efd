//! MCP server exposing project search as the `search_in_project` tool.

pub mod server;

pub use server::{SearchArgs, SearchServer, TOOL_NAME};

/// Serve `server` over stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the MCP handshake fails or the session ends abnormally.
pub async fn serve_stdio(server: SearchServer) -> anyhow::Result<()> {
    use rmcp::ServiceExt;

    let running = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("MCP server ready on stdio");
    running.waiting().await?;
    Ok(())
}
