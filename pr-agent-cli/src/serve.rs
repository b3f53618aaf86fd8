//! MCP stdio server loop

use crate::commands::Settings;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use pr_agent::mcp::McpServer;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;

/// Serve the PR agent tools on stdin/stdout until the client disconnects
/// or Ctrl+C is pressed
pub async fn run_server(settings: Settings) -> i32 {
    let server = McpServer::new(settings.config, settings.work_dir);

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                ct_clone.cancel();
            }
            Err(e) => tracing::warn!("Unable to listen for ctrl+c: {}", e),
        }
    });

    match serve_server(server, stdio()).await {
        Ok(running) => {
            tracing::info!("MCP server started");
            tokio::select! {
                _ = ct.cancelled() => {
                    tracing::info!("MCP server stopped by signal");
                }
                quit = running.waiting() => match quit {
                    Ok(reason) => tracing::info!("MCP server exited: {:?}", reason),
                    Err(e) => {
                        tracing::error!("MCP server task failed: {}", e);
                        return EXIT_ERROR;
                    }
                },
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_ERROR
        }
    }
}
