// Standalone MCP server binary

use anyhow::{Context, Result};
use expenselm_mcp::server::McpServer;
use expenselm_mcp::tools::expense_tool_registry;
use expenselm_sdk::config::API_KEY_ENV;
use expenselm_sdk::{ClientConfig, ExpenseLmClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so log to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("ExpenseLM MCP Server starting...");

    // Credential is read once; tool calls fail with a configuration error when it is absent
    let config = ClientConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("{} is not set, tool calls will fail until it is", API_KEY_ENV);
    }
    tracing::info!(base_url = %config.base_url, timeout_secs = config.timeout.as_secs(), "API client configured");

    let client = ExpenseLmClient::from_config(config).context("Failed to create API client")?;

    let registry = expense_tool_registry(client);
    tracing::info!("Registered {} tools", registry.len());

    // Start MCP server
    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
