//! Stdio MCP server for AWS Fault Injection Simulator.

use clap::Parser;
use fis_mcp_server::logging::init_tracing;
use fis_mcp_server::{build_registry, build_server, Cli, ServerConfig, ServerError};
use fis_mcp_tools::aws::{load_sdk_config, AwsClients};
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env(Cli::parse())?;
    init_tracing(&config.log_level)?;

    if config.list_tools {
        let sdk_config = load_sdk_config(&config.aws_settings()).await;
        let registry = build_registry(&AwsClients::from_sdk_config(&sdk_config), &config)?;
        eprintln!("Available tools ({}):", registry.len());
        for tool in registry.iter() {
            let marker = if tool.is_mutating() { " (write)" } else { "" };
            eprintln!("  - {}{}", tool.name(), marker);
        }
        return Ok(());
    }

    let server = build_server(&config).await?;
    info!("FIS MCP server starting on stdio");

    let service = server
        .serve(stdio())
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    service.waiting().await?;

    Ok(())
}
