//! MCP server exposing AWS Fault Injection Simulator and resource-discovery
//! tools over stdio.
//!
//! ```rust,ignore
//! let config = ServerConfig::from_env(Cli::parse())?;
//! let server = build_server(&config).await?;
//! let service = server.serve(rmcp::transport::stdio()).await?;
//! service.waiting().await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use config::{Cli, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::FisMcpServer;

use fis_mcp_core::ToolRegistry;
use fis_mcp_tools::aws::{load_sdk_config, AwsClients};
use tracing::info;

/// Assemble the tool registry over the given clients
pub fn build_registry(clients: &AwsClients, config: &ServerConfig) -> ServerResult<ToolRegistry> {
    let tools = fis_mcp_tools::all_tools(clients, config.write_access);
    Ok(ToolRegistry::with_tools(tools)?)
}

/// Load AWS configuration and build the server
pub async fn build_server(config: &ServerConfig) -> ServerResult<FisMcpServer> {
    let sdk_config = load_sdk_config(&config.aws_settings()).await;
    let clients = AwsClients::from_sdk_config(&sdk_config);
    let registry = build_registry(&clients, config)?;

    info!(
        profile = config.profile.as_deref().unwrap_or("default"),
        region = %config.region,
        allow_writes = config.write_access.is_enabled(),
        tools = registry.len(),
        "FIS MCP server configured"
    );
    Ok(FisMcpServer::new(registry))
}
