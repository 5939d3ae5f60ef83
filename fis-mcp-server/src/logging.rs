//! Tracing setup. Logs go to stderr; stdout carries the MCP transport.

use tracing_subscriber::EnvFilter;

use crate::error::{ServerError, ServerResult};

/// Build the log filter from a directive such as `warn` or `fis_mcp_tools=debug,info`
pub fn log_filter(directive: &str) -> ServerResult<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| {
        ServerError::Config(format!("invalid log level '{}': {}", directive, e))
    })
}

/// Install the global subscriber
pub fn init_tracing(directive: &str) -> ServerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directive)?)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
