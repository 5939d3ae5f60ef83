//! Error types for the FIS MCP server.

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid startup configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tool set could not be assembled.
    #[error("Tool registry error: {0}")]
    Registry(#[from] fis_mcp_core::Error),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// The MCP transport failed.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
