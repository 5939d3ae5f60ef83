//! Error types shared by the tool crates
//!
//! [`ServiceError`] classifies a failed remote call. [`Error`] is the
//! flattened, user-facing type returned by the [`ToolRegistry`](crate::ToolRegistry),
//! categorized by how callers typically need to handle it.

use thiserror::Error;

use crate::tool::ToolError;

/// A failed call to a remote service, classified by cause
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Credentials are missing, invalid, expired or lack permission
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Request was throttled
    #[error("rate limited: {0}")]
    Throttled(String),

    /// Connection, DNS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// Service returned a 5xx
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected the request parameters
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    /// Returns true if retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Throttled(_) | Self::Network(_) | Self::Unavailable(_)
        )
    }
}

/// Top-level error type
///
/// - [`Error::Auth`] - Fix credentials and retry
/// - [`Error::RateLimited`] - Back off and retry
/// - [`Error::Network`] - Check connectivity, retry
/// - [`Error::Unavailable`] - Service is down, wait and retry
/// - [`Error::NotFound`] - The resource does not exist
/// - [`Error::InvalidInput`] - Fix the arguments
/// - [`Error::WriteDisabled`] - Restart with writes enabled
/// - [`Error::UnknownTool`] - No tool is registered under that name
/// - [`Error::Tool`] - Tool execution failed for another reason
/// - [`Error::Config`] - Fix configuration
#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    WriteDisabled(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool error: {0}")]
    Tool(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_write_disabled(&self) -> bool {
        matches!(self, Self::WriteDisabled(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns true if this error is potentially retryable
    ///
    /// Authentication, input and configuration errors are not retryable
    /// without intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Network(_) | Self::Unavailable(_)
        )
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Authentication(msg) => Self::Auth(msg),
            ServiceError::Throttled(msg) => Self::RateLimited(msg),
            ServiceError::Network(msg) => Self::Network(msg),
            ServiceError::Unavailable(msg) => Self::Unavailable(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Validation(msg) => Self::InvalidInput(msg),
            ServiceError::Other(msg) => Self::Other(msg),
        }
    }
}

impl From<ToolError> for Error {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Service(service) => service.into(),
            ToolError::InvalidInput(msg) => Self::InvalidInput(msg),
            err @ ToolError::WriteDisabled { .. } => Self::WriteDisabled(err.to_string()),
            other => Self::Tool(other.to_string()),
        }
    }
}

/// Result type alias using the top-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_retryable() {
        assert!(ServiceError::Throttled("slow down".into()).is_retryable());
        assert!(ServiceError::Network("reset".into()).is_retryable());
        assert!(ServiceError::Unavailable("503".into()).is_retryable());
        assert!(!ServiceError::Authentication("expired".into()).is_retryable());
        assert!(!ServiceError::Validation("bad id".into()).is_retryable());
    }

    #[test]
    fn test_from_service_error() {
        let err: Error = ServiceError::Throttled("quota".into()).into();
        assert!(matches!(err, Error::RateLimited(ref m) if m == "quota"));
        assert!(err.is_retryable());

        let err: Error = ServiceError::NotFound("EXT123".into()).into();
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_tool_error_unwraps_service_error() {
        let err: Error = ToolError::Service(ServiceError::Authentication("expired".into())).into();
        assert!(err.is_auth());
    }

    #[test]
    fn test_from_tool_error_write_disabled() {
        let err: Error = ToolError::WriteDisabled {
            operation: "create views".into(),
        }
        .into();
        assert!(err.is_write_disabled());
        assert!(err.to_string().contains("--allow-writes"));
    }

    #[test]
    fn test_from_tool_error_invalid_input() {
        let err: Error = ToolError::invalid_input("stack_name must not be empty").into();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_tool_error_custom() {
        let err: Error = ToolError::Custom("boom".into()).into();
        assert!(matches!(err, Error::Tool(ref m) if m == "boom"));
    }
}
