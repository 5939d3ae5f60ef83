use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;
use crate::shape::ShapeError;

/// Result types that tools can return.
///
/// AWS responses are returned as `Json`; `Text` is used for short
/// confirmations and for resources served verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolResult {
    /// Plain text response
    Text(String),

    /// Structured JSON data
    Json(Value),
}

impl ToolResult {
    /// Create a JSON result from any serializable type
    pub fn json<T: Serialize>(value: T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Create a text result from a string
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Render the result as text. JSON is pretty-printed.
    pub fn as_text(&self) -> String {
        match self {
            ToolResult::Text(s) => s.clone(),
            ToolResult::Json(v) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
        }
    }

    /// Borrow the text content, if this is a `Text` result
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToolResult::Text(s) => Some(s),
            ToolResult::Json(_) => None,
        }
    }

    /// Borrow the JSON content, if this is a `Json` result
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ToolResult::Json(v) => Some(v),
            ToolResult::Text(_) => None,
        }
    }
}

impl From<String> for ToolResult {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ToolResult {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Value> for ToolResult {
    fn from(v: Value) -> Self {
        Self::Json(v)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Write operations are disabled. Restart the server with --allow-writes to {operation}")]
    WriteDisabled { operation: String },

    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Custom(String),
}

impl ToolError {
    /// Build an `InvalidInput` error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true if the tool refused because writes are disabled
    pub fn is_write_disabled(&self) -> bool {
        matches!(self, Self::WriteDisabled { .. })
    }
}

impl From<String> for ToolError {
    fn from(s: String) -> Self {
        Self::Custom(s)
    }
}

impl From<&str> for ToolError {
    fn from(s: &str) -> Self {
        Self::Custom(s.to_string())
    }
}

/// Trait for implementing tools exposed to an agent.
///
/// Tools define an input type with `#[derive(Deserialize, JsonSchema)]`; the
/// schema advertised to the agent is generated from it, and doc comments on
/// the fields become parameter descriptions.
///
/// # Example
///
/// ```rust
/// use fis_mcp_core::{Tool, ToolError, ToolResult};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct EchoInput {
///     /// Text to echo back
///     message: String,
/// }
///
/// struct EchoTool;
///
/// impl Tool for EchoTool {
///     type Input = EchoInput;
///
///     fn name(&self) -> &str { "echo" }
///     fn description(&self) -> &str { "Echo a message" }
///
///     async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
///         Ok(ToolResult::text(input.message))
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The input type for this tool. Must implement `Deserialize` and `JsonSchema`.
    type Input: DeserializeOwned + JsonSchema;

    /// The name of the tool (e.g., "list_cfn_stacks")
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// Execute the tool with typed input
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl std::future::Future<Output = Result<ToolResult, ToolError>> + Send;

    /// Get the JSON schema for this tool's input.
    fn input_schema(&self) -> Value {
        schemars::schema_for!(Self::Input).to_value()
    }

    /// Whether the tool mutates remote state. Mutating tools are write-gated.
    fn is_mutating(&self) -> bool {
        false
    }
}

/// Object-safe counterpart of [`Tool`], taking untyped JSON input.
///
/// Implement `Tool` and convert with [`box_tool`].
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> Value;
    fn is_mutating(&self) -> bool;
    fn execute_raw(&self, input: Value) -> BoxFuture<'_, Result<ToolResult, ToolError>>;
}

/// Box a tool for use in a registry or tool list
pub fn box_tool<T: Tool + 'static>(tool: T) -> Box<dyn DynTool> {
    Box::new(ToolWrapper(tool))
}

/// Box several tools at once.
///
/// ```rust,ignore
/// let tools = box_tools![ListStacksTool::new(cfn.clone()), ListViewsTool::new(rex.clone())];
/// ```
#[macro_export]
macro_rules! box_tools {
    ($($tool:expr),* $(,)?) => {
        vec![$($crate::tool::box_tool($tool)),*]
    };
}

struct ToolWrapper<T>(T);

impl<T: Tool + 'static> DynTool for ToolWrapper<T> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn description(&self) -> &str {
        self.0.description()
    }

    fn input_schema(&self) -> Value {
        self.0.input_schema()
    }

    fn is_mutating(&self) -> bool {
        self.0.is_mutating()
    }

    fn execute_raw(&self, input: Value) -> BoxFuture<'_, Result<ToolResult, ToolError>> {
        Box::pin(async move {
            // Agents omit the arguments object entirely for parameterless tools
            let input = if input.is_null() {
                Value::Object(Default::default())
            } else {
                input
            };
            let typed_input: T::Input = serde_json::from_value(input).map_err(|e| {
                ToolError::InvalidInput(format!("failed to deserialize input: {}", e))
            })?;

            self.0.execute(typed_input).await
        })
    }
}
