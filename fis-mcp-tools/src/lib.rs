//! AWS Fault Injection Simulator tools, plus the resource-discovery tools
//! used to find experiment targets.
//!
//! Every tool takes its service client as an injected capability (see
//! [`aws::client`]), and every tool that mutates remote state takes a
//! [`WriteAccess`] that it checks before making any call.
//!
//! ```rust,ignore
//! use fis_mcp_tools::{all_tools, aws::{load_sdk_config, AwsClients}};
//!
//! let sdk_config = load_sdk_config(&settings).await;
//! let clients = AwsClients::from_sdk_config(&sdk_config);
//! let tools = all_tools(&clients, WriteAccess::Disabled);
//! ```

pub mod aws;
pub mod discovery;
pub mod fis;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use fis_mcp_core::tool::DynTool;
use fis_mcp_core::WriteAccess;

use crate::aws::AwsClients;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use fis_mcp_core::{Tool, ToolError, ToolResult};
    pub use schemars::JsonSchema;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
}

/// Returns every tool that only reads remote state
pub fn read_only_tools(clients: &AwsClients) -> Vec<Box<dyn DynTool>> {
    let mut tools = fis::read_only_tools(clients.fis.clone());
    tools.extend(discovery::read_only_tools(clients));
    tools
}

/// Returns every tool that mutates remote state, gated by `access`
pub fn mutative_tools(clients: &AwsClients, access: WriteAccess) -> Vec<Box<dyn DynTool>> {
    let mut tools = fis::mutative_tools(clients.fis.clone(), access);
    tools.extend(discovery::mutative_tools(clients, access));
    tools
}

/// Returns all tools
pub fn all_tools(clients: &AwsClients, access: WriteAccess) -> Vec<Box<dyn DynTool>> {
    let mut tools = read_only_tools(clients);
    tools.extend(mutative_tools(clients, access));
    tools
}

/// Merge a `Name` tag with caller-supplied tags. Caller tags win on conflict.
pub(crate) fn named_tags(name: &str, extra: Option<aws::model::Tags>) -> aws::model::Tags {
    let mut tags = aws::model::Tags::new();
    tags.insert("Name".to_string(), name.to_string());
    tags.extend(extra.unwrap_or_default());
    tags
}

/// Reject empty or whitespace-only identifiers
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), fis_mcp_core::ToolError> {
    if value.trim().is_empty() {
        return Err(fis_mcp_core::ToolError::invalid_input(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
