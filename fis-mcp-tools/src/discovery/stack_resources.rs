use std::sync::Arc;

use fis_mcp_core::{fetch_all, listing_fn};
use serde_json::json;

use crate::aws::CloudFormationApi;
use crate::prelude::*;
use crate::require_non_empty;

/// Input for listing a stack's resources
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StackResourcesInput {
    /// Name or ID of the CloudFormation stack
    pub stack_name: String,
}

/// Tool listing the resources deployed by one stack
pub struct StackResourcesTool {
    cloudformation: Arc<dyn CloudFormationApi>,
}

impl StackResourcesTool {
    pub fn new(cloudformation: Arc<dyn CloudFormationApi>) -> Self {
        Self { cloudformation }
    }
}

impl Tool for StackResourcesTool {
    type Input = StackResourcesInput;

    fn name(&self) -> &str {
        "get_stack_resources"
    }

    fn description(&self) -> &str {
        "List the resources of a CloudFormation stack with their logical and physical IDs, \
         types and status."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        require_non_empty("stack_name", &input.stack_name)?;

        let cloudformation = self.cloudformation.as_ref();
        let stack_name = input.stack_name.as_str();
        let resources = fetch_all(&listing_fn(move |token| {
            cloudformation.list_stack_resources(stack_name, token)
        }))
        .await?;

        let resources = serde_json::to_value(resources)?;
        Ok(json!({ "resources": resources }).into())
    }
}
