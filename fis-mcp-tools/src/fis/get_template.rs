use std::sync::Arc;

use serde_json::json;

use crate::aws::FisApi;
use crate::prelude::*;
use crate::require_non_empty;

/// Input for fetching a single experiment template
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTemplateInput {
    /// The experiment template ID to retrieve
    pub id: String,
}

pub struct GetTemplateTool {
    fis: Arc<dyn FisApi>,
}

impl GetTemplateTool {
    pub fn new(fis: Arc<dyn FisApi>) -> Self {
        Self { fis }
    }
}

impl Tool for GetTemplateTool {
    type Input = GetTemplateInput;

    fn name(&self) -> &str {
        "get_experiment_template"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific FIS experiment template, \
         including its targets, actions, stop conditions and role."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        require_non_empty("id", &input.id)?;
        let template = self.fis.get_experiment_template(&input.id).await?;
        let template = serde_json::to_value(template)?;
        Ok(json!({ "experimentTemplate": template }).into())
    }
}
