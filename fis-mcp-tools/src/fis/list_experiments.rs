use std::sync::Arc;

use fis_mcp_core::{fetch_all, listing_fn, shape_keyed, Projection};

use crate::aws::FisApi;
use crate::prelude::*;

/// Input for listing experiments (no parameters)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListExperimentsInput {}

/// Tool listing every FIS experiment in the account and region
pub struct ListExperimentsTool {
    fis: Arc<dyn FisApi>,
}

impl ListExperimentsTool {
    pub fn new(fis: Arc<dyn FisApi>) -> Self {
        Self { fis }
    }

    fn projection() -> Projection {
        Projection::new()
            .key("tags.Name")
            .key("id")
            .field("id")
            .field("arn")
            .optional("experimentTemplateId")
            .field("state")
            .optional("experimentOptions")
    }
}

impl Tool for ListExperimentsTool {
    type Input = ListExperimentsInput;

    fn name(&self) -> &str {
        "list_fis_experiments"
    }

    fn description(&self) -> &str {
        "List all AWS FIS experiments in the current account and region, keyed by their Name tag \
         (or ID when untagged). Each entry has the experiment ID, ARN, template ID, state and options."
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        let fis = self.fis.as_ref();
        let experiments = fetch_all(&listing_fn(move |token| fis.list_experiments(token))).await?;

        let records = experiments
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let shaped = shape_keyed(&records, &Self::projection())?;

        Ok(Value::Object(shaped).into())
    }
}
