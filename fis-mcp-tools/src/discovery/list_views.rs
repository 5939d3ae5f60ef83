use std::sync::Arc;

use fis_mcp_core::{fetch_all, listing_fn};

use crate::aws::ResourceExplorerApi;
use crate::prelude::*;

/// Input for listing views (no parameters)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListViewsInput {}

pub struct ListViewsTool {
    resource_explorer: Arc<dyn ResourceExplorerApi>,
}

impl ListViewsTool {
    pub fn new(resource_explorer: Arc<dyn ResourceExplorerApi>) -> Self {
        Self { resource_explorer }
    }
}

impl Tool for ListViewsTool {
    type Input = ListViewsInput;

    fn name(&self) -> &str {
        "list_resource_explorer_views"
    }

    fn description(&self) -> &str {
        "List the ARNs of all Resource Explorer views in the current region. \
         Pass a view ARN to search_resources."
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        let explorer = self.resource_explorer.as_ref();
        let views = fetch_all(&listing_fn(move |token| explorer.list_views(token))).await?;
        Ok(ToolResult::json(views)?)
    }
}
