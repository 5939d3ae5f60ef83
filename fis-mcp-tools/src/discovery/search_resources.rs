use std::sync::Arc;

use serde_json::{json, Map};
use tracing::debug;

use crate::aws::model::SearchRequest;
use crate::aws::ResourceExplorerApi;
use crate::prelude::*;
use crate::require_non_empty;

const DEFAULT_MAX_RESULTS: i32 = 100;
const MAX_RESULTS_LIMIT: i32 = 1000;

fn default_max_results() -> i32 {
    DEFAULT_MAX_RESULTS
}

/// Input for a Resource Explorer search
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchResourcesInput {
    /// Resource Explorer query, e.g. `resourcetype:ec2:instance tag:env=prod`
    pub query_string: String,

    /// ARN of the view to search through
    pub view_arn: String,

    /// Maximum number of results to return (1-1000, default 100)
    #[serde(default = "default_max_results")]
    pub max_results: i32,

    /// Token from a previous search to fetch the next page
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Tool running one page of a Resource Explorer search.
///
/// Unlike the listing tools this returns a single page and hands the
/// continuation token back to the caller.
pub struct SearchResourcesTool {
    resource_explorer: Arc<dyn ResourceExplorerApi>,
}

impl SearchResourcesTool {
    pub fn new(resource_explorer: Arc<dyn ResourceExplorerApi>) -> Self {
        Self { resource_explorer }
    }
}

impl Tool for SearchResourcesTool {
    type Input = SearchResourcesInput;

    fn name(&self) -> &str {
        "search_resources"
    }

    fn description(&self) -> &str {
        "Search for AWS resources with Resource Explorer using a query string and view ARN. \
         Returns one page of results; pass next_token back to continue."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        require_non_empty("view_arn", &input.view_arn)?;
        if !(1..=MAX_RESULTS_LIMIT).contains(&input.max_results) {
            return Err(ToolError::invalid_input(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT, input.max_results
            )));
        }

        let page = self
            .resource_explorer
            .search(SearchRequest {
                query_string: input.query_string.clone(),
                view_arn: input.view_arn.clone(),
                max_results: input.max_results,
                next_token: input.next_token.filter(|t| !t.is_empty()),
            })
            .await?;
        debug!(count = page.items.len(), query = %input.query_string, "resource search complete");

        let next_token = page.continuation().map(str::to_owned);
        let mut result = Map::new();
        result.insert("count".into(), json!(page.items.len()));
        result.insert("resources".into(), serde_json::to_value(page.items)?);
        result.insert("query_string".into(), json!(input.query_string));
        result.insert("view_arn".into(), json!(input.view_arn));
        if let Some(token) = next_token {
            result.insert("next_token".into(), json!(token));
        }

        Ok(Value::Object(result).into())
    }
}
