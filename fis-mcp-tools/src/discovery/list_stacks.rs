use std::sync::Arc;

use fis_mcp_core::{fetch_all, listing_fn};
use serde_json::json;

use crate::aws::CloudFormationApi;
use crate::prelude::*;

/// Input for listing stacks (no parameters)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListStacksInput {}

/// Tool listing every CloudFormation stack, including deleted ones
pub struct ListStacksTool {
    cloudformation: Arc<dyn CloudFormationApi>,
}

impl ListStacksTool {
    pub fn new(cloudformation: Arc<dyn CloudFormationApi>) -> Self {
        Self { cloudformation }
    }
}

impl Tool for ListStacksTool {
    type Input = ListStacksInput;

    fn name(&self) -> &str {
        "list_cfn_stacks"
    }

    fn description(&self) -> &str {
        "List all CloudFormation stacks in the current account and region with their status. \
         Use get_stack_resources to see what a stack deployed."
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        let cloudformation = self.cloudformation.as_ref();
        let stacks = fetch_all(&listing_fn(move |token| cloudformation.list_stacks(token))).await?;
        let stacks = serde_json::to_value(stacks)?;
        Ok(json!({ "stacks": stacks }).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{stack, unwrap_json, MockAws};
    use fis_mcp_core::{Page, ServiceError};

    #[test]
    fn test_tool_metadata() {
        let tool = ListStacksTool::new(MockAws::new().clients().cloudformation);
        assert_eq!(tool.name(), "list_cfn_stacks");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_empty_account() {
        let mock = MockAws::new();
        mock.cloudformation.list_stacks.push_ok(Page::last(vec![]));

        let tool = ListStacksTool::new(mock.clients().cloudformation);
        let result = unwrap_json(tool.execute(Default::default()).await.unwrap());

        assert_eq!(result, json!({"stacks": []}));
    }

    #[tokio::test]
    async fn test_follows_continuation_tokens() {
        let mock = MockAws::new();
        mock.cloudformation
            .list_stacks
            .push_ok(Page::new(vec![stack("network"), stack("web")], Some("t1".into())));
        mock.cloudformation
            .list_stacks
            .push_ok(Page::last(vec![stack("data")]));

        let tool = ListStacksTool::new(mock.clients().cloudformation);
        let result = unwrap_json(tool.execute(Default::default()).await.unwrap());

        let names: Vec<_> = result["stacks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["stackName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["network", "web", "data"]);
        assert_eq!(
            mock.cloudformation.list_stacks.calls(),
            vec![None, Some("t1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_page_error_discards_earlier_pages() {
        let mock = MockAws::new();
        mock.cloudformation
            .list_stacks
            .push_ok(Page::new(vec![stack("network")], Some("t1".into())));
        mock.cloudformation
            .list_stacks
            .push_err(ServiceError::Throttled("Rate exceeded".into()));

        let tool = ListStacksTool::new(mock.clients().cloudformation);
        let err = tool.execute(Default::default()).await.unwrap_err();

        assert!(matches!(err, ToolError::Service(ServiceError::Throttled(_))));
        assert_eq!(mock.cloudformation.list_stacks.call_count(), 2);
    }
}
