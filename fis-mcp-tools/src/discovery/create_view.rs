use std::sync::Arc;

use chrono::Utc;
use fis_mcp_core::WriteAccess;
use serde_json::json;
use tracing::info;

use crate::aws::model::{CreateViewRequest, Tags};
use crate::aws::ResourceExplorerApi;
use crate::prelude::*;
use crate::{named_tags, require_non_empty};

/// Input for creating a Resource Explorer view
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateViewInput {
    /// Filter string restricting the resources the view includes
    pub query: String,

    /// Name of the view (letters, digits and hyphens)
    pub view_name: String,

    /// Name applied as the view's Name tag
    pub name: String,

    /// Additional tags to apply to the view
    #[serde(default)]
    pub tags: Option<Tags>,

    /// ARN of the account or organization the view covers
    #[serde(default)]
    pub scope: Option<String>,

    /// Idempotency token; generated from the current time when omitted
    #[serde(default)]
    pub client_token: Option<String>,
}

pub struct CreateViewTool {
    resource_explorer: Arc<dyn ResourceExplorerApi>,
    access: WriteAccess,
}

impl CreateViewTool {
    pub fn new(resource_explorer: Arc<dyn ResourceExplorerApi>, access: WriteAccess) -> Self {
        Self {
            resource_explorer,
            access,
        }
    }
}

fn generated_client_token() -> String {
    format!("create-view-{}", Utc::now().timestamp())
}

impl Tool for CreateViewTool {
    type Input = CreateViewInput;

    fn name(&self) -> &str {
        "create_resource_explorer_view"
    }

    fn description(&self) -> &str {
        "Create a Resource Explorer view that filters resources for experiment targeting. \
         Requires the server to run with --allow-writes."
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        self.access.require("create Resource Explorer views")?;
        require_non_empty("view_name", &input.view_name)?;
        require_non_empty("name", &input.name)?;

        let client_token = input
            .client_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(generated_client_token);

        let view = self
            .resource_explorer
            .create_view(CreateViewRequest {
                client_token,
                view_name: input.view_name.clone(),
                filter_string: input.query,
                scope: input.scope,
                tags: named_tags(&input.name, input.tags),
            })
            .await?;
        info!(view_name = %input.view_name, name = %input.name, "created Resource Explorer view");

        let view = serde_json::to_value(view)?;
        Ok(json!({ "view": view }).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::model::View;
    use crate::test_utils::{unwrap_json, MockAws};

    fn args() -> Value {
        json!({
            "query": "resourcetype:ec2:instance",
            "view_name": "ec2-instances",
            "name": "EC2 instances"
        })
    }

    #[test]
    fn test_tool_metadata() {
        let tool =
            CreateViewTool::new(MockAws::new().clients().resource_explorer, WriteAccess::Disabled);
        assert_eq!(tool.name(), "create_resource_explorer_view");
        assert!(!tool.description().is_empty());
        assert!(tool.is_mutating());
    }

    #[tokio::test]
    async fn test_refused_when_writes_disabled() {
        let mock = MockAws::new();
        let tool = CreateViewTool::new(mock.clients().resource_explorer, WriteAccess::Disabled);

        let err = tool
            .execute(serde_json::from_value(args()).unwrap())
            .await
            .unwrap_err();

        assert!(err.is_write_disabled());
        assert_eq!(mock.resource_explorer.create_view.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generates_client_token() {
        let mock = MockAws::new();
        mock.resource_explorer.create_view.push_ok(View {
            view_arn: Some(
                "arn:aws:resource-explorer-2:us-east-1:111122223333:view/ec2-instances/1".into(),
            ),
            filter_string: Some("resourcetype:ec2:instance".into()),
            ..Default::default()
        });
        let tool = CreateViewTool::new(mock.clients().resource_explorer, WriteAccess::Enabled);

        let result = unwrap_json(
            tool.execute(serde_json::from_value(args()).unwrap())
                .await
                .unwrap(),
        );

        let calls = mock.resource_explorer.create_view.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].client_token.starts_with("create-view-"));
        assert_eq!(calls[0].filter_string, "resourcetype:ec2:instance");
        assert_eq!(calls[0].view_name, "ec2-instances");
        assert_eq!(calls[0].tags["Name"], "EC2 instances");
        assert!(calls[0].scope.is_none());
        assert_eq!(
            result["view"]["viewArn"],
            "arn:aws:resource-explorer-2:us-east-1:111122223333:view/ec2-instances/1"
        );
    }

    #[tokio::test]
    async fn test_uses_given_client_token() {
        let mock = MockAws::new();
        mock.resource_explorer.create_view.push_ok(View::default());
        let tool = CreateViewTool::new(mock.clients().resource_explorer, WriteAccess::Enabled);

        let mut args = args();
        args["client_token"] = json!("tok-42");
        args["scope"] = json!("arn:aws:iam::111122223333:root");
        tool.execute(serde_json::from_value(args).unwrap())
            .await
            .unwrap();

        let request = &mock.resource_explorer.create_view.calls()[0];
        assert_eq!(request.client_token, "tok-42");
        assert_eq!(
            request.scope.as_deref(),
            Some("arn:aws:iam::111122223333:root")
        );
    }
}
