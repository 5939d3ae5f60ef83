use std::collections::BTreeMap;
use std::sync::Arc;

use fis_mcp_core::WriteAccess;
use serde_json::json;
use tracing::info;

use crate::aws::model::{
    Action, ExperimentOptions, LogConfiguration, ReportConfiguration, StopCondition, Target,
    UpdateExperimentTemplateRequest,
};
use crate::aws::FisApi;
use crate::prelude::*;
use crate::require_non_empty;

/// Input for updating an experiment template. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTemplateInput {
    /// ID of the experiment template to update
    pub id: String,

    /// Updated description
    #[serde(default)]
    pub description: Option<String>,

    /// Updated stop conditions, replacing the existing ones
    #[serde(default)]
    pub stop_conditions: Option<Vec<StopCondition>>,

    /// Updated targets, keyed by target name
    #[serde(default)]
    pub targets: Option<BTreeMap<String, Target>>,

    /// Updated actions, keyed by action name
    #[serde(default)]
    pub actions: Option<BTreeMap<String, Action>>,

    /// Updated IAM role ARN
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Updated logging configuration
    #[serde(default)]
    pub log_configuration: Option<LogConfiguration>,

    /// Updated experiment options
    #[serde(default)]
    pub experiment_options: Option<ExperimentOptions>,

    /// Updated experiment report configuration
    #[serde(default, alias = "report_configuration")]
    pub experiment_report_configuration: Option<ReportConfiguration>,
}

impl UpdateTemplateInput {
    fn has_changes(&self) -> bool {
        self.description.is_some()
            || self.stop_conditions.is_some()
            || self.targets.is_some()
            || self.actions.is_some()
            || self.role_arn.is_some()
            || self.log_configuration.is_some()
            || self.experiment_options.is_some()
            || self.experiment_report_configuration.is_some()
    }
}

impl From<UpdateTemplateInput> for UpdateExperimentTemplateRequest {
    fn from(input: UpdateTemplateInput) -> Self {
        Self {
            id: input.id,
            description: input.description,
            stop_conditions: input.stop_conditions,
            targets: input.targets,
            actions: input.actions,
            role_arn: input.role_arn,
            log_configuration: input.log_configuration,
            experiment_options: input.experiment_options,
            experiment_report_configuration: input.experiment_report_configuration,
        }
    }
}

pub struct UpdateTemplateTool {
    fis: Arc<dyn FisApi>,
    access: WriteAccess,
}

impl UpdateTemplateTool {
    pub fn new(fis: Arc<dyn FisApi>, access: WriteAccess) -> Self {
        Self { fis, access }
    }
}

impl Tool for UpdateTemplateTool {
    type Input = UpdateTemplateInput;

    fn name(&self) -> &str {
        "update_experiment_template"
    }

    fn description(&self) -> &str {
        "Update an existing AWS FIS experiment template. Only the fields provided are changed. \
         Requires the server to run with --allow-writes."
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        self.access.require("update experiment templates")?;
        require_non_empty("id", &input.id)?;
        if !input.has_changes() {
            return Err(ToolError::invalid_input(
                "no fields to update; provide at least one field besides id",
            ));
        }

        let id = input.id.clone();
        let template = self.fis.update_experiment_template(input.into()).await?;
        info!(template_id = %id, "updated experiment template");

        let template = serde_json::to_value(template)?;
        Ok(json!({ "experimentTemplate": template }).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{template, unwrap_json, MockAws};

    #[test]
    fn test_tool_metadata() {
        let tool = UpdateTemplateTool::new(MockAws::new().clients().fis, WriteAccess::Disabled);
        assert_eq!(tool.name(), "update_experiment_template");
        assert!(!tool.description().is_empty());
        assert!(tool.is_mutating());
    }

    #[tokio::test]
    async fn test_refused_when_writes_disabled() {
        let mock = MockAws::new();
        let tool = UpdateTemplateTool::new(mock.clients().fis, WriteAccess::Disabled);
        let input =
            serde_json::from_value(json!({"id": "EXT1", "description": "new"})).unwrap();

        let err = tool.execute(input).await.unwrap_err();

        assert!(err.is_write_disabled());
        assert_eq!(mock.fis.mutating_calls(), 0);
    }

    #[tokio::test]
    async fn test_forwards_only_provided_fields() {
        let mock = MockAws::new();
        mock.fis
            .update_experiment_template
            .push_ok(template("EXT1", "new description"));
        let tool = UpdateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);
        let input = serde_json::from_value(json!({
            "id": "EXT1",
            "description": "new description",
            "stop_conditions": []
        }))
        .unwrap();

        let result = unwrap_json(tool.execute(input).await.unwrap());

        let calls = mock.fis.update_experiment_template.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "EXT1");
        assert_eq!(calls[0].description.as_deref(), Some("new description"));
        assert_eq!(calls[0].stop_conditions, Some(vec![]));
        assert!(calls[0].targets.is_none());
        assert!(calls[0].actions.is_none());
        assert!(calls[0].role_arn.is_none());
        assert_eq!(
            result["experimentTemplate"]["description"],
            "new description"
        );
    }

    #[tokio::test]
    async fn test_rejects_update_without_changes() {
        let mock = MockAws::new();
        let tool = UpdateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);
        let input = serde_json::from_value(json!({"id": "EXT1"})).unwrap();

        let err = tool.execute(input).await.unwrap_err();

        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert_eq!(mock.fis.mutating_calls(), 0);
    }

    #[tokio::test]
    async fn test_report_configuration_alone_is_an_update() {
        let mock = MockAws::new();
        mock.fis
            .update_experiment_template
            .push_ok(template("EXT1", "unchanged"));
        let tool = UpdateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);
        let input = serde_json::from_value(json!({
            "id": "EXT1",
            "experiment_report_configuration": {
                "outputs": {"s3Configuration": {"bucketName": "new-bucket"}}
            }
        }))
        .unwrap();

        tool.execute(input).await.unwrap();

        let calls = mock.fis.update_experiment_template.calls();
        assert_eq!(calls.len(), 1);
        let bucket = calls[0]
            .experiment_report_configuration
            .as_ref()
            .and_then(|r| r.outputs.as_ref())
            .and_then(|o| o.s3_configuration.as_ref())
            .map(|c| c.bucket_name.as_str());
        assert_eq!(bucket, Some("new-bucket"));
        assert!(calls[0].description.is_none());
    }
}
