use std::collections::BTreeMap;
use std::sync::Arc;

use fis_mcp_core::WriteAccess;
use serde_json::json;
use tracing::info;

use crate::aws::model::{
    Action, CreateExperimentTemplateRequest, ExperimentOptions, LogConfiguration,
    ReportConfiguration, StopCondition, Tags, Target,
};
use crate::aws::FisApi;
use crate::prelude::*;
use crate::{named_tags, require_non_empty};

/// Input for creating an experiment template
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTemplateInput {
    /// Idempotency token; retries with the same token create one template
    #[serde(alias = "clientToken")]
    pub client_token: String,

    /// Description of the experiment template
    pub description: String,

    /// IAM role ARN that FIS assumes to run the experiment
    pub role_arn: String,

    /// Name for the template, applied as its Name tag
    pub name: String,

    /// Additional tags to apply to the template
    #[serde(default)]
    pub tags: Option<Tags>,

    /// Conditions that stop the experiment, e.g. a CloudWatch alarm
    #[serde(default)]
    pub stop_conditions: Option<Vec<StopCondition>>,

    /// Target resources, keyed by target name
    #[serde(default)]
    pub targets: Option<BTreeMap<String, Target>>,

    /// Actions to perform, keyed by action name
    #[serde(default)]
    pub actions: Option<BTreeMap<String, Action>>,

    /// Where to log experiment activity
    #[serde(default)]
    pub log_configuration: Option<LogConfiguration>,

    /// Account targeting and empty-target resolution
    #[serde(default)]
    pub experiment_options: Option<ExperimentOptions>,

    /// Experiment report: S3 output, CloudWatch dashboards and capture windows
    #[serde(default, alias = "experiment_report_configuration")]
    pub report_configuration: Option<ReportConfiguration>,
}

/// Tool creating a new experiment template
pub struct CreateTemplateTool {
    fis: Arc<dyn FisApi>,
    access: WriteAccess,
}

impl CreateTemplateTool {
    pub fn new(fis: Arc<dyn FisApi>, access: WriteAccess) -> Self {
        Self { fis, access }
    }
}

impl Tool for CreateTemplateTool {
    type Input = CreateTemplateInput;

    fn name(&self) -> &str {
        "create_experiment_template"
    }

    fn description(&self) -> &str {
        "Create an AWS FIS experiment template defining targets, actions and stop conditions. \
         Requires the server to run with --allow-writes. Read the fis://templates/example \
         resource for a working template."
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        self.access.require("create experiment templates")?;
        require_non_empty("client_token", &input.client_token)?;
        require_non_empty("name", &input.name)?;

        let request = CreateExperimentTemplateRequest {
            client_token: input.client_token,
            description: input.description,
            role_arn: input.role_arn,
            stop_conditions: input.stop_conditions.unwrap_or_default(),
            targets: input.targets.unwrap_or_default(),
            actions: input.actions.unwrap_or_default(),
            tags: named_tags(&input.name, input.tags),
            log_configuration: input.log_configuration,
            experiment_options: input.experiment_options,
            experiment_report_configuration: input.report_configuration,
        };
        let template = self.fis.create_experiment_template(request).await?;
        info!(
            template_id = template.id.as_deref().unwrap_or("unknown"),
            name = %input.name,
            "created experiment template"
        );

        let template = serde_json::to_value(template)?;
        Ok(json!({ "experimentTemplate": template }).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{template, unwrap_json, MockAws};
    use pretty_assertions::assert_eq;

    fn minimal_args() -> Value {
        json!({
            "client_token": "tok-1",
            "description": "stop instances",
            "role_arn": "arn:aws:iam::111122223333:role/fis-role",
            "name": "stop-ec2",
        })
    }

    #[test]
    fn test_tool_metadata() {
        let tool = CreateTemplateTool::new(MockAws::new().clients().fis, WriteAccess::Disabled);
        assert_eq!(tool.name(), "create_experiment_template");
        assert!(!tool.description().is_empty());
        assert!(tool.is_mutating());
    }

    #[test]
    fn test_accepts_camel_case_client_token() {
        let mut args = minimal_args();
        let token = args.as_object_mut().unwrap().remove("client_token").unwrap();
        args["clientToken"] = token;

        let input: CreateTemplateInput = serde_json::from_value(args).unwrap();
        assert_eq!(input.client_token, "tok-1");
    }

    #[tokio::test]
    async fn test_refused_when_writes_disabled() {
        let mock = MockAws::new();
        let tool = CreateTemplateTool::new(mock.clients().fis, WriteAccess::Disabled);
        let input = serde_json::from_value(minimal_args()).unwrap();

        let err = tool.execute(input).await.unwrap_err();

        assert!(err.is_write_disabled());
        assert_eq!(mock.fis.mutating_calls(), 0);
    }

    #[tokio::test]
    async fn test_absent_collections_default_to_empty() {
        let mock = MockAws::new();
        mock.fis
            .create_experiment_template
            .push_ok(template("EXT9", "stop instances"));
        let tool = CreateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);
        let input = serde_json::from_value(minimal_args()).unwrap();

        let result = unwrap_json(tool.execute(input).await.unwrap());

        let calls = mock.fis.create_experiment_template.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].stop_conditions.is_empty());
        assert!(calls[0].targets.is_empty());
        assert!(calls[0].actions.is_empty());
        assert_eq!(calls[0].tags["Name"], "stop-ec2");
        assert_eq!(calls[0].client_token, "tok-1");
        assert_eq!(result["experimentTemplate"]["id"], "EXT9");
    }

    #[tokio::test]
    async fn test_forwards_targets_and_actions() {
        let mock = MockAws::new();
        mock.fis
            .create_experiment_template
            .push_ok(template("EXT9", "stop instances"));
        let tool = CreateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);

        let mut args = minimal_args();
        args["stop_conditions"] = json!([{"source": "none"}]);
        args["targets"] = json!({
            "myInstances": {
                "resourceType": "aws:ec2:instance",
                "resourceTags": {"env": "prod"},
                "selectionMode": "COUNT(1)"
            }
        });
        args["actions"] = json!({
            "StopInstances": {
                "actionId": "aws:ec2:stop-instances",
                "parameters": {"startInstancesAfterDuration": "PT2M"},
                "targets": {"Instances": "myInstances"}
            }
        });
        args["log_configuration"] = json!({
            "cloudWatchLogsConfiguration": {"logGroupArn": "arn:aws:logs:us-east-1:111122223333:log-group:fis:*"},
            "logSchemaVersion": 2
        });
        let input = serde_json::from_value(args).unwrap();

        tool.execute(input).await.unwrap();

        let request = &mock.fis.create_experiment_template.calls()[0];
        assert_eq!(request.stop_conditions[0].source, "none");
        let target = &request.targets["myInstances"];
        assert_eq!(target.resource_type, "aws:ec2:instance");
        assert_eq!(target.resource_tags["env"], "prod");
        assert_eq!(target.selection_mode, "COUNT(1)");
        let action = &request.actions["StopInstances"];
        assert_eq!(action.targets["Instances"], "myInstances");
        assert_eq!(
            request
                .log_configuration
                .as_ref()
                .and_then(|l| l.log_schema_version),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_forwards_report_configuration() {
        let mock = MockAws::new();
        mock.fis
            .create_experiment_template
            .push_ok(template("EXT9", "stop instances"));
        let tool = CreateTemplateTool::new(mock.clients().fis, WriteAccess::Enabled);

        let mut args = minimal_args();
        args["report_configuration"] = json!({
            "outputs": {"s3Configuration": {"bucketName": "reports", "prefix": "fis/"}},
            "dataSources": {
                "cloudWatchDashboards": [
                    {"dashboardIdentifier": "arn:aws:cloudwatch::111122223333:dashboard/app"}
                ]
            },
            "preExperimentDuration": "PT20M"
        });
        let input = serde_json::from_value(args).unwrap();

        tool.execute(input).await.unwrap();

        let request = &mock.fis.create_experiment_template.calls()[0];
        let report = request.experiment_report_configuration.as_ref().unwrap();
        let s3 = report
            .outputs
            .as_ref()
            .and_then(|o| o.s3_configuration.as_ref())
            .unwrap();
        assert_eq!(s3.bucket_name, "reports");
        assert_eq!(s3.prefix.as_deref(), Some("fis/"));
        let dashboards = &report.data_sources.as_ref().unwrap().cloud_watch_dashboards;
        assert_eq!(
            dashboards[0].dashboard_identifier,
            "arn:aws:cloudwatch::111122223333:dashboard/app"
        );
        assert_eq!(report.pre_experiment_duration.as_deref(), Some("PT20M"));
        assert!(report.post_experiment_duration.is_none());
    }
}
