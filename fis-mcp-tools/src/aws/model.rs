//! Owned records mirroring the AWS response and request shapes.
//!
//! Field names serialize in AWS's camelCase so tool output reads like the
//! service's own API reference. The FIS building blocks ([`Target`],
//! [`Action`], [`StopCondition`], [`LogConfiguration`],
//! [`ExperimentOptions`], [`ReportConfiguration`]) double as tool input types.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Tags = BTreeMap<String, String>;

// ===== FIS building blocks =====

/// Condition that stops a running experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StopCondition {
    /// `none` or `aws:cloudwatch:alarm`
    pub source: String,
    /// CloudWatch alarm ARN when the source is an alarm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Narrows a target's resources by attribute path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetFilter {
    /// Attribute path, e.g. `Placement.AvailabilityZone`
    pub path: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Resources an action runs against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// e.g. `aws:ec2:instance`
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_arns: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_tags: Tags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<TargetFilter>,
    /// `ALL`, `COUNT(n)` or `PERCENT(n)`
    pub selection_mode: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: Tags,
}

/// A fault-injection action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// e.g. `aws:ec2:stop-instances`
    pub action_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: Tags,
    /// Target kind (e.g. `Instances`) to target name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: Tags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start_after: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudWatchLogsConfiguration {
    pub log_group_arn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct S3LogConfiguration {
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Where experiment activity is logged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_watch_logs_configuration: Option<CloudWatchLogsConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_configuration: Option<S3LogConfiguration>,
    /// Required when creating a template; currently 1 or 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_schema_version: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentOptions {
    /// `single-account` or `multi-account`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_targeting: Option<String>,
    /// `fail` or `skip`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_target_resolution_mode: Option<String>,
    /// Set on experiments only: `run-all` or `skip-all`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportS3Output {
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_configuration: Option<ReportS3Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudWatchDashboard {
    /// Dashboard ARN
    pub dashboard_identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDataSources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cloud_watch_dashboards: Vec<CloudWatchDashboard>,
}

/// Experiment report: where it is written and which dashboards it captures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<ReportOutputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sources: Option<ReportDataSources>,
    /// ISO 8601 duration captured before the experiment, e.g. `PT20M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_experiment_duration: Option<String>,
    /// ISO 8601 duration captured after the experiment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_experiment_duration: Option<String>,
}

// ===== FIS responses =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentState {
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentSummary {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub experiment_template_id: Option<String>,
    pub state: Option<ExperimentState>,
    pub creation_time: Option<String>,
    pub tags: Tags,
    pub experiment_options: Option<ExperimentOptions>,
}

/// An action as it ran within an experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentAction {
    #[serde(flatten)]
    pub action: Action,
    pub state: Option<ExperimentState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub experiment_template_id: Option<String>,
    pub role_arn: Option<String>,
    pub state: Option<ExperimentState>,
    pub targets: BTreeMap<String, Target>,
    pub actions: BTreeMap<String, ExperimentAction>,
    pub stop_conditions: Vec<StopCondition>,
    pub creation_time: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub tags: Tags,
    pub log_configuration: Option<LogConfiguration>,
    pub experiment_options: Option<ExperimentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_report_configuration: Option<ReportConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentTemplateSummary {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub description: Option<String>,
    pub creation_time: Option<String>,
    pub last_update_time: Option<String>,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentTemplate {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub description: Option<String>,
    pub targets: BTreeMap<String, Target>,
    pub actions: BTreeMap<String, Action>,
    pub stop_conditions: Vec<StopCondition>,
    pub creation_time: Option<String>,
    pub last_update_time: Option<String>,
    pub role_arn: Option<String>,
    pub tags: Tags,
    pub log_configuration: Option<LogConfiguration>,
    pub experiment_options: Option<ExperimentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_report_configuration: Option<ReportConfiguration>,
}

// ===== FIS requests =====

#[derive(Debug, Clone, PartialEq)]
pub struct StartExperimentRequest {
    pub template_id: String,
    pub actions_mode: String,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateExperimentTemplateRequest {
    pub client_token: String,
    pub description: String,
    pub role_arn: String,
    pub stop_conditions: Vec<StopCondition>,
    pub targets: BTreeMap<String, Target>,
    pub actions: BTreeMap<String, Action>,
    pub tags: Tags,
    pub log_configuration: Option<LogConfiguration>,
    pub experiment_options: Option<ExperimentOptions>,
    pub experiment_report_configuration: Option<ReportConfiguration>,
}

/// Only the members that are `Some` are sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExperimentTemplateRequest {
    pub id: String,
    pub description: Option<String>,
    pub stop_conditions: Option<Vec<StopCondition>>,
    pub targets: Option<BTreeMap<String, Target>>,
    pub actions: Option<BTreeMap<String, Action>>,
    pub role_arn: Option<String>,
    pub log_configuration: Option<LogConfiguration>,
    pub experiment_options: Option<ExperimentOptions>,
    pub experiment_report_configuration: Option<ReportConfiguration>,
}

// ===== CloudFormation =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSummary {
    pub stack_id: Option<String>,
    pub stack_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_description: Option<String>,
    pub stack_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_status_reason: Option<String>,
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackResourceSummary {
    pub logical_resource_id: Option<String>,
    pub physical_resource_id: Option<String>,
    pub resource_type: Option<String>,
    pub resource_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_status_reason: Option<String>,
    pub last_updated_timestamp: Option<String>,
}

// ===== Resource Explorer =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceProperty {
    pub name: Option<String>,
    pub last_reported_at: Option<String>,
    pub data: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerResource {
    pub arn: Option<String>,
    pub owning_account_id: Option<String>,
    pub region: Option<String>,
    pub resource_type: Option<String>,
    pub service: Option<String>,
    pub last_reported_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ResourceProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub view_arn: Option<String>,
    pub owner: Option<String>,
    pub scope: Option<String>,
    pub last_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query_string: String,
    pub view_arn: String,
    pub max_results: i32,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateViewRequest {
    pub client_token: String,
    pub view_name: String,
    pub filter_string: String,
    pub scope: Option<String>,
    pub tags: Tags,
}

// ===== AWS Config =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    pub relationship_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    pub configuration_item_capture_time: Option<String>,
    pub configuration_item_status: Option<String>,
    pub configuration_state_id: Option<String>,
    pub arn: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub aws_region: Option<String>,
    pub availability_zone: Option<String>,
    pub resource_creation_time: Option<String>,
    pub tags: Tags,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ChronologicalOrder {
    #[default]
    Reverse,
    Forward,
}

impl ChronologicalOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reverse => "Reverse",
            Self::Forward => "Forward",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigHistoryRequest {
    pub resource_type: String,
    pub resource_id: String,
    pub limit: i32,
    pub chronological_order: ChronologicalOrder,
}
