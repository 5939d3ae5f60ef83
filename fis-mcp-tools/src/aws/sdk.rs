//! AWS SDK implementations of the service capabilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_cloudformation as cfn;
use aws_sdk_config as configservice;
use aws_sdk_fis as fis;
use aws_sdk_resourceexplorer2 as rex;
use aws_types::SdkConfig;
use fis_mcp_core::{Page, ServiceError};
use fis::types as ft;
use tracing::debug;

use super::client::*;
use super::convert::{document_to_json, string_map, to_hash_map, StrField, TimeField};
use super::error::{build_error, classify_aws_error};
use super::model::*;

fn missing(member: &str) -> ServiceError {
    ServiceError::Other(format!("response did not include {}", member))
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn non_empty_map(map: &Tags) -> Option<HashMap<String, String>> {
    (!map.is_empty()).then(|| to_hash_map(map))
}

impl AwsClients {
    /// Build SDK-backed clients from one shared configuration
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self {
            fis: Arc::new(SdkFisClient::new(config)),
            cloudformation: Arc::new(SdkCloudFormationClient::new(config)),
            resource_explorer: Arc::new(SdkResourceExplorerClient::new(config)),
            config: Arc::new(SdkConfigClient::new(config)),
        }
    }
}

// ============================================================================
// FIS
// ============================================================================

pub struct SdkFisClient {
    client: fis::Client,
}

impl SdkFisClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: fis::Client::new(config),
        }
    }
}

fn experiment_state(state: &ft::ExperimentState) -> ExperimentState {
    ExperimentState {
        status: state.status().owned(),
        reason: state.reason().owned(),
    }
}

fn action_state(state: &ft::ExperimentActionState) -> ExperimentState {
    ExperimentState {
        status: state.status().owned(),
        reason: state.reason().owned(),
    }
}

fn experiment_options(options: &ft::ExperimentOptions) -> ExperimentOptions {
    ExperimentOptions {
        account_targeting: options.account_targeting().owned(),
        empty_target_resolution_mode: options.empty_target_resolution_mode().owned(),
        actions_mode: options.actions_mode().owned(),
    }
}

fn template_options(options: &ft::ExperimentTemplateExperimentOptions) -> ExperimentOptions {
    ExperimentOptions {
        account_targeting: options.account_targeting().owned(),
        empty_target_resolution_mode: options.empty_target_resolution_mode().owned(),
        actions_mode: None,
    }
}

fn experiment_target(target: &ft::ExperimentTarget) -> Target {
    Target {
        resource_type: target.resource_type().owned().unwrap_or_default(),
        resource_arns: target.resource_arns().to_vec(),
        resource_tags: string_map(target.resource_tags()),
        filters: target
            .filters()
            .iter()
            .map(|f| TargetFilter {
                path: f.path().owned().unwrap_or_default(),
                values: f.values().to_vec(),
            })
            .collect(),
        selection_mode: target.selection_mode().owned().unwrap_or_default(),
        parameters: string_map(target.parameters()),
    }
}

fn template_target(target: &ft::ExperimentTemplateTarget) -> Target {
    Target {
        resource_type: target.resource_type().owned().unwrap_or_default(),
        resource_arns: target.resource_arns().to_vec(),
        resource_tags: string_map(target.resource_tags()),
        filters: target
            .filters()
            .iter()
            .map(|f| TargetFilter {
                path: f.path().owned().unwrap_or_default(),
                values: f.values().to_vec(),
            })
            .collect(),
        selection_mode: target.selection_mode().owned().unwrap_or_default(),
        parameters: string_map(target.parameters()),
    }
}

fn experiment_action(action: &ft::ExperimentAction) -> ExperimentAction {
    ExperimentAction {
        action: Action {
            action_id: action.action_id().owned().unwrap_or_default(),
            description: action.description().owned(),
            parameters: string_map(action.parameters()),
            targets: string_map(action.targets()),
            start_after: action.start_after().to_vec(),
        },
        state: action.state().map(action_state),
        start_time: action.start_time().rfc3339(),
        end_time: action.end_time().rfc3339(),
    }
}

fn template_action(action: &ft::ExperimentTemplateAction) -> Action {
    Action {
        action_id: action.action_id().owned().unwrap_or_default(),
        description: action.description().owned(),
        parameters: string_map(action.parameters()),
        targets: string_map(action.targets()),
        start_after: action.start_after().to_vec(),
    }
}

fn experiment_log_configuration(log: &ft::ExperimentLogConfiguration) -> LogConfiguration {
    LogConfiguration {
        cloud_watch_logs_configuration: log.cloud_watch_logs_configuration().map(|c| {
            CloudWatchLogsConfiguration {
                log_group_arn: c.log_group_arn().owned().unwrap_or_default(),
            }
        }),
        s3_configuration: log.s3_configuration().map(|c| S3LogConfiguration {
            bucket_name: c.bucket_name().owned().unwrap_or_default(),
            prefix: c.prefix().owned(),
        }),
        log_schema_version: log.log_schema_version(),
    }
}

fn template_log_configuration(log: &ft::ExperimentTemplateLogConfiguration) -> LogConfiguration {
    LogConfiguration {
        cloud_watch_logs_configuration: log.cloud_watch_logs_configuration().map(|c| {
            CloudWatchLogsConfiguration {
                log_group_arn: c.log_group_arn().owned().unwrap_or_default(),
            }
        }),
        s3_configuration: log.s3_configuration().map(|c| S3LogConfiguration {
            bucket_name: c.bucket_name().owned().unwrap_or_default(),
            prefix: c.prefix().owned(),
        }),
        log_schema_version: log.log_schema_version(),
    }
}

fn experiment_report_configuration(
    report: &ft::ExperimentReportConfiguration,
) -> ReportConfiguration {
    ReportConfiguration {
        outputs: report.outputs().map(|o| ReportOutputs {
            s3_configuration: o.s3_configuration().map(|c| ReportS3Output {
                bucket_name: c.bucket_name().owned().unwrap_or_default(),
                prefix: c.prefix().owned(),
            }),
        }),
        data_sources: report.data_sources().map(|d| ReportDataSources {
            cloud_watch_dashboards: d
                .cloud_watch_dashboards()
                .iter()
                .map(|dashboard| CloudWatchDashboard {
                    dashboard_identifier: dashboard
                        .dashboard_identifier()
                        .owned()
                        .unwrap_or_default(),
                })
                .collect(),
        }),
        pre_experiment_duration: report.pre_experiment_duration().owned(),
        post_experiment_duration: report.post_experiment_duration().owned(),
    }
}

fn template_report_configuration(
    report: &ft::ExperimentTemplateReportConfiguration,
) -> ReportConfiguration {
    ReportConfiguration {
        outputs: report.outputs().map(|o| ReportOutputs {
            s3_configuration: o.s3_configuration().map(|c| ReportS3Output {
                bucket_name: c.bucket_name().owned().unwrap_or_default(),
                prefix: c.prefix().owned(),
            }),
        }),
        data_sources: report.data_sources().map(|d| ReportDataSources {
            cloud_watch_dashboards: d
                .cloud_watch_dashboards()
                .iter()
                .map(|dashboard| CloudWatchDashboard {
                    dashboard_identifier: dashboard
                        .dashboard_identifier()
                        .owned()
                        .unwrap_or_default(),
                })
                .collect(),
        }),
        pre_experiment_duration: report.pre_experiment_duration().owned(),
        post_experiment_duration: report.post_experiment_duration().owned(),
    }
}

fn report_outputs_input(
    report: &ReportConfiguration,
) -> Option<ft::ExperimentTemplateReportConfigurationOutputsInput> {
    report.outputs.as_ref().map(|o| {
        ft::ExperimentTemplateReportConfigurationOutputsInput::builder()
            .set_s3_configuration(o.s3_configuration.as_ref().map(|c| {
                ft::ReportConfigurationS3OutputInput::builder()
                    .bucket_name(&c.bucket_name)
                    .set_prefix(c.prefix.clone())
                    .build()
            }))
            .build()
    })
}

fn report_data_sources_input(
    report: &ReportConfiguration,
) -> Option<ft::ExperimentTemplateReportConfigurationDataSourcesInput> {
    report.data_sources.as_ref().map(|d| {
        let dashboards = d
            .cloud_watch_dashboards
            .iter()
            .map(|dashboard| {
                ft::ReportConfigurationCloudWatchDashboardInput::builder()
                    .dashboard_identifier(&dashboard.dashboard_identifier)
                    .build()
            })
            .collect();
        ft::ExperimentTemplateReportConfigurationDataSourcesInput::builder()
            .set_cloud_watch_dashboards(non_empty(dashboards))
            .build()
    })
}

fn experiment_summary(summary: &ft::ExperimentSummary) -> ExperimentSummary {
    ExperimentSummary {
        id: summary.id().owned(),
        arn: summary.arn().owned(),
        experiment_template_id: summary.experiment_template_id().owned(),
        state: summary.state().map(experiment_state),
        creation_time: summary.creation_time().rfc3339(),
        tags: string_map(summary.tags()),
        experiment_options: summary.experiment_options().map(experiment_options),
    }
}

fn to_experiment(experiment: &ft::Experiment) -> Experiment {
    Experiment {
        id: experiment.id().owned(),
        arn: experiment.arn().owned(),
        experiment_template_id: experiment.experiment_template_id().owned(),
        role_arn: experiment.role_arn().owned(),
        state: experiment.state().map(experiment_state),
        targets: experiment
            .targets()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), experiment_target(v)))
                    .collect()
            })
            .unwrap_or_default(),
        actions: experiment
            .actions()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), experiment_action(v)))
                    .collect()
            })
            .unwrap_or_default(),
        stop_conditions: experiment
            .stop_conditions()
            .iter()
            .map(|c| StopCondition {
                source: c.source().owned().unwrap_or_default(),
                value: c.value().owned(),
            })
            .collect(),
        creation_time: experiment.creation_time().rfc3339(),
        start_time: experiment.start_time().rfc3339(),
        end_time: experiment.end_time().rfc3339(),
        tags: string_map(experiment.tags()),
        log_configuration: experiment
            .log_configuration()
            .map(experiment_log_configuration),
        experiment_options: experiment.experiment_options().map(experiment_options),
        experiment_report_configuration: experiment
            .experiment_report_configuration()
            .map(experiment_report_configuration),
    }
}

fn template_summary(summary: &ft::ExperimentTemplateSummary) -> ExperimentTemplateSummary {
    ExperimentTemplateSummary {
        id: summary.id().owned(),
        arn: summary.arn().owned(),
        description: summary.description().owned(),
        creation_time: summary.creation_time().rfc3339(),
        last_update_time: summary.last_update_time().rfc3339(),
        tags: string_map(summary.tags()),
    }
}

fn to_template(template: &ft::ExperimentTemplate) -> ExperimentTemplate {
    ExperimentTemplate {
        id: template.id().owned(),
        arn: template.arn().owned(),
        description: template.description().owned(),
        targets: template
            .targets()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), template_target(v)))
                    .collect()
            })
            .unwrap_or_default(),
        actions: template
            .actions()
            .map(|m| {
                m.iter()
                    .map(|(k, v)| (k.clone(), template_action(v)))
                    .collect()
            })
            .unwrap_or_default(),
        stop_conditions: template
            .stop_conditions()
            .iter()
            .map(|c| StopCondition {
                source: c.source().owned().unwrap_or_default(),
                value: c.value().owned(),
            })
            .collect(),
        creation_time: template.creation_time().rfc3339(),
        last_update_time: template.last_update_time().rfc3339(),
        role_arn: template.role_arn().owned(),
        tags: string_map(template.tags()),
        log_configuration: template.log_configuration().map(template_log_configuration),
        experiment_options: template.experiment_options().map(template_options),
        experiment_report_configuration: template
            .experiment_report_configuration()
            .map(template_report_configuration),
    }
}

fn create_target_input(
    target: &Target,
) -> Result<ft::CreateExperimentTemplateTargetInput, ServiceError> {
    let filters = target
        .filters
        .iter()
        .map(|f| {
            ft::ExperimentTemplateTargetInputFilter::builder()
                .path(&f.path)
                .set_values(Some(f.values.clone()))
                .build()
                .map_err(build_error)
        })
        .collect::<Result<Vec<_>, _>>()?;

    ft::CreateExperimentTemplateTargetInput::builder()
        .resource_type(&target.resource_type)
        .set_resource_arns(non_empty(target.resource_arns.clone()))
        .set_resource_tags(non_empty_map(&target.resource_tags))
        .set_filters(non_empty(filters))
        .selection_mode(&target.selection_mode)
        .set_parameters(non_empty_map(&target.parameters))
        .build()
        .map_err(build_error)
}

fn update_target_input(
    target: &Target,
) -> Result<ft::UpdateExperimentTemplateTargetInput, ServiceError> {
    let filters = target
        .filters
        .iter()
        .map(|f| {
            ft::ExperimentTemplateTargetInputFilter::builder()
                .path(&f.path)
                .set_values(Some(f.values.clone()))
                .build()
                .map_err(build_error)
        })
        .collect::<Result<Vec<_>, _>>()?;

    ft::UpdateExperimentTemplateTargetInput::builder()
        .resource_type(&target.resource_type)
        .set_resource_arns(non_empty(target.resource_arns.clone()))
        .set_resource_tags(non_empty_map(&target.resource_tags))
        .set_filters(non_empty(filters))
        .selection_mode(&target.selection_mode)
        .set_parameters(non_empty_map(&target.parameters))
        .build()
        .map_err(build_error)
}

fn cloud_watch_log_input(
    log: &LogConfiguration,
) -> Result<Option<ft::ExperimentTemplateCloudWatchLogsLogConfigurationInput>, ServiceError> {
    log.cloud_watch_logs_configuration
        .as_ref()
        .map(|c| {
            ft::ExperimentTemplateCloudWatchLogsLogConfigurationInput::builder()
                .log_group_arn(&c.log_group_arn)
                .build()
                .map_err(build_error)
        })
        .transpose()
}

fn s3_log_input(
    log: &LogConfiguration,
) -> Result<Option<ft::ExperimentTemplateS3LogConfigurationInput>, ServiceError> {
    log.s3_configuration
        .as_ref()
        .map(|c| {
            ft::ExperimentTemplateS3LogConfigurationInput::builder()
                .bucket_name(&c.bucket_name)
                .set_prefix(c.prefix.clone())
                .build()
                .map_err(build_error)
        })
        .transpose()
}

#[async_trait]
impl FisApi for SdkFisClient {
    async fn list_experiments(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentSummary>, ServiceError> {
        let output = self
            .client
            .list_experiments()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output.experiments().iter().map(experiment_summary).collect(),
            output.next_token().owned(),
        ))
    }

    async fn get_experiment(&self, id: &str) -> Result<Experiment, ServiceError> {
        let output = self
            .client
            .get_experiment()
            .id(id)
            .send()
            .await
            .map_err(classify_aws_error)?;

        output
            .experiment()
            .map(to_experiment)
            .ok_or_else(|| missing("an experiment"))
    }

    async fn list_experiment_templates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentTemplateSummary>, ServiceError> {
        let output = self
            .client
            .list_experiment_templates()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output
                .experiment_templates()
                .iter()
                .map(template_summary)
                .collect(),
            output.next_token().owned(),
        ))
    }

    async fn get_experiment_template(&self, id: &str) -> Result<ExperimentTemplate, ServiceError> {
        let output = self
            .client
            .get_experiment_template()
            .id(id)
            .send()
            .await
            .map_err(classify_aws_error)?;

        output
            .experiment_template()
            .map(to_template)
            .ok_or_else(|| missing("an experiment template"))
    }

    async fn start_experiment(
        &self,
        request: StartExperimentRequest,
    ) -> Result<Experiment, ServiceError> {
        debug!(template_id = %request.template_id, "starting FIS experiment");
        let options = ft::StartExperimentExperimentOptionsInput::builder()
            .actions_mode(ft::ActionsMode::from(request.actions_mode.as_str()))
            .build();

        let output = self
            .client
            .start_experiment()
            .experiment_template_id(request.template_id)
            .experiment_options(options)
            .set_tags(Some(to_hash_map(&request.tags)))
            .send()
            .await
            .map_err(classify_aws_error)?;

        output
            .experiment()
            .map(to_experiment)
            .ok_or_else(|| missing("an experiment"))
    }

    async fn create_experiment_template(
        &self,
        request: CreateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError> {
        let stop_conditions = request
            .stop_conditions
            .iter()
            .map(|c| {
                ft::CreateExperimentTemplateStopConditionInput::builder()
                    .source(&c.source)
                    .set_value(c.value.clone())
                    .build()
                    .map_err(build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let targets = request
            .targets
            .iter()
            .map(|(name, t)| -> Result<_, ServiceError> {
                Ok((name.clone(), create_target_input(t)?))
            })
            .collect::<Result<_, ServiceError>>()?;

        let actions = request
            .actions
            .iter()
            .map(|(name, a)| -> Result<_, ServiceError> {
                let input = ft::CreateExperimentTemplateActionInput::builder()
                    .action_id(&a.action_id)
                    .set_description(a.description.clone())
                    .set_parameters(non_empty_map(&a.parameters))
                    .set_targets(non_empty_map(&a.targets))
                    .set_start_after(non_empty(a.start_after.clone()))
                    .build()
                    .map_err(build_error)?;
                Ok((name.clone(), input))
            })
            .collect::<Result<_, ServiceError>>()?;

        let log_configuration = request
            .log_configuration
            .as_ref()
            .map(|log| -> Result<_, ServiceError> {
                ft::CreateExperimentTemplateLogConfigurationInput::builder()
                    .set_cloud_watch_logs_configuration(cloud_watch_log_input(log)?)
                    .set_s3_configuration(s3_log_input(log)?)
                    .set_log_schema_version(log.log_schema_version)
                    .build()
                    .map_err(build_error)
            })
            .transpose()?;

        let experiment_options = request.experiment_options.as_ref().map(|o| {
            ft::CreateExperimentTemplateExperimentOptionsInput::builder()
                .set_account_targeting(o.account_targeting.as_deref().map(ft::AccountTargeting::from))
                .set_empty_target_resolution_mode(
                    o.empty_target_resolution_mode
                        .as_deref()
                        .map(ft::EmptyTargetResolutionMode::from),
                )
                .build()
        });

        let report_configuration = request.experiment_report_configuration.as_ref().map(|r| {
            ft::CreateExperimentTemplateReportConfigurationInput::builder()
                .set_outputs(report_outputs_input(r))
                .set_data_sources(report_data_sources_input(r))
                .set_pre_experiment_duration(r.pre_experiment_duration.clone())
                .set_post_experiment_duration(r.post_experiment_duration.clone())
                .build()
        });

        let output = self
            .client
            .create_experiment_template()
            .client_token(request.client_token)
            .description(request.description)
            .role_arn(request.role_arn)
            .set_stop_conditions(Some(stop_conditions))
            .set_targets(Some(targets))
            .set_actions(Some(actions))
            .set_tags(Some(to_hash_map(&request.tags)))
            .set_log_configuration(log_configuration)
            .set_experiment_options(experiment_options)
            .set_experiment_report_configuration(report_configuration)
            .send()
            .await
            .map_err(classify_aws_error)?;

        output
            .experiment_template()
            .map(to_template)
            .ok_or_else(|| missing("an experiment template"))
    }

    async fn update_experiment_template(
        &self,
        request: UpdateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError> {
        let stop_conditions = request
            .stop_conditions
            .as_ref()
            .map(|conditions| {
                conditions
                    .iter()
                    .map(|c| {
                        ft::UpdateExperimentTemplateStopConditionInput::builder()
                            .source(&c.source)
                            .set_value(c.value.clone())
                            .build()
                            .map_err(build_error)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let targets = request
            .targets
            .as_ref()
            .map(|targets| {
                targets
                    .iter()
                    .map(|(name, t)| -> Result<_, ServiceError> {
                        Ok((name.clone(), update_target_input(t)?))
                    })
                    .collect::<Result<_, ServiceError>>()
            })
            .transpose()?;

        let actions = request.actions.as_ref().map(|actions| {
            actions
                .iter()
                .map(|(name, a)| {
                    let input = ft::UpdateExperimentTemplateActionInputItem::builder()
                        .action_id(&a.action_id)
                        .set_description(a.description.clone())
                        .set_parameters(non_empty_map(&a.parameters))
                        .set_targets(non_empty_map(&a.targets))
                        .set_start_after(non_empty(a.start_after.clone()))
                        .build();
                    (name.clone(), input)
                })
                .collect()
        });

        let log_configuration = request
            .log_configuration
            .as_ref()
            .map(|log| -> Result<_, ServiceError> {
                Ok(ft::UpdateExperimentTemplateLogConfigurationInput::builder()
                    .set_cloud_watch_logs_configuration(cloud_watch_log_input(log)?)
                    .set_s3_configuration(s3_log_input(log)?)
                    .set_log_schema_version(log.log_schema_version)
                    .build())
            })
            .transpose()?;

        let experiment_options = request.experiment_options.as_ref().map(|o| {
            ft::UpdateExperimentTemplateExperimentOptionsInput::builder()
                .set_empty_target_resolution_mode(
                    o.empty_target_resolution_mode
                        .as_deref()
                        .map(ft::EmptyTargetResolutionMode::from),
                )
                .build()
        });

        let report_configuration = request.experiment_report_configuration.as_ref().map(|r| {
            ft::UpdateExperimentTemplateReportConfigurationInput::builder()
                .set_outputs(report_outputs_input(r))
                .set_data_sources(report_data_sources_input(r))
                .set_pre_experiment_duration(r.pre_experiment_duration.clone())
                .set_post_experiment_duration(r.post_experiment_duration.clone())
                .build()
        });

        let output = self
            .client
            .update_experiment_template()
            .id(request.id)
            .set_description(request.description)
            .set_role_arn(request.role_arn)
            .set_stop_conditions(stop_conditions)
            .set_targets(targets)
            .set_actions(actions)
            .set_log_configuration(log_configuration)
            .set_experiment_options(experiment_options)
            .set_experiment_report_configuration(report_configuration)
            .send()
            .await
            .map_err(classify_aws_error)?;

        output
            .experiment_template()
            .map(to_template)
            .ok_or_else(|| missing("an experiment template"))
    }
}

// ============================================================================
// CloudFormation
// ============================================================================

pub struct SdkCloudFormationClient {
    client: cfn::Client,
}

impl SdkCloudFormationClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: cfn::Client::new(config),
        }
    }
}

fn stack_summary(summary: &cfn::types::StackSummary) -> StackSummary {
    StackSummary {
        stack_id: summary.stack_id().owned(),
        stack_name: summary.stack_name().owned(),
        template_description: summary.template_description().owned(),
        stack_status: summary.stack_status().owned(),
        stack_status_reason: summary.stack_status_reason().owned(),
        creation_time: summary.creation_time().rfc3339(),
        last_updated_time: summary.last_updated_time().rfc3339(),
        deletion_time: summary.deletion_time().rfc3339(),
        parent_id: summary.parent_id().owned(),
        root_id: summary.root_id().owned(),
    }
}

fn stack_resource(summary: &cfn::types::StackResourceSummary) -> StackResourceSummary {
    StackResourceSummary {
        logical_resource_id: summary.logical_resource_id().owned(),
        physical_resource_id: summary.physical_resource_id().owned(),
        resource_type: summary.resource_type().owned(),
        resource_status: summary.resource_status().owned(),
        resource_status_reason: summary.resource_status_reason().owned(),
        last_updated_timestamp: summary.last_updated_timestamp().rfc3339(),
    }
}

#[async_trait]
impl CloudFormationApi for SdkCloudFormationClient {
    async fn list_stacks(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<StackSummary>, ServiceError> {
        let output = self
            .client
            .list_stacks()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output.stack_summaries().iter().map(stack_summary).collect(),
            output.next_token().owned(),
        ))
    }

    async fn list_stack_resources(
        &self,
        stack_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<StackResourceSummary>, ServiceError> {
        let output = self
            .client
            .list_stack_resources()
            .stack_name(stack_name)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output
                .stack_resource_summaries()
                .iter()
                .map(stack_resource)
                .collect(),
            output.next_token().owned(),
        ))
    }
}

// ============================================================================
// Resource Explorer
// ============================================================================

pub struct SdkResourceExplorerClient {
    client: rex::Client,
}

impl SdkResourceExplorerClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: rex::Client::new(config),
        }
    }

    fn create_view_call(
        &self,
        request: CreateViewRequest,
    ) -> Result<rex::operation::create_view::builders::CreateViewFluentBuilder, ServiceError> {
        let filter = rex::types::SearchFilter::builder()
            .filter_string(&request.filter_string)
            .build()
            .map_err(build_error)?;

        Ok(self
            .client
            .create_view()
            .client_token(request.client_token)
            .view_name(request.view_name)
            .filters(filter)
            .set_scope(request.scope)
            .set_tags(Some(to_hash_map(&request.tags))))
    }
}

fn explorer_resource(resource: &rex::types::Resource) -> ExplorerResource {
    ExplorerResource {
        arn: resource.arn().owned(),
        owning_account_id: resource.owning_account_id().owned(),
        region: resource.region().owned(),
        resource_type: resource.resource_type().owned(),
        service: resource.service().owned(),
        last_reported_at: resource.last_reported_at().rfc3339(),
        properties: resource
            .properties()
            .iter()
            .map(|p| ResourceProperty {
                name: p.name().owned(),
                last_reported_at: p.last_reported_at().rfc3339(),
                data: p.data().map(document_to_json).unwrap_or_default(),
            })
            .collect(),
    }
}

#[async_trait]
impl ResourceExplorerApi for SdkResourceExplorerClient {
    async fn list_views(&self, next_token: Option<String>) -> Result<Page<String>, ServiceError> {
        let output = self
            .client
            .list_views()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output.views().to_vec(),
            output.next_token().owned(),
        ))
    }

    async fn search(
        &self,
        request: SearchRequest,
    ) -> Result<Page<ExplorerResource>, ServiceError> {
        let output = self
            .client
            .search()
            .query_string(request.query_string)
            .view_arn(request.view_arn)
            .max_results(request.max_results)
            .set_next_token(request.next_token)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(Page::new(
            output.resources().iter().map(explorer_resource).collect(),
            output.next_token().owned(),
        ))
    }

    async fn create_view(&self, request: CreateViewRequest) -> Result<View, ServiceError> {
        let output = self
            .create_view_call(request)?
            .send()
            .await
            .map_err(classify_aws_error)?;

        let view = output.view().ok_or_else(|| missing("a view"))?;
        Ok(View {
            view_arn: view.view_arn().owned(),
            owner: view.owner().owned(),
            scope: view.scope().owned(),
            last_updated_at: view.last_updated_at().rfc3339(),
            filter_string: view.filters().and_then(|f| f.filter_string().owned()),
        })
    }
}

// ============================================================================
// AWS Config
// ============================================================================

pub struct SdkConfigClient {
    client: configservice::Client,
}

impl SdkConfigClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: configservice::Client::new(config),
        }
    }
}

fn configuration_item(item: &configservice::types::ConfigurationItem) -> ConfigurationItem {
    ConfigurationItem {
        configuration_item_capture_time: item.configuration_item_capture_time().rfc3339(),
        configuration_item_status: item.configuration_item_status().owned(),
        configuration_state_id: item.configuration_state_id().owned(),
        arn: item.arn().owned(),
        resource_type: item.resource_type().owned(),
        resource_id: item.resource_id().owned(),
        resource_name: item.resource_name().owned(),
        aws_region: item.aws_region().owned(),
        availability_zone: item.availability_zone().owned(),
        resource_creation_time: item.resource_creation_time().rfc3339(),
        tags: string_map(item.tags()),
        relationships: item
            .relationships()
            .iter()
            .map(|r| Relationship {
                resource_type: r.resource_type().owned(),
                resource_id: r.resource_id().owned(),
                resource_name: r.resource_name().owned(),
                relationship_name: r.relationship_name().owned(),
            })
            .collect(),
    }
}

#[async_trait]
impl ConfigApi for SdkConfigClient {
    async fn get_resource_config_history(
        &self,
        request: ConfigHistoryRequest,
    ) -> Result<Vec<ConfigurationItem>, ServiceError> {
        let output = self
            .client
            .get_resource_config_history()
            .resource_type(configservice::types::ResourceType::from(
                request.resource_type.as_str(),
            ))
            .resource_id(request.resource_id)
            .chronological_order(configservice::types::ChronologicalOrder::from(
                request.chronological_order.as_str(),
            ))
            .limit(request.limit)
            .send()
            .await
            .map_err(classify_aws_error)?;

        Ok(output
            .configuration_items()
            .iter()
            .map(configuration_item)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::BehaviorVersion;
    use aws_types::region::Region;
    use pretty_assertions::assert_eq;

    fn offline_config() -> SdkConfig {
        SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build()
    }

    #[tokio::test]
    async fn test_create_view_forwards_tags() {
        let client = SdkResourceExplorerClient::new(&offline_config());
        let mut tags = Tags::new();
        tags.insert("Name".into(), "ec2-only".into());
        tags.insert("team".into(), "chaos".into());

        let call = client
            .create_view_call(CreateViewRequest {
                client_token: "create-view-1".into(),
                view_name: "ec2-only".into(),
                filter_string: "service:ec2".into(),
                scope: None,
                tags,
            })
            .unwrap();

        let sent = call.get_tags().clone().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent["team"], "chaos");
        assert_eq!(
            call.get_filters().as_ref().map(|f| f.filter_string()),
            Some("service:ec2")
        );
    }

    #[test]
    fn test_template_keeps_report_configuration() {
        let report = ft::ExperimentTemplateReportConfiguration::builder()
            .outputs(
                ft::ExperimentTemplateReportConfigurationOutputs::builder()
                    .s3_configuration(
                        ft::ReportConfigurationS3Output::builder()
                            .bucket_name("reports")
                            .prefix("fis/")
                            .build(),
                    )
                    .build(),
            )
            .data_sources(
                ft::ExperimentTemplateReportConfigurationDataSources::builder()
                    .cloud_watch_dashboards(
                        ft::ExperimentTemplateReportConfigurationCloudWatchDashboard::builder()
                            .dashboard_identifier("arn:aws:cloudwatch::111122223333:dashboard/app")
                            .build(),
                    )
                    .build(),
            )
            .post_experiment_duration("PT10M")
            .build();
        let template = ft::ExperimentTemplate::builder()
            .id("EXT1")
            .experiment_report_configuration(report)
            .build();

        let converted = to_template(&template)
            .experiment_report_configuration
            .unwrap();

        let s3 = converted.outputs.unwrap().s3_configuration.unwrap();
        assert_eq!(s3.bucket_name, "reports");
        assert_eq!(s3.prefix.as_deref(), Some("fis/"));
        assert_eq!(
            converted.data_sources.unwrap().cloud_watch_dashboards[0].dashboard_identifier,
            "arn:aws:cloudwatch::111122223333:dashboard/app"
        );
        assert_eq!(converted.post_experiment_duration.as_deref(), Some("PT10M"));
        assert!(converted.pre_experiment_duration.is_none());
    }
}
