//! In-memory service clients for testing tools without AWS credentials.
//!
//! Each mocked call pops the next scripted response and records the request
//! it received, so tests can assert on both the output and the calls made.
//!
//! ```ignore
//! let mock = MockAws::new();
//! mock.cloudformation.list_stacks.push_ok(Page::new(vec![stack("a")], Some("t1".into())));
//! mock.cloudformation.list_stacks.push_ok(Page::last(vec![stack("b")]));
//!
//! let result = ListStacksTool::new(mock.clients().cloudformation).execute(Default::default()).await?;
//! assert_eq!(mock.cloudformation.list_stacks.call_count(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use fis_mcp_core::{Page, ServiceError, ToolResult};
use parking_lot::Mutex;
use serde_json::Value;

use crate::aws::client::*;
use crate::aws::model::*;

/// Unwraps a `ToolResult::Json` variant, panicking with a clear message if it's not JSON.
pub fn unwrap_json(result: ToolResult) -> Value {
    match result {
        ToolResult::Json(v) => v,
        other => panic!("Expected JSON result, got: {:?}", other),
    }
}

/// Scripted responses for one operation, plus the requests it received
pub struct Scripted<Req, Resp> {
    responses: Mutex<VecDeque<Result<Resp, ServiceError>>>,
    calls: Mutex<Vec<Req>>,
}

impl<Req, Resp> Default for Scripted<Req, Resp> {
    fn default() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<Req: Clone, Resp> Scripted<Req, Resp> {
    pub fn push_ok(&self, response: Resp) {
        self.responses.lock().push_back(Ok(response));
    }

    pub fn push_err(&self, err: ServiceError) {
        self.responses.lock().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<Req> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn next(&self, request: Req) -> Result<Resp, ServiceError> {
        self.calls.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Other("no scripted response".to_string())))
    }
}

#[derive(Default)]
pub struct MockFis {
    pub list_experiments: Scripted<Option<String>, Page<ExperimentSummary>>,
    pub get_experiment: Scripted<String, Experiment>,
    pub list_experiment_templates: Scripted<Option<String>, Page<ExperimentTemplateSummary>>,
    pub get_experiment_template: Scripted<String, ExperimentTemplate>,
    pub start_experiment: Scripted<StartExperimentRequest, Experiment>,
    pub create_experiment_template: Scripted<CreateExperimentTemplateRequest, ExperimentTemplate>,
    pub update_experiment_template: Scripted<UpdateExperimentTemplateRequest, ExperimentTemplate>,
}

impl MockFis {
    /// Calls made to operations that mutate remote state
    pub fn mutating_calls(&self) -> usize {
        self.start_experiment.call_count()
            + self.create_experiment_template.call_count()
            + self.update_experiment_template.call_count()
    }
}

#[async_trait]
impl FisApi for MockFis {
    async fn list_experiments(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentSummary>, ServiceError> {
        self.list_experiments.next(next_token)
    }

    async fn get_experiment(&self, id: &str) -> Result<Experiment, ServiceError> {
        self.get_experiment.next(id.to_string())
    }

    async fn list_experiment_templates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentTemplateSummary>, ServiceError> {
        self.list_experiment_templates.next(next_token)
    }

    async fn get_experiment_template(&self, id: &str) -> Result<ExperimentTemplate, ServiceError> {
        self.get_experiment_template.next(id.to_string())
    }

    async fn start_experiment(
        &self,
        request: StartExperimentRequest,
    ) -> Result<Experiment, ServiceError> {
        self.start_experiment.next(request)
    }

    async fn create_experiment_template(
        &self,
        request: CreateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError> {
        self.create_experiment_template.next(request)
    }

    async fn update_experiment_template(
        &self,
        request: UpdateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError> {
        self.update_experiment_template.next(request)
    }
}

#[derive(Default)]
pub struct MockCloudFormation {
    pub list_stacks: Scripted<Option<String>, Page<StackSummary>>,
    pub list_stack_resources: Scripted<(String, Option<String>), Page<StackResourceSummary>>,
}

#[async_trait]
impl CloudFormationApi for MockCloudFormation {
    async fn list_stacks(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<StackSummary>, ServiceError> {
        self.list_stacks.next(next_token)
    }

    async fn list_stack_resources(
        &self,
        stack_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<StackResourceSummary>, ServiceError> {
        self.list_stack_resources
            .next((stack_name.to_string(), next_token))
    }
}

#[derive(Default)]
pub struct MockResourceExplorer {
    pub list_views: Scripted<Option<String>, Page<String>>,
    pub search: Scripted<SearchRequest, Page<ExplorerResource>>,
    pub create_view: Scripted<CreateViewRequest, View>,
}

#[async_trait]
impl ResourceExplorerApi for MockResourceExplorer {
    async fn list_views(&self, next_token: Option<String>) -> Result<Page<String>, ServiceError> {
        self.list_views.next(next_token)
    }

    async fn search(
        &self,
        request: SearchRequest,
    ) -> Result<Page<ExplorerResource>, ServiceError> {
        self.search.next(request)
    }

    async fn create_view(&self, request: CreateViewRequest) -> Result<View, ServiceError> {
        self.create_view.next(request)
    }
}

#[derive(Default)]
pub struct MockConfig {
    pub get_resource_config_history: Scripted<ConfigHistoryRequest, Vec<ConfigurationItem>>,
}

#[async_trait]
impl ConfigApi for MockConfig {
    async fn get_resource_config_history(
        &self,
        request: ConfigHistoryRequest,
    ) -> Result<Vec<ConfigurationItem>, ServiceError> {
        self.get_resource_config_history.next(request)
    }
}

/// One mock per service, handed to tools as [`AwsClients`]
#[derive(Default, Clone)]
pub struct MockAws {
    pub fis: Arc<MockFis>,
    pub cloudformation: Arc<MockCloudFormation>,
    pub resource_explorer: Arc<MockResourceExplorer>,
    pub config: Arc<MockConfig>,
}

impl MockAws {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> AwsClients {
        AwsClients {
            fis: self.fis.clone(),
            cloudformation: self.cloudformation.clone(),
            resource_explorer: self.resource_explorer.clone(),
            config: self.config.clone(),
        }
    }
}

// ===== Record builders =====

pub fn stack(name: &str) -> StackSummary {
    StackSummary {
        stack_id: Some(format!(
            "arn:aws:cloudformation:us-east-1:111122223333:stack/{}/0a1b2c3d",
            name
        )),
        stack_name: Some(name.to_string()),
        stack_status: Some("CREATE_COMPLETE".to_string()),
        creation_time: Some("2024-05-01T12:00:00Z".to_string()),
        ..Default::default()
    }
}

pub fn stack_resource(logical_id: &str, resource_type: &str) -> StackResourceSummary {
    StackResourceSummary {
        logical_resource_id: Some(logical_id.to_string()),
        physical_resource_id: Some(format!("{}-physical", logical_id.to_lowercase())),
        resource_type: Some(resource_type.to_string()),
        resource_status: Some("CREATE_COMPLETE".to_string()),
        last_updated_timestamp: Some("2024-05-01T12:05:00Z".to_string()),
        ..Default::default()
    }
}

pub fn experiment_summary(id: &str, name: Option<&str>, status: &str) -> ExperimentSummary {
    let mut tags = Tags::new();
    if let Some(name) = name {
        tags.insert("Name".to_string(), name.to_string());
    }
    ExperimentSummary {
        id: Some(id.to_string()),
        arn: Some(format!(
            "arn:aws:fis:us-east-1:111122223333:experiment/{}",
            id
        )),
        experiment_template_id: Some("EXT1a2b3c4d".to_string()),
        state: Some(ExperimentState {
            status: Some(status.to_string()),
            reason: None,
        }),
        creation_time: Some("2024-05-01T12:00:00Z".to_string()),
        tags,
        experiment_options: Some(ExperimentOptions {
            account_targeting: Some("single-account".to_string()),
            empty_target_resolution_mode: Some("fail".to_string()),
            actions_mode: Some("run-all".to_string()),
        }),
    }
}

pub fn experiment(id: &str, template_id: &str, status: &str) -> Experiment {
    Experiment {
        id: Some(id.to_string()),
        arn: Some(format!(
            "arn:aws:fis:us-east-1:111122223333:experiment/{}",
            id
        )),
        experiment_template_id: Some(template_id.to_string()),
        role_arn: Some("arn:aws:iam::111122223333:role/fis-role".to_string()),
        state: Some(ExperimentState {
            status: Some(status.to_string()),
            reason: None,
        }),
        ..Default::default()
    }
}

pub fn template(id: &str, description: &str) -> ExperimentTemplate {
    ExperimentTemplate {
        id: Some(id.to_string()),
        arn: Some(format!(
            "arn:aws:fis:us-east-1:111122223333:experiment-template/{}",
            id
        )),
        description: Some(description.to_string()),
        role_arn: Some("arn:aws:iam::111122223333:role/fis-role".to_string()),
        ..Default::default()
    }
}

pub fn relationship(name: &str, resource_type: &str, resource_id: &str) -> Relationship {
    Relationship {
        resource_type: Some(resource_type.to_string()),
        resource_id: Some(resource_id.to_string()),
        resource_name: None,
        relationship_name: Some(name.to_string()),
    }
}
