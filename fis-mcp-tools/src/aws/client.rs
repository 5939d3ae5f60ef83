//! Service capabilities used by the tools.
//!
//! Each trait covers the calls the tools make against one AWS service.
//! Listing calls take the continuation token and return a single [`Page`];
//! the tools drive pagination with [`fis_mcp_core::fetch_all`]. Production
//! implementations live in [`super::sdk`].

use std::sync::Arc;

use async_trait::async_trait;
use fis_mcp_core::{Page, ServiceError};

use super::model::*;

#[async_trait]
pub trait FisApi: Send + Sync {
    async fn list_experiments(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentSummary>, ServiceError>;

    async fn get_experiment(&self, id: &str) -> Result<Experiment, ServiceError>;

    async fn list_experiment_templates(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ExperimentTemplateSummary>, ServiceError>;

    async fn get_experiment_template(&self, id: &str) -> Result<ExperimentTemplate, ServiceError>;

    async fn start_experiment(
        &self,
        request: StartExperimentRequest,
    ) -> Result<Experiment, ServiceError>;

    async fn create_experiment_template(
        &self,
        request: CreateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError>;

    async fn update_experiment_template(
        &self,
        request: UpdateExperimentTemplateRequest,
    ) -> Result<ExperimentTemplate, ServiceError>;
}

#[async_trait]
pub trait CloudFormationApi: Send + Sync {
    async fn list_stacks(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<StackSummary>, ServiceError>;

    async fn list_stack_resources(
        &self,
        stack_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<StackResourceSummary>, ServiceError>;
}

#[async_trait]
pub trait ResourceExplorerApi: Send + Sync {
    /// Returns view ARNs
    async fn list_views(&self, next_token: Option<String>) -> Result<Page<String>, ServiceError>;

    async fn search(&self, request: SearchRequest)
        -> Result<Page<ExplorerResource>, ServiceError>;

    async fn create_view(&self, request: CreateViewRequest) -> Result<View, ServiceError>;
}

#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// One page of configuration history, up to `request.limit` items
    async fn get_resource_config_history(
        &self,
        request: ConfigHistoryRequest,
    ) -> Result<Vec<ConfigurationItem>, ServiceError>;
}

/// The service clients shared by every tool
#[derive(Clone)]
pub struct AwsClients {
    pub fis: Arc<dyn FisApi>,
    pub cloudformation: Arc<dyn CloudFormationApi>,
    pub resource_explorer: Arc<dyn ResourceExplorerApi>,
    pub config: Arc<dyn ConfigApi>,
}

impl std::fmt::Debug for AwsClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsClients").finish_non_exhaustive()
    }
}
