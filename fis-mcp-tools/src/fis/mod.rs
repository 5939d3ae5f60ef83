//! AWS Fault Injection Simulator tools.
//!
//! | Tool | Description |
//! |------|-------------|
//! | [`ListExperimentsTool`] | All experiments, keyed by their `Name` tag |
//! | [`GetExperimentTool`] | One experiment by ID |
//! | [`ListTemplatesTool`] | All experiment templates |
//! | [`GetTemplateTool`] | One experiment template by ID |
//! | [`StartExperimentTool`] | Start an experiment from a template (write-gated) |
//! | [`CreateTemplateTool`] | Create an experiment template (write-gated) |
//! | [`UpdateTemplateTool`] | Update an experiment template (write-gated) |
//!
//! [`sample`] holds an example template agents can start from.

mod create_template;
mod get_experiment;
mod get_template;
mod list_experiments;
mod list_templates;
pub mod sample;
mod start_experiment;
mod update_template;

pub use create_template::{CreateTemplateInput, CreateTemplateTool};
pub use get_experiment::{GetExperimentInput, GetExperimentTool};
pub use get_template::{GetTemplateInput, GetTemplateTool};
pub use list_experiments::{ListExperimentsInput, ListExperimentsTool};
pub use list_templates::{ListTemplatesInput, ListTemplatesTool};
pub use start_experiment::{ActionsMode, StartExperimentInput, StartExperimentTool};
pub use update_template::{UpdateTemplateInput, UpdateTemplateTool};

use std::sync::Arc;

use fis_mcp_core::tool::DynTool;
use fis_mcp_core::{box_tools, WriteAccess};

use crate::aws::FisApi;

pub fn read_only_tools(fis: Arc<dyn FisApi>) -> Vec<Box<dyn DynTool>> {
    box_tools![
        ListExperimentsTool::new(fis.clone()),
        GetExperimentTool::new(fis.clone()),
        ListTemplatesTool::new(fis.clone()),
        GetTemplateTool::new(fis),
    ]
}

pub fn mutative_tools(fis: Arc<dyn FisApi>, access: WriteAccess) -> Vec<Box<dyn DynTool>> {
    box_tools![
        StartExperimentTool::new(fis.clone(), access),
        CreateTemplateTool::new(fis.clone(), access),
        UpdateTemplateTool::new(fis, access),
    ]
}
