use std::sync::Arc;

use fis_mcp_core::WriteAccess;
use serde_json::json;
use tracing::info;

use crate::aws::model::{StartExperimentRequest, Tags};
use crate::aws::FisApi;
use crate::prelude::*;
use crate::{named_tags, require_non_empty};

/// How the experiment's actions are executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ActionsMode {
    /// Run every action
    #[default]
    RunAll,
    /// Resolve targets but skip every action
    SkipAll,
}

impl ActionsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RunAll => "run-all",
            Self::SkipAll => "skip-all",
        }
    }
}

/// Input for starting an experiment
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StartExperimentInput {
    /// The experiment template ID to execute
    pub id: String,

    /// Name for the experiment, applied as its Name tag
    pub name: String,

    /// Additional tags to apply to the experiment
    #[serde(default)]
    pub tags: Option<Tags>,

    /// The actions mode for the experiment (run-all or skip-all)
    #[serde(default)]
    pub action: ActionsMode,
}

/// Tool that starts an experiment and returns as soon as FIS accepts it
pub struct StartExperimentTool {
    fis: Arc<dyn FisApi>,
    access: WriteAccess,
}

impl StartExperimentTool {
    pub fn new(fis: Arc<dyn FisApi>, access: WriteAccess) -> Self {
        Self { fis, access }
    }
}

impl Tool for StartExperimentTool {
    type Input = StartExperimentInput;

    fn name(&self) -> &str {
        "start_experiment"
    }

    fn description(&self) -> &str {
        "Start an AWS FIS experiment from a template and return immediately. \
         Requires the server to run with --allow-writes. Use get_fis_experiment to follow its progress."
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        self.access.require("start FIS experiments")?;
        require_non_empty("id", &input.id)?;
        require_non_empty("name", &input.name)?;

        let tags = named_tags(&input.name, input.tags);
        let experiment = self
            .fis
            .start_experiment(StartExperimentRequest {
                template_id: input.id.clone(),
                actions_mode: input.action.as_str().to_string(),
                tags: tags.clone(),
            })
            .await?;

        let experiment_id = experiment
            .id
            .clone()
            .ok_or_else(|| ToolError::from("StartExperiment response did not include an experiment ID"))?;
        info!(experiment_id = %experiment_id, name = %input.name, "started experiment");

        let experiment = serde_json::to_value(experiment)?;
        Ok(json!({
            "experiment_id": experiment_id,
            "name": input.name,
            "status": "started",
            "template_id": input.id,
            "tags": tags,
            "message": format!(
                "Experiment \"{}\" started successfully. Use get_fis_experiment to check status.",
                input.name
            ),
            "experiment": experiment,
        })
        .into())
    }
}
