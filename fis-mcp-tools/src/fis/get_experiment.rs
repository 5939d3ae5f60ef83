use std::sync::Arc;

use crate::aws::FisApi;
use crate::prelude::*;
use crate::require_non_empty;

/// Input for fetching a single experiment
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetExperimentInput {
    /// The experiment ID to retrieve details for
    pub id: String,
}

/// Tool returning the full record of one experiment
pub struct GetExperimentTool {
    fis: Arc<dyn FisApi>,
}

impl GetExperimentTool {
    pub fn new(fis: Arc<dyn FisApi>) -> Self {
        Self { fis }
    }
}

impl Tool for GetExperimentTool {
    type Input = GetExperimentInput;

    fn name(&self) -> &str {
        "get_fis_experiment"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific FIS experiment: its state, targets, \
         actions with per-action state, stop conditions and timing."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        require_non_empty("id", &input.id)?;
        let experiment = self.fis.get_experiment(&input.id).await?;
        Ok(ToolResult::json(experiment)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{experiment, unwrap_json, MockAws};
    use fis_mcp_core::ServiceError;

    #[test]
    fn test_tool_metadata() {
        let tool = GetExperimentTool::new(MockAws::new().clients().fis);
        assert_eq!(tool.name(), "get_fis_experiment");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_returns_experiment_record() {
        let mock = MockAws::new();
        mock.fis
            .get_experiment
            .push_ok(experiment("EXP1", "EXT1", "running"));

        let tool = GetExperimentTool::new(mock.clients().fis);
        let result = unwrap_json(
            tool.execute(GetExperimentInput { id: "EXP1".into() })
                .await
                .unwrap(),
        );

        assert_eq!(result["id"], "EXP1");
        assert_eq!(result["experimentTemplateId"], "EXT1");
        assert_eq!(result["state"]["status"], "running");
        assert_eq!(mock.fis.get_experiment.calls(), vec!["EXP1".to_string()]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let mock = MockAws::new();
        mock.fis.get_experiment.push_err(ServiceError::NotFound(
            "ResourceNotFoundException: Experiment EXP9 not found".into(),
        ));

        let tool = GetExperimentTool::new(mock.clients().fis);
        let err = tool
            .execute(GetExperimentInput { id: "EXP9".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Service(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_id_makes_no_call() {
        let mock = MockAws::new();
        let tool = GetExperimentTool::new(mock.clients().fis);

        let err = tool
            .execute(GetExperimentInput { id: " ".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert_eq!(mock.fis.get_experiment.call_count(), 0);
    }
}
