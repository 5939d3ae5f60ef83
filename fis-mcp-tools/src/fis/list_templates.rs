use std::sync::Arc;

use fis_mcp_core::{fetch_all, listing_fn};

use crate::aws::FisApi;
use crate::prelude::*;

/// Input for listing experiment templates (no parameters)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTemplatesInput {}

/// Tool listing every experiment template in the account and region
pub struct ListTemplatesTool {
    fis: Arc<dyn FisApi>,
}

impl ListTemplatesTool {
    pub fn new(fis: Arc<dyn FisApi>) -> Self {
        Self { fis }
    }
}

impl Tool for ListTemplatesTool {
    type Input = ListTemplatesInput;

    fn name(&self) -> &str {
        "list_experiment_templates"
    }

    fn description(&self) -> &str {
        "List all FIS experiment templates in the current account and region."
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        let fis = self.fis.as_ref();
        let templates =
            fetch_all(&listing_fn(move |token| fis.list_experiment_templates(token))).await?;
        Ok(ToolResult::json(templates)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::model::ExperimentTemplateSummary;
    use crate::test_utils::{unwrap_json, MockAws};
    use fis_mcp_core::{Page, ServiceError};

    fn summary(id: &str) -> ExperimentTemplateSummary {
        ExperimentTemplateSummary {
            id: Some(id.to_string()),
            description: Some(format!("template {}", id)),
            ..Default::default()
        }
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ListTemplatesTool::new(MockAws::new().clients().fis);
        assert_eq!(tool.name(), "list_experiment_templates");
        assert!(!tool.description().is_empty());
    }

    #[tokio::test]
    async fn test_concatenates_pages() {
        let mock = MockAws::new();
        let templates = &mock.fis.list_experiment_templates;
        templates.push_ok(Page::new(vec![summary("EXT1")], Some("t1".into())));
        templates.push_ok(Page::new(vec![], Some("t2".into())));
        templates.push_ok(Page::last(vec![summary("EXT2"), summary("EXT3")]));

        let tool = ListTemplatesTool::new(mock.clients().fis);
        let result = unwrap_json(tool.execute(Default::default()).await.unwrap());

        let ids: Vec<_> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["EXT1", "EXT2", "EXT3"]);
        assert_eq!(templates.call_count(), 3);
    }

    #[tokio::test]
    async fn test_error_on_later_page_discards_results() {
        let mock = MockAws::new();
        let templates = &mock.fis.list_experiment_templates;
        templates.push_ok(Page::new(vec![summary("EXT1")], Some("t1".into())));
        templates.push_err(ServiceError::Throttled("ThrottlingException: slow down".into()));

        let tool = ListTemplatesTool::new(mock.clients().fis);
        let err = tool.execute(Default::default()).await.unwrap_err();

        assert!(matches!(err, ToolError::Service(ServiceError::Throttled(_))));
    }
}
