use std::collections::BTreeSet;
use std::sync::Arc;

use fis_mcp_core::Projection;
use serde_json::{json, Map};
use tracing::debug;

use crate::aws::model::{ChronologicalOrder, ConfigHistoryRequest, ConfigurationItem};
use crate::aws::ConfigApi;
use crate::prelude::*;
use crate::require_non_empty;

const DEFAULT_LIMIT: i32 = 10;
const MAX_LIMIT: i32 = 100;

const NO_ITEMS_MESSAGE: &str = "No configuration items found for the specified resource";

fn default_limit() -> i32 {
    DEFAULT_LIMIT
}

/// Input for discovering a resource's relationships
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DiscoverRelationshipsInput {
    /// AWS Config resource type, e.g. `AWS::EC2::Instance` or
    /// `AWS::ElasticLoadBalancingV2::LoadBalancer`
    pub resource_type: String,

    /// ID of the resource to inspect
    pub resource_id: String,

    /// Maximum number of configuration items to retrieve (1-100, default 10)
    #[serde(default = "default_limit")]
    pub limit: i32,

    /// Order of configuration items, Reverse (newest first) or Forward
    #[serde(default)]
    pub chronological_order: ChronologicalOrder,
}

/// Tool reporting which resources a resource is attached to, according to
/// its AWS Config history.
///
/// Relationships come from the first configuration item returned, which is
/// the most recent one in the default `Reverse` order.
pub struct DiscoverRelationshipsTool {
    config: Arc<dyn ConfigApi>,
}

impl DiscoverRelationshipsTool {
    pub fn new(config: Arc<dyn ConfigApi>) -> Self {
        Self { config }
    }

    fn item_projection() -> Projection {
        Projection::new()
            .optional_as("configurationItemCaptureTime", "configuration_item_capture_time")
            .optional_as("configurationStateId", "configuration_state_id")
            .optional_as("awsRegion", "aws_region")
            .optional_as("availabilityZone", "availability_zone")
            .optional_as("resourceCreationTime", "resource_creation_time")
            .optional("tags")
    }

    fn summarize_item(item: &ConfigurationItem) -> Result<Value, ToolError> {
        let record = serde_json::to_value(item)?;
        let mut shaped: Map<String, Value> = Self::item_projection().project(&record)?;
        shaped.insert(
            "relationships_count".into(),
            json!(item.relationships.len()),
        );
        Ok(Value::Object(shaped))
    }
}

impl Tool for DiscoverRelationshipsTool {
    type Input = DiscoverRelationshipsInput;

    fn name(&self) -> &str {
        "discover_relationships"
    }

    fn description(&self) -> &str {
        "Discover a resource's relationships from its AWS Config history, such as the subnets \
         a load balancer is placed in or the security groups attached to an instance."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        require_non_empty("resource_type", &input.resource_type)?;
        require_non_empty("resource_id", &input.resource_id)?;
        if !(1..=MAX_LIMIT).contains(&input.limit) {
            return Err(ToolError::invalid_input(format!(
                "limit must be between 1 and {}, got {}",
                MAX_LIMIT, input.limit
            )));
        }

        let items = self
            .config
            .get_resource_config_history(ConfigHistoryRequest {
                resource_type: input.resource_type.clone(),
                resource_id: input.resource_id.clone(),
                limit: input.limit,
                chronological_order: input.chronological_order,
            })
            .await?;

        let mut result = Map::new();
        result.insert("resource_type".into(), json!(input.resource_type));
        result.insert("resource_id".into(), json!(input.resource_id));

        let Some(latest) = items.first() else {
            result.insert("relationships".into(), json!([]));
            result.insert("configuration_items".into(), json!([]));
            result.insert("message".into(), json!(NO_ITEMS_MESSAGE));
            return Ok(Value::Object(result).into());
        };

        let relationship_types: BTreeSet<&str> = latest
            .relationships
            .iter()
            .map(|r| r.relationship_name.as_deref().unwrap_or(""))
            .collect();
        let configuration_items = items
            .iter()
            .map(Self::summarize_item)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            resource_id = %input.resource_id,
            relationships = latest.relationships.len(),
            "discovered relationships"
        );

        result.insert(
            "relationships".into(),
            serde_json::to_value(&latest.relationships)?,
        );
        result.insert("configuration_items".into(), Value::Array(configuration_items));
        result.insert(
            "summary".into(),
            json!({
                "total_relationships": latest.relationships.len(),
                "total_configuration_items": items.len(),
                "relationship_types": relationship_types,
            }),
        );

        Ok(Value::Object(result).into())
    }
}
