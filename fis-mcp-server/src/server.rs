//! MCP server handler backed by a [`ToolRegistry`].

use std::sync::Arc;

use fis_mcp_core::ToolRegistry;
use fis_mcp_tools::fis::sample::{example_template, EXAMPLE_TEMPLATE_URI};
use rmcp::model::{self as m, AnnotateAble};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use tracing::{debug, warn};

pub const SERVER_NAME: &str = "fis-mcp-server";

const INSTRUCTIONS: &str = "\
# AWS FIS MCP Server

Tools for designing and running chaos engineering experiments with AWS Fault \
Injection Simulator (FIS), and for discovering the resources to target.

## FIS experiments
- list_fis_experiments: list all experiments, keyed by name
- get_fis_experiment: details of one experiment
- start_experiment: start an experiment from a template (needs --allow-writes)
- list_experiment_templates: list experiment templates
- get_experiment_template: details of one template

## Experiment templates
- create_experiment_template: create a template (needs --allow-writes)
- update_experiment_template: update a template (needs --allow-writes)
- The fis://templates/example resource holds a working template to start from

## Resource discovery
- list_cfn_stacks: list CloudFormation stacks
- get_stack_resources: resources of one stack
- list_resource_explorer_views: list Resource Explorer views
- search_resources: search resources through a view
- create_resource_explorer_view: create a view (needs --allow-writes)
- discover_relationships: a resource's relationships from its AWS Config history

FIS is available in select regions. Every call uses the region the server was started with.";

/// MCP server exposing the FIS and discovery tools plus the example template resource
#[derive(Clone)]
pub struct FisMcpServer {
    registry: Arc<ToolRegistry>,
    version: String,
}

impl FisMcpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The registered tools in MCP form
    pub fn tools(&self) -> Vec<m::Tool> {
        self.registry
            .iter()
            .map(|tool| {
                let schema = tool.input_schema();
                m::Tool {
                    name: tool.name().to_string().into(),
                    title: Some(tool.name().to_string()),
                    description: Some(tool.description().to_string().into()),
                    input_schema: Arc::new(schema.as_object().cloned().unwrap_or_default()),
                    annotations: None,
                    output_schema: None,
                    icons: None,
                    meta: None,
                }
            })
            .collect()
    }

    /// Run a tool by name. Failures become error results so the session continues.
    pub async fn call(&self, name: &str, args: serde_json::Value) -> m::CallToolResult {
        debug!(tool = name, "tools/call");
        match self.registry.call(name, args).await {
            Ok(result) => m::CallToolResult {
                content: vec![m::Content::text(result.as_text())],
                structured_content: None,
                is_error: Some(false),
                meta: None,
            },
            Err(e) => {
                warn!(tool = name, error = %e, "tool call returned an error");
                m::CallToolResult::error(vec![m::Content::text(e.to_string())])
            }
        }
    }

    pub fn resources(&self) -> Vec<m::Resource> {
        let mut resource =
            m::RawResource::new(EXAMPLE_TEMPLATE_URI, "example-experiment-template");
        resource.description = Some(
            "Example FIS experiment template that stops and restarts tagged EC2 instances"
                .to_string(),
        );
        resource.mime_type = Some("application/json".to_string());
        vec![resource.no_annotation()]
    }

    pub fn read(&self, uri: &str) -> Result<m::ReadResourceResult, m::ErrorData> {
        if uri != EXAMPLE_TEMPLATE_URI {
            return Err(m::ErrorData::resource_not_found(
                format!("unknown resource: {}", uri),
                None,
            ));
        }
        let text = serde_json::to_string_pretty(&example_template())
            .map_err(|e| m::ErrorData::internal_error(e.to_string(), None))?;
        Ok(m::ReadResourceResult {
            contents: vec![m::ResourceContents::text(text, uri)],
        })
    }
}

// The trait signature uses `impl Future` return types
#[allow(clippy::manual_async_fn)]
impl ServerHandler for FisMcpServer {
    fn get_info(&self) -> m::ServerInfo {
        m::InitializeResult {
            server_info: m::Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("AWS FIS MCP Server".to_string()),
                version: self.version.clone(),
                website_url: None,
                icons: None,
            },
            capabilities: m::ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move {
            let args = serde_json::Value::Object(req.arguments.unwrap_or_default());
            Ok(self.call(&req.name, args).await)
        }
    }

    fn list_resources(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourcesResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListResourcesResult {
                resources: self.resources(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        req: m::ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ReadResourceResult, m::ErrorData>> + Send + '_
    {
        async move { self.read(&req.uri) }
    }
}
