// Integration tests for fis-mcp-server
//
// These exercise the MCP surface (tool listing, dispatch, resources) over
// the in-memory service mocks.

use fis_mcp_core::{Page, ServiceError, WriteAccess};
use fis_mcp_server::config::{Cli, ServerConfig};
use fis_mcp_server::{build_registry, FisMcpServer};
use fis_mcp_tools::fis::sample::EXAMPLE_TEMPLATE_URI;
use fis_mcp_tools::test_utils::{stack, MockAws};
use pretty_assertions::assert_eq;
use rmcp::model::CallToolResult;
use serde_json::{json, Value};

fn config(allow_writes: bool) -> ServerConfig {
    let cli = Cli {
        allow_writes,
        ..Default::default()
    };
    ServerConfig::resolve(cli, |_| None).unwrap()
}

fn server(mock: &MockAws, allow_writes: bool) -> FisMcpServer {
    FisMcpServer::new(build_registry(&mock.clients(), &config(allow_writes)).unwrap())
}

fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_lists_every_registered_tool() {
    let mock = MockAws::new();
    let server = server(&mock, false);

    let tools = server.tools();
    assert_eq!(tools.len(), 13);
    assert_eq!(tools.len(), server.registry().len());

    let search = tools
        .iter()
        .find(|t| t.name == "search_resources")
        .unwrap();
    let properties = search.input_schema.get("properties").unwrap();
    assert!(properties.get("query_string").is_some());
    assert!(properties.get("view_arn").is_some());
}

#[tokio::test]
async fn test_successful_call_returns_json_text() {
    let mock = MockAws::new();
    mock.cloudformation
        .list_stacks
        .push_ok(Page::new(vec![stack("a"), stack("b")], Some("t1".into())));
    mock.cloudformation
        .list_stacks
        .push_ok(Page::last(vec![stack("c")]));

    let result = server(&mock, false)
        .call("list_cfn_stacks", json!({}))
        .await;

    assert_eq!(result.is_error, Some(false));
    let body: Value = serde_json::from_str(&text_of(&result)).unwrap();
    assert_eq!(body["stacks"].as_array().unwrap().len(), 3);
    assert_eq!(body["stacks"][2]["stackName"], "c");
}

#[tokio::test]
async fn test_unknown_tool_is_an_error_result() {
    let mock = MockAws::new();

    let result = server(&mock, false).call("delete_everything", json!({})).await;

    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("delete_everything"));
}

#[tokio::test]
async fn test_failing_tool_is_an_error_result() {
    let mock = MockAws::new();
    mock.fis.get_experiment.push_err(ServiceError::Authentication(
        "ExpiredTokenException: The security token included in the request is expired".into(),
    ));

    let result = server(&mock, false)
        .call("get_fis_experiment", json!({"id": "EXP1"}))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("ExpiredTokenException"));
}

#[tokio::test]
async fn test_invalid_arguments_are_an_error_result() {
    let mock = MockAws::new();

    let result = server(&mock, false)
        .call("get_stack_resources", json!({"stack": "web"}))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(mock.cloudformation.list_stack_resources.call_count(), 0);
}

#[tokio::test]
async fn test_write_refused_without_flag() {
    let mock = MockAws::new();

    let result = server(&mock, false)
        .call("start_experiment", json!({"id": "EXT1", "name": "drill"}))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert!(text_of(&result).contains("--allow-writes"));
    assert_eq!(mock.fis.mutating_calls(), 0);
}

#[tokio::test]
async fn test_write_allowed_with_flag() {
    let mock = MockAws::new();
    mock.fis
        .start_experiment
        .push_ok(fis_mcp_tools::test_utils::experiment("EXP1", "EXT1", "initiating"));

    let result = server(&mock, true)
        .call("start_experiment", json!({"id": "EXT1", "name": "drill"}))
        .await;

    assert_eq!(result.is_error, Some(false));
    assert_eq!(mock.fis.start_experiment.call_count(), 1);
    assert_eq!(config(true).write_access, WriteAccess::Enabled);
}

#[test]
fn test_example_template_resource() {
    let mock = MockAws::new();
    let server = server(&mock, false);

    let resources = server.resources();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].uri, EXAMPLE_TEMPLATE_URI);

    let read = server.read(EXAMPLE_TEMPLATE_URI).unwrap();
    assert_eq!(read.contents.len(), 1);

    assert!(server.read("fis://templates/missing").is_err());
}
