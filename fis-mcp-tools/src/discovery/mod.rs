//! Resource-discovery tools for finding experiment targets.
//!
//! CloudFormation stacks and their resources, Resource Explorer views and
//! search, and AWS Config relationship history.

mod create_view;
mod list_stacks;
mod list_views;
mod relationships;
mod search_resources;
mod stack_resources;

pub use create_view::{CreateViewInput, CreateViewTool};
pub use list_stacks::{ListStacksInput, ListStacksTool};
pub use list_views::{ListViewsInput, ListViewsTool};
pub use relationships::{DiscoverRelationshipsInput, DiscoverRelationshipsTool};
pub use search_resources::{SearchResourcesInput, SearchResourcesTool};
pub use stack_resources::{StackResourcesInput, StackResourcesTool};

use fis_mcp_core::tool::DynTool;
use fis_mcp_core::{box_tools, WriteAccess};

use crate::aws::AwsClients;

pub fn read_only_tools(clients: &AwsClients) -> Vec<Box<dyn DynTool>> {
    box_tools![
        ListStacksTool::new(clients.cloudformation.clone()),
        StackResourcesTool::new(clients.cloudformation.clone()),
        ListViewsTool::new(clients.resource_explorer.clone()),
        SearchResourcesTool::new(clients.resource_explorer.clone()),
        DiscoverRelationshipsTool::new(clients.config.clone()),
    ]
}

pub fn mutative_tools(clients: &AwsClients, access: WriteAccess) -> Vec<Box<dyn DynTool>> {
    box_tools![CreateViewTool::new(clients.resource_explorer.clone(), access)]
}
