//! Building blocks for exposing AWS operations as agent tools.
//!
//! - [`Tool`] / [`DynTool`]: typed tool trait and its object-safe wrapper
//! - [`pagination`]: follow continuation tokens across a listing
//! - [`shape`]: project raw records into compact output
//! - [`WriteAccess`]: gate for tools that mutate remote state
//! - [`ToolRegistry`]: name-indexed tool set used by the server

pub mod error;
pub mod pagination;
pub mod permission;
pub mod registry;
pub mod shape;
pub mod tool;

pub use error::{Error, Result, ServiceError};
pub use pagination::{fetch_all, listing_fn, ListingCapability, ListingFn, Page};
pub use permission::WriteAccess;
pub use registry::ToolRegistry;
pub use shape::{shape_all, shape_keyed, Projection, ShapeError};
pub use tool::{box_tool, DynTool, Tool, ToolError, ToolResult};
