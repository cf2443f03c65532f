//! Dagscope Server
//!
//! This crate provides the HTTP API the workflow viewer talks to:
//! - `GET /api/workflows` - a filterable, paginated workflow catalog
//! - `GET /api/workflows/:workflow_id/graph` - a workflow's task graph
//! - `POST /api/layout` - position computation for a submitted graph
//!
//! The catalog is sample data generated at startup; the layout endpoint is a
//! thin caller over [`dagscope_worker`], one worker per request, with a
//! server-side timeout that abandons computations that run too long.

mod api;
mod catalog;
mod error;
mod models;
mod state;

pub use api::{router, serve};
pub use catalog::{Catalog, workflow_graph};
pub use error::ApiError;
pub use models::{
  LayoutResponse, ListQuery, ListResponse, TaskNode, TaskStatus, WorkflowGraph, WorkflowSummary,
};
pub use state::{AppState, ServerConfig};
