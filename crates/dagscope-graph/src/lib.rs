//! Dagscope Graph
//!
//! This crate contains the serializable graph and layout-option types for
//! dagscope. These types describe what a layout computation operates on:
//! the nodes and edges of a workflow DAG plus the options an engine
//! interprets while placing them.
//!
//! Graph specs arrive from:
//! - HTTP request bodies (the layout endpoint)
//! - JSON files (via the CLI)
//! - the sample workflow catalog
//!
//! The worker passes these types through untouched; only layout engines
//! interpret them.

mod config;
mod edge;
mod graph;
mod node;
mod position;
mod spec;

pub use config::{Direction, LayoutConfig};
pub use edge::EdgeDescriptor;
pub use graph::Graph;
pub use node::NodeDescriptor;
pub use position::{Position, PositionMap};
pub use spec::GraphSpec;
