//! Wire types for layout computations.
//!
//! These mirror the messages the viewer exchanges with its layout worker:
//! a request carrying nodes, edges and layout options, answered by a stream
//! of progress events ending in `layoutComplete` or `error`.

use dagscope_graph::{EdgeDescriptor, GraphSpec, LayoutConfig, NodeDescriptor, PositionMap};
use serde::{Deserialize, Serialize};

/// A layout computation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
  pub nodes: Vec<NodeDescriptor>,
  pub edges: Vec<EdgeDescriptor>,
  #[serde(default)]
  pub layout_options: LayoutConfig,
}

impl LayoutRequest {
  /// Split into the graph spec and the options the worker takes separately.
  pub fn into_parts(self) -> (GraphSpec, LayoutConfig) {
    (GraphSpec::new(self.nodes, self.edges), self.layout_options)
  }
}

/// Events emitted during a layout computation.
///
/// Every computation emits zero or more `progress` events with
/// nondecreasing values below 1, then exactly one terminal event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutEvent {
  /// Fractional completion estimate.
  Progress { progress: f64 },

  /// Terminal: one position per submitted node.
  LayoutComplete { positions: PositionMap },

  /// Terminal: the computation failed.
  Error { error: String },
}

impl LayoutEvent {
  /// Whether this event ends the computation.
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::LayoutComplete { .. } | Self::Error { .. })
  }
}
