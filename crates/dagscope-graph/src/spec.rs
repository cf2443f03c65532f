use serde::{Deserialize, Serialize};

use crate::edge::EdgeDescriptor;
use crate::node::NodeDescriptor;

/// The graph a layout computation operates on.
///
/// An empty spec is valid; it lays out to an empty position map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
  #[serde(default)]
  pub nodes: Vec<NodeDescriptor>,
  #[serde(default)]
  pub edges: Vec<EdgeDescriptor>,
}

impl GraphSpec {
  pub fn new(nodes: Vec<NodeDescriptor>, edges: Vec<EdgeDescriptor>) -> Self {
    Self { nodes, edges }
  }

  /// Iterate over node ids in submission order.
  pub fn node_ids(&self) -> impl Iterator<Item = &str> {
    self.nodes.iter().map(|n| n.id.as_str())
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
