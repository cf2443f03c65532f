use std::collections::HashMap;

use crate::spec::GraphSpec;

/// Graph structure for traversal and analysis.
///
/// Built from a [`GraphSpec`] as-is; engines reject dangling edges and
/// duplicate ids before constructing one of these. Node and edge order from
/// the spec is preserved, so traversals are deterministic.
#[derive(Debug, Clone)]
pub struct Graph {
  /// Node ids in submission order.
  nodes: Vec<String>,
  /// Adjacency list: node_id -> list of downstream node_ids.
  adjacency: HashMap<String, Vec<String>>,
  /// Reverse adjacency: node_id -> list of upstream node_ids.
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Nodes with no incoming edges, in submission order.
  entry_points: Vec<String>,
}

impl Graph {
  /// Build a graph from a spec.
  pub fn new(spec: &GraphSpec) -> Self {
    let nodes: Vec<String> = spec.node_ids().map(String::from).collect();

    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();

    for node_id in &nodes {
      adjacency.entry(node_id.clone()).or_default();
      reverse_adjacency.entry(node_id.clone()).or_default();
    }

    for edge in &spec.edges {
      adjacency
        .entry(edge.source.clone())
        .or_default()
        .push(edge.target.clone());
      reverse_adjacency
        .entry(edge.target.clone())
        .or_default()
        .push(edge.source.clone());
    }

    let entry_points: Vec<String> = nodes
      .iter()
      .filter(|id| reverse_adjacency.get(*id).is_none_or(|v| v.is_empty()))
      .cloned()
      .collect();

    Self {
      nodes,
      adjacency,
      reverse_adjacency,
      entry_points,
    }
  }

  /// Node ids in submission order.
  pub fn node_ids(&self) -> &[String] {
    &self.nodes
  }

  /// Get entry points (nodes with no incoming edges).
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Get downstream nodes for a given node.
  pub fn downstream(&self, node_id: &str) -> &[String] {
    self
      .adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Get upstream nodes for a given node.
  pub fn upstream(&self, node_id: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
