//! Layer assignment: longest path from the entry points.

use std::collections::{HashMap, VecDeque};

use dagscope_graph::Graph;

use crate::error::EngineError;

/// Assign every node to a layer via Kahn's algorithm.
///
/// A node lands one layer below its deepest upstream neighbour; entry points
/// land in layer 0. Returns the layers top-down, each preserving submission
/// order. Nodes left with positive in-degree at the end sit on a cycle.
pub(crate) fn assign_layers(graph: &Graph) -> Result<Vec<Vec<String>>, EngineError> {
  if graph.is_empty() {
    return Ok(Vec::new());
  }

  let mut layer_of: HashMap<&str, usize> = HashMap::new();
  let mut in_degree: HashMap<&str, usize> = HashMap::new();

  for id in graph.node_ids() {
    in_degree.insert(id.as_str(), graph.upstream(id).len());
  }

  let mut queue: VecDeque<&str> = VecDeque::new();
  for id in graph.entry_points() {
    layer_of.insert(id.as_str(), 0);
    queue.push_back(id.as_str());
  }

  let mut visited = 0usize;
  while let Some(current) = queue.pop_front() {
    visited += 1;
    let current_layer = *layer_of.get(current).unwrap_or(&0);

    for succ in graph.downstream(current) {
      let layer = layer_of.entry(succ.as_str()).or_insert(0);
      *layer = (*layer).max(current_layer + 1);

      if let Some(deg) = in_degree.get_mut(succ.as_str()) {
        *deg = deg.saturating_sub(1);
        if *deg == 0 {
          queue.push_back(succ.as_str());
        }
      }
    }
  }

  if visited < graph.len() {
    // Some in-degree never reached zero
    let stuck = graph
      .node_ids()
      .iter()
      .find(|id| in_degree.get(id.as_str()).is_some_and(|deg| *deg > 0))
      .cloned()
      .unwrap_or_default();
    return Err(EngineError::CyclicGraph { node_id: stuck });
  }

  let max_layer = layer_of.values().copied().max().unwrap_or(0);
  let mut layers: Vec<Vec<String>> = vec![Vec::new(); max_layer + 1];
  for id in graph.node_ids() {
    let layer = layer_of.get(id.as_str()).copied().unwrap_or(0);
    layers[layer].push(id.clone());
  }

  Ok(layers)
}
