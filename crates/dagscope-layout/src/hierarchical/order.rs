//! Crossing reduction: barycenter ordering within layers.

use std::collections::HashMap;

use dagscope_graph::Graph;

/// A few alternating sweeps settle small and medium graphs; more buys little.
const MAX_SWEEPS: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Adjacent {
  Upstream,
  Downstream,
}

/// Reorder nodes within each layer towards the average position of their
/// neighbours in the adjacent layer.
///
/// Forward passes look at upstream neighbours, backward passes at downstream
/// ones.
pub(crate) fn reduce_crossings(graph: &Graph, layers: &mut [Vec<String>]) {
  for _ in 0..MAX_SWEEPS {
    for layer_idx in 1..layers.len() {
      order_by_barycenter(graph, layers, layer_idx, Adjacent::Upstream);
    }
    for layer_idx in (0..layers.len().saturating_sub(1)).rev() {
      order_by_barycenter(graph, layers, layer_idx, Adjacent::Downstream);
    }
  }
}

fn order_by_barycenter(
  graph: &Graph,
  layers: &mut [Vec<String>],
  layer_idx: usize,
  adjacent: Adjacent,
) {
  let adjacent_idx = match adjacent {
    Adjacent::Upstream => layer_idx.saturating_sub(1),
    Adjacent::Downstream => layer_idx + 1,
  };
  if adjacent_idx >= layers.len() || adjacent_idx == layer_idx {
    return;
  }

  let adjacent_positions: HashMap<&str, usize> = layers[adjacent_idx]
    .iter()
    .enumerate()
    .map(|(pos, id)| (id.as_str(), pos))
    .collect();

  let mut keyed: Vec<(String, f64)> = layers[layer_idx]
    .iter()
    .map(|node_id| {
      let neighbours = match adjacent {
        Adjacent::Upstream => graph.upstream(node_id),
        Adjacent::Downstream => graph.downstream(node_id),
      };
      let positions: Vec<usize> = neighbours
        .iter()
        .filter_map(|n| adjacent_positions.get(n.as_str()).copied())
        .collect();

      // No neighbours in the adjacent layer: sort last, keeping relative order
      let barycenter = if positions.is_empty() {
        f64::MAX
      } else {
        positions.iter().sum::<usize>() as f64 / positions.len() as f64
      };

      (node_id.clone(), barycenter)
    })
    .collect();

  // Stable sort so equal barycenters keep their order
  keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

  layers[layer_idx] = keyed.into_iter().map(|(id, _)| id).collect();
}
