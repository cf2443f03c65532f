//! Row/column placement, ignoring edges entirely.

use dagscope_graph::{GraphSpec, LayoutConfig, Position, PositionMap};

/// Place nodes on a square-ish grid in submission order.
///
/// Columns advance by `node_sep`, rows by `rank_sep`.
pub(crate) fn place(spec: &GraphSpec, options: &LayoutConfig) -> PositionMap {
  let mut positions = PositionMap::new();
  let count = spec.nodes.len();
  if count == 0 {
    return positions;
  }

  let columns = (count as f64).sqrt().ceil() as usize;

  for (index, id) in spec.node_ids().enumerate() {
    let column = index % columns;
    let row = index / columns;
    positions.insert(
      id.to_string(),
      Position::new(
        options.padding + column as f64 * options.node_sep,
        options.padding + row as f64 * options.rank_sep,
      ),
    );
  }

  positions
}

#[cfg(test)]
mod tests {
  use super::*;
  use dagscope_graph::NodeDescriptor;

  #[test]
  fn four_nodes_make_a_two_by_two() {
    let spec = GraphSpec::new(
      ["a", "b", "c", "d"].map(NodeDescriptor::new).to_vec(),
      vec![],
    );
    let positions = place(&spec, &LayoutConfig::default());

    assert_eq!(positions["a"], Position::new(20.0, 20.0));
    assert_eq!(positions["b"], Position::new(60.0, 20.0));
    assert_eq!(positions["c"], Position::new(20.0, 100.0));
    assert_eq!(positions["d"], Position::new(60.0, 100.0));
  }
}
