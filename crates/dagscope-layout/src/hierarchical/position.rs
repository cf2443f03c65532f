//! Coordinate assignment from layer ordering and spacing options.

use dagscope_graph::{LayoutConfig, Position, PositionMap};

/// Turn ordered layers into concrete coordinates.
///
/// The rank axis advances by `rank_sep` per layer and the cross axis by
/// `node_sep` per node, with each layer centred against the widest one.
/// `rank_dir` decides which screen axis is the rank axis and whether ranks
/// grow towards or away from the origin.
pub(crate) fn place(layers: &[Vec<String>], options: &LayoutConfig) -> PositionMap {
  let mut positions = PositionMap::new();
  if layers.is_empty() {
    return positions;
  }

  let widest = layers.iter().map(|layer| layer.len()).max().unwrap_or(0);
  let rank_extent = layers.len().saturating_sub(1) as f64 * options.rank_sep;

  for (layer_idx, layer) in layers.iter().enumerate() {
    let centre_offset = (widest - layer.len()) as f64 * options.node_sep / 2.0;

    let rank = layer_idx as f64 * options.rank_sep;
    let main = if options.rank_dir.is_reversed() {
      rank_extent - rank
    } else {
      rank
    };

    for (order, node_id) in layer.iter().enumerate() {
      let cross = centre_offset + order as f64 * options.node_sep;
      let (x, y) = if options.rank_dir.is_vertical() {
        (options.padding + cross, options.padding + main)
      } else {
        (options.padding + main, options.padding + cross)
      };
      positions.insert(node_id.clone(), Position::new(x, y));
    }
  }

  positions
}
