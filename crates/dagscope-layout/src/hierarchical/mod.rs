//! Layered ("hierarchical") layout in the dagre style.
//!
//! Three phases, run in order:
//! 1. rank: longest-path layer assignment via topological traversal
//! 2. order: barycenter sweeps within layers to reduce edge crossings
//! 3. position: coordinates from the spacing options and rank direction

mod order;
mod position;
mod rank;

use std::collections::HashSet;

use dagscope_graph::{Graph, GraphSpec, LayoutConfig, Position, PositionMap};
use tracing::debug;

use crate::engine::{LayoutEngine, LayoutInstance, ReadySignal};
use crate::error::EngineError;
use crate::grid;

/// The engine the binaries ship.
///
/// Handles algorithm name "hierarchical" (layered placement) and "grid"
/// (row/column placement). Any other name fails the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalEngine;

impl HierarchicalEngine {
  pub fn new() -> Self {
    Self
  }
}

impl LayoutEngine for HierarchicalEngine {
  fn construct(&self, spec: &GraphSpec) -> Result<Box<dyn LayoutInstance>, EngineError> {
    validate(spec)?;
    Ok(Box::new(HierarchicalInstance {
      spec: spec.clone(),
      positions: PositionMap::new(),
    }))
  }
}

/// Reject specs no run could place.
fn validate(spec: &GraphSpec) -> Result<(), EngineError> {
  let mut seen = HashSet::new();
  for id in spec.node_ids() {
    if !seen.insert(id) {
      return Err(EngineError::DuplicateNode {
        node_id: id.to_string(),
      });
    }
  }
  for edge in &spec.edges {
    if !seen.contains(edge.source.as_str()) || !seen.contains(edge.target.as_str()) {
      return Err(EngineError::DanglingEdge {
        source_id: edge.source.clone(),
        target: edge.target.clone(),
      });
    }
  }
  Ok(())
}

struct HierarchicalInstance {
  spec: GraphSpec,
  positions: PositionMap,
}

impl LayoutInstance for HierarchicalInstance {
  fn run(&mut self, options: &LayoutConfig, ready: ReadySignal) -> Result<(), EngineError> {
    let positions = match options.name.as_str() {
      "hierarchical" => layered(&self.spec, options)?,
      "grid" => grid::place(&self.spec, options),
      other => {
        return Err(EngineError::UnknownAlgorithm {
          name: other.to_string(),
        });
      }
    };

    debug!(
      algorithm = %options.name,
      nodes = positions.len(),
      "layout positions computed"
    );

    self.positions = positions;
    ready.fire();
    Ok(())
  }

  fn position(&self, node_id: &str) -> Option<Position> {
    self.positions.get(node_id).copied()
  }
}

/// The layered pipeline: rank, order, position.
fn layered(spec: &GraphSpec, options: &LayoutConfig) -> Result<PositionMap, EngineError> {
  let graph = Graph::new(spec);
  let mut layers = rank::assign_layers(&graph)?;
  order::reduce_crossings(&graph, &mut layers);
  Ok(position::place(&layers, options))
}
