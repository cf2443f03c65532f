use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A computed 2D position for one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

impl Position {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// Positions keyed by node id.
///
/// Ordered map so serialized output is stable for a given graph.
pub type PositionMap = BTreeMap<String, Position>;
