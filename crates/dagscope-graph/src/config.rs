use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rank flow direction for hierarchical layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
  /// Top to bottom.
  #[default]
  Tb,
  /// Bottom to top.
  Bt,
  /// Left to right.
  Lr,
  /// Right to left.
  Rl,
}

impl Direction {
  /// Ranks stack along the y axis.
  pub fn is_vertical(self) -> bool {
    matches!(self, Self::Tb | Self::Bt)
  }

  /// Ranks grow against the axis (bottom-up or right-to-left).
  pub fn is_reversed(self) -> bool {
    matches!(self, Self::Bt | Self::Rl)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Tb => "TB",
      Self::Bt => "BT",
      Self::Lr => "LR",
      Self::Rl => "RL",
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Direction {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "TB" => Ok(Self::Tb),
      "BT" => Ok(Self::Bt),
      "LR" => Ok(Self::Lr),
      "RL" => Ok(Self::Rl),
      other => Err(format!("unknown rank direction: {} (expected TB, BT, LR or RL)", other)),
    }
  }
}

/// Options handed to a layout engine.
///
/// Serialized camelCase (`rankDir`, `nodeSep`, `rankSep`) to match the wire
/// format the viewer sends. Keys an engine does not understand are collected
/// into `extra` rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
  /// Algorithm name, e.g. "hierarchical" or "grid".
  pub name: String,
  pub rank_dir: Direction,
  /// Spacing between neighbouring nodes in one rank.
  pub node_sep: f64,
  /// Spacing between ranks.
  pub rank_sep: f64,
  /// Margin around the whole drawing.
  pub padding: f64,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      name: "hierarchical".to_string(),
      rank_dir: Direction::Tb,
      node_sep: 40.0,
      rank_sep: 80.0,
      padding: 20.0,
      extra: serde_json::Map::new(),
    }
  }
}

impl LayoutConfig {
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_rank_dir(mut self, rank_dir: Direction) -> Self {
    self.rank_dir = rank_dir;
    self
  }
}
