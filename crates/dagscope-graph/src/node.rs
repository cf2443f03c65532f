use serde::{Deserialize, Serialize};

/// A node to lay out.
///
/// Only `id` matters to the layout pipeline. Everything else the caller
/// attaches (labels, statuses, size hints) is collected into `data` and
/// carried through to engines untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
  pub id: String,
  #[serde(flatten)]
  pub data: serde_json::Map<String, serde_json::Value>,
}

impl NodeDescriptor {
  /// Create a node with no extra data.
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      data: serde_json::Map::new(),
    }
  }
}
