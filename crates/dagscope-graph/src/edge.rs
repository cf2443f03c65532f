use serde::{Deserialize, Serialize};

/// A directed edge from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeDescriptor {
  pub source: String,
  pub target: String,
}

impl EdgeDescriptor {
  pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      target: target.into(),
    }
  }
}
