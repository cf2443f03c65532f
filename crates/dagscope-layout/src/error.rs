use thiserror::Error;

/// Errors from layout engines.
///
/// `DuplicateNode` and `DanglingEdge` arise while constructing an instance
/// from a graph spec; the rest while running a constructed instance.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("duplicate node id: {node_id}")]
  DuplicateNode { node_id: String },

  #[error("edge references unknown node: source={source_id}, target={target}")]
  DanglingEdge { source_id: String, target: String },

  #[error("unknown layout algorithm: {name}")]
  UnknownAlgorithm { name: String },

  #[error("graph contains a cycle through node: {node_id}")]
  CyclicGraph { node_id: String },
}
