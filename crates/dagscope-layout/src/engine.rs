//! The engine seam: traits the worker drives layouts through.

use dagscope_graph::{GraphSpec, LayoutConfig, Position};
use tokio::sync::oneshot;

use crate::error::EngineError;

/// A layout algorithm provider.
///
/// Engines are injected into the worker as trait objects; the worker never
/// names a concrete algorithm. Implementations must be cheap to share, the
/// per-graph state lives in the [`LayoutInstance`].
pub trait LayoutEngine: Send + Sync {
  /// Build a layout instance over the given graph.
  ///
  /// Rejects specs that repeat a node id or whose edges reference nodes
  /// outside the node set.
  fn construct(&self, spec: &GraphSpec) -> Result<Box<dyn LayoutInstance>, EngineError>;
}

/// One constructed layout over one graph.
///
/// Single-use: construct, `run`, read positions, drop.
pub trait LayoutInstance: Send {
  /// Compute positions for the graph this instance was constructed over.
  ///
  /// Implementations fire `ready` once node placement is final, before
  /// returning. An instance that never fires it is tolerated by callers.
  fn run(&mut self, options: &LayoutConfig, ready: ReadySignal) -> Result<(), EngineError>;

  /// Position of one node. `None` before `run` or for unknown ids.
  fn position(&self, node_id: &str) -> Option<Position>;
}

impl std::fmt::Debug for dyn LayoutInstance {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("dyn LayoutInstance")
  }
}

/// One-shot layout-ready notification handed to [`LayoutInstance::run`].
///
/// Firing consumes the signal, so readiness cannot be reported twice.
/// Dropping it unfired just means no notification.
#[derive(Debug)]
pub struct ReadySignal {
  sender: oneshot::Sender<()>,
}

impl ReadySignal {
  /// Create a signal and the receiver observing it.
  pub fn channel() -> (Self, oneshot::Receiver<()>) {
    let (sender, receiver) = oneshot::channel();
    (Self { sender }, receiver)
  }

  /// Report that node placement is final.
  pub fn fire(self) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(());
  }
}
