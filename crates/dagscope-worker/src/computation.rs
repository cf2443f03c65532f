//! The caller's side of a layout computation.

use dagscope_graph::PositionMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::WaitError;
use crate::protocol::LayoutEvent;

/// A handle to one in-flight layout computation.
///
/// Consume events one at a time with [`recv`](Self::recv), or resolve the
/// whole computation with [`wait`](Self::wait). Dropping the handle abandons
/// the computation.
pub struct LayoutComputation {
  computation_id: String,
  events: mpsc::UnboundedReceiver<LayoutEvent>,
  cancel: CancellationToken,
  abandoned: bool,
}

impl LayoutComputation {
  pub(crate) fn new(
    computation_id: String,
    events: mpsc::UnboundedReceiver<LayoutEvent>,
    cancel: CancellationToken,
  ) -> Self {
    Self {
      computation_id,
      events,
      cancel,
      abandoned: false,
    }
  }

  /// Unique id of this computation, as carried in the worker's log events.
  pub fn id(&self) -> &str {
    &self.computation_id
  }

  /// Receive the next event.
  ///
  /// Returns `None` once the computation has delivered its terminal event,
  /// been abandoned, or lost its worker.
  pub async fn recv(&mut self) -> Option<LayoutEvent> {
    if self.abandoned {
      return None;
    }
    self.events.recv().await
  }

  /// Abandon the computation.
  ///
  /// The worker stops the progress ticker and discards whatever the engine
  /// still produces; no further event is observable through this handle,
  /// including events already queued.
  pub fn abandon(&mut self) {
    self.abandoned = true;
    self.cancel.cancel();
    self.events.close();
  }

  /// Resolve the computation, discarding progress events.
  pub async fn wait(self) -> Result<PositionMap, WaitError> {
    self.wait_with_progress(|_| {}).await
  }

  /// Resolve the computation, relaying each progress value to `on_progress`.
  pub async fn wait_with_progress<F>(mut self, mut on_progress: F) -> Result<PositionMap, WaitError>
  where
    F: FnMut(f64),
  {
    while let Some(event) = self.recv().await {
      match event {
        LayoutEvent::Progress { progress } => on_progress(progress),
        LayoutEvent::LayoutComplete { positions } => return Ok(positions),
        LayoutEvent::Error { error } => return Err(WaitError::Failed { message: error }),
      }
    }
    Err(WaitError::Cancelled)
  }
}

impl Drop for LayoutComputation {
  fn drop(&mut self) {
    // Cancelling after a terminal event is a no-op
    self.cancel.cancel();
  }
}
