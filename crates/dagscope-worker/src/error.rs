use thiserror::Error;

/// Errors from submitting work to a `LayoutWorker`.
#[derive(Debug, Error)]
pub enum WorkerError {
  /// A computation is already in flight on this worker instance.
  ///
  /// The slot frees once the previous computation delivers its terminal
  /// event; an abandoned computation holds it until its engine run
  /// actually returns.
  #[error("a layout computation is already in flight on this worker")]
  Busy,
}

/// Errors from resolving a `LayoutComputation`.
#[derive(Debug, Error)]
pub enum WaitError {
  /// The computation ended with a terminal error event.
  #[error("layout failed: {message}")]
  Failed { message: String },

  /// The computation was abandoned, or its worker dropped, before a
  /// terminal event arrived.
  #[error("layout computation cancelled")]
  Cancelled,
}
