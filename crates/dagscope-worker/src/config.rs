use std::time::Duration;

/// Tuning for the synthetic progress ticker.
///
/// An engine only tells the worker when placement is final, so progress in
/// between is synthesized on a timer: every `tick_interval` the estimate
/// grows by `tick_increment` and is emitted while below `ready_progress`.
/// The band at and above `ready_progress` is reserved for the engine's own
/// ready signal. The exact cadence carries no meaning; callers should treat
/// progress values as an animation hint.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
  pub tick_interval: Duration,
  pub tick_increment: f64,
  pub ready_progress: f64,
}

impl Default for WorkerConfig {
  fn default() -> Self {
    Self {
      tick_interval: Duration::from_millis(200),
      tick_increment: 0.1,
      ready_progress: 0.9,
    }
  }
}
