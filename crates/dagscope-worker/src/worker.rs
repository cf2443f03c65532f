//! The layout worker service.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dagscope_graph::{GraphSpec, LayoutConfig, PositionMap};
use dagscope_layout::{EngineError, LayoutEngine, ReadySignal};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::computation::LayoutComputation;
use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::protocol::LayoutEvent;

/// The off-thread layout computation service.
///
/// One computation may be in flight at a time; the instance is reusable once
/// the previous computation has delivered its terminal event. Dropping the
/// worker cancels everything it spawned.
///
/// # Usage
///
/// ```ignore
/// let worker = LayoutWorker::new(Arc::new(HierarchicalEngine::new()));
/// let computation = worker.submit(spec, LayoutConfig::default())?;
/// let positions = computation.wait().await?;
/// ```
pub struct LayoutWorker {
  engine: Arc<dyn LayoutEngine>,
  config: WorkerConfig,
  in_flight: Arc<AtomicBool>,
  cancel: CancellationToken,
}

impl LayoutWorker {
  /// Create a worker over the given engine with default progress tuning.
  pub fn new(engine: Arc<dyn LayoutEngine>) -> Self {
    Self::with_config(engine, WorkerConfig::default())
  }

  /// Create a worker with custom progress tuning.
  pub fn with_config(engine: Arc<dyn LayoutEngine>, config: WorkerConfig) -> Self {
    Self {
      engine,
      config,
      in_flight: Arc::new(AtomicBool::new(false)),
      cancel: CancellationToken::new(),
    }
  }

  /// Whether a computation is currently in flight.
  pub fn is_busy(&self) -> bool {
    self.in_flight.load(Ordering::SeqCst)
  }

  /// Start a layout computation.
  ///
  /// Fails with [`WorkerError::Busy`] while another computation is in
  /// flight. On success the computation runs in its own task, with the
  /// engine on the blocking pool, and reports through the returned
  /// [`LayoutComputation`].
  pub fn submit(
    &self,
    spec: GraphSpec,
    options: LayoutConfig,
  ) -> Result<LayoutComputation, WorkerError> {
    if self
      .in_flight
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return Err(WorkerError::Busy);
    }

    let computation_id = Uuid::new_v4().to_string();
    let cancel = self.cancel.child_token();
    // Unbounded so a slow caller never stalls the ticker; volume is one
    // event per tick.
    let (events, events_rx) = mpsc::unbounded_channel();

    let task = ComputationTask {
      engine: self.engine.clone(),
      config: self.config.clone(),
      spec,
      options,
      computation_id: computation_id.clone(),
      events,
      cancel: cancel.clone(),
      slot: SlotGuard(self.in_flight.clone()),
    };
    tokio::spawn(task.run());

    Ok(LayoutComputation::new(computation_id, events_rx, cancel))
  }
}

impl Drop for LayoutWorker {
  fn drop(&mut self) {
    self.cancel.cancel();
  }
}

/// Clears the worker's in-flight flag when dropped, whatever the exit path.
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

/// State for one spawned computation.
struct ComputationTask {
  engine: Arc<dyn LayoutEngine>,
  config: WorkerConfig,
  spec: GraphSpec,
  options: LayoutConfig,
  computation_id: String,
  events: mpsc::UnboundedSender<LayoutEvent>,
  cancel: CancellationToken,
  slot: SlotGuard,
}

impl ComputationTask {
  #[instrument(
    name = "layout_compute",
    skip(self),
    fields(
      computation_id = %self.computation_id,
      algorithm = %self.options.name,
    )
  )]
  async fn run(self) {
    let ComputationTask {
      engine,
      config,
      spec,
      options,
      computation_id,
      events,
      cancel,
      slot,
    } = self;

    info!(
      computation_id = %computation_id,
      nodes = spec.nodes.len(),
      edges = spec.edges.len(),
      algorithm = %options.name,
      "layout_started"
    );

    let emit = |event: LayoutEvent| {
      // Ignore send errors - receiver may have been dropped
      let _ = events.send(event);
    };

    let (ready, mut ready_rx) = ReadySignal::channel();
    let mut engine_task = tokio::task::spawn_blocking({
      move || -> Result<PositionMap, EngineError> {
        let mut instance = engine.construct(&spec)?;
        instance.run(&options, ready)?;
        let positions = spec
          .node_ids()
          .filter_map(|id| instance.position(id).map(|p| (id.to_string(), p)))
          .collect();
        Ok(positions)
      }
    });

    let mut ticker = time::interval_at(
      Instant::now() + config.tick_interval,
      config.tick_interval,
    );
    let mut ticking = true;
    let mut ready_done = false;
    let mut progress = 0.0_f64;

    let join = loop {
      tokio::select! {
        _ = cancel.cancelled() => break None,

        _ = ticker.tick(), if ticking => {
          progress += config.tick_increment;
          if progress < config.ready_progress {
            emit(LayoutEvent::Progress { progress });
          } else {
            // Reached the band reserved for the ready signal; go quiet
            ticking = false;
          }
        }

        fired = &mut ready_rx, if !ready_done => {
          ready_done = true;
          if fired.is_ok() {
            ticking = false;
            info!(computation_id = %computation_id, "layout_ready");
            emit(LayoutEvent::Progress { progress: config.ready_progress });
          }
          // A dropped signal is an engine without readiness reporting;
          // the synthetic ticker keeps going
        }

        join = &mut engine_task => break Some(join),
      }
    };

    let outcome = match join {
      Some(outcome) => outcome,
      None => {
        info!(computation_id = %computation_id, "layout_cancelled");
        // A running blocking engine cannot be interrupted; abort only keeps
        // a queued one from starting. Hold the slot until the run returns
        // so the worker stays busy for exactly as long as the engine does.
        engine_task.abort();
        let _ = engine_task.await;
        return;
      }
    };

    if cancel.is_cancelled() {
      // Abandonment raced completion; the result is stale
      info!(computation_id = %computation_id, "layout_cancelled");
      return;
    }

    // Readiness may land in the same instant the engine finishes; fold it
    // in first so the ready progress still precedes the terminal event.
    if !ready_done && ready_rx.try_recv().is_ok() {
      info!(computation_id = %computation_id, "layout_ready");
      emit(LayoutEvent::Progress { progress: config.ready_progress });
    }

    // Free the slot before the terminal event is delivered, so a caller
    // that has observed the terminal can submit again immediately.
    drop(slot);

    match outcome {
      Ok(Ok(positions)) => {
        info!(
          computation_id = %computation_id,
          positioned = positions.len(),
          "layout_completed"
        );
        emit(LayoutEvent::LayoutComplete { positions });
      }
      Ok(Err(engine_error)) => {
        error!(
          computation_id = %computation_id,
          error = %engine_error,
          "layout_failed"
        );
        emit(LayoutEvent::Error {
          error: engine_error.to_string(),
        });
      }
      Err(join_error) => {
        if !join_error.is_panic() {
          // Runtime teardown; nobody is listening
          return;
        }
        let message = panic_message(join_error.into_panic());
        error!(
          computation_id = %computation_id,
          error = %message,
          "layout_failed"
        );
        emit(LayoutEvent::Error { error: message });
      }
    }
  }
}

/// Render a payload caught from a panicking engine.
fn panic_message(panic: Box<dyn Any + Send>) -> String {
  if let Some(message) = panic.downcast_ref::<&str>() {
    format!("layout engine panicked: {}", message)
  } else if let Some(message) = panic.downcast_ref::<String>() {
    format!("layout engine panicked: {}", message)
  } else {
    "layout engine panicked".to_string()
  }
}
