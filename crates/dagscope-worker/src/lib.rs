//! Dagscope Worker
//!
//! The off-thread layout computation service. A [`LayoutWorker`] accepts one
//! computation at a time, runs the layout engine on the blocking pool so the
//! caller's runtime never stalls, and streams [`LayoutEvent`]s back:
//! synthetic progress while the engine computes, the ready value when the
//! engine reports placement is final, then exactly one terminal event.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       LayoutWorker                       │
//! │  - submit(spec, options) → LayoutComputation             │
//! │  - one computation in flight, guarded by an atomic slot  │
//! │  - drop cancels everything it spawned                    │
//! └──────────────────────────────────────────────────────────┘
//!                             │ spawns
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                    computation task                      │
//! │  - engine construct/run/read inside spawn_blocking       │
//! │  - synthetic progress ticker + ready folding             │
//! │  - exactly one terminal event per computation            │
//! └──────────────────────────────────────────────────────────┘
//!                             │ events
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                    LayoutComputation                     │
//! │  - recv() event stream, wait() resolves to positions     │
//! │  - abandon()/drop suppress anything still in flight      │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod computation;
mod config;
mod error;
mod protocol;
mod worker;

pub use computation::LayoutComputation;
pub use config::WorkerConfig;
pub use error::{WaitError, WorkerError};
pub use protocol::{LayoutEvent, LayoutRequest};
pub use worker::LayoutWorker;
