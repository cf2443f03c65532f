//! Dagscope Layout
//!
//! Pluggable layout engines for dagscope. The worker owns scheduling and
//! progress reporting; engines own geometry. An engine is handed a
//! `GraphSpec`, builds a [`LayoutInstance`] over it, runs it with a
//! `LayoutConfig` and exposes one `Position` per node afterwards.
//!
//! [`HierarchicalEngine`] is what the binaries ship: a layered placement in
//! the dagre style, plus a trivial grid fallback for callers that do not
//! care about hierarchy.

mod engine;
mod error;
mod grid;
mod hierarchical;

pub use engine::{LayoutEngine, LayoutInstance, ReadySignal};
pub use error::EngineError;
pub use hierarchical::HierarchicalEngine;
