//! Shared server state.

use std::sync::Arc;
use std::time::Duration;

use dagscope_layout::{HierarchicalEngine, LayoutEngine};

use crate::catalog::Catalog;

/// Server tuning, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
  /// Seed for the sample catalog. `None` draws one from entropy.
  pub catalog_seed: Option<u64>,
  /// How long a layout request may compute before it is abandoned.
  pub layout_timeout: Duration,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      catalog_seed: None,
      layout_timeout: Duration::from_secs(30),
    }
  }
}

/// State shared across request handlers.
///
/// The catalog is generated once here; handlers only read it. The engine is
/// shared too, but each layout request drives it through its own worker.
#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<Catalog>,
  pub engine: Arc<dyn LayoutEngine>,
  pub layout_timeout: Duration,
}

impl AppState {
  pub fn new(config: ServerConfig) -> Self {
    Self {
      catalog: Arc::new(Catalog::generate(config.catalog_seed)),
      engine: Arc::new(HierarchicalEngine::new()),
      layout_timeout: config.layout_timeout,
    }
  }

  /// Swap in a different layout engine.
  pub fn with_engine(mut self, engine: Arc<dyn LayoutEngine>) -> Self {
    self.engine = engine;
    self
  }
}
