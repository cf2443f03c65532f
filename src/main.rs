use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dagscope_graph::Direction;
use dagscope_layout::HierarchicalEngine;
use dagscope_server::{AppState, ServerConfig};
use dagscope_worker::{LayoutRequest, LayoutWorker, WaitError};

/// Dagscope - a workflow DAG viewer backend with off-thread layout
#[derive(Parser)]
#[command(name = "dagscope")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the HTTP API server
  Serve {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Seed for the sample catalog (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Abandon layout computations that run longer than this
    #[arg(long, default_value_t = 30)]
    layout_timeout_secs: u64,
  },

  /// Compute a layout for a request file and print the positions
  Layout {
    /// Path to a layout request file (JSON: nodes, edges, layoutOptions)
    request_file: PathBuf,

    /// Override the algorithm name from the file
    #[arg(long)]
    name: Option<String>,

    /// Override the rank direction (TB, BT, LR or RL)
    #[arg(long)]
    direction: Option<Direction>,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| "dagscope=info,tower_http=info".into()),
    ))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let cli = Cli::parse();
  match cli.command {
    Commands::Serve {
      addr,
      seed,
      layout_timeout_secs,
    } => run_serve(addr, seed, Duration::from_secs(layout_timeout_secs)),
    Commands::Layout {
      request_file,
      name,
      direction,
      timeout_secs,
    } => run_layout(request_file, name, direction, Duration::from_secs(timeout_secs)),
  }
}

fn run_serve(addr: SocketAddr, seed: Option<u64>, layout_timeout: Duration) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    let state = AppState::new(ServerConfig {
      catalog_seed: seed,
      layout_timeout,
    });
    dagscope_server::serve(addr, state)
      .await
      .context("server failed")
  })
}

fn run_layout(
  request_file: PathBuf,
  name: Option<String>,
  direction: Option<Direction>,
  timeout: Duration,
) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_layout_async(request_file, name, direction, timeout).await })
}

async fn run_layout_async(
  request_file: PathBuf,
  name: Option<String>,
  direction: Option<Direction>,
  timeout: Duration,
) -> Result<()> {
  let content = tokio::fs::read_to_string(&request_file)
    .await
    .with_context(|| format!("failed to read request file: {}", request_file.display()))?;
  let request: LayoutRequest = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse request file: {}", request_file.display()))?;

  let (spec, mut options) = request.into_parts();
  if let Some(name) = name {
    options.name = name;
  }
  if let Some(direction) = direction {
    options.rank_dir = direction;
  }

  eprintln!(
    "Laying out {} nodes, {} edges with '{}'",
    spec.nodes.len(),
    spec.edges.len(),
    options.name
  );

  let worker = LayoutWorker::new(Arc::new(HierarchicalEngine::new()));
  let computation = worker.submit(spec, options)?;

  let wait = computation.wait_with_progress(|progress| {
    tracing::info!(progress, "layout progress");
  });
  // An expired timeout drops the wait, which abandons the computation
  let positions = match tokio::time::timeout(timeout, wait).await {
    Ok(Ok(positions)) => positions,
    Ok(Err(error @ WaitError::Failed { .. })) => return Err(error.into()),
    Ok(Err(WaitError::Cancelled)) => bail!("layout computation cancelled"),
    Err(_) => bail!("layout timed out after {}s", timeout.as_secs()),
  };

  eprintln!("Positioned {} nodes", positions.len());
  println!("{}", serde_json::to_string_pretty(&positions)?);

  Ok(())
}
