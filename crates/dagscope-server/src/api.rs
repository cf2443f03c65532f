//! Route definitions and request handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use dagscope_worker::{LayoutRequest, LayoutWorker, WaitError};
use tokio::time::timeout;
use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::SizeAbove;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog;
use crate::error::ApiError;
use crate::models::{LayoutResponse, ListQuery, ListResponse, WorkflowGraph, WorkflowSummary};
use crate::state::AppState;

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

  // Compress bodies above 1 KiB; large graph payloads gzip well
  let compression = CompressionLayer::new().compress_when(SizeAbove::new(1024));

  Router::new()
    .route("/health", get(|| async { "OK" }))
    .route("/api/workflows", get(list_workflows))
    .route("/api/workflows/:workflow_id/graph", get(get_workflow_graph))
    .route("/api/layout", post(compute_layout))
    .layer(cors)
    .layer(compression)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Bind and run the server until the process ends.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
  let app = router(state);
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!(addr = %addr, "dagscope server listening");
  axum::serve(listener, app).await
}

async fn list_workflows(
  State(state): State<AppState>,
  Query(params): Query<ListQuery>,
) -> Json<ListResponse> {
  let limit = params.limit.unwrap_or(25);
  let page = params.page.unwrap_or(1).max(1);
  let offset = (page - 1) * limit;

  let mut workflows: Vec<WorkflowSummary> = state.catalog.workflows().to_vec();

  if let Some(search) = &params.search {
    let needle = search.to_lowercase();
    workflows.retain(|workflow| {
      workflow.workflow_id.to_lowercase().contains(&needle)
        || workflow.owner.to_lowercase().contains(&needle)
        || workflow
          .description
          .as_ref()
          .is_some_and(|description| description.to_lowercase().contains(&needle))
    });
  }

  if let Some(status) = &params.status {
    match status.as_str() {
      "active" => workflows.retain(|workflow| !workflow.paused),
      "paused" => workflows.retain(|workflow| workflow.paused),
      "success" => {
        workflows.retain(|workflow| workflow.success_count > 0 && workflow.failed_count == 0)
      }
      "failed" => workflows.retain(|workflow| workflow.failed_count > 0),
      "running" => workflows.retain(|workflow| workflow.running_count > 0),
      _ => {}
    }
  }

  if let Some(tags) = &params.tags {
    let wanted: Vec<&str> = tags.split(',').collect();
    workflows.retain(|workflow| {
      wanted
        .iter()
        .any(|tag| workflow.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    });
  }

  if let Some(sort_by) = &params.sort_by {
    let asc = params
      .sort_order
      .as_ref()
      .is_none_or(|order| order == "asc");

    match sort_by.as_str() {
      "owner" => workflows.sort_by(|a, b| a.owner.cmp(&b.owner)),
      "last_run" => workflows.sort_by(|a, b| a.last_run.cmp(&b.last_run)),
      "next_run" => workflows.sort_by(|a, b| a.next_run.cmp(&b.next_run)),
      _ => workflows.sort_by(|a, b| a.workflow_id.cmp(&b.workflow_id)),
    }
    if !asc {
      workflows.reverse();
    }
  }

  let total_count = workflows.len();
  let workflows: Vec<WorkflowSummary> =
    workflows.into_iter().skip(offset).take(limit).collect();

  Json(ListResponse {
    workflows,
    total_count,
  })
}

async fn get_workflow_graph(Path(workflow_id): Path<String>) -> Json<WorkflowGraph> {
  Json(catalog::workflow_graph(&workflow_id))
}

/// Run one layout computation for the submitted graph.
///
/// Each request gets its own worker, so concurrent requests never contend
/// for a computation slot. The request body is the worker protocol's
/// request; a success body is its `layoutComplete` payload. Computations
/// that outrun the server timeout are abandoned, not awaited.
async fn compute_layout(
  State(state): State<AppState>,
  Json(request): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, ApiError> {
  let (spec, options) = request.into_parts();
  let worker = LayoutWorker::new(Arc::clone(&state.engine));
  let computation = worker.submit(spec, options)?;

  // Dropping the unresolved wait drops the computation handle, which
  // abandons it; whatever the engine still produces is discarded.
  match timeout(state.layout_timeout, computation.wait()).await {
    Ok(Ok(positions)) => Ok(Json(LayoutResponse { positions })),
    Ok(Err(WaitError::Failed { message })) => Err(ApiError::LayoutFailed { message }),
    Ok(Err(WaitError::Cancelled)) => Err(ApiError::LayoutCancelled),
    Err(_) => Err(ApiError::LayoutTimeout),
  }
}
