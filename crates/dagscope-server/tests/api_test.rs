//! Integration tests for the HTTP API, driven through `tower::oneshot`
//! without binding a socket.

use std::collections::BTreeSet;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use dagscope_server::{AppState, ServerConfig, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
  // Seeded catalog so listing assertions are stable
  router(AppState::new(ServerConfig {
    catalog_seed: Some(7),
    layout_timeout: Duration::from_secs(10),
  }))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
  let response = app
    .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
    .await
    .unwrap();
  let status = response.status();
  let body = response.into_body().collect().await.unwrap().to_bytes();
  let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
  (status, json)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
  let response = app
    .oneshot(
      Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap(),
    )
    .await
    .unwrap();
  let status = response.status();
  let body = response.into_body().collect().await.unwrap().to_bytes();
  let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
  (status, json)
}

#[tokio::test]
async fn health_answers_ok() {
  let response = app()
    .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let body = response.into_body().collect().await.unwrap().to_bytes();
  assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn listing_paginates() {
  let (status, body) = get(app(), "/api/workflows?page=1&limit=10").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["workflows"].as_array().unwrap().len(), 10);
  assert_eq!(body["total_count"], json!(50));

  // Last page carries the remainder
  let (_, body) = get(app(), "/api/workflows?page=4&limit=15").await;
  assert_eq!(body["workflows"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn listing_filters_by_search() {
  let (status, body) = get(app(), "/api/workflows?search=tiny_dag").await;
  assert_eq!(status, StatusCode::OK);

  let workflows = body["workflows"].as_array().unwrap();
  assert_eq!(workflows.len(), 1);
  assert_eq!(workflows[0]["workflow_id"], json!("tiny_dag_5"));
  assert_eq!(body["total_count"], json!(1));
}

#[tokio::test]
async fn listing_filters_by_status() {
  let (_, active) = get(app(), "/api/workflows?status=active&limit=100").await;
  let (_, paused) = get(app(), "/api/workflows?status=paused&limit=100").await;

  let active_count = active["workflows"].as_array().unwrap().len();
  let paused_count = paused["workflows"].as_array().unwrap().len();
  assert_eq!(active_count + paused_count, 50);
  for workflow in paused["workflows"].as_array().unwrap() {
    assert_eq!(workflow["paused"], json!(true));
  }
}

#[tokio::test]
async fn listing_sorts_by_workflow_id() {
  let (_, body) =
    get(app(), "/api/workflows?sort_by=workflow_id&sort_order=desc&limit=100").await;

  let ids: Vec<&str> = body["workflows"]
    .as_array()
    .unwrap()
    .iter()
    .map(|workflow| workflow["workflow_id"].as_str().unwrap())
    .collect();
  let mut sorted = ids.clone();
  sorted.sort();
  sorted.reverse();
  assert_eq!(ids, sorted);
}

#[tokio::test]
async fn graph_endpoint_serves_the_advertised_size() {
  let (status, body) = get(app(), "/api/workflows/tiny_dag_5/graph").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["workflow_id"], json!("tiny_dag_5"));

  let tasks = body["tasks"].as_array().unwrap();
  assert_eq!(tasks.len(), 5);

  let ids: BTreeSet<&str> = tasks
    .iter()
    .map(|task| task["id"].as_str().unwrap())
    .collect();
  for edge in body["edges"].as_array().unwrap() {
    assert!(ids.contains(edge["source"].as_str().unwrap()));
    assert!(ids.contains(edge["target"].as_str().unwrap()));
  }
}

#[tokio::test]
async fn layout_endpoint_positions_every_node() {
  let (status, body) = post_json(
    app(),
    "/api/layout",
    json!({
      "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
      "edges": [
        {"source": "a", "target": "b"},
        {"source": "b", "target": "c"}
      ],
      "layoutOptions": {"name": "hierarchical", "rankDir": "TB"}
    }),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  let positions = body["positions"].as_object().unwrap();
  let keys: BTreeSet<&str> = positions.keys().map(String::as_str).collect();
  assert_eq!(keys, BTreeSet::from(["a", "b", "c"]));
  for position in positions.values() {
    assert!(position["x"].is_number());
    assert!(position["y"].is_number());
  }
}

#[tokio::test]
async fn layout_endpoint_rejects_dangling_edges() {
  let (status, body) = post_json(
    app(),
    "/api/layout",
    json!({
      "nodes": [{"id": "a"}, {"id": "b"}],
      "edges": [{"source": "a", "target": "zzz"}]
    }),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  let error = body["error"].as_str().unwrap();
  assert!(error.contains("zzz"), "unexpected error: {}", error);
  assert!(body.get("positions").is_none());
}

#[tokio::test]
async fn layout_endpoint_rejects_unknown_algorithms() {
  let (status, body) = post_json(
    app(),
    "/api/layout",
    json!({
      "nodes": [{"id": "a"}],
      "edges": [],
      "layoutOptions": {"name": "starburst"}
    }),
  )
  .await;

  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("starburst"));
}

#[tokio::test]
async fn catalog_graphs_lay_out_end_to_end() {
  // A catalog graph fed back through the layout endpoint positions every task
  let (_, graph) = get(app(), "/api/workflows/tiny_dag_5/graph").await;

  let nodes: Vec<Value> = graph["tasks"]
    .as_array()
    .unwrap()
    .iter()
    .map(|task| json!({"id": task["id"]}))
    .collect();
  let (status, body) = post_json(
    app(),
    "/api/layout",
    json!({"nodes": nodes, "edges": graph["edges"]}),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["positions"].as_object().unwrap().len(), 5);
}
