//! API data model: catalog entries and task graphs.

use chrono::{DateTime, Utc};
use dagscope_graph::{EdgeDescriptor, GraphSpec, NodeDescriptor, PositionMap};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// One workflow in the catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
  pub id: Uuid,
  pub workflow_id: String,
  pub description: Option<String>,
  pub file_path: String,
  pub owner: String,
  pub paused: bool,
  pub last_run: Option<DateTime<Utc>>,
  pub next_run: Option<DateTime<Utc>>,
  pub runs_count: usize,
  pub success_count: usize,
  pub failed_count: usize,
  pub running_count: usize,
  pub schedule_interval: String,
  pub tags: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Execution status of a task node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
  Pending,
  Succeeded,
  Queued,
  Running,
  Failed,
  Skipped,
  Paused,
}

/// One task in a workflow's graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
  pub id: String,
  pub name: String,
  pub status: TaskStatus,
  pub duration: Option<f64>,
  pub start_time: Option<DateTime<Utc>>,
  pub end_time: Option<DateTime<Utc>>,
  pub operator: String,
  pub retries: usize,
  pub max_retries: usize,
}

/// A workflow's task graph as served to viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
  pub workflow_id: String,
  pub tasks: Vec<TaskNode>,
  pub edges: Vec<EdgeDescriptor>,
}

impl WorkflowGraph {
  /// View this graph as a layout spec.
  ///
  /// Task names and statuses ride along as node data so renderers can label
  /// what the layout engine positions.
  pub fn to_graph_spec(&self) -> GraphSpec {
    let nodes = self
      .tasks
      .iter()
      .map(|task| {
        let mut node = NodeDescriptor::new(&task.id);
        node.data.insert("label".to_string(), json!(task.name));
        node.data.insert("status".to_string(), json!(task.status));
        node
      })
      .collect();
    GraphSpec::new(nodes, self.edges.clone())
  }
}

/// Query parameters accepted by the workflow listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
  pub page: Option<usize>,
  pub limit: Option<usize>,
  pub search: Option<String>,
  pub status: Option<String>,
  pub tags: Option<String>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
}

/// One page of the workflow listing.
///
/// `total_count` counts matches after filtering, before pagination, so
/// clients can size their pagers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
  pub workflows: Vec<WorkflowSummary>,
  pub total_count: usize,
}

/// Body of a successful layout response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
  pub positions: PositionMap,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn task(id: &str, name: &str, status: TaskStatus) -> TaskNode {
    TaskNode {
      id: id.to_string(),
      name: name.to_string(),
      status,
      duration: None,
      start_time: None,
      end_time: None,
      operator: "ShellTask".to_string(),
      retries: 0,
      max_retries: 3,
    }
  }

  #[test]
  fn status_uses_uppercase_wire_names() {
    assert_eq!(
      serde_json::to_value(TaskStatus::Succeeded).unwrap(),
      json!("SUCCEEDED")
    );
    let status: TaskStatus = serde_json::from_value(json!("PENDING")).unwrap();
    assert_eq!(status, TaskStatus::Pending);
  }

  #[test]
  fn graph_converts_to_layout_spec() {
    let graph = WorkflowGraph {
      workflow_id: "etl_orders".to_string(),
      tasks: vec![
        task("task_0", "extract", TaskStatus::Succeeded),
        task("task_1", "load", TaskStatus::Running),
      ],
      edges: vec![EdgeDescriptor::new("task_0", "task_1")],
    };

    let spec = graph.to_graph_spec();
    let ids: Vec<&str> = spec.node_ids().collect();
    assert_eq!(ids, vec!["task_0", "task_1"]);
    assert_eq!(spec.nodes[0].data.get("label"), Some(&json!("extract")));
    assert_eq!(spec.nodes[1].data.get("status"), Some(&json!("RUNNING")));
    assert_eq!(spec.edges, graph.edges);
  }
}
