//! Sample workflow catalog.
//!
//! dagscope ships without a scheduler attached, so the server fabricates a
//! plausible catalog at startup: 45 synthetic workflows plus five fixed-size
//! ones that exercise the layout path at known graph sizes. Task graphs are
//! derived from the workflow id alone, so refetching a workflow always
//! yields the same structure.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration, Utc};
use dagscope_graph::EdgeDescriptor;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use crate::models::{TaskNode, TaskStatus, WorkflowGraph, WorkflowSummary};

const NAME_PREFIXES: [&str; 14] = [
  "etl_", "data_pipeline_", "process_", "transform_", "extract_", "load_", "sync_", "analytics_",
  "report_", "backup_", "cleanup_", "validate_", "monitor_", "alert_",
];

const NAME_SUFFIXES: [&str; 20] = [
  "daily", "hourly", "weekly", "monthly", "sales", "inventory", "users", "events", "transactions",
  "logs", "metrics", "alerts", "notifications", "products", "orders", "shipments", "payments",
  "refunds", "customers", "suppliers",
];

const OWNERS: [&str; 11] = [
  "admin", "dagscope", "john_doe", "jane_smith", "data_engineer", "data_scientist",
  "data_analyst", "system_admin", "devops", "sre", "developer",
];

const SCHEDULE_INTERVALS: [&str; 14] = [
  "* * * * *",
  "*/5 * * * *",
  "0 * * * *",
  "0 */2 * * *",
  "0 0 * * *",
  "0 8 * * *",
  "0 0 * * 0",
  "0 0 1 * *",
  "0 0 1 1 *",
  "@hourly",
  "@daily",
  "@weekly",
  "@monthly",
  "@yearly",
];

const TAGS: [&str; 20] = [
  "production", "development", "staging", "testing", "data_warehouse", "data_lake", "batch",
  "streaming", "etl", "ml", "ai", "reporting", "monitoring", "cleanup", "validation",
  "transformation", "extraction", "loading", "high_priority", "low_priority",
];

const OPERATORS: [&str; 10] = [
  "PythonOperator",
  "BashOperator",
  "PostgresOperator",
  "MySqlOperator",
  "HttpSensor",
  "S3KeySensor",
  "EmailOperator",
  "SlackOperator",
  "SparkSubmitOperator",
  "DockerOperator",
];

/// Workflows with a known node count, for exercising layouts at size.
const FIXED_SIZE_WORKFLOWS: [(&str, usize); 5] = [
  ("tiny_dag_5", 5),
  ("small_dag_20", 20),
  ("medium_dag_100", 100),
  ("large_dag_500", 500),
  ("huge_dag_1000", 1000),
];

/// The in-memory workflow catalog, generated once per process.
///
/// Generating at startup keeps pagination stable: two pages of one listing
/// never disagree about which workflows exist.
pub struct Catalog {
  workflows: Vec<WorkflowSummary>,
}

impl Catalog {
  /// Generate a catalog. A fixed seed yields a fixed catalog.
  pub fn generate(seed: Option<u64>) -> Self {
    let mut rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    let mut workflows: Vec<WorkflowSummary> =
      (0..45).map(|index| synthetic_workflow(&mut rng, index)).collect();
    for (index, (workflow_id, node_count)) in FIXED_SIZE_WORKFLOWS.iter().enumerate() {
      workflows.push(fixed_size_workflow(&mut rng, index, workflow_id, *node_count));
    }

    debug!(workflows = workflows.len(), "catalog generated");
    Self { workflows }
  }

  /// All catalog entries, in generation order.
  pub fn workflows(&self) -> &[WorkflowSummary] {
    &self.workflows
  }
}

/// Build the task graph for a workflow id.
///
/// Derived from the id alone via a seeded generator, so repeated fetches
/// agree on structure and statuses; only timestamps move. Ids outside the
/// catalog still resolve to a plausible graph.
pub fn workflow_graph(workflow_id: &str) -> WorkflowGraph {
  let mut rng = StdRng::seed_from_u64(id_seed(workflow_id));
  let task_count = task_count(workflow_id, &mut rng);
  debug!(workflow_id = %workflow_id, tasks = task_count, "generating workflow graph");

  let tasks: Vec<TaskNode> = (0..task_count)
    .map(|index| generate_task(&mut rng, workflow_id, index))
    .collect();
  let edges = generate_edges(&mut rng, task_count);

  WorkflowGraph {
    workflow_id: workflow_id.to_string(),
    tasks,
    edges,
  }
}

fn id_seed(workflow_id: &str) -> u64 {
  let mut hasher = DefaultHasher::new();
  workflow_id.hash(&mut hasher);
  hasher.finish()
}

/// How many tasks a workflow's graph has.
///
/// Fixed-size ids use their advertised count; other ids with embedded
/// digits use those (kept within 5..=1000); the rest draw a small count
/// from the id-seeded generator.
fn task_count(workflow_id: &str, rng: &mut StdRng) -> usize {
  for (id, count) in FIXED_SIZE_WORKFLOWS {
    if workflow_id == id {
      return count;
    }
  }

  if let Some(start) = workflow_id.find(|c: char| c.is_ascii_digit()) {
    let digits: String = workflow_id[start..]
      .chars()
      .take_while(|c| c.is_ascii_digit())
      .collect();
    match digits.parse::<usize>() {
      Ok(count) => count.clamp(5, 1000),
      Err(_) => rng.gen_range(5..20),
    }
  } else {
    rng.gen_range(5..50)
  }
}

fn generate_task(rng: &mut StdRng, workflow_id: &str, index: usize) -> TaskNode {
  let now = Utc::now();

  let status = match rng.gen_range(0..100) {
    0..=10 => TaskStatus::Pending,
    11..=60 => TaskStatus::Succeeded,
    61..=70 => TaskStatus::Queued,
    71..=85 => TaskStatus::Running,
    86..=95 => TaskStatus::Failed,
    96..=98 => TaskStatus::Skipped,
    _ => TaskStatus::Paused,
  };

  let (start_time, end_time, duration) = match status {
    TaskStatus::Succeeded | TaskStatus::Failed => {
      let start = now - Duration::minutes(rng.gen_range(30..120));
      let duration_secs = rng.gen_range(30.0..600.0);
      let end = start + Duration::seconds(duration_secs as i64);
      (Some(start), Some(end), Some(duration_secs))
    }
    TaskStatus::Running => {
      let start = now - Duration::minutes(rng.gen_range(5..30));
      (Some(start), None, None)
    }
    _ => (None, None, None),
  };

  let operator = OPERATORS[rng.gen_range(0..OPERATORS.len())].to_string();
  let retries = if status == TaskStatus::Failed {
    rng.gen_range(0..3)
  } else {
    0
  };

  TaskNode {
    id: format!("task_{}", index),
    name: format!(
      "task_{}_{}_{}",
      workflow_id,
      operator.trim_end_matches("Operator"),
      index
    ),
    status,
    duration,
    start_time,
    end_time,
    operator,
    retries,
    max_retries: 3,
  }
}

/// Connect the tasks into a DAG.
///
/// Edges always run from a lower task index to a higher one, so the result
/// is acyclic by construction. Small graphs get a mostly linear chain with
/// random branches; large ones get a structured trunk with parallel lanes
/// and a few long cross-links.
fn generate_edges(rng: &mut StdRng, task_count: usize) -> Vec<EdgeDescriptor> {
  let edge =
    |source: usize, target: usize| EdgeDescriptor::new(task_id(source), task_id(target));
  let mut edges = Vec::new();

  if task_count <= 50 {
    for i in 1..task_count {
      if rng.gen_bool(0.7) || i == 1 {
        edges.push(edge(i - 1, i));
      } else {
        let source = rng.gen_range(0..i - 1);
        edges.push(edge(source, i));
      }

      // Occasionally fan in from an earlier task as well
      if i > 2 && rng.gen_bool(0.3) {
        let source = rng.gen_range(0..i - 1);
        let extra = edge(source, i);
        if !edges.contains(&extra) {
          edges.push(extra);
        }
      }
    }
  } else {
    for i in 1..task_count {
      if i % 10 == 0 {
        edges.push(edge(i - 10, i));
      } else {
        edges.push(edge(i - 1, i));
      }
    }

    for i in (5..task_count).step_by(5) {
      let branches = rng.gen_range(2..=4);
      for _ in 0..branches {
        let distance = rng.gen_range(2..=10);
        if i + distance < task_count {
          edges.push(edge(i, i + distance));
        }
      }
    }

    for i in (20..task_count).step_by(20) {
      let distance = rng.gen_range(15..=30);
      if i + distance < task_count {
        edges.push(edge(i, i + distance));
      }
    }
  }

  edges
}

fn task_id(index: usize) -> String {
  format!("task_{}", index)
}

fn synthetic_workflow(rng: &mut StdRng, index: usize) -> WorkflowSummary {
  let now = Utc::now();
  let suffix = NAME_SUFFIXES[index % NAME_SUFFIXES.len()];
  let workflow_id = format!(
    "{}{}_{:03}",
    NAME_PREFIXES[index % NAME_PREFIXES.len()],
    suffix,
    index
  );
  let file_path = format!("/var/lib/dagscope/workflows/{}.json", workflow_id);

  let paused = rng.gen_bool(0.2);
  let created_at = now - Duration::hours(rng.gen_range(24..720));
  let updated_at = created_at + Duration::hours(rng.gen_range(1..24));

  let last_run = if rng.gen_bool(0.9) {
    Some(now - Duration::hours(rng.gen_range(1..48)))
  } else {
    None
  };
  let next_run = if !paused {
    Some(now + Duration::hours(rng.gen_range(1..48)))
  } else {
    None
  };

  let runs_count = rng.gen_range(0..100);
  let success_rate = rng.gen_range(0.5..0.99);
  let success_count = (runs_count as f64 * success_rate) as usize;
  let failed_count = runs_count - success_count;
  let running_count = if rng.gen_bool(0.1) { rng.gen_range(1..5) } else { 0 };

  let mut available_tags = TAGS.to_vec();
  available_tags.shuffle(rng);
  let tags: Vec<String> = available_tags
    .iter()
    .take(rng.gen_range(1..=3))
    .map(|tag| tag.to_string())
    .collect();

  let description = if rng.gen_bool(0.8) {
    Some(format!("Workflow processing {} data", suffix))
  } else {
    None
  };

  WorkflowSummary {
    id: Uuid::new_v4(),
    workflow_id,
    description,
    file_path,
    owner: OWNERS[index % OWNERS.len()].to_string(),
    paused,
    last_run,
    next_run,
    runs_count,
    success_count,
    failed_count,
    running_count,
    schedule_interval: SCHEDULE_INTERVALS[index % SCHEDULE_INTERVALS.len()].to_string(),
    tags,
    created_at,
    updated_at,
  }
}

fn fixed_size_workflow(
  rng: &mut StdRng,
  index: usize,
  workflow_id: &str,
  node_count: usize,
) -> WorkflowSummary {
  let now = Utc::now();
  let created_at = now - Duration::hours(rng.gen_range(24..720));
  let runs_count = rng.gen_range(5..20);

  WorkflowSummary {
    id: Uuid::new_v4(),
    workflow_id: workflow_id.to_string(),
    description: Some(format!("Test workflow with {} nodes", node_count)),
    file_path: format!("/var/lib/dagscope/workflows/{}.json", workflow_id),
    owner: OWNERS[index % OWNERS.len()].to_string(),
    // Always active so the layout path can be exercised against them
    paused: false,
    last_run: Some(now - Duration::hours(rng.gen_range(1..24))),
    next_run: Some(now + Duration::hours(rng.gen_range(1..24))),
    runs_count,
    success_count: runs_count - 1,
    failed_count: 1,
    running_count: 0,
    schedule_interval: "@daily".to_string(),
    tags: vec![
      "test".to_string(),
      "performance".to_string(),
      format!("nodes_{}", node_count),
    ],
    created_at,
    updated_at: created_at + Duration::hours(rng.gen_range(1..24)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn catalog_has_the_fixed_size_workflows() {
    let catalog = Catalog::generate(Some(7));
    assert_eq!(catalog.workflows().len(), 50);

    for (workflow_id, _) in FIXED_SIZE_WORKFLOWS {
      let entry = catalog
        .workflows()
        .iter()
        .find(|workflow| workflow.workflow_id == workflow_id)
        .unwrap_or_else(|| panic!("missing {}", workflow_id));
      assert!(!entry.paused, "{} must stay active", workflow_id);
    }
  }

  #[test]
  fn seeded_catalogs_agree() {
    let shape = |catalog: &Catalog| -> Vec<(String, bool, usize)> {
      catalog
        .workflows()
        .iter()
        .map(|workflow| (workflow.workflow_id.clone(), workflow.paused, workflow.runs_count))
        .collect()
    };

    let first = Catalog::generate(Some(42));
    let second = Catalog::generate(Some(42));
    assert_eq!(shape(&first), shape(&second));
  }

  #[test]
  fn fixed_size_graphs_have_the_advertised_counts() {
    assert_eq!(workflow_graph("tiny_dag_5").tasks.len(), 5);
    assert_eq!(workflow_graph("small_dag_20").tasks.len(), 20);
    assert_eq!(workflow_graph("huge_dag_1000").tasks.len(), 1000);
  }

  #[test]
  fn digits_in_the_id_pin_the_task_count() {
    assert_eq!(workflow_graph("pipeline_0042").tasks.len(), 42);
    // Clamped into the supported range
    assert_eq!(workflow_graph("monster_20000").tasks.len(), 1000);
    assert_eq!(workflow_graph("run_2_daily").tasks.len(), 5);

    let count = workflow_graph("no_digits_here").tasks.len();
    assert!((5..50).contains(&count), "got {}", count);
  }

  #[test]
  fn graphs_are_stable_for_one_id() {
    let first = workflow_graph("etl_orders_12");
    let second = workflow_graph("etl_orders_12");

    assert_eq!(first.edges, second.edges);
    let statuses = |graph: &WorkflowGraph| -> Vec<TaskStatus> {
      graph.tasks.iter().map(|task| task.status).collect()
    };
    assert_eq!(statuses(&first), statuses(&second));
  }

  #[test]
  fn edges_reference_generated_tasks_only() {
    for workflow_id in ["tiny_dag_5", "medium_dag_100", "huge_dag_1000", "adhoc_workflow"] {
      let graph = workflow_graph(workflow_id);
      let ids: HashSet<&str> = graph.tasks.iter().map(|task| task.id.as_str()).collect();
      for edge in &graph.edges {
        assert!(ids.contains(edge.source.as_str()), "{}: {}", workflow_id, edge.source);
        assert!(ids.contains(edge.target.as_str()), "{}: {}", workflow_id, edge.target);
      }
    }
  }

  #[test]
  fn edges_always_point_forward() {
    // Forward-only edges make every generated graph a DAG
    let index_of = |id: &str| -> usize { id.trim_start_matches("task_").parse().unwrap() };
    let graph = workflow_graph("large_dag_500");
    for edge in &graph.edges {
      assert!(index_of(&edge.source) < index_of(&edge.target));
    }
  }
}
