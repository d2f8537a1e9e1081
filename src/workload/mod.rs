//! Task definition ingestion.
//!
//! Loads the JSON task definition file consumed at startup:
//! ```json
//! {
//!   "tasks": [
//!     { "id": "sensor_fusion", "period": 10, "execution_time": 3 },
//!     { "id": "motion_ctrl",   "period": 20, "execution_time": 5 }
//!   ]
//! }
//! ```
//!
//! All structural validation lives here — the analysis and dispatch stages
//! assume positive periods and execution times and never re-check them.
//! An empty `tasks` array is valid (a degenerate set, not an error).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::task::Task;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Why a task definition was rejected during ingestion.
///
/// Negative values never reach these checks — they fail `u64`
/// deserialization first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkloadError {
    /// A task declared `period: 0`, which would make its utilization
    /// undefined.
    #[error("task '{id}' has period 0 — periods must be positive")]
    ZeroPeriod { id: String },

    /// A task declared `execution_time: 0` — a task that never executes
    /// carries no scheduling meaning.
    #[error("task '{id}' has execution_time 0 — execution times must be positive")]
    ZeroExecutionTime { id: String },
}

// ── Private wire type ─────────────────────────────────────────────────────────

/// Top-level wrapper matching the file layout.  Kept private — callers work
/// with `Vec<Task>`.
#[derive(Debug, Deserialize)]
struct TaskFile {
    tasks: Vec<Task>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse `path` and return the validated task set.
///
/// # Errors
/// Returns an error if the file cannot be read, the JSON is structurally
/// invalid, or any task fails validation ([`WorkloadError`]).  The error
/// chain carries the file path so the caller can log it verbatim.
pub fn load_from_file(path: &Path) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open task definition file: {}", path.display()))?;

    let file: TaskFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse task definition file: {}", path.display()))?;

    validate(&file.tasks)?;

    info!(
        task_count = file.tasks.len(),
        path = %path.display(),
        "loaded task definitions"
    );
    for task in &file.tasks {
        debug!(
            id = %task.id,
            period = task.period,
            execution_time = task.execution_time,
            utilization = task.utilization(),
            "  task"
        );
    }

    Ok(file.tasks)
}

/// Check every task for positive timing values.
///
/// Stops at the first offending task — one actionable error beats a flood.
fn validate(tasks: &[Task]) -> Result<(), WorkloadError> {
    for task in tasks {
        if task.period == 0 {
            return Err(WorkloadError::ZeroPeriod {
                id: task.id.clone(),
            });
        }
        if task.execution_time == 0 {
            return Err(WorkloadError::ZeroExecutionTime {
                id: task.id.clone(),
            });
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
