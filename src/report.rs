//! Schedule report serialization.
//!
//! The analysis result and the suggested priority order are published as one
//! JSON record:
//!
//! ```json
//! {
//!   "schedulability": "viable",
//!   "suggested_schedule": [
//!     { "id": "A", "priority": 1 },
//!     { "id": "B", "priority": 2 }
//!   ]
//! }
//! ```
//!
//! `priority` is 1-based and increases with ascending period — position 1 is
//! the highest-priority task.  Writing the report is best-effort: the caller
//! treats a failed write as a warning, not a fatal error, because the
//! analysis it records has already completed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::analysis::ScheduleDecision;
use crate::task::Task;

// ── Wire types ────────────────────────────────────────────────────────────────

/// Schedulability verdict as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "viable")]
    Viable,
    #[serde(rename = "not viable")]
    NotViable,
}

impl From<&ScheduleDecision> for Verdict {
    fn from(decision: &ScheduleDecision) -> Self {
        if decision.schedulable {
            Verdict::Viable
        } else {
            Verdict::NotViable
        }
    }
}

/// One row of the suggested schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub id: String,
    /// 1-based; monotonically increasing with ascending period.
    pub priority: usize,
}

/// The full output record.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub schedulability: Verdict,
    pub suggested_schedule: Vec<ScheduleEntry>,
}

impl ScheduleReport {
    /// Build the report from an analysis decision and the RM-ordered task
    /// list (highest priority first).
    pub fn new(decision: &ScheduleDecision, ordered: &[Task]) -> Self {
        let suggested_schedule = ordered
            .iter()
            .enumerate()
            .map(|(i, t)| ScheduleEntry {
                id: t.id.clone(),
                priority: i + 1,
            })
            .collect();

        ScheduleReport {
            schedulability: Verdict::from(decision),
            suggested_schedule,
        }
    }

    /// Log the report to the console surface, one line per entry.
    pub fn log(&self) {
        let verdict = match self.schedulability {
            Verdict::Viable => "viable",
            Verdict::NotViable => "not viable",
        };
        info!(schedulability = verdict, "Schedulability");
        info!("Suggested schedule:");
        for entry in &self.suggested_schedule {
            info!("  Task ID: {}, Priority: {}", entry.id, entry.priority);
        }
    }

    /// Serialize the report as pretty-printed JSON to `path`.
    ///
    /// # Errors
    /// Returns an error when the destination cannot be written; the caller
    /// decides how severe that is (the CLI downgrades it to a warning).
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write report to: {}", path.display()))?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::priority::rate_monotonic_order;

    fn task(id: &str, period: u64, execution_time: u64) -> Task {
        Task {
            id: id.to_string(),
            period,
            execution_time,
        }
    }

    #[test]
    fn priorities_are_one_based_and_follow_order() {
        let tasks = vec![task("A", 10, 3), task("B", 20, 5)];
        let decision = analyze(&tasks);
        let ordered = rate_monotonic_order(tasks);
        let report = ScheduleReport::new(&decision, &ordered);

        assert_eq!(report.schedulability, Verdict::Viable);
        assert_eq!(
            report.suggested_schedule,
            vec![
                ScheduleEntry {
                    id: "A".to_string(),
                    priority: 1
                },
                ScheduleEntry {
                    id: "B".to_string(),
                    priority: 2
                },
            ]
        );
    }

    #[test]
    fn infeasible_set_reports_not_viable_on_the_wire() {
        let tasks = vec![task("A", 5, 4), task("B", 7, 4)];
        let decision = analyze(&tasks);
        let ordered = rate_monotonic_order(tasks);
        let report = ScheduleReport::new(&decision, &ordered);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schedulability"], "not viable");
        assert_eq!(json["suggested_schedule"][0]["id"], "A");
        assert_eq!(json["suggested_schedule"][0]["priority"], 1);
        assert_eq!(json["suggested_schedule"][1]["id"], "B");
        assert_eq!(json["suggested_schedule"][1]["priority"], 2);
    }

    #[test]
    fn empty_set_serializes_to_viable_with_empty_schedule() {
        let decision = analyze(&[]);
        let report = ScheduleReport::new(&decision, &[]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schedulability"], "viable");
        assert_eq!(json["suggested_schedule"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn write_to_file_produces_parseable_json() {
        let tasks = vec![task("A", 10, 3)];
        let decision = analyze(&tasks);
        let ordered = rate_monotonic_order(tasks);
        let report = ScheduleReport::new(&decision, &ordered);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_to_file(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["schedulability"], "viable");
    }

    #[test]
    fn write_to_unwritable_path_returns_error() {
        let report = ScheduleReport::new(&analyze(&[]), &[]);
        let result = report.write_to_file(Path::new("/nonexistent/dir/report.json"));
        assert!(result.is_err());
    }
}
