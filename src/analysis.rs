/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Rate-Monotonic schedulability analysis.
//!
//! # Theory
//! **Liu & Layland (1973)**: Under Rate Monotonic scheduling (shorter period →
//! higher priority), a task set of `n` independent periodic tasks is
//! **guaranteed** schedulable on one CPU if:
//!
//! $$U = \sum_{i=1}^{n} \frac{C_i}{T_i} \leq n \left(2^{1/n} - 1\right)$$
//!
//! The bound tightens as `n` grows, converging to `ln(2) ≈ 0.693`.
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | 5 | 0.743 |
//! | ∞ | ln(2) ≈ 0.693 |
//!
//! The condition is sufficient but not necessary: if `U` is between the bound
//! and 1.0 the set **may or may not** be schedulable — deeper Response Time
//! Analysis (RTA) would be required, which is out of scope here.  A
//! "not viable" verdict is therefore conservative.

use crate::task::Task;

// ── Result type ───────────────────────────────────────────────────────────────

/// Outcome of one schedulability analysis run.
///
/// Ephemeral — recomputed from the task set each run, never persisted on its
/// own (it is embedded into the schedule report for output).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleDecision {
    /// Total processor utilization demanded by the task set.
    pub utilization: f64,

    /// Liu & Layland bound for the set's size.
    pub bound: f64,

    /// `utilization <= bound` (inclusive).  Vacuously `true` for the empty
    /// set.
    pub schedulable: bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Compute the Liu & Layland utilisation upper bound for `n` tasks.
///
/// `U_bound(n) = n × (2^(1/n) − 1)`
///
/// Returns `1.0` for `n = 1` (a single task always fits if `U ≤ 1`),
/// and `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// Total utilization of the task set: `Σ execution_time_i / period_i`.
///
/// Pure; returns `0.0` for an empty slice.  Periods are guaranteed positive
/// by the workload loader (a zero period would contribute `0.0` via the
/// division guard in [`Task::utilization`], never a NaN).
pub fn total_utilization(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::utilization).sum()
}

/// Run the Liu & Layland test over `tasks`.
///
/// The empty set is handled explicitly: utilization `0.0`, schedulable
/// `true` — there is nothing to schedule, and the bound formula is not
/// evaluated for `n = 0`.
pub fn analyze(tasks: &[Task]) -> ScheduleDecision {
    if tasks.is_empty() {
        return ScheduleDecision {
            utilization: 0.0,
            bound: 0.0,
            schedulable: true,
        };
    }

    let utilization = total_utilization(tasks);
    let bound = liu_layland_bound(tasks.len());

    ScheduleDecision {
        utilization,
        bound,
        schedulable: utilization <= bound,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
