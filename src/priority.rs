/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Rate-Monotonic priority assignment.
//!
//! Priority is positional rather than a stored field: index 0 of the
//! returned vector is the highest-priority task.  The same ordering is both
//! the published "suggested schedule" (1-based priorities in the report) and
//! the literal dispatch order consumed by the cyclic executive.

use crate::task::Task;

/// Order `tasks` by the Rate-Monotonic rule: shorter period → higher
/// priority (earlier position).
///
/// The sort is **stable** — tasks with equal periods keep their input order,
/// so identical input always produces identical output.  Total over any
/// input including the empty set.
pub fn rate_monotonic_order(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|t| t.period);
    tasks
}

// ── Tests ─────────────────────────────────────────────────────────────────────
