/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structure shared by every stage of the pipeline.
//!
//! ```text
//! tasks.json ──(workload)──► Vec<Task> ──(analysis)──► ScheduleDecision
//!                                │
//!                                └──(priority)──► ordered Vec<Task> ──► CyclicExecutive
//! ```
//!
//! # Ownership model
//! The loaded `Vec<Task>` is owned by `main`.  Analysis borrows it
//! (`&[Task]`); the priority assigner takes a clone by value and returns the
//! re-ordered vector, so the loaded set is never mutated after ingestion.
//! Tasks themselves are immutable once constructed — no stage writes to a
//! `Task` field after load.

use serde::{Deserialize, Serialize};

/// One periodic unit of work.
///
/// Units are abstract "time units"; the executive maps one unit to a wall
/// clock duration (`ExecutiveConfig::time_unit`).  The serde derives match
/// the wire shape of the task definition file directly, so no separate wire
/// type is needed.
///
/// The physical-sensibility invariant `execution_time <= period` is assumed
/// but not enforced — an implausible task simply yields utilization > 1 and
/// an infeasible verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, unique within a task set (uniqueness assumed, not
    /// enforced).
    pub id: String,

    /// Time units between successive activations.  Must be positive; the
    /// workload loader rejects zero.
    pub period: u64,

    /// Worst-case execution time per activation, in time units.  Must be
    /// positive; the workload loader rejects zero.
    pub execution_time: u64,
}

impl Task {
    /// Processor utilization fraction: `execution_time / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero —
    /// the loader guarantees positive periods, but downstream math must not
    /// be able to produce NaN/inf from a malformed value.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.execution_time as f64 / self.period as f64
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
