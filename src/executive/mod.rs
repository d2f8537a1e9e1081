//! Cyclic executive dispatch loop.
//!
//! [`CyclicExecutive`] dispatches the RM-ordered task list once per fixed
//! outer cycle, forever.  Execution is simulated: each task "runs" by
//! sleeping for its declared worst-case execution time (a production system
//! would invoke the task's real handler here and measure what it actually
//! consumed).  After the last task the executive sleeps out the remainder of
//! the cycle so the cycle period is exact — or, if the budget was exceeded,
//! emits an **overrun** warning and starts the next cycle immediately.
//!
//! Overrun is observational only: no backoff, no task dropping, no adaptive
//! re-scheduling.  The loop has no terminal state of its own; the CLI races
//! [`CyclicExecutive::run`] against Ctrl-C for shutdown, and tests use
//! [`CyclicExecutive::run_cycles`] to bound the loop.
//!
//! # The cycle budget is not the RM test
//! `Σ execution_time ≤ cycle_period` is a configuration precondition on the
//! *outer cycle*, independent of the Liu & Layland verdict, which concerns
//! each task's *own* period.  A set can pass the RM test and still overrun a
//! too-small cycle budget, and vice versa.  The executive enforces neither —
//! it only reports.
//!
//! # Timing model
//! Single thread of control, no preemption: one suspension per task (its
//! execution burst) and one per cycle (the padding sleep).  All timing goes
//! through `tokio::time`, so tests running under a paused runtime drive the
//! loop on a virtual clock with no real waiting.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::task::Task;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Executive configuration, fixed for the lifetime of the loop.
///
/// Whether `cycle_period` relates sensibly to the tasks' own periods is the
/// operator's responsibility — the executive does not validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutiveConfig {
    /// Outer cycle length, in time units.
    pub cycle_period: u64,

    /// Wall-clock duration of one time unit.
    pub time_unit: Duration,
}

impl ExecutiveConfig {
    /// Default mapping of one time unit to wall clock time.
    pub const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(1);

    /// Config with the default 1 ms time unit.
    pub fn new(cycle_period: u64) -> Self {
        Self {
            cycle_period,
            time_unit: Self::DEFAULT_TIME_UNIT,
        }
    }

    /// Convert a number of time units to a wall-clock duration.
    ///
    /// Saturates instead of overflowing — u32::MAX units at 1 ms is ~49
    /// days, far beyond any sane cycle.
    fn scale(&self, units: u64) -> Duration {
        self.time_unit
            .saturating_mul(u32::try_from(units).unwrap_or(u32::MAX))
    }

    /// Wall-clock budget of one full cycle.
    pub fn cycle_budget(&self) -> Duration {
        self.scale(self.cycle_period)
    }
}

// ── Per-cycle result ──────────────────────────────────────────────────────────

/// What one cycle did, returned from [`CyclicExecutive::run_cycle`] so tests
/// and callers can observe timing without scraping logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Zero-based cycle number.
    pub index: u64,

    /// Wall-clock time the task dispatches consumed.
    pub elapsed: Duration,

    /// The configured cycle budget.
    pub budget: Duration,

    /// `true` when `elapsed` used up the whole budget (remaining ≤ 0).  The
    /// cycle did not pad; the next cycle starts immediately.
    pub overrun: bool,
}

// ── CyclicExecutive ───────────────────────────────────────────────────────────

/// The dispatch loop.  Owns the RM-ordered task list; tasks are read-only
/// during dispatch and the order never changes between cycles.
pub struct CyclicExecutive {
    config: ExecutiveConfig,
    tasks: Vec<Task>,
    cycles_run: u64,
    overruns: u64,
}

impl CyclicExecutive {
    /// Create an executive over `tasks`, which must already be in dispatch
    /// (RM priority) order — see `priority::rate_monotonic_order`.
    pub fn new(config: ExecutiveConfig, tasks: Vec<Task>) -> Self {
        Self {
            config,
            tasks,
            cycles_run: 0,
            overruns: 0,
        }
    }

    /// The dispatch order (highest priority first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of completed cycles.
    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    /// Number of cycles that overran their budget so far.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Run exactly one cycle: dispatch every task in order, then pad out the
    /// remaining cycle time or report an overrun.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let index = self.cycles_run;
        let budget = self.config.cycle_budget();
        let start = Instant::now();

        for task in &self.tasks {
            info!(
                cycle = index,
                task = %task.id,
                execution_time = task.execution_time,
                "executing"
            );
            sleep(self.config.scale(task.execution_time)).await;
        }

        let elapsed = start.elapsed();
        let overrun = elapsed >= budget;
        self.cycles_run += 1;

        if overrun {
            self.overruns += 1;
            warn!(
                cycle = index,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = budget.as_millis() as u64,
                total_overruns = self.overruns,
                "cycle overrun — task set execution exceeds the cycle budget"
            );
        } else {
            let remaining = budget - elapsed;
            debug!(
                cycle = index,
                elapsed_ms = elapsed.as_millis() as u64,
                slack_ms = remaining.as_millis() as u64,
                "cycle complete, sleeping out remainder"
            );
            sleep(remaining).await;
        }

        CycleOutcome {
            index,
            elapsed,
            budget,
            overrun,
        }
    }

    /// Run a bounded number of cycles.  Used by tests and the CLI's
    /// `--cycles` mode.
    pub async fn run_cycles(&mut self, count: u64) {
        for _ in 0..count {
            self.run_cycle().await;
        }
    }

    /// Run forever.  There is no internal exit path; callers that need
    /// shutdown race this future against a cancellation signal.
    pub async fn run(&mut self) {
        info!(
            task_count = self.tasks.len(),
            cycle_period = self.config.cycle_period,
            "cyclic executive started"
        );
        loop {
            self.run_cycle().await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, period: u64, execution_time: u64) -> Task {
        Task {
            id: id.to_string(),
            period,
            execution_time,
        }
    }

    fn two_thirty_unit_tasks() -> Vec<Task> {
        vec![task("A", 100, 30), task("B", 200, 30)]
    }

    // All executive tests run on tokio's paused clock: sleeps auto-advance
    // virtual time instantly and Instant arithmetic stays exact.

    #[tokio::test(start_paused = true)]
    async fn cycle_within_budget_does_not_overrun() {
        // budget 100, work 30 + 30 = 60 → remaining 40, no overrun
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(100), two_thirty_unit_tasks());
        let outcome = exec.run_cycle().await;

        assert!(!outcome.overrun);
        assert_eq!(outcome.elapsed, Duration::from_millis(60));
        assert_eq!(outcome.budget, Duration::from_millis(100));
        assert_eq!(exec.overruns(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_pads_out_to_exact_budget() {
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(100), two_thirty_unit_tasks());
        let before = Instant::now();
        exec.run_cycle().await;
        // 60 of work + 40 of padding = exactly one cycle period
        assert_eq!(before.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn overrunning_cycle_is_reported_and_does_not_pad() {
        // budget 50, work 60 → overrun; next cycle starts immediately
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(50), two_thirty_unit_tasks());
        let before = Instant::now();
        let outcome = exec.run_cycle().await;

        assert!(outcome.overrun);
        assert_eq!(outcome.elapsed, Duration::from_millis(60));
        // No padding sleep after an overrun
        assert_eq!(before.elapsed(), Duration::from_millis(60));
        assert_eq!(exec.overruns(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn overrun_is_not_fatal_and_recurs_every_cycle() {
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(50), two_thirty_unit_tasks());
        exec.run_cycles(3).await;

        assert_eq!(exec.cycles_run(), 3);
        assert_eq!(exec.overruns(), 3, "overrun must be re-reported each cycle");
    }

    #[tokio::test(start_paused = true)]
    async fn exact_fit_counts_as_overrun() {
        // remaining == 0 is an overrun per the dispatch contract (≤, not <)
        let mut exec = CyclicExecutive::new(
            ExecutiveConfig::new(60),
            two_thirty_unit_tasks(),
        );
        let outcome = exec.run_cycle().await;
        assert!(outcome.overrun);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_task_set_runs_idle_cycles() {
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(100), vec![]);
        let before = Instant::now();
        let outcome = exec.run_cycle().await;

        assert!(!outcome.overrun);
        assert_eq!(outcome.elapsed, Duration::ZERO);
        // Idle cycle still occupies the full budget
        assert_eq!(before.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_keeps_cycle_cadence() {
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(100), two_thirty_unit_tasks());
        let before = Instant::now();
        exec.run_cycles(5).await;
        assert_eq!(before.elapsed(), Duration::from_millis(500));
        assert_eq!(exec.cycles_run(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_index_increments() {
        let mut exec = CyclicExecutive::new(ExecutiveConfig::new(100), vec![task("A", 100, 10)]);
        assert_eq!(exec.run_cycle().await.index, 0);
        assert_eq!(exec.run_cycle().await.index, 1);
        assert_eq!(exec.run_cycle().await.index, 2);
    }

    #[test]
    fn dispatch_order_is_the_constructed_order() {
        let exec = CyclicExecutive::new(
            ExecutiveConfig::new(100),
            vec![task("fast", 10, 1), task("slow", 50, 1)],
        );
        let ids: Vec<&str> = exec.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["fast", "slow"]);
    }

    #[test]
    fn scale_saturates_on_absurd_unit_counts() {
        let config = ExecutiveConfig::new(100);
        // Must not panic
        let d = config.scale(u64::MAX);
        assert!(d >= Duration::from_millis(u32::MAX as u64));
    }
}
