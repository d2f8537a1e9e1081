/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use rmexec::analysis;
use rmexec::executive::{CyclicExecutive, ExecutiveConfig};
use rmexec::priority::rate_monotonic_order;
use rmexec::report::ScheduleReport;
use rmexec::workload;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Rate-Monotonic schedulability analyzer and cyclic-executive simulator.
///
/// Example:
///   rmexec -i tasks.json -o report.json --cycle-period 100 --cycles 10
#[derive(Debug, Parser)]
#[command(
    name = "rmexec",
    about = "Rate-Monotonic schedulability analysis + cyclic executive simulation",
    long_about = None,
)]
struct Cli {
    /// Path to the JSON task definition file.
    #[arg(short = 'i', long = "input", default_value = "tasks.json")]
    input: PathBuf,

    /// Optional path for the JSON schedule report (console only when absent).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Cyclic executive outer cycle length, in time units (1 unit = 1 ms).
    #[arg(short = 'p', long = "cycle-period", default_value_t = 100)]
    cycle_period: u64,

    /// Run the executive for exactly N cycles instead of until Ctrl-C.
    #[arg(short = 'n', long = "cycles")]
    cycles: Option<u64>,

    /// Only analyze and report — skip the dispatch loop entirely.
    #[arg(long = "analyze-only", default_value_t = false)]
    analyze_only: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        input        = %cli.input.display(),
        output       = ?cli.output,
        cycle_period = cli.cycle_period,
        cycles       = ?cli.cycles,
        analyze_only = cli.analyze_only,
        "Configuration"
    );

    // ── Ingestion (fatal on failure, before any analysis) ─────────────────────
    let tasks = match workload::load_from_file(&cli.input) {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("Failed to load task definitions: {:#}", e);
            process::exit(1);
        }
    };

    // ── Analysis + priority assignment ────────────────────────────────────────
    let decision = analysis::analyze(&tasks);
    info!(
        utilization = decision.utilization,
        bound = decision.bound,
        task_count = tasks.len(),
        "Liu & Layland analysis"
    );

    let ordered = rate_monotonic_order(tasks);

    // ── Report ────────────────────────────────────────────────────────────────
    let report = ScheduleReport::new(&decision, &ordered);
    report.log();

    if let Some(path) = &cli.output {
        // Persistence failure does not invalidate the analysis already done
        if let Err(e) = report.write_to_file(path) {
            warn!("Failed to write schedule report: {:#}", e);
        }
    }

    if cli.analyze_only {
        return;
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────
    let mut executive = CyclicExecutive::new(ExecutiveConfig::new(cli.cycle_period), ordered);

    match cli.cycles {
        Some(count) => {
            executive.run_cycles(count).await;
            info!(
                cycles = executive.cycles_run(),
                overruns = executive.overruns(),
                "dispatch finished"
            );
        }
        None => {
            // run() never returns on its own; Ctrl-C is the only exit
            tokio::select! {
                _ = executive.run() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            info!(
                cycles = executive.cycles_run(),
                overruns = executive.overruns(),
                "interrupted — shutting down"
            );
        }
    }
}
