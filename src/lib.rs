/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! rmexec – Rate-Monotonic schedulability analyzer and cyclic-executive
//! simulator.
//!
//! ```text
//! lib.rs
//! ├── task       – periodic task model
//! ├── workload   – JSON task definition ingestion + validation
//! ├── analysis   – utilization sum + Liu & Layland bound
//! ├── priority   – Rate-Monotonic ordering
//! ├── executive  – cyclic dispatch loop with overrun reporting
//! └── report     – schedule report serialization
//! ```

pub mod analysis;
pub mod executive;
pub mod priority;
pub mod report;
pub mod task;
pub mod workload;
