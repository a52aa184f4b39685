/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! RRP planner – offline single-core time-slice partition planner
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── workload        – workload / allocation record types
//! ├── config/         – YAML workload definitions + planner knobs
//! ├── hyperperiod/    – LCM / GCD helpers, hyperperiod ceiling
//! └── planner/        – normalizer, slot set, phase search, allocator, table
//! ```

pub mod config;
pub mod hyperperiod;
pub mod planner;
pub mod workload;
