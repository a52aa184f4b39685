/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the partition planner.
//!
//! Two error enums model the two failure layers:
//!
//! * [`ValidationError`]: why the input workload set was rejected before any
//!   search started (carries the offending values).
//! * [`PlannerError`]: top-level failure returned from
//!   [`PartitionPlanner::plan()`](super::PartitionPlanner::plan).
//!
//! Every failure is terminal for a run; no partial schedule is ever returned
//! alongside an error.
//!
//! **Do not** replace these with `anyhow::Error` inside the planner; callers
//! match on [`PlannerError::kind`] to decide what to report.

use std::fmt;

use thiserror::Error;

use crate::hyperperiod::HyperperiodError;
use crate::workload::{Slot, WorkloadId};

// ── Input validation ──────────────────────────────────────────────────────────

/// Reason the workload set was rejected before allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The producer delivered no workloads.
    #[error("workload set is empty")]
    Empty,

    #[error("workload {workload_id} has a zero WCET")]
    ZeroWcet { workload_id: WorkloadId },

    #[error("workload {workload_id} has a zero period")]
    ZeroPeriod { workload_id: WorkloadId },

    /// `wcet > period`: the workload needs more than the whole processor.
    #[error("workload {workload_id} demands {wcet} slots every {period} slots (rate > 1)")]
    RateExceedsOne {
        workload_id: WorkloadId,
        wcet: u64,
        period: u64,
    },
}

impl ValidationError {
    pub fn workload_id(&self) -> Option<WorkloadId> {
        match self {
            ValidationError::Empty => None,
            ValidationError::ZeroWcet { workload_id }
            | ValidationError::ZeroPeriod { workload_id }
            | ValidationError::RateExceedsOne { workload_id, .. } => Some(*workload_id),
        }
    }
}

// ── Failure kind tag ──────────────────────────────────────────────────────────

/// Coarse failure classification handed to the external consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Unschedulable,
    AllocationConflict,
    ValidationError,
    InputTooLarge,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Unschedulable => "Unschedulable",
            FailureKind::AllocationConflict => "AllocationConflict",
            FailureKind::ValidationError => "ValidationError",
            FailureKind::InputTooLarge => "InputTooLarge",
        };
        f.write_str(s)
    }
}

// ── Top-level planner errors ──────────────────────────────────────────────────

/// Top-level error type returned by
/// [`PartitionPlanner::plan()`](super::PartitionPlanner::plan).
///
/// | Variant | Meaning |
/// |---|---|
/// | `Validation` | bad input, rejected before the search |
/// | `Unschedulable` | the search found no feasible placement (expected outcome) |
/// | `AllocationConflict` | a slot was about to be booked twice (internal defect) |
/// | `InputTooLarge` | hyperperiod overflowed or exceeded the ceiling |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("invalid workload set: {0}")]
    Validation(#[from] ValidationError),

    /// No phase shift places the workload inside the remaining capacity.
    #[error(
        "workload {workload_id} (wcet {wcet}, period {period}) is unschedulable \
         with {available} slot(s) left"
    )]
    Unschedulable {
        workload_id: WorkloadId,
        wcet: u64,
        period: u64,
        available: usize,
    },

    /// The allocator was about to commit a slot that is no longer available.
    #[error("slot {slot} allocated redundantly to workload {workload_id}")]
    AllocationConflict { workload_id: WorkloadId, slot: Slot },

    #[error("input too large: {0}")]
    InputTooLarge(#[source] HyperperiodError),
}

impl PlannerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PlannerError::Validation(_) => FailureKind::ValidationError,
            PlannerError::Unschedulable { .. } => FailureKind::Unschedulable,
            PlannerError::AllocationConflict { .. } => FailureKind::AllocationConflict,
            PlannerError::InputTooLarge(_) => FailureKind::InputTooLarge,
        }
    }

    /// The workload that triggered the failure, where one exists.
    pub fn workload_id(&self) -> Option<WorkloadId> {
        match self {
            PlannerError::Validation(v) => v.workload_id(),
            PlannerError::Unschedulable { workload_id, .. }
            | PlannerError::AllocationConflict { workload_id, .. } => Some(*workload_id),
            PlannerError::InputTooLarge(_) => None,
        }
    }
}

impl From<HyperperiodError> for PlannerError {
    fn from(e: HyperperiodError) -> Self {
        match e {
            // Only reachable with an empty or all-zero set, which validation
            // catches first.
            HyperperiodError::NoValidPeriods => PlannerError::Validation(ValidationError::Empty),
            other => PlannerError::InputTooLarge(other),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
