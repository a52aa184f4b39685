/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Final ordering of the allocation and the table handed to the consumer.
//!
//! The allocator emits records in commit order (workload by workload).  The
//! consumer (a hypervisor or RTOS time-slice table) wants them by slot.

use crate::workload::{AllocationRecord, Slot, WorkloadId};

/// Sort `records` ascending by slot.
///
/// `sort_by_key` is a stable merge sort: O(n log n), records with equal
/// slots keep their relative order, and already-sorted input is returned
/// unchanged.
pub fn sort_timeslices(mut records: Vec<AllocationRecord>) -> Vec<AllocationRecord> {
    records.sort_by_key(|r| r.slot);
    records
}

/// A maximal stretch of consecutive slots owned by one workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimesliceRun {
    pub start: Slot,
    pub length: u64,
    pub workload_id: WorkloadId,
}

impl TimesliceRun {
    /// One past the last slot of the run.
    pub fn end(&self) -> Slot {
        self.start + self.length
    }
}

/// Slot-ordered allocation for one hyperperiod.
///
/// Slots nobody owns are simply absent; they are never represented as idle
/// records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesliceTable {
    hyperperiod: u64,
    records: Vec<AllocationRecord>,
}

impl TimesliceTable {
    /// Build the table, sorting `records` by slot.
    pub fn from_records(hyperperiod: u64, records: Vec<AllocationRecord>) -> Self {
        Self {
            hyperperiod,
            records: sort_timeslices(records),
        }
    }

    pub fn hyperperiod(&self) -> u64 {
        self.hyperperiod
    }

    /// Records ascending by slot.
    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AllocationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of slots owned by `workload_id`.
    pub fn slots_for(&self, workload_id: WorkloadId) -> usize {
        self.records
            .iter()
            .filter(|r| r.workload_id == workload_id)
            .count()
    }

    /// Slots in `[0, hyperperiod)` that no workload owns, ascending.
    pub fn idle_slots(&self) -> Vec<Slot> {
        let mut idle = Vec::new();
        let mut next = 0;
        for r in &self.records {
            idle.extend(next..r.slot);
            next = r.slot + 1;
        }
        idle.extend(next..self.hyperperiod);
        idle
    }

    /// Coalesce consecutive slots of the same workload into runs.
    pub fn runs(&self) -> Vec<TimesliceRun> {
        let mut runs: Vec<TimesliceRun> = Vec::new();
        for r in &self.records {
            match runs.last_mut() {
                Some(run) if run.workload_id == r.workload_id && run.end() == r.slot => {
                    run.length += 1;
                }
                _ => runs.push(TimesliceRun {
                    start: r.slot,
                    length: 1,
                    workload_id: r.workload_id,
                }),
            }
        }
        runs
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
