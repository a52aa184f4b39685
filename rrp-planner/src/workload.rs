/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for the partition planner.
//!
//! Two distinct types model the two sides of the planning pipeline:
//!
//! ```text
//! producer ──(wcet, period)──►  WorkloadEntry  ──(allocator)──►  AllocationRecord  ──►  consumer
//!                                ↑ input                            ↑ output
//!                                immutable, id = input order        one per committed slot
//! ```
//!
//! # Ownership model
//! The `Vec<WorkloadEntry>` is **owned** by the normalizer, which sorts it in
//! place and hands it to the allocator.  Entries are never mutated after
//! creation; the allocator only reads them and emits `AllocationRecord`s.

// ── Time model ────────────────────────────────────────────────────────────────

/// Index of one discrete unit of processor time, in `[0, hyperperiod)`.
pub type Slot = u64;

/// Identity of a workload: its position in the producer's input sequence.
pub type WorkloadId = u32;

// ── WorkloadEntry (input) ─────────────────────────────────────────────────────

/// A periodic workload that must receive `wcet` slots in every `period`.
///
/// Both values are expressed in slots.  Construction does not validate; the
/// normalizer rejects zero values and `wcet > period` before any search
/// begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadEntry {
    /// Position in the input sequence (0-based).
    pub id: WorkloadId,

    /// Worst-case execution demand per period, in slots.
    pub wcet: u64,

    /// Period in slots.
    pub period: u64,
}

impl WorkloadEntry {
    pub fn new(id: WorkloadId, wcet: u64, period: u64) -> Self {
        Self { id, wcet, period }
    }

    /// Utilisation fraction: `wcet / period`.
    ///
    /// Returns `0.0` when `period` is zero to avoid division by zero.
    pub fn utilization(&self) -> f64 {
        if self.period == 0 {
            0.0
        } else {
            self.wcet as f64 / self.period as f64
        }
    }

    /// Number of times this workload's period repeats within `hyperperiod`.
    pub fn repetitions(&self, hyperperiod: u64) -> u64 {
        if self.period == 0 {
            0
        } else {
            hyperperiod / self.period
        }
    }

    /// Total slots this workload must receive in one hyperperiod:
    /// `(hyperperiod / period) × wcet`.
    pub fn availability_weight(&self, hyperperiod: u64) -> u64 {
        self.repetitions(hyperperiod).saturating_mul(self.wcet)
    }
}

// ── AllocationRecord (output) ─────────────────────────────────────────────────

/// One committed slot and the workload that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRecord {
    pub slot: Slot,
    pub workload_id: WorkloadId,
}

impl AllocationRecord {
    pub fn new(slot: Slot, workload_id: WorkloadId) -> Self {
        Self { slot, workload_id }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_is_correct() {
        let w = WorkloadEntry::new(0, 1, 4);
        assert!((w.utilization() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn utilization_zero_period_returns_zero() {
        assert_eq!(WorkloadEntry::new(0, 3, 0).utilization(), 0.0);
    }

    #[test]
    fn repetitions_divides_hyperperiod() {
        let w = WorkloadEntry::new(0, 1, 3);
        assert_eq!(w.repetitions(12), 4);
        assert_eq!(WorkloadEntry::new(0, 1, 0).repetitions(12), 0);
    }

    #[test]
    fn availability_weight_matches_definition() {
        // hyperperiod 12, period 4 → 3 repetitions × wcet 2 = 6 slots
        let w = WorkloadEntry::new(7, 2, 4);
        assert_eq!(w.availability_weight(12), 6);
    }

    #[test]
    fn availability_weight_full_occupancy_equals_hyperperiod() {
        let w = WorkloadEntry::new(0, 3, 3);
        assert_eq!(w.availability_weight(9), 9);
    }
}
