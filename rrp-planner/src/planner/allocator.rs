/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Partition allocator: walks the normalized workloads in order and commits
//! a periodic slot pattern for each one.
//!
//! One state transition per workload:
//!
//! ```text
//! ┌────────────┐  wcet == 1: smallest free slot          ┌────────────┐
//! │ available  │─────────────────────────────────────────►│  commit    │
//! │   set      │  wcet  > 1: phase search → delta         │  l·period  │──► next workload
//! └────────────┘─────────────────────────────────────────►│  replicas  │
//!        │                                                └────────────┘
//!        └── no base / no delta ──► Unschedulable   slot already taken ──► AllocationConflict
//! ```
//!
//! Any failure is terminal.  [`PartitionAllocator::allocate_all`] consumes
//! the allocator, so no partial record list escapes a failed run.

use tracing::{debug, error, info, warn};

use super::error::PlannerError;
use super::phase::{find_delta, residual_demand, standard_pattern};
use super::slots::SlotAvailabilitySet;
use crate::workload::{AllocationRecord, Slot, WorkloadEntry};

#[derive(Debug)]
pub struct PartitionAllocator {
    hyperperiod: u64,
    available: SlotAvailabilitySet,
    records: Vec<AllocationRecord>,
}

impl PartitionAllocator {
    /// Allocator over an empty grid of `hyperperiod` slots.
    pub fn new(hyperperiod: u64) -> Self {
        Self {
            hyperperiod,
            available: SlotAvailabilitySet::full(hyperperiod),
            records: Vec::new(),
        }
    }

    /// Slots not yet committed.
    pub fn available(&self) -> &SlotAvailabilitySet {
        &self.available
    }

    /// Records committed so far, in commit order.
    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    /// Allocate every workload in the given order and return the unsorted
    /// record list.
    pub fn allocate_all(
        mut self,
        workloads: &[WorkloadEntry],
    ) -> Result<Vec<AllocationRecord>, PlannerError> {
        for workload in workloads {
            self.allocate(workload)?;
        }
        Ok(self.records)
    }

    /// Commit one workload's slots for the whole hyperperiod.
    pub fn allocate(&mut self, workload: &WorkloadEntry) -> Result<(), PlannerError> {
        let occupied = self.placement(workload)?;

        for &slot in &occupied {
            if !self.available.contains(slot) {
                error!(workload = workload.id, slot, "slot allocated redundantly");
                return Err(PlannerError::AllocationConflict {
                    workload_id: workload.id,
                    slot,
                });
            }
        }

        // Re-base on a fresh snapshot; the previous set is dropped only once
        // the removal succeeded.
        let mut next = self.available.snapshot();
        next.remove_all(&occupied).map_err(|slot| {
            error!(workload = workload.id, slot, "slot allocated redundantly");
            PlannerError::AllocationConflict {
                workload_id: workload.id,
                slot,
            }
        })?;
        self.available = next;

        self.records
            .extend(occupied.iter().map(|&slot| AllocationRecord::new(slot, workload.id)));

        info!(
            workload = workload.id,
            wcet = workload.wcet,
            period = workload.period,
            committed = occupied.len(),
            remaining = self.available.len(),
            "✓ allocated"
        );
        Ok(())
    }

    /// Slots `workload` would occupy across the hyperperiod, in commit order
    /// (repetition-major).
    fn placement(&self, workload: &WorkloadEntry) -> Result<Vec<Slot>, PlannerError> {
        let period = workload.period;
        let repetitions = workload.repetitions(self.hyperperiod);

        if workload.wcet == 1 {
            let base = match self.available.first() {
                Some(base) if base < period => base,
                first => {
                    warn!(
                        workload = workload.id,
                        first_free = ?first,
                        period,
                        "no free slot inside the first period"
                    );
                    return Err(self.unschedulable(workload));
                }
            };
            debug!(workload = workload.id, base, "single-slot placement");
            return Ok((0..repetitions).map(|l| base + l * period).collect());
        }

        let residual =
            residual_demand(self.available.len(), period, self.hyperperiod, workload.wcet);
        let Some(delta) = find_delta(&self.available, period, workload.wcet, residual) else {
            warn!(
                workload = workload.id,
                wcet = workload.wcet,
                period,
                residual,
                available = self.available.len(),
                "✗ no phase shift fits"
            );
            return Err(self.unschedulable(workload));
        };
        debug!(workload = workload.id, delta, residual, "phase shift selected");

        let pattern = standard_pattern(period, workload.wcet);
        Ok((0..repetitions)
            .flat_map(|l| {
                pattern
                    .iter()
                    .map(move |&offset| (offset + delta) % period + l * period)
            })
            .collect())
    }

    fn unschedulable(&self, workload: &WorkloadEntry) -> PlannerError {
        PlannerError::Unschedulable {
            workload_id: workload.id,
            wcet: workload.wcet,
            period: workload.period,
            available: self.available.len(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
