/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Capacity diagnostics for a normalized workload set.
//!
//! # Status: warning only
//!
//! The total demand `Σ weight_i` is compared with the hyperperiod before
//! allocation.  An excess is **logged**, never enforced: the phase search is
//! the authority on feasibility, and it fails on its own when capacity runs
//! out.  Demand at or below capacity does not imply feasibility either;
//! phase alignment can still make a set unschedulable.

use std::collections::BTreeMap;

use crate::workload::{WorkloadEntry, WorkloadId};

/// Total slots owed per hyperperiod across all workloads.
pub fn total_demand(weights: &BTreeMap<WorkloadId, u64>) -> u64 {
    weights.values().fold(0u64, |acc, &w| acc.saturating_add(w))
}

/// Processor utilisation `Σ wcet_i / period_i`.
pub fn total_utilization(workloads: &[WorkloadEntry]) -> f64 {
    workloads.iter().map(WorkloadEntry::utilization).sum()
}

/// Returns `Some(excess)` when total demand exceeds `hyperperiod` slots,
/// `None` when it fits.
pub fn check_capacity(hyperperiod: u64, weights: &BTreeMap<WorkloadId, u64>) -> Option<u64> {
    let demand = total_demand(weights);
    if demand > hyperperiod {
        Some(demand - hyperperiod)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(WorkloadId, u64)]) -> BTreeMap<WorkloadId, u64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn demand_sums_weights() {
        assert_eq!(total_demand(&weights(&[(0, 2), (1, 2)])), 4);
        assert_eq!(total_demand(&weights(&[])), 0);
    }

    #[test]
    fn exact_fit_has_no_excess() {
        assert_eq!(check_capacity(4, &weights(&[(0, 2), (1, 2)])), None);
    }

    #[test]
    fn overload_reports_excess() {
        // Two full-occupancy workloads on hyperperiod 4
        assert_eq!(check_capacity(4, &weights(&[(0, 4), (1, 4)])), Some(4));
    }

    #[test]
    fn utilization_sums_rates() {
        let ws = [WorkloadEntry::new(0, 2, 4), WorkloadEntry::new(1, 1, 2)];
        assert!((total_utilization(&ws) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_fits() {
        assert_eq!(check_capacity(0, &weights(&[])), None);
        assert_eq!(total_utilization(&[]), 0.0);
    }
}
