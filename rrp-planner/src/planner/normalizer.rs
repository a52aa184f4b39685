/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule normalizer: validates the producer's `(wcet, period)` sequence,
//! assigns ids, computes the hyperperiod and availability weights, and fixes
//! the processing order.
//!
//! Processing order is **descending WCET**, ties in input order.  Workloads
//! with larger demand have fewer feasible phase placements, so granting them
//! first keeps the search space from collapsing under them later.

use std::collections::BTreeMap;

use tracing::debug;

use super::error::{PlannerError, ValidationError};
use crate::hyperperiod::{HyperperiodCalculator, HyperperiodError, HyperperiodInfo};
use crate::workload::{WorkloadEntry, WorkloadId};

/// Output of [`normalize`]: everything the allocator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSchedule {
    pub hyperperiod: HyperperiodInfo,

    /// Workloads in processing order (descending WCET, stable).
    pub workloads: Vec<WorkloadEntry>,

    /// Availability weight per workload id: slots owed per hyperperiod.
    pub weights: BTreeMap<WorkloadId, u64>,
}

/// Validate one input pair.
fn validate(id: WorkloadId, wcet: u64, period: u64) -> Result<(), ValidationError> {
    if period == 0 {
        return Err(ValidationError::ZeroPeriod { workload_id: id });
    }
    if wcet == 0 {
        return Err(ValidationError::ZeroWcet { workload_id: id });
    }
    if wcet > period {
        return Err(ValidationError::RateExceedsOne {
            workload_id: id,
            wcet,
            period,
        });
    }
    Ok(())
}

/// Normalize an ordered `(wcet, period)` sequence.
///
/// # Errors
/// * [`ValidationError`] – empty input, zero values, or `wcet > period`.
/// * [`PlannerError::InputTooLarge`] – hyperperiod overflow or above the
///   calculator's ceiling.
pub fn normalize(
    pairs: &[(u64, u64)],
    calculator: &HyperperiodCalculator,
) -> Result<NormalizedSchedule, PlannerError> {
    if pairs.is_empty() {
        return Err(ValidationError::Empty.into());
    }

    let mut workloads = Vec::with_capacity(pairs.len());
    for (index, &(wcet, period)) in pairs.iter().enumerate() {
        let id = WorkloadId::try_from(index).map_err(|_| {
            PlannerError::InputTooLarge(HyperperiodError::TooLarge {
                value: pairs.len() as u64,
                limit: u64::from(WorkloadId::MAX),
            })
        })?;
        validate(id, wcet, period)?;
        workloads.push(WorkloadEntry::new(id, wcet, period));
    }

    let hyperperiod = calculator.calculate(&workloads)?;

    let weights: BTreeMap<WorkloadId, u64> = workloads
        .iter()
        .map(|w| (w.id, w.availability_weight(hyperperiod.hyperperiod)))
        .collect();

    // `sort_by` is stable: equal WCETs keep input order.
    workloads.sort_by(|a, b| b.wcet.cmp(&a.wcet));

    for w in &workloads {
        debug!(
            id = w.id,
            wcet = w.wcet,
            period = w.period,
            weight = weights[&w.id],
            "processing order"
        );
    }

    Ok(NormalizedSchedule {
        hyperperiod,
        workloads,
        weights,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pairs: &[(u64, u64)]) -> Result<NormalizedSchedule, PlannerError> {
        normalize(pairs, &HyperperiodCalculator::new())
    }

    #[test]
    fn ids_follow_input_order() {
        let n = run(&[(1, 2), (2, 4)]).unwrap();
        let by_id: Vec<_> = n.workloads.iter().map(|w| (w.id, w.wcet)).collect();
        // sorted: wcet 2 (id 1) first
        assert_eq!(by_id, vec![(1, 2), (0, 1)]);
    }

    #[test]
    fn sorts_descending_by_wcet_stable_on_ties() {
        let n = run(&[(1, 4), (3, 6), (1, 2), (3, 12)]).unwrap();
        let ids: Vec<_> = n.workloads.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn computes_hyperperiod_and_weights() {
        let n = run(&[(2, 4), (1, 2)]).unwrap();
        assert_eq!(n.hyperperiod.hyperperiod, 4);
        assert_eq!(n.weights[&0], 2);
        assert_eq!(n.weights[&1], 2);
    }

    #[test]
    fn empty_input_is_validation_error() {
        assert_eq!(run(&[]).unwrap_err(), PlannerError::Validation(ValidationError::Empty));
    }

    #[test]
    fn zero_wcet_is_rejected() {
        assert_eq!(
            run(&[(1, 2), (0, 3)]).unwrap_err(),
            PlannerError::Validation(ValidationError::ZeroWcet { workload_id: 1 })
        );
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            run(&[(1, 0)]).unwrap_err(),
            PlannerError::Validation(ValidationError::ZeroPeriod { workload_id: 0 })
        );
    }

    #[test]
    fn rate_above_one_is_rejected() {
        assert_eq!(
            run(&[(5, 3)]).unwrap_err(),
            PlannerError::Validation(ValidationError::RateExceedsOne {
                workload_id: 0,
                wcet: 5,
                period: 3
            })
        );
    }

    #[test]
    fn hyperperiod_above_ceiling_is_input_too_large() {
        let calc = HyperperiodCalculator::with_limit(50);
        let err = normalize(&[(1, 7), (1, 11)], &calc).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InputTooLarge(HyperperiodError::TooLarge { value: 77, limit: 50 })
        );
    }
}
