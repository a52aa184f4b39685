//! Single-core regular resource partition planner.
//!
//! [`PartitionPlanner`] turns an ordered list of `(wcet, period)` pairs into a
//! static time-slice table covering one hyperperiod.  The pipeline is a pure
//! function of its input:
//!
//! ```text
//! (wcet, period)*  ──normalize──►  hyperperiod + processing order
//!                  ──allocate───►  (slot, workload) records, commit order
//!                  ──sort───────►  TimesliceTable, slot order
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `plan()`: all per-run state is local and dropped on return |
//! | Availability set | `BTreeSet`: O(log n) membership, ascending iteration |
//! | Failures | `Result<Schedule, PlannerError>`: no partial schedule on error |
//! | Resource ceiling | hyperperiod bounded by [`PlannerConfig::max_hyperperiod`] |
//! | Capacity check | logged warning only; the phase search decides feasibility |
//!
//! # Example
//! ```rust
//! use rrp_planner::config::PlannerConfig;
//! use rrp_planner::planner::PartitionPlanner;
//!
//! let planner = PartitionPlanner::new(PlannerConfig::default());
//! let schedule = planner.plan(&[(2, 4), (1, 2)]).unwrap();
//! assert_eq!(schedule.hyperperiod.hyperperiod, 4);
//! assert_eq!(schedule.table.len(), 4);
//! ```

pub mod allocator;
pub mod capacity;
pub mod error;
pub mod normalizer;
pub mod phase;
pub mod slots;
pub mod timeslice;

pub use error::{FailureKind, PlannerError, ValidationError};
pub use timeslice::{TimesliceRun, TimesliceTable};

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::hyperperiod::{HyperperiodCalculator, HyperperiodInfo};
use crate::workload::{WorkloadEntry, WorkloadId};

use allocator::PartitionAllocator;
use capacity::{check_capacity, total_demand, total_utilization};
use normalizer::normalize;

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Successful planning result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub hyperperiod: HyperperiodInfo,

    /// Workloads in the order they were allocated.
    pub order: Vec<WorkloadEntry>,

    /// Slots owed per hyperperiod, by workload id.
    pub weights: BTreeMap<WorkloadId, u64>,

    /// The allocation, ascending by slot.
    pub table: TimesliceTable,
}

// ── PartitionPlanner ──────────────────────────────────────────────────────────

/// The partition planner.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of `plan()` calls, from any thread.
#[derive(Debug, Clone, Copy)]
pub struct PartitionPlanner {
    calculator: HyperperiodCalculator,
}

impl PartitionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            calculator: HyperperiodCalculator::with_limit(config.max_hyperperiod),
        }
    }

    /// Plan a time-slice table for `workloads`, given as `(wcet, period)`
    /// pairs.  Workload ids are positions in this slice.
    ///
    /// # Errors
    /// Returns a [`PlannerError`]; [`PlannerError::kind`] gives the failure
    /// class and [`PlannerError::workload_id`] the culprit where one exists.
    pub fn plan(&self, workloads: &[(u64, u64)]) -> Result<Schedule, PlannerError> {
        info!(
            workload_count = workloads.len(),
            max_hyperperiod = self.calculator.limit(),
            "=== PartitionPlanner::plan() ==="
        );

        let normalized = normalize(workloads, &self.calculator)?;
        let hyperperiod = normalized.hyperperiod.hyperperiod;

        // ── Pre-allocation diagnostics ────────────────────────────────────────
        let demand = total_demand(&normalized.weights);
        let utilization = total_utilization(&normalized.workloads);
        info!(hyperperiod, demand, utilization, "availability weights computed");
        if let Some(excess) = check_capacity(hyperperiod, &normalized.weights) {
            warn!(
                hyperperiod,
                demand,
                excess,
                "total demand exceeds one hyperperiod, allocation will fail"
            );
        }

        // ── Allocation ────────────────────────────────────────────────────────
        let records = PartitionAllocator::new(hyperperiod).allocate_all(&normalized.workloads)?;
        let table = TimesliceTable::from_records(hyperperiod, records);

        info!(
            hyperperiod,
            allocated = table.len(),
            idle = hyperperiod - table.len() as u64,
            "=== Planning complete ==="
        );

        Ok(Schedule {
            hyperperiod: normalized.hyperperiod,
            order: normalized.workloads,
            weights: normalized.weights,
            table,
        })
    }
}

impl Default for PartitionPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperperiod::HyperperiodError;
    use crate::workload::Slot;
    use std::collections::BTreeSet;

    fn plan(pairs: &[(u64, u64)]) -> Result<Schedule, PlannerError> {
        PartitionPlanner::default().plan(pairs)
    }

    fn table_pairs(s: &Schedule) -> Vec<(Slot, WorkloadId)> {
        s.table
            .records()
            .iter()
            .map(|r| (r.slot, r.workload_id))
            .collect()
    }

    /// Checks every invariant a successful schedule must satisfy.
    fn assert_schedule_invariants(pairs: &[(u64, u64)], s: &Schedule) {
        let hp = s.hyperperiod.hyperperiod;
        let records = s.table.records();

        // Ordering (strict, which also rules out double allocation)
        assert!(
            records.windows(2).all(|w| w[0].slot < w[1].slot),
            "{pairs:?}: slots not strictly ascending"
        );
        let unique: BTreeSet<Slot> = records.iter().map(|r| r.slot).collect();
        assert_eq!(unique.len(), records.len(), "{pairs:?}: double allocation");
        assert!(records.iter().all(|r| r.slot < hp));

        // Demand conservation
        for (id, &(wcet, period)) in pairs.iter().enumerate() {
            let expected = (hp / period) * wcet;
            assert_eq!(
                s.table.slots_for(id as WorkloadId) as u64,
                expected,
                "{pairs:?}: workload {id} got wrong slot count"
            );
            assert_eq!(s.weights[&(id as WorkloadId)], expected);
        }
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn scenario_two_workloads_fill_hyperperiod() {
        let s = plan(&[(2, 4), (1, 2)]).unwrap();
        assert_eq!(s.hyperperiod.hyperperiod, 4);
        assert_eq!(table_pairs(&s), vec![(0, 0), (1, 1), (2, 0), (3, 1)]);
        assert_eq!(s.table.slots_for(0), 2);
        assert_eq!(s.table.slots_for(1), 2);
        assert!(s.table.idle_slots().is_empty());
    }

    #[test]
    fn scenario_full_occupancy_single_workload() {
        let s = plan(&[(3, 3)]).unwrap();
        assert_eq!(s.hyperperiod.hyperperiod, 3);
        assert_eq!(table_pairs(&s), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn scenario_overload_is_unschedulable() {
        let err = plan(&[(4, 4), (4, 4)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unschedulable);
        assert_eq!(err.workload_id(), Some(1));
    }

    #[test]
    fn scenario_empty_set_is_validation_error() {
        let err = plan(&[]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationError);
        assert_eq!(err.workload_id(), None);
    }

    #[test]
    fn scenario_rate_above_one_is_validation_error() {
        let err = plan(&[(5, 3)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationError);
        assert_eq!(err.workload_id(), Some(0));
    }

    // ── Further behaviour ─────────────────────────────────────────────────────

    #[test]
    fn partial_demand_leaves_idle_slots_out_of_the_table() {
        let s = plan(&[(1, 4), (1, 2)]).unwrap();
        // order: equal wcet → input order; id 0 → {0}, id 1 → {1, 3}
        assert_eq!(table_pairs(&s), vec![(0, 0), (1, 1), (3, 1)]);
        assert_eq!(s.table.idle_slots(), vec![2]);
    }

    #[test]
    fn order_is_descending_wcet() {
        let pairs = [(1, 4), (2, 4), (1, 4)];
        let s = plan(&pairs).unwrap();
        let ids: Vec<_> = s.order.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 0, 2]);
        // id 1 → {0, 2}, id 0 → {1}, id 2 → {3}
        assert_eq!(table_pairs(&s), vec![(0, 1), (1, 0), (2, 1), (3, 2)]);
        assert_schedule_invariants(&pairs, &s);
    }

    #[test]
    fn mixed_periods_schedule() {
        let pairs = [(2, 6), (1, 3), (1, 6)];
        let s = plan(&pairs).unwrap();
        assert_eq!(s.hyperperiod.hyperperiod, 6);
        // id 0 → {0, 3}, id 1 → {1, 4}, id 2 → {2}
        assert_eq!(table_pairs(&s), vec![(0, 0), (1, 1), (2, 2), (3, 0), (4, 1)]);
        assert_schedule_invariants(&pairs, &s);
    }

    #[test]
    fn demand_above_capacity_is_unschedulable() {
        // 2 + 2 + 3 = 7 slots owed in a hyperperiod of 6
        let err = plan(&[(2, 6), (1, 3), (1, 2)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unschedulable);
        assert_eq!(err.workload_id(), Some(2));
    }

    #[test]
    fn hyperperiod_ceiling_is_input_too_large() {
        let planner = PartitionPlanner::new(PlannerConfig { max_hyperperiod: 20 });
        let err = planner.plan(&[(1, 3), (1, 7)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InputTooLarge);
        assert!(matches!(
            err,
            PlannerError::InputTooLarge(HyperperiodError::TooLarge { value: 21, limit: 20 })
        ));
    }

    // ── Properties over small input grids ─────────────────────────────────────

    fn small_pairs() -> Vec<(u64, u64)> {
        (1..=6u64)
            .flat_map(|p| (1..=p).map(move |c| (c, p)))
            .collect()
    }

    #[test]
    fn successful_plans_satisfy_invariants() {
        let singles = small_pairs();
        let mut successes = 0;
        for &a in &singles {
            for &b in &singles {
                let pairs = [a, b];
                if let Ok(s) = plan(&pairs) {
                    assert_schedule_invariants(&pairs, &s);
                    successes += 1;
                }
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn three_workload_plans_satisfy_invariants() {
        let singles = [(1, 2), (1, 3), (2, 4), (1, 4), (2, 6), (3, 6), (1, 6)];
        for &a in &singles {
            for &b in &singles {
                for &c in &singles {
                    let pairs = [a, b, c];
                    match plan(&pairs) {
                        Ok(s) => assert_schedule_invariants(&pairs, &s),
                        Err(e) => assert!(
                            matches!(
                                e.kind(),
                                FailureKind::Unschedulable | FailureKind::AllocationConflict
                            ),
                            "{pairs:?}: unexpected failure {e}"
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn single_valid_workload_always_schedules() {
        for pair in small_pairs() {
            let s = plan(&[pair]).unwrap();
            assert_schedule_invariants(&[pair], &s);
        }
    }

    #[test]
    fn planning_is_deterministic() {
        let inputs: [&[(u64, u64)]; 4] = [
            &[(2, 4), (1, 2)],
            &[(2, 6), (1, 3), (1, 6)],
            &[(4, 4), (4, 4)],
            &[(3, 5), (1, 10), (2, 10)],
        ];
        for pairs in inputs {
            let reference = plan(pairs);
            for _ in 0..20 {
                assert_eq!(plan(pairs), reference, "{pairs:?}: non-deterministic");
            }
        }
    }

    #[test]
    fn resorting_output_is_identity() {
        let s = plan(&[(2, 6), (1, 3), (1, 6)]).unwrap();
        let once = s.table.records().to_vec();
        let twice = timeslice::sort_timeslices(once.clone());
        assert_eq!(once, twice);
    }
}
