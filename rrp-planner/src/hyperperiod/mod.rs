//! Hyperperiod calculation.
//!
//! The hyperperiod of a workload set is the Least Common Multiple (LCM) of all
//! periods: the smallest window after which the whole schedule repeats.  Every
//! slot index handed out by the planner lives in `[0, hyperperiod)`.
//!
//! The hyperperiod also sizes the availability set, so it is bounded by an
//! explicit ceiling.  LCM growth is multiplicative in the number of coprime
//! periods; without the ceiling a handful of awkward periods would make the
//! planner allocate gigabytes.

pub mod math;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::workload::WorkloadEntry;
use math::lcm_of_slice;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default upper limit on the hyperperiod, in slots.
pub const DEFAULT_HYPERPERIOD_LIMIT: u64 = 1_000_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during hyperperiod calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyperperiodError {
    /// No workload with a non-zero period was supplied.
    #[error("no workloads with a valid (non-zero) period")]
    NoValidPeriods,

    /// LCM calculation overflowed `u64`.
    #[error("LCM overflow computing lcm({a}, {b})")]
    Overflow { a: u64, b: u64 },

    /// The calculated hyperperiod exceeded the configured limit.
    #[error("hyperperiod {value} slots exceeds limit of {limit} slots")]
    TooLarge { value: u64, limit: u64 },
}

// ── HyperperiodInfo ───────────────────────────────────────────────────────────

/// Calculated hyperperiod for one workload set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperperiodInfo {
    /// Hyperperiod in slots (LCM of all periods).
    pub hyperperiod: u64,

    /// Unique periods present in the set (sorted, deduplicated).
    pub unique_periods: Vec<u64>,

    /// Number of workloads that contributed.
    pub workload_count: usize,
}

// ── HyperperiodCalculator ─────────────────────────────────────────────────────

/// Computes hyperperiods under a fixed ceiling.
///
/// # Example
/// ```rust
/// use rrp_planner::hyperperiod::HyperperiodCalculator;
/// use rrp_planner::workload::WorkloadEntry;
///
/// let calc = HyperperiodCalculator::new();
/// let workloads = [WorkloadEntry::new(0, 2, 4), WorkloadEntry::new(1, 1, 6)];
/// let info = calc.calculate(&workloads).unwrap();
/// assert_eq!(info.hyperperiod, 12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HyperperiodCalculator {
    /// A calculated value above this limit yields
    /// [`HyperperiodError::TooLarge`].
    limit: u64,
}

impl HyperperiodCalculator {
    /// Calculator with the default ceiling.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HYPERPERIOD_LIMIT)
    }

    /// Calculator with a custom ceiling, in slots.
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Calculate the hyperperiod of `workloads`.
    ///
    /// Zero periods are skipped; the normalizer rejects them earlier, this
    /// only keeps the function total.
    ///
    /// # Errors
    /// * [`HyperperiodError::NoValidPeriods`] – empty input or all periods zero.
    /// * [`HyperperiodError::Overflow`] – LCM exceeded `u64`.
    /// * [`HyperperiodError::TooLarge`] – result exceeds the ceiling.
    pub fn calculate(&self, workloads: &[WorkloadEntry]) -> Result<HyperperiodInfo, HyperperiodError> {
        let unique_periods: Vec<u64> = {
            let mut v: Vec<u64> = workloads
                .iter()
                .map(|w| w.period)
                .filter(|&p| p > 0)
                .collect();
            v.sort_unstable();
            v.dedup();
            v
        };

        if unique_periods.is_empty() {
            warn!("No workloads with valid periods");
            return Err(HyperperiodError::NoValidPeriods);
        }

        let hyperperiod = lcm_of_slice(&unique_periods)?;

        if hyperperiod > self.limit {
            warn!(
                hyperperiod,
                limit = self.limit,
                "Hyperperiod exceeds configured limit"
            );
            return Err(HyperperiodError::TooLarge {
                value: hyperperiod,
                limit: self.limit,
            });
        }

        info!(
            workload_count = workloads.len(),
            unique_count = unique_periods.len(),
            hyperperiod,
            "Calculated hyperperiod"
        );
        for p in &unique_periods {
            debug!(period = p, repetitions = hyperperiod / p, "  unique period");
        }

        Ok(HyperperiodInfo {
            hyperperiod,
            unique_periods,
            workload_count: workloads.len(),
        })
    }
}

impl Default for HyperperiodCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(periods: &[u64]) -> Vec<WorkloadEntry> {
        periods
            .iter()
            .enumerate()
            .map(|(i, &p)| WorkloadEntry::new(i as u32, 1, p))
            .collect()
    }

    #[test]
    fn two_periods() {
        let info = HyperperiodCalculator::new().calculate(&entries(&[4, 2])).unwrap();
        assert_eq!(info.hyperperiod, 4);
        assert_eq!(info.workload_count, 2);
    }

    #[test]
    fn coprime_periods_multiply() {
        let info = HyperperiodCalculator::new()
            .calculate(&entries(&[3, 5, 7]))
            .unwrap();
        assert_eq!(info.hyperperiod, 105);
    }

    #[test]
    fn unique_periods_are_sorted_and_deduped() {
        let info = HyperperiodCalculator::new()
            .calculate(&entries(&[6, 2, 6, 3]))
            .unwrap();
        assert_eq!(info.unique_periods, vec![2, 3, 6]);
        assert_eq!(info.workload_count, 4);
    }

    #[test]
    fn hyperperiod_is_minimal_common_multiple() {
        // Exhaustive over small period pairs and triples.
        let calc = HyperperiodCalculator::new();
        for a in 1..=12u64 {
            for b in 1..=12u64 {
                for c in [1u64, 4, 9] {
                    let hp = calc.calculate(&entries(&[a, b, c])).unwrap().hyperperiod;
                    assert!(hp % a == 0 && hp % b == 0 && hp % c == 0);
                    let smaller = (1..hp).find(|m| m % a == 0 && m % b == 0 && m % c == 0);
                    assert_eq!(smaller, None, "hyperperiod of ({a}, {b}, {c}) not minimal");
                }
            }
        }
    }

    #[test]
    fn empty_input_returns_no_valid_periods() {
        let result = HyperperiodCalculator::new().calculate(&[]);
        assert_eq!(result.unwrap_err(), HyperperiodError::NoValidPeriods);
    }

    #[test]
    fn zero_periods_are_skipped() {
        let result = HyperperiodCalculator::new().calculate(&entries(&[0, 0]));
        assert_eq!(result.unwrap_err(), HyperperiodError::NoValidPeriods);
    }

    #[test]
    fn exceeding_limit_returns_too_large() {
        let calc = HyperperiodCalculator::with_limit(100);
        let result = calc.calculate(&entries(&[7, 11, 13]));
        assert_eq!(
            result.unwrap_err(),
            HyperperiodError::TooLarge {
                value: 1001,
                limit: 100
            }
        );
    }

    #[test]
    fn hyperperiod_at_exactly_the_limit_is_accepted() {
        let calc = HyperperiodCalculator::with_limit(12);
        assert_eq!(calc.calculate(&entries(&[4, 6])).unwrap().hyperperiod, 12);
    }

    #[test]
    fn overflow_is_reported() {
        let calc = HyperperiodCalculator::with_limit(u64::MAX);
        let huge = u64::MAX / 2 + 1;
        let result = calc.calculate(&entries(&[huge - 1, huge]));
        assert!(matches!(result, Err(HyperperiodError::Overflow { .. })));
    }
}
