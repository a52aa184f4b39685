/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Phase search: find a shift of a workload's evenly spaced slot pattern that
//! fits entirely inside the available slots.
//!
//! # Pattern
//! A workload needing `q` slots every `p` slots uses the canonical pattern
//!
//! ```text
//! T(p, q, 0)[k] = floor(k·p / q) mod p        k = 0..q
//! ```
//!
//! which spreads the `q` slots as evenly as integer slots allow (the ideal
//! supply of a periodic resource server).  `T(p, q, δ)` shifts every element
//! by `δ` modulo `p`.
//!
//! # Search
//! [`find_delta`] is first-fit: it returns the smallest primary shift for
//! which *some* residual shift also fits.  The residual pattern is not
//! checked for disjointness from the primary one; a primary shift accepted
//! this way can leave a future state that only fails later, as an allocation
//! conflict or an unschedulable workload.

use tracing::{debug, trace};

use super::slots::SlotAvailabilitySet;
use crate::workload::Slot;

/// `T(period, q, 0)`: `q` slot offsets in `[0, period)`, ascending.
///
/// `q == 0` yields an empty pattern.  `q` is expected to be `<= period`.
pub fn standard_pattern(period: u64, q: u64) -> Vec<Slot> {
    if q == 0 || period == 0 {
        return Vec::new();
    }
    (0..q)
        .map(|k| {
            // u128 keeps k·p exact for any u64 period.
            let offset = (k as u128 * period as u128) / q as u128;
            (offset % period as u128) as Slot
        })
        .collect()
}

/// `true` if `T(period, wcet, delta)` lies inside `available`.
///
/// Only the first `wcet` entries of `pattern` are tested, and only within the
/// first period; replicating across the hyperperiod is the allocator's job.
pub fn check_delta(
    available: &SlotAvailabilitySet,
    pattern: &[Slot],
    wcet: u64,
    delta: u64,
    period: u64,
) -> bool {
    pattern
        .iter()
        .take(wcet as usize)
        .all(|&offset| available.contains((offset + delta) % period))
}

/// Capacity that must still fit after this workload is placed:
/// `floor(available · period / hyperperiod) − wcet`, saturating at zero.
pub fn residual_demand(available: usize, period: u64, hyperperiod: u64, wcet: u64) -> u64 {
    if hyperperiod == 0 {
        return 0;
    }
    let per_period = (available as u128 * period as u128) / hyperperiod as u128;
    (per_period as u64).saturating_sub(wcet)
}

/// Smallest `delta1` in `[0, period)` such that `T(period, wcet, delta1)` fits
/// in `available` and some `delta2` places `T(period, wcet_residual, delta2)`
/// in `available` too.  `None` if no such `delta1` exists.
///
/// A zero `wcet_residual` produces an empty residual pattern, which fits
/// trivially.
pub fn find_delta(
    available: &SlotAvailabilitySet,
    period: u64,
    wcet: u64,
    wcet_residual: u64,
) -> Option<u64> {
    let primary = standard_pattern(period, wcet);
    let residual = standard_pattern(period, wcet_residual);

    // The inner scan does not depend on delta1; evaluate it once, on first
    // need, so the scan order matches a nested loop.
    let mut residual_fits: Option<bool> = None;

    for delta1 in 0..period {
        if !check_delta(available, &primary, wcet, delta1, period) {
            continue;
        }
        let fits = *residual_fits.get_or_insert_with(|| {
            let found = (0..period)
                .find(|&delta2| check_delta(available, &residual, wcet_residual, delta2, period));
            trace!(?found, wcet_residual, "residual placement");
            found.is_some()
        });
        if fits {
            debug!(period, wcet, wcet_residual, delta1, "phase search succeeded");
            return Some(delta1);
        }
        // No residual placement exists at all, so no later delta1 can pass.
        break;
    }

    debug!(period, wcet, wcet_residual, "phase search found no delta");
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
