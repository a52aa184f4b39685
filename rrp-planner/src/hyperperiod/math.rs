/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Integer helpers for hyperperiod computation: GCD, checked LCM and a
//! left-to-right LCM fold.
//!
//! Free functions so they can be tested without a [`HyperperiodCalculator`].
//!
//! [`HyperperiodCalculator`]: super::HyperperiodCalculator

use super::HyperperiodError;

/// Iterative Euclidean GCD.  `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Smallest positive integer divisible by both `a` and `b`.
///
/// Computed as `(a / gcd(a, b)) * b`; the division is exact, only the final
/// multiplication can overflow and it is checked.  Either operand being zero
/// yields `Ok(0)`.
pub fn lcm(a: u64, b: u64) -> Result<u64, HyperperiodError> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b))
        .checked_mul(b)
        .ok_or(HyperperiodError::Overflow { a, b })
}

/// Pairwise LCM folded left to right, starting from `1`.
///
/// An empty input folds to `1`; callers reject empty workload sets before
/// getting here.
pub fn lcm_of_slice(periods: &[u64]) -> Result<u64, HyperperiodError> {
    periods.iter().try_fold(1u64, |acc, &p| lcm(acc, p))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
