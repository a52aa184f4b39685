/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The set of slots in `[0, hyperperiod)` not yet committed to any workload.
//!
//! `BTreeSet` (not `HashSet`) so the smallest free slot is O(log n) and
//! iteration is always ascending.  The set starts full and only shrinks.

use std::collections::BTreeSet;

use crate::workload::Slot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAvailabilitySet {
    slots: BTreeSet<Slot>,
}

impl SlotAvailabilitySet {
    /// Every slot in `[0, hyperperiod)`.
    pub fn full(hyperperiod: u64) -> Self {
        Self {
            slots: (0..hyperperiod).collect(),
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    /// Cardinality.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Smallest available slot, or `None` once capacity is exhausted.
    pub fn first(&self) -> Option<Slot> {
        self.slots.first().copied()
    }

    /// Ascending iteration over available slots.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().copied()
    }

    /// Remove every slot in `slots`.
    ///
    /// Each slot must be present exactly once.  On the first violation (slot
    /// absent, or listed twice) the offending slot is returned and the set is
    /// left unchanged: a violation means two workloads were about to share
    /// a slot.
    pub fn remove_all(&mut self, slots: &[Slot]) -> Result<(), Slot> {
        let mut seen = BTreeSet::new();
        for &slot in slots {
            if !self.slots.contains(&slot) || !seen.insert(slot) {
                return Err(slot);
            }
        }
        for slot in seen {
            self.slots.remove(&slot);
        }
        Ok(())
    }

    /// Independent copy with its own owner; mutating it never affects `self`.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
