//! Per-player ability bookkeeping.

use std::time::Duration;

use pantry_maze_core::{AbilityDuration, AbilityKind};

const SLOT_COUNT: usize = AbilityKind::ALL.len();

/// Abilities currently held by a single player.
///
/// At most one instance per [`AbilityKind`] exists at a time. Granting a held
/// kind replaces the instance instead of stacking durations. Limited instances
/// are removed in the same [`AbilityInventory::tick`] that drains them, so
/// every held kind has time left or is unlimited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityInventory {
    slots: [Option<AbilityDuration>; SLOT_COUNT],
}

impl AbilityInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or refreshes the instance for `kind`.
    ///
    /// A limited duration of zero is treated as unlimited.
    pub fn grant(&mut self, kind: AbilityKind, duration: AbilityDuration) {
        self.slots[kind.index()] = Some(duration.normalized());
    }

    /// Removes `kind` if held, reporting whether anything was removed.
    pub fn consume(&mut self, kind: AbilityKind) -> bool {
        self.slots[kind.index()].take().is_some()
    }

    /// Reports whether `kind` is currently held.
    #[must_use]
    pub fn has(&self, kind: AbilityKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Remaining lifetime of `kind`, if held.
    #[must_use]
    pub fn remaining(&self, kind: AbilityKind) -> Option<AbilityDuration> {
        self.slots[kind.index()]
    }

    /// Reports whether no ability is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over held abilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKind, AbilityDuration)> + '_ {
        AbilityKind::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(kind, slot)| slot.map(|duration| (*kind, duration)))
    }

    /// Counts limited abilities down by `dt`.
    ///
    /// Instances that reach zero are removed and appended to `expired` in
    /// declaration order. Unlimited instances are untouched.
    pub fn tick(&mut self, dt: Duration, expired: &mut Vec<AbilityKind>) {
        for (kind, slot) in AbilityKind::ALL.iter().zip(self.slots.iter_mut()) {
            let Some(AbilityDuration::Limited(remaining)) = slot else {
                continue;
            };

            let left = remaining.saturating_sub(dt);
            if left.is_zero() {
                *slot = None;
                expired.push(*kind);
            } else {
                *remaining = left;
            }
        }
    }
}
