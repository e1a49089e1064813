//! Overlap depth tracking for sticky floors.

/// Number of sticky regions a player currently overlaps.
///
/// Adjacent sticky tiles overlap the player at the same time, so entering the
/// second tile and leaving the first must keep the player slowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StickyDepth(u32);

impl StickyDepth {
    /// Records that the player entered a sticky region.
    pub fn enter(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Records that the player left a sticky region, never dropping below zero.
    pub fn exit(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Reports whether the player overlaps at least one sticky region.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.0 > 0
    }

    /// Current overlap depth.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}
