//! Obstacles that are cleared by spending an ability.

use pantry_maze_core::{AbilityKind, ObstacleKind};

use crate::AbilityInventory;

/// Result of a single clear attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The required ability was consumed and the obstacle is now cleared.
    Cleared(AbilityKind),
    /// The obstacle was cleared by an earlier attempt; nothing was consumed.
    AlreadyCleared,
    /// The required ability is not held; nothing changed.
    Blocked,
}

impl ClearOutcome {
    /// Reports whether the obstacle is cleared after the attempt.
    #[must_use]
    pub const fn is_cleared(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

/// Ice wall or water patch blocking the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    kind: ObstacleKind,
    cleared: bool,
}

impl Obstacle {
    /// Creates an uncleared obstacle of the provided kind.
    #[must_use]
    pub const fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            cleared: false,
        }
    }

    /// Kind of obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Reports whether the obstacle has been cleared.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Spends the required ability from `inventory` to clear the obstacle.
    ///
    /// Clearing is one-way: once cleared, later attempts report
    /// [`ClearOutcome::AlreadyCleared`] without touching the inventory.
    pub fn try_clear(&mut self, inventory: &mut AbilityInventory) -> ClearOutcome {
        if self.cleared {
            return ClearOutcome::AlreadyCleared;
        }

        let required = self.kind.required_ability();
        if !inventory.consume(required) {
            return ClearOutcome::Blocked;
        }

        self.cleared = true;
        ClearOutcome::Cleared(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_maze_core::AbilityDuration;

    #[test]
    fn wall_without_spicy_stays_blocked() {
        let mut wall = Obstacle::new(ObstacleKind::MeltableWall);
        let mut inventory = AbilityInventory::new();
        inventory.grant(AbilityKind::Absorbent, AbilityDuration::Unlimited);

        assert_eq!(wall.try_clear(&mut inventory), ClearOutcome::Blocked);
        assert!(!wall.is_cleared());
        assert!(inventory.has(AbilityKind::Absorbent));
    }

    #[test]
    fn clearing_twice_consumes_only_once() {
        let mut water = Obstacle::new(ObstacleKind::SoakableWater);
        let mut inventory = AbilityInventory::new();
        inventory.grant(AbilityKind::Absorbent, AbilityDuration::Unlimited);

        assert_eq!(water.try_clear(&mut inventory), ClearOutcome::Cleared(AbilityKind::Absorbent));
        assert!(!inventory.has(AbilityKind::Absorbent));

        inventory.grant(AbilityKind::Absorbent, AbilityDuration::Unlimited);
        let second = water.try_clear(&mut inventory);
        assert_eq!(second, ClearOutcome::AlreadyCleared);
        assert!(second.is_cleared());
        assert!(inventory.has(AbilityKind::Absorbent), "second attempt must not spend the ability");
    }
}
