//! Balancing values shared by the world and the progress systems.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Complete set of balancing values, typically loaded from a TOML file.
///
/// Every section falls back to its defaults when omitted, so an empty document
/// is a valid configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Movement speed factors.
    pub movement: MovementTuning,
    /// Countdown and rating parameters for timed levels.
    pub level: LevelTuning,
    /// Parameters for the guided tutorial.
    pub tutorial: TutorialTuning,
}

/// Factors combined into the player's movement speed multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Applied while on a sticky floor without [`crate::AbilityKind::Slippery`].
    pub sticky_slow_factor: f32,
    /// Applied while [`crate::AbilityKind::Slippery`] is held.
    pub slippery_speed_factor: f32,
    /// Applied while [`crate::AbilityKind::Sweet`] is held.
    pub sweet_speed_factor: f32,
}

impl MovementTuning {
    /// Composes the movement multiplier for the provided modifiers.
    ///
    /// Factors apply in a fixed order: the sticky penalty (skipped while
    /// slippery), then the slippery boost, then the sweet boost. The product is
    /// never clamped, so concurrent boosts compound.
    #[must_use]
    pub fn speed_multiplier(&self, modifiers: MoveModifiers) -> f32 {
        let mut multiplier = 1.0;

        if modifiers.inside_sticky && !modifiers.has_slippery {
            multiplier *= self.sticky_slow_factor;
        }

        if modifiers.has_slippery {
            multiplier *= self.slippery_speed_factor;
        }

        if modifiers.has_sweet {
            multiplier *= self.sweet_speed_factor;
        }

        multiplier
    }
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            sticky_slow_factor: 0.35,
            slippery_speed_factor: 1.4,
            sweet_speed_factor: 1.25,
        }
    }
}

/// Player state that influences movement speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveModifiers {
    /// Whether the player overlaps at least one sticky floor.
    pub inside_sticky: bool,
    /// Whether the player holds [`crate::AbilityKind::Slippery`].
    pub has_slippery: bool,
    /// Whether the player holds [`crate::AbilityKind::Sweet`].
    pub has_sweet: bool,
}

/// Countdown and rating parameters for timed levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Seconds available to eat every ingredient.
    pub time_limit_secs: f32,
    /// Elapsed-time thresholds for five, four, three and two stars.
    pub star_thresholds_secs: [f32; 4],
}

impl LevelTuning {
    /// Countdown length as a [`Duration`].
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        seconds(self.time_limit_secs)
    }

    /// Star thresholds ordered from the fastest tier to the slowest.
    ///
    /// Values are sorted, so the file order of the thresholds is irrelevant.
    #[must_use]
    pub fn star_thresholds(&self) -> [Duration; 4] {
        let mut thresholds = self.star_thresholds_secs.map(seconds);
        thresholds.sort_unstable();
        thresholds
    }
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            time_limit_secs: 120.0,
            star_thresholds_secs: [24.0, 48.0, 72.0, 96.0],
        }
    }
}

/// Parameters for the guided tutorial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialTuning {
    /// Seconds an idle player waits on the first step before the hint advances.
    pub idle_hint_secs: f32,
}

impl TutorialTuning {
    /// Idle hint grace period as a [`Duration`].
    #[must_use]
    pub fn idle_hint(&self) -> Duration {
        seconds(self.idle_hint_secs)
    }
}

impl Default for TutorialTuning {
    fn default() -> Self {
        Self {
            idle_hint_secs: 2.0,
        }
    }
}

fn seconds(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
}
