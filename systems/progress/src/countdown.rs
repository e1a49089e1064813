//! Countdown clock and star rating for timed levels.

use std::time::Duration;

use pantry_maze_core::{ClockReadout, LevelTuning, StarRating};

/// Clock that counts from the level's time limit down to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Countdown {
    limit: Duration,
    remaining: Duration,
    thresholds: [Duration; 4],
}

impl Countdown {
    pub(crate) fn new(tuning: &LevelTuning) -> Self {
        let limit = tuning.time_limit();
        Self {
            limit,
            remaining: limit,
            thresholds: tuning.star_thresholds(),
        }
    }

    /// Drains `dt` from the clock and reports whether it ran out.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.remaining
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.limit.saturating_sub(self.remaining)
    }

    pub(crate) fn readout(&self) -> ClockReadout {
        ClockReadout::from_remaining(self.remaining)
    }

    pub(crate) fn rating(&self) -> StarRating {
        star_rating(self.elapsed(), &self.thresholds)
    }
}

/// Rates a completion time against thresholds ordered from fastest to slowest.
///
/// The first threshold the elapsed time does not exceed wins, awarding five
/// stars for the first, four for the second and so on. Slower times earn a
/// single star.
#[must_use]
pub fn star_rating(elapsed: Duration, thresholds: &[Duration; 4]) -> StarRating {
    let tier = thresholds
        .iter()
        .position(|threshold| elapsed <= *threshold)
        .unwrap_or(thresholds.len());
    StarRating::new(5 - tier as u8)
}
