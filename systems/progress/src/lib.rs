#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Objective tracking that decides when a level is won, lost or completed.
//!
//! A single [`ObjectiveTracker`] covers both the timed levels and the guided
//! tutorial. Both share the same skeleton: a pending phase, an active phase
//! that counts eaten ingredients, and a one-way conclusion that is announced
//! exactly once. The configuration decides which events advance the tracker.

mod checkpoints;
mod countdown;

use std::time::Duration;

use pantry_maze_core::{
    ClockReadout, Command, Event, IngredientKind, LevelOutcome, LevelTuning, TutorialStep,
    TutorialTuning,
};
use tracing::{debug, info, warn};

use self::{checkpoints::Checkpoints, countdown::Countdown};

pub use checkpoints::Checkpoint;
pub use countdown::star_rating;

/// Selects which rules drive an [`ObjectiveTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Objective {
    /// Eat every ingredient before the countdown expires.
    Timed(LevelTuning),
    /// Follow the tutorial checkpoints and eat every ingredient.
    Guided(TutorialTuning),
}

/// Lifecycle of a tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for [`ObjectiveTracker::start`].
    Pending,
    /// Counting ingredients and reacting to events.
    Active,
    /// Finished; no further event changes the tracker.
    Concluded(LevelOutcome),
}

/// Pure system that tracks level objectives and emits the conclusion command.
#[derive(Clone, Debug)]
pub struct ObjectiveTracker {
    objective: Objective,
    phase: Phase,
    required: u32,
    collected: u32,
    rules: Rules,
}

#[derive(Clone, Debug)]
enum Rules {
    Timed(Countdown),
    Guided(Checkpoints),
}

impl ObjectiveTracker {
    /// Creates a tracker for a timed level.
    #[must_use]
    pub fn level(tuning: LevelTuning) -> Self {
        Self::new(Objective::Timed(tuning))
    }

    /// Creates a tracker for the guided tutorial.
    #[must_use]
    pub fn tutorial(tuning: TutorialTuning) -> Self {
        Self::new(Objective::Guided(tuning))
    }

    /// Creates a pending tracker for the provided objective.
    #[must_use]
    pub fn new(objective: Objective) -> Self {
        let rules = match &objective {
            Objective::Timed(tuning) => Rules::Timed(Countdown::new(tuning)),
            Objective::Guided(tuning) => Rules::Guided(Checkpoints::new(tuning.idle_hint())),
        };
        Self {
            objective,
            phase: Phase::Pending,
            required: 0,
            collected: 0,
            rules,
        }
    }

    /// Discards all progress, returning to a fresh pending tracker.
    pub fn restart(&mut self) {
        *self = Self::new(self.objective);
    }

    /// Activates the tracker for a level holding `required` ingredients.
    ///
    /// Timed levels without ingredients are won immediately. Calling `start`
    /// on a tracker that already left [`Phase::Pending`] does nothing.
    pub fn start(&mut self, required: u32, out: &mut Vec<Command>) {
        if self.phase != Phase::Pending {
            return;
        }

        self.phase = Phase::Active;
        self.required = required;
        self.collected = 0;

        match &self.rules {
            Rules::Timed(countdown) => {
                debug!(required, limit = ?countdown.remaining(), "level started");
                if required == 0 {
                    warn!("level holds no ingredients and completes instantly");
                    let stars = countdown.rating();
                    self.conclude(LevelOutcome::Won { stars }, out);
                }
            }
            Rules::Guided(checkpoints) => {
                debug!(required, "tutorial started");
                out.push(Command::ShowInstruction {
                    step: checkpoints.step(),
                });
            }
        }
    }

    /// Consumes world events and emits progress commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.tick(*dt, out),
                Event::IngredientEaten { ingredient, .. } => self.on_collected(*ingredient, out),
                Event::ObstacleCleared { obstacle, .. } => {
                    self.on_checkpoint(Checkpoint::for_obstacle(*obstacle), out);
                }
                Event::StickyZoneExited { .. } => {
                    self.on_checkpoint(Checkpoint::StickyCrossed, out);
                }
                Event::PlayerMoved { .. } => self.on_checkpoint(Checkpoint::Moved, out),
                _ => {}
            }
        }
    }

    /// Records an eaten ingredient.
    pub fn on_collected(&mut self, ingredient: IngredientKind, out: &mut Vec<Command>) {
        if self.phase != Phase::Active {
            return;
        }

        self.collected = self.collected.saturating_add(1);

        match &self.rules {
            Rules::Timed(countdown) => {
                if self.collected >= self.required {
                    let stars = countdown.rating();
                    self.conclude(LevelOutcome::Won { stars }, out);
                }
            }
            Rules::Guided(_) => {
                match Checkpoint::for_ability(ingredient.ability()) {
                    Some(checkpoint) => self.on_checkpoint(checkpoint, out),
                    None => self.try_complete_tutorial(out),
                }
            }
        }
    }

    /// Advances the countdown or the idle hint by `dt`.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.phase != Phase::Active {
            return;
        }

        match &mut self.rules {
            Rules::Timed(countdown) => {
                if countdown.advance(dt) {
                    self.conclude(LevelOutcome::Lost, out);
                }
            }
            Rules::Guided(checkpoints) => {
                if let Some(next) = checkpoints.tick_hint(dt) {
                    debug!("idle hint fired");
                    self.enter_step(next, out);
                }
            }
        }
    }

    /// Records a tutorial checkpoint. Timed levels ignore checkpoints.
    pub fn on_checkpoint(&mut self, checkpoint: Checkpoint, out: &mut Vec<Command>) {
        if self.phase != Phase::Active {
            return;
        }

        let Rules::Guided(checkpoints) = &mut self.rules else {
            return;
        };

        if let Some(next) = checkpoints.reach(checkpoint) {
            self.enter_step(next, out);
        } else {
            debug!(?checkpoint, step = ?checkpoints.step(), "checkpoint outside its step");
        }
        self.try_complete_tutorial(out);
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of the level once concluded.
    #[must_use]
    pub fn outcome(&self) -> Option<LevelOutcome> {
        match self.phase {
            Phase::Concluded(outcome) => Some(outcome),
            Phase::Pending | Phase::Active => None,
        }
    }

    /// Number of ingredients the level requires.
    #[must_use]
    pub fn required(&self) -> u32 {
        self.required
    }

    /// Number of ingredients eaten while active.
    #[must_use]
    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Time left on the countdown of a timed level.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match &self.rules {
            Rules::Timed(countdown) => Some(countdown.remaining()),
            Rules::Guided(_) => None,
        }
    }

    /// Display fields of the countdown of a timed level.
    #[must_use]
    pub fn clock_readout(&self) -> Option<ClockReadout> {
        match &self.rules {
            Rules::Timed(countdown) => Some(countdown.readout()),
            Rules::Guided(_) => None,
        }
    }

    /// Current tutorial step.
    #[must_use]
    pub fn step(&self) -> Option<TutorialStep> {
        match &self.rules {
            Rules::Timed(_) => None,
            Rules::Guided(checkpoints) => Some(checkpoints.step()),
        }
    }

    /// Reports whether a tutorial checkpoint has been reached.
    #[must_use]
    pub fn is_achieved(&self, checkpoint: Checkpoint) -> bool {
        match &self.rules {
            Rules::Timed(_) => false,
            Rules::Guided(checkpoints) => checkpoints.is_achieved(checkpoint),
        }
    }

    fn enter_step(&mut self, step: TutorialStep, out: &mut Vec<Command>) {
        if step.is_terminal() {
            // The final step is only reachable through completion.
            return;
        }
        let Rules::Guided(checkpoints) = &mut self.rules else {
            return;
        };
        if checkpoints.enter(step) {
            debug!(?step, "tutorial advanced");
            out.push(Command::ShowInstruction { step });
        }
    }

    fn try_complete_tutorial(&mut self, out: &mut Vec<Command>) {
        if self.phase != Phase::Active || self.collected < self.required {
            return;
        }
        let Rules::Guided(checkpoints) = &mut self.rules else {
            return;
        };
        if !checkpoints.all_achieved() {
            return;
        }

        let _ = checkpoints.enter(TutorialStep::Complete);
        out.push(Command::ShowInstruction {
            step: TutorialStep::Complete,
        });
        self.conclude(LevelOutcome::TutorialComplete, out);
    }

    fn conclude(&mut self, outcome: LevelOutcome, out: &mut Vec<Command>) {
        if self.phase != Phase::Active {
            return;
        }
        info!(?outcome, collected = self.collected, "objective concluded");
        self.phase = Phase::Concluded(outcome);
        out.push(Command::ConcludeLevel { outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_maze_core::StarRating;

    #[test]
    fn empty_level_is_won_on_start() {
        let mut tracker = ObjectiveTracker::level(LevelTuning::default());
        let mut out = Vec::new();
        tracker.start(0, &mut out);

        let outcome = LevelOutcome::Won {
            stars: StarRating::MAX,
        };
        assert_eq!(tracker.phase(), Phase::Concluded(outcome));
        assert_eq!(out, vec![Command::ConcludeLevel { outcome }]);
    }

    #[test]
    fn restart_returns_to_pending() {
        let mut tracker = ObjectiveTracker::level(LevelTuning::default());
        let mut out = Vec::new();
        tracker.start(2, &mut out);
        tracker.tick(Duration::from_secs(30), &mut out);
        tracker.on_collected(IngredientKind::Chili, &mut out);

        tracker.restart();
        assert_eq!(tracker.phase(), Phase::Pending);
        assert_eq!(tracker.collected(), 0);
        assert_eq!(tracker.remaining(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn events_before_start_are_ignored() {
        let mut tracker = ObjectiveTracker::level(LevelTuning::default());
        let mut out = Vec::new();
        tracker.on_collected(IngredientKind::Butter, &mut out);
        tracker.tick(Duration::from_secs(500), &mut out);
        assert_eq!(tracker.phase(), Phase::Pending);
        assert!(out.is_empty());
    }

    #[test]
    fn second_start_does_not_reset_progress() {
        let mut tracker = ObjectiveTracker::level(LevelTuning::default());
        let mut out = Vec::new();
        tracker.start(3, &mut out);
        tracker.on_collected(IngredientKind::Chili, &mut out);
        tracker.start(3, &mut out);
        assert_eq!(tracker.collected(), 1);
    }
}
