//! Step-gated checkpoints and the idle hint used by the tutorial.

use std::time::Duration;

use pantry_maze_core::{AbilityKind, ObstacleKind, TutorialStep};

const CHECKPOINT_COUNT: usize = Checkpoint::ALL.len();

/// Milestones the tutorial waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    /// The player pressed a movement direction.
    Moved,
    /// The player ate an ingredient granting [`AbilityKind::Spicy`].
    SpicyCollected,
    /// The player melted an ice wall.
    IceMelted,
    /// The player ate an ingredient granting [`AbilityKind::Slippery`].
    SlipperyCollected,
    /// The player left a sticky floor.
    StickyCrossed,
    /// The player ate an ingredient granting [`AbilityKind::Absorbent`].
    AbsorbentCollected,
    /// The player soaked a water patch.
    WaterSoaked,
}

impl Checkpoint {
    /// Every checkpoint in tutorial order.
    pub const ALL: [Self; 7] = [
        Self::Moved,
        Self::SpicyCollected,
        Self::IceMelted,
        Self::SlipperyCollected,
        Self::StickyCrossed,
        Self::AbsorbentCollected,
        Self::WaterSoaked,
    ];

    /// Step the tutorial must be on for this checkpoint to advance it.
    #[must_use]
    pub const fn prerequisite(self) -> TutorialStep {
        match self {
            Self::Moved => TutorialStep::Move,
            Self::SpicyCollected => TutorialStep::CollectSpicy,
            Self::IceMelted => TutorialStep::MeltIce,
            Self::SlipperyCollected => TutorialStep::CollectSlippery,
            Self::StickyCrossed => TutorialStep::CrossSticky,
            Self::AbsorbentCollected => TutorialStep::CollectAbsorbent,
            Self::WaterSoaked => TutorialStep::SoakWater,
        }
    }

    /// Checkpoint reached by eating an ingredient granting `kind`.
    #[must_use]
    pub const fn for_ability(kind: AbilityKind) -> Option<Self> {
        match kind {
            AbilityKind::Spicy => Some(Self::SpicyCollected),
            AbilityKind::Slippery => Some(Self::SlipperyCollected),
            AbilityKind::Absorbent => Some(Self::AbsorbentCollected),
            AbilityKind::Pungent | AbilityKind::Sweet => None,
        }
    }

    /// Checkpoint reached by clearing an obstacle of `kind`.
    #[must_use]
    pub const fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::MeltableWall => Self::IceMelted,
            ObstacleKind::SoakableWater => Self::WaterSoaked,
        }
    }

    const fn index(self) -> usize {
        self.prerequisite().index()
    }
}

/// Current step plus the one-way achieved flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoints {
    step: TutorialStep,
    achieved: [bool; CHECKPOINT_COUNT],
    hint: IdleHint,
}

impl Checkpoints {
    pub(crate) fn new(idle_grace: Duration) -> Self {
        Self {
            step: TutorialStep::Move,
            achieved: [false; CHECKPOINT_COUNT],
            hint: IdleHint::armed(idle_grace),
        }
    }

    pub(crate) fn step(&self) -> TutorialStep {
        self.step
    }

    pub(crate) fn is_achieved(&self, checkpoint: Checkpoint) -> bool {
        self.achieved[checkpoint.index()]
    }

    pub(crate) fn all_achieved(&self) -> bool {
        self.achieved.iter().all(|flag| *flag)
    }

    /// Records `checkpoint` and returns the step it unlocks, if gating allows.
    ///
    /// The flag is set regardless of the current step; the step only moves
    /// when it equals the checkpoint's prerequisite.
    pub(crate) fn reach(&mut self, checkpoint: Checkpoint) -> Option<TutorialStep> {
        self.achieved[checkpoint.index()] = true;
        if self.step != checkpoint.prerequisite() {
            return None;
        }
        self.step.next()
    }

    /// Moves to `step`, never backwards.
    pub(crate) fn enter(&mut self, step: TutorialStep) -> bool {
        if step <= self.step {
            return false;
        }
        self.step = step;
        self.hint.cancel();
        true
    }

    /// Advances the idle hint and returns the step it unlocks, if it fired.
    pub(crate) fn tick_hint(&mut self, dt: Duration) -> Option<TutorialStep> {
        if !self.hint.advance(dt) || self.step != TutorialStep::Move {
            return None;
        }
        self.step.next()
    }
}

/// One-shot timer that nudges idle players past the first step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct IdleHint {
    grace: Duration,
    elapsed: Duration,
    state: HintState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HintState {
    Armed,
    Fired,
    Cancelled,
}

impl IdleHint {
    const fn armed(grace: Duration) -> Self {
        Self {
            grace,
            elapsed: Duration::ZERO,
            state: HintState::Armed,
        }
    }

    fn cancel(&mut self) {
        if self.state == HintState::Armed {
            self.state = HintState::Cancelled;
        }
    }

    fn advance(&mut self, dt: Duration) -> bool {
        if self.state != HintState::Armed {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.grace {
            return false;
        }
        self.state = HintState::Fired;
        true
    }
}
