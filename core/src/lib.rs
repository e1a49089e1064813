#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pantry Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! the presentation layer to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

mod tuning;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use tuning::{LevelTuning, MoveModifiers, MovementTuning, TutorialTuning, Tuning};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Pantry Maze.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the factors used to derive player movement speed.
    ConfigureMovement {
        /// Factors applied by the speed composition rule.
        tuning: MovementTuning,
    },
    /// Adds a player with an empty inventory to the world.
    RegisterPlayer {
        /// Identifier chosen by the adapter for the player entity.
        player: PlayerId,
    },
    /// Places a trigger region that players may overlap.
    PlaceRegion {
        /// Identifier chosen by the adapter for the region.
        region: RegionId,
        /// Behaviour attached to the region.
        kind: RegionKind,
    },
    /// Reports that a player started or stopped overlapping a region.
    Overlap {
        /// Player whose collider touched the region.
        player: PlayerId,
        /// Region that was touched.
        region: RegionId,
        /// Whether the overlap began or ended.
        phase: OverlapPhase,
    },
    /// Grants an ability directly, bypassing pickups.
    GrantAbility {
        /// Player receiving the ability.
        player: PlayerId,
        /// Ability to grant.
        kind: AbilityKind,
        /// How long the ability stays active.
        duration: AbilityDuration,
    },
    /// Reports that the player pressed a movement direction this frame.
    MovePlayer {
        /// Player that received the input.
        player: PlayerId,
        /// Direction requested by the input.
        direction: Direction,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Ends the level, freezing simulated time.
    ConcludeLevel {
        /// Result announced to the presentation layer.
        outcome: LevelOutcome,
    },
    /// Requests that the presentation layer display a tutorial instruction.
    ShowInstruction {
        /// Step whose instruction should be shown.
        step: TutorialStep,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a player joined the world.
    PlayerRegistered {
        /// Identifier of the new player.
        player: PlayerId,
    },
    /// Confirms that a trigger region was placed.
    RegionPlaced {
        /// Identifier of the placed region.
        region: RegionId,
        /// Behaviour attached to the region.
        kind: RegionKind,
    },
    /// Announces that a player now holds an ability.
    AbilityGranted {
        /// Player holding the ability.
        player: PlayerId,
        /// Ability that became active.
        kind: AbilityKind,
        /// Duration the ability stays active.
        duration: AbilityDuration,
    },
    /// Announces that a held ability ran out of time.
    AbilityExpired {
        /// Player that lost the ability.
        player: PlayerId,
        /// Ability that expired.
        kind: AbilityKind,
    },
    /// Announces that an ability was spent on an obstacle.
    AbilityConsumed {
        /// Player that spent the ability.
        player: PlayerId,
        /// Ability that was spent.
        kind: AbilityKind,
    },
    /// Confirms that a player ate an ingredient pickup.
    IngredientEaten {
        /// Player that ate the ingredient.
        player: PlayerId,
        /// Pickup region that was consumed and removed.
        region: RegionId,
        /// Ingredient that was eaten.
        ingredient: IngredientKind,
    },
    /// Reports that a player stepped onto a sticky floor.
    StickyZoneEntered {
        /// Player that entered.
        player: PlayerId,
        /// Sticky region that was entered.
        region: RegionId,
    },
    /// Reports that a player left a sticky floor.
    StickyZoneExited {
        /// Player that left.
        player: PlayerId,
        /// Sticky region that was left.
        region: RegionId,
    },
    /// Confirms that an obstacle was cleared and removed from the maze.
    ObstacleCleared {
        /// Player that cleared the obstacle.
        player: PlayerId,
        /// Region the obstacle occupied.
        region: RegionId,
        /// Kind of obstacle that was cleared.
        obstacle: ObstacleKind,
        /// Ability spent to clear it.
        ability: AbilityKind,
    },
    /// Reports that a player touched an obstacle without the required ability.
    ObstacleBlocked {
        /// Player that bumped into the obstacle.
        player: PlayerId,
        /// Region of the obstacle.
        region: RegionId,
        /// Kind of obstacle that stayed in place.
        obstacle: ObstacleKind,
    },
    /// Confirms a movement input together with the speed it resolved to.
    PlayerMoved {
        /// Player that moved.
        player: PlayerId,
        /// Direction of the input.
        direction: Direction,
        /// Multiplier applied to the base movement speed.
        speed_multiplier: f32,
    },
    /// Requests that the presentation layer show a tutorial instruction.
    InstructionShown {
        /// Step whose instruction is now shown.
        step: TutorialStep,
    },
    /// Announces that the level ended and simulated time is frozen.
    LevelConcluded {
        /// Result of the level.
        outcome: LevelOutcome,
    },
    /// Reports that a command was dropped without touching state.
    CommandIgnored {
        /// Specific reason the command was dropped.
        reason: IgnoredReason,
    },
}

/// Unique identifier assigned to a player entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a trigger region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(u32);

impl RegionId {
    /// Creates a new region identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Abilities a player can hold after eating an ingredient.
///
/// Declaration order doubles as the deterministic iteration order used by
/// inventories, so simultaneous expiries are always reported the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Melts ice walls.
    Spicy,
    /// Glides over sticky floors and speeds the player up.
    Slippery,
    /// Soaks up water patches.
    Absorbent,
    /// Extension ability without an obstacle in the shipped levels.
    Pungent,
    /// Speeds the player up regardless of the floor.
    Sweet,
}

impl AbilityKind {
    /// Every ability kind in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Spicy,
        Self::Slippery,
        Self::Absorbent,
        Self::Pungent,
        Self::Sweet,
    ];

    /// Zero-based position of the kind within [`AbilityKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Spicy => 0,
            Self::Slippery => 1,
            Self::Absorbent => 2,
            Self::Pungent => 3,
            Self::Sweet => 4,
        }
    }

    /// Colour the player pulses with while holding the ability.
    #[must_use]
    pub const fn tint(self) -> Tint {
        match self {
            Self::Spicy => Tint::from_rgb(0xff, 0x59, 0x00),
            Self::Slippery => Tint::from_rgb(0xff, 0xe6, 0x4d),
            Self::Absorbent => Tint::from_rgb(0x59, 0x33, 0x0d),
            Self::Pungent => Tint::from_rgb(0xed, 0xed, 0xd1),
            Self::Sweet => Tint::from_rgb(0xf2, 0xa6, 0x1a),
        }
    }
}

/// Ingredients that can be placed in the maze as pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientKind {
    /// Grants [`AbilityKind::Spicy`].
    Chili,
    /// Grants [`AbilityKind::Slippery`].
    Butter,
    /// Grants [`AbilityKind::Absorbent`].
    Bread,
    /// Grants [`AbilityKind::Pungent`].
    Garlic,
    /// Grants [`AbilityKind::Sweet`].
    Honey,
}

impl IngredientKind {
    /// Ability granted when the ingredient is eaten.
    #[must_use]
    pub const fn ability(self) -> AbilityKind {
        match self {
            Self::Chili => AbilityKind::Spicy,
            Self::Butter => AbilityKind::Slippery,
            Self::Bread => AbilityKind::Absorbent,
            Self::Garlic => AbilityKind::Pungent,
            Self::Honey => AbilityKind::Sweet,
        }
    }
}

/// Obstacles that block the maze until the matching ability is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ice wall melted by [`AbilityKind::Spicy`].
    MeltableWall,
    /// Water patch soaked by [`AbilityKind::Absorbent`].
    SoakableWater,
}

impl ObstacleKind {
    /// Ability that must be consumed to clear the obstacle.
    #[must_use]
    pub const fn required_ability(self) -> AbilityKind {
        match self {
            Self::MeltableWall => AbilityKind::Spicy,
            Self::SoakableWater => AbilityKind::Absorbent,
        }
    }
}

/// Remaining lifetime of a granted ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityDuration {
    /// Ability counts down and expires once the duration reaches zero.
    Limited(Duration),
    /// Ability never counts down and is only removed by consumption.
    Unlimited,
}

impl AbilityDuration {
    /// Interprets a duration measured in seconds.
    ///
    /// Zero or negative inputs select [`AbilityDuration::Unlimited`], matching
    /// how level designers mark pickups that never run out.
    #[must_use]
    pub fn from_secs_f32(seconds: f32) -> Self {
        if seconds.is_nan() || seconds <= 0.0 {
            return Self::Unlimited;
        }
        Self::Limited(Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)).normalized()
    }

    /// Treats a limited duration of zero as unlimited.
    #[must_use]
    pub const fn normalized(self) -> Self {
        match self {
            Self::Limited(remaining) if remaining.is_zero() => Self::Unlimited,
            other => other,
        }
    }

    /// Reports whether the duration is exempt from countdown.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

/// Kinds of trigger regions placed in the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Ingredient waiting to be eaten.
    Pickup {
        /// Ingredient granted on contact.
        ingredient: IngredientKind,
        /// Lifetime of the granted ability.
        duration: AbilityDuration,
    },
    /// Obstacle that clears when touched with the right ability.
    Obstacle {
        /// Kind of obstacle.
        kind: ObstacleKind,
    },
    /// Floor that slows players down while they stand on it.
    StickyZone,
}

/// Whether an overlap started or ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlapPhase {
    /// The player's collider started touching the region.
    Enter,
    /// The player's collider stopped touching the region.
    Exit,
}

/// Cardinal movement directions available to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

/// Performance rating awarded for a won level, between one and five stars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StarRating(u8);

impl StarRating {
    /// Lowest rating awarded for any completed level.
    pub const MIN: Self = Self(1);
    /// Highest rating.
    pub const MAX: Self = Self(5);

    /// Creates a rating, clamping the value into `1..=5`.
    #[must_use]
    pub const fn new(stars: u8) -> Self {
        if stars < Self::MIN.0 {
            Self::MIN
        } else if stars > Self::MAX.0 {
            Self::MAX
        } else {
            Self(stars)
        }
    }

    /// Number of stars earned.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Terminal result of a level or tutorial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// Every ingredient was eaten before the clock ran out.
    Won {
        /// Rating derived from the elapsed time.
        stars: StarRating,
    },
    /// The countdown reached zero first.
    Lost,
    /// Every tutorial checkpoint was reached and every ingredient eaten.
    TutorialComplete,
}

/// Ordered positions within the tutorial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TutorialStep {
    /// Learn to move.
    Move,
    /// Collect the chili.
    CollectSpicy,
    /// Melt the ice wall.
    MeltIce,
    /// Collect the butter.
    CollectSlippery,
    /// Glide across the sticky floor.
    CrossSticky,
    /// Collect the bread.
    CollectAbsorbent,
    /// Soak up the water patch.
    SoakWater,
    /// Tutorial finished.
    Complete,
}

impl TutorialStep {
    /// Every step in the order the tutorial visits them.
    pub const ALL: [Self; 8] = [
        Self::Move,
        Self::CollectSpicy,
        Self::MeltIce,
        Self::CollectSlippery,
        Self::CrossSticky,
        Self::CollectAbsorbent,
        Self::SoakWater,
        Self::Complete,
    ];

    /// Zero-based position of the step.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Move => 0,
            Self::CollectSpicy => 1,
            Self::MeltIce => 2,
            Self::CollectSlippery => 3,
            Self::CrossSticky => 4,
            Self::CollectAbsorbent => 5,
            Self::SoakWater => 6,
            Self::Complete => 7,
        }
    }

    /// Step that follows this one, or `None` for the terminal step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Move => Some(Self::CollectSpicy),
            Self::CollectSpicy => Some(Self::MeltIce),
            Self::MeltIce => Some(Self::CollectSlippery),
            Self::CollectSlippery => Some(Self::CrossSticky),
            Self::CrossSticky => Some(Self::CollectAbsorbent),
            Self::CollectAbsorbent => Some(Self::SoakWater),
            Self::SoakWater => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Reports whether the step ends the tutorial.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Instruction shown to the player while the step is active.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Move => "Use W, A, S, D or Arrow keys to move!",
            Self::CollectSpicy => "Now collect the CHILI to melt ice walls",
            Self::MeltIce => "Great! Melt the ICE wall to move forward",
            Self::CollectSlippery => "Awesome! Collect the BUTTER to glide through sticky floors",
            Self::CrossSticky => "Now glide through the sticky floor to continue!",
            Self::CollectAbsorbent => "Great! Grab the BREAD to absorb water",
            Self::SoakWater => "Use the BREAD to absorb the water patches",
            Self::Complete => "Perfect! Tutorial Complete. You're ready to play the real game!",
        }
    }
}

/// Countdown clock broken into display fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClockReadout {
    /// Whole minutes remaining.
    pub minutes: u64,
    /// Whole seconds remaining within the current minute.
    pub seconds: u64,
    /// Hundredths of a second remaining within the current second.
    pub hundredths: u64,
}

impl ClockReadout {
    /// Splits the remaining time into minutes, seconds and hundredths.
    #[must_use]
    pub const fn from_remaining(remaining: Duration) -> Self {
        let total_seconds = remaining.as_secs();
        Self {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
            hundredths: (remaining.subsec_millis() / 10) as u64,
        }
    }
}

impl std::fmt::Display for ClockReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes, self.seconds, self.hundredths
        )
    }
}

/// Colour applied to the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tint {
    red: u8,
    green: u8,
    blue: u8,
}

impl Tint {
    /// Default player colour shown while no ability pulses.
    pub const BASE: Self = Self::from_rgb(0x2f, 0x95, 0x32);

    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Scales every component by `brightness`, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn scaled(self, brightness: f32) -> Self {
        let factor = brightness.clamp(0.0, 1.0);
        let scale = |component: u8| (f32::from(component) * factor).round() as u8;
        Self::from_rgb(scale(self.red), scale(self.green), scale(self.blue))
    }
}

/// Reasons a command may be dropped by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoredReason {
    /// The level concluded and simulated time is frozen.
    Frozen,
    /// No player with the provided identifier exists.
    UnknownPlayer,
    /// No region with the provided identifier exists.
    UnknownRegion,
    /// A player with the provided identifier already exists.
    DuplicatePlayer,
    /// A region with the provided identifier already exists.
    DuplicateRegion,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{
        AbilityDuration, AbilityKind, ClockReadout, IngredientKind, LevelOutcome, ObstacleKind,
        StarRating, Tint, TutorialStep,
    };

    #[test]
    fn non_positive_durations_are_unlimited() {
        assert!(AbilityDuration::from_secs_f32(0.0).is_unlimited());
        assert!(AbilityDuration::from_secs_f32(-3.5).is_unlimited());
        assert_eq!(
            AbilityDuration::from_secs_f32(12.0),
            AbilityDuration::Limited(Duration::from_secs(12))
        );
    }

    #[test]
    fn obstacles_require_matching_ingredient_ability() {
        assert_eq!(ObstacleKind::MeltableWall.required_ability(), IngredientKind::Chili.ability());
        assert_eq!(ObstacleKind::SoakableWater.required_ability(), IngredientKind::Bread.ability());
    }

    #[test]
    fn ability_indices_follow_declaration_order() {
        for (position, kind) in AbilityKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn tutorial_steps_chain_to_terminal() {
        let mut step = TutorialStep::Move;
        let mut visited = 1;
        while let Some(next) = step.next() {
            assert_eq!(next.index(), step.index() + 1);
            step = next;
            visited += 1;
        }
        assert!(step.is_terminal());
        assert_eq!(visited, TutorialStep::ALL.len());
    }

    #[test]
    fn clock_readout_splits_remaining_time() {
        let readout = ClockReadout::from_remaining(Duration::from_millis(83_470));
        assert_eq!(readout.minutes, 1);
        assert_eq!(readout.seconds, 23);
        assert_eq!(readout.hundredths, 47);
        assert_eq!(readout.to_string(), "01:23:47");
    }

    #[test]
    fn zero_limited_duration_normalizes_to_unlimited() {
        assert_eq!(
            AbilityDuration::Limited(Duration::ZERO).normalized(),
            AbilityDuration::Unlimited
        );
        assert_eq!(AbilityDuration::from_secs_f32(1e-12), AbilityDuration::Unlimited);
        let short = AbilityDuration::Limited(Duration::from_millis(5));
        assert_eq!(short.normalized(), short);
    }

    #[test]
    fn star_rating_clamps_into_range() {
        assert_eq!(StarRating::new(0), StarRating::MIN);
        assert_eq!(StarRating::new(9), StarRating::MAX);
        assert_eq!(StarRating::new(3).get(), 3);
    }

    #[test]
    fn tint_scaling_darkens_components() {
        let tint = Tint::from_rgb(200, 100, 0).scaled(0.5);
        assert_eq!(tint, Tint::from_rgb(100, 50, 0));
        assert_eq!(Tint::BASE.scaled(2.0), Tint::BASE);
    }

    #[test]
    fn level_outcome_round_trips_through_bincode() {
        let outcome = LevelOutcome::Won {
            stars: StarRating::new(4),
        };
        let bytes = bincode::serialize(&outcome).expect("serialize");
        let restored: LevelOutcome = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, outcome);
    }
}
