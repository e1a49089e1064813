#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Pantry Maze.
//!
//! The world owns every player's ability inventory and sticky overlap depth
//! together with the trigger regions placed in the maze. Adapters and systems
//! mutate it exclusively through [`apply`] and observe it through [`query`].

mod abilities;
mod obstacles;
mod sticky;

use std::{collections::BTreeMap, time::Duration};

use pantry_maze_core::{
    AbilityDuration, AbilityKind, Command, Event, IgnoredReason, IngredientKind, LevelOutcome,
    MovementTuning, OverlapPhase, PlayerId, RegionId, RegionKind, TutorialStep, WELCOME_BANNER,
};
use tracing::{debug, info};

pub use abilities::AbilityInventory;
pub use obstacles::{ClearOutcome, Obstacle};
pub use sticky::StickyDepth;

/// Represents the authoritative Pantry Maze world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    movement: MovementTuning,
    players: BTreeMap<PlayerId, Player>,
    regions: BTreeMap<RegionId, Region>,
    pickups_placed: usize,
    outcome: Option<LevelOutcome>,
    instruction: Option<TutorialStep>,
    tick_index: u64,
    elapsed: Duration,
}

impl World {
    /// Creates an empty world using default movement tuning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            movement: MovementTuning::default(),
            players: BTreeMap::new(),
            regions: BTreeMap::new(),
            pickups_placed: 0,
            outcome: None,
            instruction: None,
            tick_index: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn is_frozen(&self) -> bool {
        self.outcome.is_some()
    }

    fn handle_overlap(
        &mut self,
        player_id: PlayerId,
        region_id: RegionId,
        phase: OverlapPhase,
        out_events: &mut Vec<Event>,
    ) {
        let Some(player) = self.players.get_mut(&player_id) else {
            out_events.push(Event::CommandIgnored {
                reason: IgnoredReason::UnknownPlayer,
            });
            return;
        };
        let Some(region) = self.regions.get_mut(&region_id) else {
            out_events.push(Event::CommandIgnored {
                reason: IgnoredReason::UnknownRegion,
            });
            return;
        };

        match (region, phase) {
            (Region::Pickup { ingredient, duration }, OverlapPhase::Enter) => {
                let ingredient = *ingredient;
                let duration = *duration;
                let _ = self.regions.remove(&region_id);
                grant(player_id, player, ingredient.ability(), duration, out_events);
                out_events.push(Event::IngredientEaten {
                    player: player_id,
                    region: region_id,
                    ingredient,
                });
            }
            (Region::Obstacle(obstacle), OverlapPhase::Enter) => {
                match obstacle.try_clear(&mut player.inventory) {
                    ClearOutcome::Cleared(ability) => {
                        let kind = obstacle.kind();
                        let _ = self.regions.remove(&region_id);
                        debug!(?player_id, ?region_id, ?kind, "obstacle cleared");
                        out_events.push(Event::AbilityConsumed {
                            player: player_id,
                            kind: ability,
                        });
                        out_events.push(Event::ObstacleCleared {
                            player: player_id,
                            region: region_id,
                            obstacle: kind,
                            ability,
                        });
                    }
                    ClearOutcome::AlreadyCleared => {}
                    ClearOutcome::Blocked => out_events.push(Event::ObstacleBlocked {
                        player: player_id,
                        region: region_id,
                        obstacle: obstacle.kind(),
                    }),
                }
            }
            (Region::StickyZone, OverlapPhase::Enter) => {
                player.sticky.enter();
                out_events.push(Event::StickyZoneEntered {
                    player: player_id,
                    region: region_id,
                });
            }
            (Region::StickyZone, OverlapPhase::Exit) => {
                player.sticky.exit();
                out_events.push(Event::StickyZoneExited {
                    player: player_id,
                    region: region_id,
                });
            }
            (Region::Pickup { .. } | Region::Obstacle(_), OverlapPhase::Exit) => {}
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMovement { tuning } => {
            world.movement = tuning;
        }
        Command::RegisterPlayer { player } => {
            if world.players.contains_key(&player) {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::DuplicatePlayer,
                });
                return;
            }
            let _ = world.players.insert(player, Player::default());
            out_events.push(Event::PlayerRegistered { player });
        }
        Command::PlaceRegion { region, kind } => {
            if world.regions.contains_key(&region) {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::DuplicateRegion,
                });
                return;
            }
            if matches!(kind, RegionKind::Pickup { .. }) {
                world.pickups_placed += 1;
            }
            let _ = world.regions.insert(region, Region::from_kind(kind));
            out_events.push(Event::RegionPlaced { region, kind });
        }
        Command::Overlap {
            player,
            region,
            phase,
        } => {
            if world.is_frozen() {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::Frozen,
                });
                return;
            }
            world.handle_overlap(player, region, phase, out_events);
        }
        Command::GrantAbility {
            player,
            kind,
            duration,
        } => {
            if world.is_frozen() {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::Frozen,
                });
                return;
            }
            let Some(state) = world.players.get_mut(&player) else {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::UnknownPlayer,
                });
                return;
            };
            grant(player, state, kind, duration, out_events);
        }
        Command::MovePlayer { player, direction } => {
            if world.is_frozen() {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::Frozen,
                });
                return;
            }
            let Some(speed_multiplier) = query::move_speed_multiplier(world, player) else {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::UnknownPlayer,
                });
                return;
            };
            out_events.push(Event::PlayerMoved {
                player,
                direction,
                speed_multiplier,
            });
        }
        Command::Tick { dt } => {
            // Frozen time swallows ticks without announcing them.
            if world.is_frozen() {
                return;
            }

            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            let mut expired = Vec::new();
            for (player_id, player) in &mut world.players {
                expired.clear();
                player.inventory.tick(dt, &mut expired);
                for kind in &expired {
                    debug!(?player_id, ?kind, "ability expired");
                    out_events.push(Event::AbilityExpired {
                        player: *player_id,
                        kind: *kind,
                    });
                }
            }
        }
        Command::ConcludeLevel { outcome } => {
            if world.is_frozen() {
                out_events.push(Event::CommandIgnored {
                    reason: IgnoredReason::Frozen,
                });
                return;
            }
            info!(?outcome, tick = world.tick_index, "level concluded");
            world.outcome = Some(outcome);
            out_events.push(Event::LevelConcluded { outcome });
        }
        Command::ShowInstruction { step } => {
            if world.instruction == Some(step) {
                return;
            }
            world.instruction = Some(step);
            out_events.push(Event::InstructionShown { step });
        }
    }
}

fn grant(
    player_id: PlayerId,
    player: &mut Player,
    kind: AbilityKind,
    duration: AbilityDuration,
    out_events: &mut Vec<Event>,
) {
    let duration = duration.normalized();
    debug!(?player_id, ?kind, ?duration, "ability granted");
    player.inventory.grant(kind, duration);
    out_events.push(Event::AbilityGranted {
        player: player_id,
        kind,
        duration,
    });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{AbilityInventory, Region, StickyDepth, World};
    use pantry_maze_core::{
        AbilityKind, LevelOutcome, MoveModifiers, MovementTuning, PlayerId, RegionId, RegionKind,
        TutorialStep,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Movement factors currently in effect.
    #[must_use]
    pub fn movement_tuning(world: &World) -> MovementTuning {
        world.movement
    }

    /// Provides read-only access to a player's inventory.
    #[must_use]
    pub fn inventory(world: &World, player: PlayerId) -> Option<&AbilityInventory> {
        world.players.get(&player).map(|state| &state.inventory)
    }

    /// Reports whether the player holds `kind`. Unknown players hold nothing.
    #[must_use]
    pub fn has_ability(world: &World, player: PlayerId, kind: AbilityKind) -> bool {
        inventory(world, player).is_some_and(|inventory| inventory.has(kind))
    }

    /// Provides the player's sticky overlap depth.
    #[must_use]
    pub fn sticky_depth(world: &World, player: PlayerId) -> Option<StickyDepth> {
        world.players.get(&player).map(|state| state.sticky)
    }

    /// Derives the player's current movement speed multiplier.
    ///
    /// The value is recomputed on every call, so a grant or consumption is
    /// visible within the same frame.
    #[must_use]
    pub fn move_speed_multiplier(world: &World, player: PlayerId) -> Option<f32> {
        let state = world.players.get(&player)?;
        let modifiers = MoveModifiers {
            inside_sticky: state.sticky.is_inside(),
            has_slippery: state.inventory.has(AbilityKind::Slippery),
            has_sweet: state.inventory.has(AbilityKind::Sweet),
        };
        Some(world.movement.speed_multiplier(modifiers))
    }

    /// Identifiers of every registered player in ascending order.
    #[must_use]
    pub fn players(world: &World) -> Vec<PlayerId> {
        world.players.keys().copied().collect()
    }

    /// Describes the region with the provided identifier, if still present.
    #[must_use]
    pub fn region(world: &World, region: RegionId) -> Option<RegionKind> {
        world.regions.get(&region).map(Region::kind)
    }

    /// Captures every region still present, ordered by identifier.
    #[must_use]
    pub fn regions(world: &World) -> Vec<(RegionId, RegionKind)> {
        world
            .regions
            .iter()
            .map(|(id, region)| (*id, region.kind()))
            .collect()
    }

    /// Number of pickups ever placed, which is the ingredient count a level requires.
    #[must_use]
    pub fn pickups_placed(world: &World) -> usize {
        world.pickups_placed
    }

    /// Number of pickups that have not been eaten yet.
    #[must_use]
    pub fn pickups_remaining(world: &World) -> usize {
        world
            .regions
            .values()
            .filter(|region| matches!(region, Region::Pickup { .. }))
            .count()
    }

    /// Outcome announced by the level, if it concluded.
    #[must_use]
    pub fn outcome(world: &World) -> Option<LevelOutcome> {
        world.outcome
    }

    /// Reports whether simulated time is frozen.
    #[must_use]
    pub fn is_frozen(world: &World) -> bool {
        world.is_frozen()
    }

    /// Tutorial instruction currently shown, if any.
    #[must_use]
    pub fn instruction(world: &World) -> Option<TutorialStep> {
        world.instruction
    }

    /// Total simulated time that elapsed while the world was not frozen.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Number of ticks processed while the world was not frozen.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Debug, Default)]
struct Player {
    inventory: AbilityInventory,
    sticky: StickyDepth,
}

#[derive(Clone, Debug)]
enum Region {
    Pickup {
        ingredient: IngredientKind,
        duration: AbilityDuration,
    },
    Obstacle(Obstacle),
    StickyZone,
}

impl Region {
    fn from_kind(kind: RegionKind) -> Self {
        match kind {
            RegionKind::Pickup {
                ingredient,
                duration,
            } => Self::Pickup {
                ingredient,
                duration,
            },
            RegionKind::Obstacle { kind } => Self::Obstacle(Obstacle::new(kind)),
            RegionKind::StickyZone => Self::StickyZone,
        }
    }

    fn kind(&self) -> RegionKind {
        match self {
            Self::Pickup {
                ingredient,
                duration,
            } => RegionKind::Pickup {
                ingredient: *ingredient,
                duration: *duration,
            },
            Self::Obstacle(obstacle) => RegionKind::Obstacle {
                kind: obstacle.kind(),
            },
            Self::StickyZone => RegionKind::StickyZone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_maze_core::{Direction, ObstacleKind};

    const PLAYER: PlayerId = PlayerId::new(1);

    fn world_with_player() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RegisterPlayer { player: PLAYER },
            &mut events,
        );
        world
    }

    fn place(world: &mut World, region: u32, kind: RegionKind) {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlaceRegion {
                region: RegionId::new(region),
                kind,
            },
            &mut events,
        );
    }

    fn enter(world: &mut World, region: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Overlap {
                player: PLAYER,
                region: RegionId::new(region),
                phase: OverlapPhase::Enter,
            },
            &mut events,
        );
        events
    }

    #[test]
    fn pickup_is_eaten_once_and_removed() {
        let mut world = world_with_player();
        place(
            &mut world,
            3,
            RegionKind::Pickup {
                ingredient: IngredientKind::Chili,
                duration: AbilityDuration::Unlimited,
            },
        );

        let events = enter(&mut world, 3);
        assert_eq!(
            events,
            vec![
                Event::AbilityGranted {
                    player: PLAYER,
                    kind: AbilityKind::Spicy,
                    duration: AbilityDuration::Unlimited,
                },
                Event::IngredientEaten {
                    player: PLAYER,
                    region: RegionId::new(3),
                    ingredient: IngredientKind::Chili,
                },
            ]
        );
        assert!(query::region(&world, RegionId::new(3)).is_none());
        assert_eq!(query::pickups_placed(&world), 1);
        assert_eq!(query::pickups_remaining(&world), 0);

        let repeat = enter(&mut world, 3);
        assert_eq!(
            repeat,
            vec![Event::CommandIgnored {
                reason: IgnoredReason::UnknownRegion,
            }]
        );
    }

    #[test]
    fn blocked_obstacle_reports_without_consuming() {
        let mut world = world_with_player();
        place(
            &mut world,
            5,
            RegionKind::Obstacle {
                kind: ObstacleKind::SoakableWater,
            },
        );

        let events = enter(&mut world, 5);
        assert_eq!(
            events,
            vec![Event::ObstacleBlocked {
                player: PLAYER,
                region: RegionId::new(5),
                obstacle: ObstacleKind::SoakableWater,
            }]
        );
        assert!(query::region(&world, RegionId::new(5)).is_some());
    }

    #[test]
    fn move_reports_same_frame_multiplier() {
        let mut world = world_with_player();
        place(&mut world, 9, RegionKind::StickyZone);
        let _ = enter(&mut world, 9);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::GrantAbility {
                player: PLAYER,
                kind: AbilityKind::Slippery,
                duration: AbilityDuration::from_secs_f32(12.0),
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::MovePlayer {
                player: PLAYER,
                direction: Direction::East,
            },
            &mut events,
        );

        let tuning = query::movement_tuning(&world);
        match events.as_slice() {
            [Event::PlayerMoved {
                speed_multiplier, ..
            }] => assert!((speed_multiplier - tuning.slippery_speed_factor).abs() < 1e-6),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn frozen_world_swallows_ticks_and_second_conclusion() {
        let mut world = world_with_player();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConcludeLevel {
                outcome: LevelOutcome::Lost,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::LevelConcluded {
                outcome: LevelOutcome::Lost,
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::ConcludeLevel {
                outcome: LevelOutcome::TutorialComplete,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                reason: IgnoredReason::Frozen,
            }]
        );
        assert_eq!(query::outcome(&world), Some(LevelOutcome::Lost));
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn zero_length_grant_is_reported_as_unlimited() {
        let mut world = world_with_player();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::GrantAbility {
                player: PLAYER,
                kind: AbilityKind::Spicy,
                duration: AbilityDuration::Limited(Duration::ZERO),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::AbilityGranted {
                player: PLAYER,
                kind: AbilityKind::Spicy,
                duration: AbilityDuration::Unlimited,
            }]
        );
        let held = query::inventory(&world, PLAYER)
            .and_then(|inventory| inventory.remaining(AbilityKind::Spicy));
        assert_eq!(held, Some(AbilityDuration::Unlimited));
    }

    #[test]
    fn ticks_expire_limited_abilities_once() {
        let mut world = world_with_player();
        place(
            &mut world,
            2,
            RegionKind::Pickup {
                ingredient: IngredientKind::Honey,
                duration: AbilityDuration::from_secs_f32(1.0),
            },
        );
        let _ = enter(&mut world, 2);

        let mut events = Vec::new();
        for _ in 0..3 {
            apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(400),
                },
                &mut events,
            );
        }

        let expired: Vec<&Event> = events
            .iter()
            .filter(|event| matches!(event, Event::AbilityExpired { .. }))
            .collect();
        assert_eq!(
            expired,
            vec![&Event::AbilityExpired {
                player: PLAYER,
                kind: AbilityKind::Sweet,
            }]
        );
        assert!(!query::has_ability(&world, PLAYER, AbilityKind::Sweet));
        assert_eq!(query::elapsed(&world), Duration::from_millis(1_200));
    }

    #[test]
    fn duplicate_registrations_are_ignored() {
        let mut world = world_with_player();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RegisterPlayer { player: PLAYER },
            &mut events,
        );
        place(&mut world, 1, RegionKind::StickyZone);
        apply(
            &mut world,
            Command::PlaceRegion {
                region: RegionId::new(1),
                kind: RegionKind::StickyZone,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![
                Event::CommandIgnored {
                    reason: IgnoredReason::DuplicatePlayer,
                },
                Event::CommandIgnored {
                    reason: IgnoredReason::DuplicateRegion,
                },
            ]
        );
    }
}
