use std::time::Duration;

use pantry_maze_core::{
    AbilityDuration, Command, Event, IngredientKind, LevelOutcome, LevelTuning, OverlapPhase,
    PlayerId, RegionId, RegionKind, StarRating,
};
use pantry_maze_system_progress::{ObjectiveTracker, Phase};
use pantry_maze_world::{self as world, query, World};

const PLAYER: PlayerId = PlayerId::new(0);

#[test]
fn collecting_every_ingredient_wins_with_rating() {
    let mut tracker = ObjectiveTracker::level(LevelTuning::default());
    let mut out = Vec::new();
    tracker.start(3, &mut out);
    assert!(out.is_empty());

    for _ in 0..3 {
        tracker.tick(Duration::from_secs(10), &mut out);
        tracker.on_collected(IngredientKind::Chili, &mut out);
    }

    let outcome = LevelOutcome::Won {
        stars: StarRating::new(4),
    };
    assert_eq!(tracker.phase(), Phase::Concluded(outcome));
    assert_eq!(out, vec![Command::ConcludeLevel { outcome }]);
    assert_eq!(tracker.remaining(), Some(Duration::from_secs(90)));
}

#[test]
fn running_out_of_time_loses_and_freezes_collection() {
    let mut tracker = ObjectiveTracker::level(LevelTuning::default());
    let mut out = Vec::new();
    tracker.start(5, &mut out);
    tracker.on_collected(IngredientKind::Butter, &mut out);

    for _ in 0..119 {
        tracker.tick(Duration::from_secs(1), &mut out);
    }
    assert_eq!(tracker.phase(), Phase::Active);

    tracker.tick(Duration::from_secs(7), &mut out);
    assert_eq!(tracker.phase(), Phase::Concluded(LevelOutcome::Lost));
    assert_eq!(tracker.remaining(), Some(Duration::ZERO));
    assert_eq!(
        tracker.clock_readout().map(|readout| readout.to_string()),
        Some("00:00:00".to_owned())
    );

    for _ in 0..5 {
        tracker.on_collected(IngredientKind::Chili, &mut out);
    }
    tracker.tick(Duration::from_secs(1), &mut out);
    assert_eq!(tracker.collected(), 1, "collection stops once lost");
    assert_eq!(tracker.phase(), Phase::Concluded(LevelOutcome::Lost));
    assert_eq!(
        out,
        vec![Command::ConcludeLevel {
            outcome: LevelOutcome::Lost,
        }]
    );
}

#[test]
fn last_ingredient_in_final_frame_beats_the_clock() {
    let mut world = World::new();
    let mut tracker = ObjectiveTracker::level(LevelTuning::default());
    let mut setup = vec![Command::RegisterPlayer { player: PLAYER }];
    setup.push(pickup(1, IngredientKind::Chili));
    let _ = run_frame(&mut world, &mut tracker, setup);

    let mut out = Vec::new();
    tracker.start(query::pickups_placed(&world) as u32, &mut out);
    let _ = run_frame(&mut world, &mut tracker, out);

    let _ = run_frame(
        &mut world,
        &mut tracker,
        vec![tick(Duration::from_millis(119_500))],
    );
    let log = run_frame(
        &mut world,
        &mut tracker,
        vec![enter(1), tick(Duration::from_secs(1))],
    );

    let outcome = LevelOutcome::Won {
        stars: StarRating::MIN,
    };
    assert_eq!(query::outcome(&world), Some(outcome));
    assert_eq!(
        log.iter()
            .filter(|event| matches!(event, Event::LevelConcluded { .. }))
            .count(),
        1
    );
}

#[test]
fn world_freezes_after_loss() {
    let mut world = World::new();
    let mut tracker = ObjectiveTracker::level(LevelTuning {
        time_limit_secs: 2.0,
        ..LevelTuning::default()
    });
    let setup = vec![
        Command::RegisterPlayer { player: PLAYER },
        pickup(1, IngredientKind::Chili),
        pickup(2, IngredientKind::Bread),
    ];
    let _ = run_frame(&mut world, &mut tracker, setup);
    let mut out = Vec::new();
    tracker.start(query::pickups_placed(&world) as u32, &mut out);

    let log = run_frame(
        &mut world,
        &mut tracker,
        vec![tick(Duration::from_millis(2_500))],
    );
    assert!(log.contains(&Event::LevelConcluded {
        outcome: LevelOutcome::Lost,
    }));

    let after = run_frame(
        &mut world,
        &mut tracker,
        vec![enter(1), tick(Duration::from_secs(1))],
    );
    assert!(
        !after
            .iter()
            .any(|event| matches!(event, Event::IngredientEaten { .. })),
        "frozen world must not feed the player"
    );
    assert_eq!(query::pickups_remaining(&world), 2);
    assert_eq!(tracker.collected(), 0);
}

fn run_frame(
    world: &mut World,
    tracker: &mut ObjectiveTracker,
    commands: Vec<Command>,
) -> Vec<Event> {
    let mut log = Vec::new();
    let mut pending = commands;

    while !pending.is_empty() {
        let mut events = Vec::new();
        for command in pending.drain(..) {
            world::apply(world, command, &mut events);
        }
        tracker.handle(&events, &mut pending);
        log.extend(events);
    }

    log
}

fn pickup(region: u32, ingredient: IngredientKind) -> Command {
    Command::PlaceRegion {
        region: RegionId::new(region),
        kind: RegionKind::Pickup {
            ingredient,
            duration: AbilityDuration::Unlimited,
        },
    }
}

fn enter(region: u32) -> Command {
    Command::Overlap {
        player: PLAYER,
        region: RegionId::new(region),
        phase: OverlapPhase::Enter,
    }
}

fn tick(dt: Duration) -> Command {
    Command::Tick { dt }
}
