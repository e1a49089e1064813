//! Frame loop that drives the world and every system to a fixed point.

use pantry_maze_core::{Command, Event, LevelOutcome, OverlapPhase, PlayerId, Tint, TutorialStep};
use pantry_maze_system_progress::ObjectiveTracker;
use pantry_maze_system_pulse::ColorPulse;
use pantry_maze_world::{self as world, query, World};

use crate::{
    config::Settings,
    levels::{Layout, LevelKind},
    script::{Frame, Input},
};

const PLAYER: PlayerId = PlayerId::new(0);

/// Owns the simulation for one run of a level.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    tracker: ObjectiveTracker,
    pulse: ColorPulse,
}

impl Session {
    /// Builds the world for `layout` and starts its objective.
    ///
    /// Returns the session together with the events raised during setup.
    pub(crate) fn new(level: LevelKind, layout: &Layout, settings: &Settings) -> (Self, Vec<Event>) {
        let tracker = match level {
            LevelKind::Tutorial => ObjectiveTracker::tutorial(settings.tuning.tutorial),
            LevelKind::Kitchen => ObjectiveTracker::level(settings.tuning.level),
        };
        let mut session = Self {
            world: World::new(),
            tracker,
            pulse: ColorPulse::default(),
        };

        let mut setup = vec![
            Command::ConfigureMovement {
                tuning: settings.tuning.movement,
            },
            Command::RegisterPlayer { player: PLAYER },
        ];
        setup.extend(layout.commands());
        let mut log = session.dispatch(setup);

        let required = u32::try_from(query::pickups_placed(&session.world)).unwrap_or(u32::MAX);
        let mut started = Vec::new();
        session.tracker.start(required, &mut started);
        log.extend(session.dispatch(started));

        (session, log)
    }

    /// Applies a frame's inputs followed by one tick.
    pub(crate) fn frame(&mut self, frame: &Frame) -> Vec<Event> {
        let mut commands: Vec<Command> = frame.inputs.iter().map(|input| command(*input)).collect();
        commands.push(Command::Tick { dt: frame.dt });
        self.dispatch(commands)
    }

    /// Outcome once the level concluded.
    pub(crate) fn outcome(&self) -> Option<LevelOutcome> {
        query::outcome(&self.world)
    }

    /// Ingredients eaten and required.
    pub(crate) fn progress(&self) -> (u32, u32) {
        (self.tracker.collected(), self.tracker.required())
    }

    /// Countdown readout for timed levels.
    pub(crate) fn clock(&self) -> Option<String> {
        self.tracker.clock_readout().map(|readout| readout.to_string())
    }

    /// Tutorial instruction currently shown.
    pub(crate) fn instruction(&self) -> Option<TutorialStep> {
        query::instruction(&self.world)
    }

    /// Tint the player is drawn with.
    pub(crate) fn tint(&self) -> Tint {
        self.pulse.tint(PLAYER)
    }

    fn dispatch(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut log = Vec::new();
        let mut pending = commands;

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.tracker.handle(&events, &mut pending);
            self.pulse.handle(&events);
            log.extend(events);
        }

        log
    }
}

fn command(input: Input) -> Command {
    match input {
        Input::Move(direction) => Command::MovePlayer {
            player: PLAYER,
            direction,
        },
        Input::Enter(region) => Command::Overlap {
            player: PLAYER,
            region,
            phase: OverlapPhase::Enter,
        },
        Input::Exit(region) => Command::Overlap {
            player: PLAYER,
            region,
            phase: OverlapPhase::Exit,
        },
    }
}
