#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic colour pulse that signals which abilities a player holds.
//!
//! Every held ability contributes one colour. The pulse shows each colour for
//! a fixed period while oscillating its brightness, then moves on to the next
//! colour. Granting an ability restarts the cycle; once the last ability is
//! consumed or expires the player snaps back to the base tint.

use std::{collections::BTreeMap, time::Duration};

use pantry_maze_core::{AbilityKind, Event, PlayerId, Tint};
use tracing::debug;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Configuration parameters required to construct the pulse system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    color_period: Duration,
    oscillation_speed: f32,
    min_brightness: f32,
    max_brightness: f32,
    base: Tint,
}

impl Config {
    /// Creates a configuration showing each colour for `color_period`.
    #[must_use]
    pub const fn new(color_period: Duration, base: Tint) -> Self {
        Self {
            color_period,
            oscillation_speed: 3.0,
            min_brightness: 0.6,
            max_brightness: 1.0,
            base,
        }
    }

    /// Overrides the brightness range the oscillation sweeps through.
    #[must_use]
    pub const fn with_brightness(mut self, min: f32, max: f32) -> Self {
        self.min_brightness = min;
        self.max_brightness = max;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Tint::BASE)
    }
}

/// Pure system that derives every player's tint from ability events.
#[derive(Debug)]
pub struct ColorPulse {
    config: Config,
    clock: Duration,
    pulses: BTreeMap<PlayerId, Pulse>,
}

impl ColorPulse {
    /// Creates a pulse system with no active pulses.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: Duration::ZERO,
            pulses: BTreeMap::new(),
        }
    }

    /// Consumes world events, starting, advancing and stopping pulses.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::AbilityGranted { player, kind, .. } => self.start(*player, *kind),
                Event::AbilityExpired { player, kind }
                | Event::AbilityConsumed { player, kind } => self.stop(*player, *kind),
                Event::TimeAdvanced { dt } => self.advance(*dt),
                _ => {}
            }
        }
    }

    /// Stops the pulse for `player` immediately, restoring the base tint.
    pub fn stop_all(&mut self, player: PlayerId) {
        let _ = self.pulses.remove(&player);
    }

    /// Reports whether `player` currently pulses.
    #[must_use]
    pub fn is_pulsing(&self, player: PlayerId) -> bool {
        self.pulses.contains_key(&player)
    }

    /// Ability whose colour `player` currently shows.
    #[must_use]
    pub fn current_ability(&self, player: PlayerId) -> Option<AbilityKind> {
        self.pulses.get(&player).and_then(Pulse::current)
    }

    /// Tint `player` should be drawn with this frame.
    #[must_use]
    pub fn tint(&self, player: PlayerId) -> Tint {
        let Some(kind) = self.current_ability(player) else {
            return self.config.base;
        };

        let phase = (self.clock.as_secs_f32() * self.config.oscillation_speed).sin();
        let t = (phase + 1.0) / 2.0;
        let range = self.config.max_brightness - self.config.min_brightness;
        let brightness = self.config.min_brightness + range * t;
        kind.tint().scaled(brightness)
    }

    fn start(&mut self, player: PlayerId, kind: AbilityKind) {
        let pulse = self.pulses.entry(player).or_default();
        if !pulse.colors.contains(&kind) {
            pulse.colors.push(kind);
        }
        pulse.restart();
    }

    fn stop(&mut self, player: PlayerId, kind: AbilityKind) {
        let Some(pulse) = self.pulses.get_mut(&player) else {
            return;
        };
        pulse.colors.retain(|held| *held != kind);
        if pulse.colors.is_empty() {
            debug!(?player, "pulse stopped");
            let _ = self.pulses.remove(&player);
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);
        for pulse in self.pulses.values_mut() {
            pulse.advance(dt, self.config.color_period);
        }
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[derive(Clone, Debug, Default)]
struct Pulse {
    colors: Vec<AbilityKind>,
    index: usize,
    shown_for: Duration,
}

impl Pulse {
    fn restart(&mut self) {
        self.index = 0;
        self.shown_for = Duration::ZERO;
    }

    fn current(&self) -> Option<AbilityKind> {
        if self.colors.is_empty() {
            return None;
        }
        self.colors.get(self.index % self.colors.len()).copied()
    }

    fn advance(&mut self, dt: Duration, period: Duration) {
        if period.is_zero() || self.colors.is_empty() {
            return;
        }
        let shown_for = self.shown_for.as_nanos() + dt.as_nanos();
        let period = period.as_nanos();
        let len = self.colors.len() as u128;
        let steps = shown_for / period;
        self.index = ((self.index as u128 % len + steps % len) % len) as usize;
        let left = shown_for % period;
        self.shown_for = Duration::new(
            (left / NANOS_PER_SEC) as u64,
            (left % NANOS_PER_SEC) as u32,
        );
    }
}
