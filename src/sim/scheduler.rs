//! Timed appearances for one level
//!
//! Per appearance: `Idle -> Showing -> (Caught | Expired) -> Showing | Idle`.
//! The cadence timer starts an appearance every `visible + gap` ms, the
//! countdown timer ends its visible window. Only the appearance's `outcome`
//! decides caught vs expired; a countdown for a resolved appearance is ignored.

use rand::Rng;

use super::position::{Position, PositionName, random_position};
use super::timer::{TimerHandle, TimerKind, Timers};
use crate::tuning::TimingTuning;

/// Visible window and gap for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTiming {
    pub visible_ms: u32,
    pub gap_ms: u32,
}

impl LevelTiming {
    /// `visible = max(floor, start - (level-1)*step)`, same shape for the gap
    pub fn for_level(tuning: &TimingTuning, level: u32) -> Self {
        let steps = level.saturating_sub(1) as f64;
        let shrink = |start: u32, step: f64, floor: u32| -> u32 {
            let value = start as f64 - (steps * step).floor();
            value.max(floor as f64) as u32
        };
        Self {
            visible_ms: shrink(
                tuning.visible_start_ms,
                tuning.visible_step_ms,
                tuning.visible_floor_ms,
            ),
            gap_ms: shrink(tuning.gap_start_ms, tuning.gap_step_ms, tuning.gap_floor_ms),
        }
    }

    /// Time between successive appearance starts
    pub fn period_ms(&self) -> u32 {
        self.visible_ms + self.gap_ms
    }
}

/// Where the current appearance stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Showing,
    Caught,
    Expired,
}

/// How an appearance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught,
    Expired,
}

/// One showing of the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppearanceState {
    /// 1-based index within the level
    pub index: u32,
    pub position: Position,
    pub visible_ms: u32,
    /// Set exactly once
    pub outcome: Option<Outcome>,
}

/// Progress through the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelState {
    pub level: u32,
    pub hits_this_level: u32,
    pub appearances_remaining: u32,
}

/// Something the game session has to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppearanceEvent {
    Shown(Position),
    Caught(Position),
    Expired(Position),
    LevelComplete { level: u32, hits: u32 },
}

/// Drives the appearances of a single level
#[derive(Debug)]
pub struct AppearanceScheduler {
    tuning: TimingTuning,
    appearances_per_level: u32,
    timers: Timers,
    timing: LevelTiming,
    level: LevelState,
    running: bool,
    current: Option<AppearanceState>,
    cadence: Option<TimerHandle>,
    countdown: Option<TimerHandle>,
}

impl AppearanceScheduler {
    pub fn new(tuning: TimingTuning, appearances_per_level: u32) -> Self {
        Self {
            tuning,
            appearances_per_level,
            timers: Timers::new(),
            timing: LevelTiming::for_level(&tuning, 1),
            level: LevelState::default(),
            running: false,
            current: None,
            cadence: None,
            countdown: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if !self.running {
            return SchedulerState::Idle;
        }
        match self.current.map(|a| a.outcome) {
            None => SchedulerState::Idle,
            Some(None) => SchedulerState::Showing,
            Some(Some(Outcome::Caught)) => SchedulerState::Caught,
            Some(Some(Outcome::Expired)) => SchedulerState::Expired,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn level_state(&self) -> LevelState {
        self.level
    }

    pub fn timing(&self) -> LevelTiming {
        self.timing
    }

    pub fn current(&self) -> Option<&AppearanceState> {
        self.current.as_ref()
    }

    /// Live timers (never more than one cadence and one countdown)
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Virtual time of this scheduler's clock
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Begin `level`, cancelling anything left from a previous one. The first
    /// appearance starts one cadence period from now.
    pub fn start(&mut self, level: u32) {
        self.stop();
        self.timing = LevelTiming::for_level(&self.tuning, level);
        self.level = LevelState {
            level,
            hits_this_level: 0,
            appearances_remaining: self.appearances_per_level,
        };
        self.running = true;
        let period = self.timing.period_ms() as u64;
        self.cadence = Some(self.timers.schedule(period, TimerKind::Cadence));
    }

    /// Cancel both timers. Nothing fires after this until the next `start`.
    pub fn stop(&mut self) {
        if let Some(handle) = self.cadence.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.countdown.take() {
            self.timers.cancel(handle);
        }
        self.running = false;
        self.current = None;
    }

    /// Advance the clock by `elapsed_ms`, firing due timers in order
    pub fn advance<R: Rng>(&mut self, elapsed_ms: u64, rng: &mut R) -> Vec<AppearanceEvent> {
        let until = self.timers.now_ms() + elapsed_ms;
        let mut events = Vec::new();

        while self.running {
            let Some((handle, kind)) = self.timers.pop_due(until) else {
                break;
            };
            match kind {
                TimerKind::Cadence => {
                    if self.cadence != Some(handle) {
                        continue;
                    }
                    self.cadence = None;
                    self.on_cadence(rng, &mut events);
                }
                TimerKind::Hide { appearance } => {
                    if self.countdown != Some(handle) {
                        continue;
                    }
                    self.countdown = None;
                    self.on_countdown(appearance, &mut events);
                }
            }
        }

        self.timers.set_now(until);
        events
    }

    /// Try to catch the target. `hint` is the slot a key press aims at; a
    /// pointer click carries none. Only the first accepted attempt per
    /// appearance counts.
    pub fn attempt_catch(&mut self, hint: Option<PositionName>) -> Option<AppearanceEvent> {
        if !self.running {
            return None;
        }
        let current = self.current.as_mut()?;
        if current.outcome.is_some() {
            return None;
        }
        if let Some(name) = hint {
            if name != current.position.name {
                return None;
            }
        }

        current.outcome = Some(Outcome::Caught);
        let position = current.position;
        if let Some(handle) = self.countdown.take() {
            self.timers.cancel(handle);
        }
        self.level.hits_this_level += 1;
        Some(AppearanceEvent::Caught(position))
    }

    fn on_cadence<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<AppearanceEvent>) {
        // The countdown always fires before the next cadence tick
        if let Some(current) = self.current.as_mut() {
            if current.outcome.is_none() {
                current.outcome = Some(Outcome::Expired);
                events.push(AppearanceEvent::Expired(current.position));
            }
        }

        if self.level.appearances_remaining == 0 {
            let level = self.level.level;
            let hits = self.level.hits_this_level;
            self.stop();
            log::info!("Level {} complete: {} hits", level, hits);
            events.push(AppearanceEvent::LevelComplete { level, hits });
            return;
        }

        let position = random_position(rng);
        let index = self.appearances_per_level - self.level.appearances_remaining + 1;
        self.level.appearances_remaining -= 1;
        self.current = Some(AppearanceState {
            index,
            position,
            visible_ms: self.timing.visible_ms,
            outcome: None,
        });

        if let Some(stale) = self.countdown.take() {
            self.timers.cancel(stale);
        }
        self.countdown = Some(self.timers.schedule(
            self.timing.visible_ms as u64,
            TimerKind::Hide { appearance: index },
        ));
        self.cadence = Some(
            self.timers
                .schedule(self.timing.period_ms() as u64, TimerKind::Cadence),
        );
        events.push(AppearanceEvent::Shown(position));
    }

    fn on_countdown(&mut self, appearance: u32, events: &mut Vec<AppearanceEvent>) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.index != appearance || current.outcome.is_some() {
            return;
        }
        current.outcome = Some(Outcome::Expired);
        events.push(AppearanceEvent::Expired(current.position));
    }
}
