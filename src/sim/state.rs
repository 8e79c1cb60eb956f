//! Game state and core scoring types
//!
//! Everything the throw/frame state machine owns lives here. Pins and
//! bodies belong to the [`Scene`](super::scene::Scene); the state machine
//! refers to them by [`PinIndex`].

use serde::{Deserialize, Serialize};

use super::meter::PowerMeter;
use super::pins::{PinIndex, PinSet};
use crate::consts::PIN_COUNT;
use crate::scorecard::Scorecard;

/// Where the current throw is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowPhase {
    /// Ball at the foul line, waiting for the launch button
    Aiming,
    /// Launch button held, meter running
    Charging,
    /// Ball rolling, nothing has fallen yet
    Launched,
    /// At least one pin down, settle timer running
    Settling,
    /// Settle timer expired; scoring the throw
    Resolving,
}

impl ThrowPhase {
    /// Ball is rolling and pins may fall
    pub fn ball_in_play(self) -> bool {
        matches!(self, ThrowPhase::Launched | ThrowPhase::Settling)
    }
}

/// The throw in progress
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Throw {
    /// Pins first seen down during this throw, in detection order
    pub downed: Vec<PinIndex>,
    /// Session time of the first pin-down event
    pub first_down_at: Option<f64>,
    /// Meter value used for the launch
    pub click_ms: Option<u32>,
}

impl Throw {
    /// Seconds since the first pin fell, if any has
    pub fn settle_elapsed(&self, now: f64) -> Option<f64> {
        self.first_down_at.map(|t| now - t)
    }
}

/// Events emitted by the state machine for the host to log or display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChargeStarted,
    Launched { click_ms: u32 },
    PinDown { pin: PinIndex },
    /// First throw of a frame scored, second throw coming up
    ThrowResolved {
        throw_number: u32,
        pins: u8,
        frame_score: u8,
    },
    /// Frame finished (second throw or strike)
    FrameCompleted {
        throw_number: u32,
        frame_score: u8,
        total_score: u32,
        strike: bool,
    },
    ManualReset,
}

/// Complete scoring state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: ThrowPhase,
    /// Throw ordinal in the game, starting at 1. Odd throws open a frame.
    pub throw_number: u32,
    pub meter: PowerMeter,
    pub throw: Throw,
    /// Pins down so far this frame (also the frame's down-pin list)
    pub frame_down: PinSet,
    /// Pins down this frame, 0-10
    pub frame_score: u8,
    /// Sum of completed frames
    pub total_score: u32,
    pub frames_completed: u32,
    pub scorecard: Scorecard,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: ThrowPhase::Aiming,
            throw_number: 1,
            meter: PowerMeter::Idle,
            throw: Throw::default(),
            frame_down: PinSet::EMPTY,
            frame_score: 0,
            total_score: 0,
            frames_completed: 0,
            scorecard: Scorecard::new(),
        }
    }

    /// True on the opening throw of a frame
    pub fn is_first_throw(&self) -> bool {
        self.throw_number % 2 == 1
    }

    /// 1-based frame number the current throw belongs to
    pub fn frame_number(&self) -> u32 {
        self.throw_number.div_ceil(2)
    }

    /// Record a pin-down event. Returns false if the pin was already counted.
    pub fn record_down(&mut self, pin: PinIndex, now: f64) -> bool {
        if self.frame_down.contains(pin) {
            return false;
        }
        self.frame_down.insert(pin);
        self.frame_score = (self.frame_score + 1).min(PIN_COUNT as u8);
        self.throw.downed.push(pin);
        if self.throw.first_down_at.is_none() {
            self.throw.first_down_at = Some(now);
        }
        true
    }

    /// Start a fresh throw record
    pub fn begin_throw(&mut self) {
        self.throw = Throw::default();
        self.meter.discard();
        self.phase = ThrowPhase::Aiming;
    }

    /// Drop everything belonging to the current frame
    pub fn clear_frame(&mut self) {
        self.frame_down = PinSet::EMPTY;
        self.frame_score = 0;
        self.begin_throw();
    }
}
