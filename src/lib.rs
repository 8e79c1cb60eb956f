//! Lane Bowl - A ten-pin bowling lane simulation
//!
//! Core modules:
//! - `sim`: Throw/frame state machine, pin tracking, scene reset, physics world
//! - `session`: Fixed-timestep loop tying input, physics and scoring together
//! - `render`: Renderer collaborator and draw bookkeeping
//! - `camera`: Keyboard fly camera
//! - `scorecard`: Per-frame score history
//! - `settings`: Tunables loaded from JSON

pub mod camera;
pub mod error;
pub mod render;
pub mod scorecard;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{BowlingError, Result};
pub use scorecard::Scorecard;
pub use session::Session;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Frame deltas at or above this are treated as a stall and skip physics
    pub const MAX_FRAME_DELTA: f64 = 1.0;

    /// Pins on the deck
    pub const PIN_COUNT: usize = 10;
    /// Horizontal drift (lane units) that counts a pin as down
    pub const DOWN_THRESHOLD: f32 = 0.01;
    /// Seconds after the first pin falls before the throw is scored
    pub const SETTLE_SECS: f64 = 2.0;

    /// Power meter cycle length (ms)
    pub const METER_CYCLE_MS: u32 = 600;
    /// Start of the yellow→red zone (ms)
    pub const METER_CAUTION_MS: u32 = 300;
    /// Start of the solid red zone (ms)
    pub const METER_DANGER_MS: u32 = 560;

    /// Downward gravity (m/s²)
    pub const GRAVITY: f32 = 9.8;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 0.7;
    pub const BALL_RADIUS: f32 = BALL_SIZE * 0.5;
    pub const BALL_MASS: f32 = 8.0;
    pub const BALL_FRICTION: f32 = 3.0;
    pub const BALL_RESTITUTION: f32 = 0.01;

    /// Pin defaults (pins are simulated as boxes)
    pub const PIN_SIZE: f32 = 0.3;
    pub const PIN_MASS: f32 = 0.2;
    pub const LANE_FRICTION: f32 = 3.0;
    pub const LANE_RESTITUTION: f32 = 0.6;
}

/// Ball start position, resting on the lane
pub const BALL_START: Vec3 = Vec3::new(-3.0, consts::BALL_RADIUS, 0.0);

/// Pin centre height with the box resting on the lane
const PIN_REST_Y: f32 = consts::PIN_SIZE * 0.5;

/// Canonical pin slots, head pin first
pub const PIN_SLOTS: [Vec3; consts::PIN_COUNT] = [
    Vec3::new(3.0, PIN_REST_Y, 0.0),
    Vec3::new(3.5, PIN_REST_Y, -0.25),
    Vec3::new(3.5, PIN_REST_Y, 0.25),
    Vec3::new(4.0, PIN_REST_Y, 0.0),
    Vec3::new(4.0, PIN_REST_Y, -0.5),
    Vec3::new(4.0, PIN_REST_Y, 0.5),
    Vec3::new(4.5, PIN_REST_Y, -0.25),
    Vec3::new(4.5, PIN_REST_Y, -0.75),
    Vec3::new(4.5, PIN_REST_Y, 0.25),
    Vec3::new(4.5, PIN_REST_Y, 0.75),
];

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit direction on the lane plane (XZ) for a yaw angle; yaw 0 looks down -Z
#[inline]
pub fn yaw_direction(yaw: f32) -> Vec3 {
    let a = yaw - std::f32::consts::FRAC_PI_2;
    Vec3::new(a.cos(), 0.0, a.sin())
}
