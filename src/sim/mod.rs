//! Lane simulation
//!
//! Scoring lives here and only reaches physics through [`RigidBodyWorld`]:
//! - Single-threaded, one update per rendered frame
//! - Physics advanced in fixed steps by the session
//! - Pins addressed by [`PinIndex`], bodies by [`BodyHandle`]

pub mod meter;
pub mod pins;
pub mod rapier_world;
pub mod scene;
pub mod state;
pub mod tick;
pub mod tracker;
pub mod world;

#[cfg(test)]
pub(crate) mod test_utils;

pub use meter::{MeterZone, PowerMeter, click_time, meter_color};
pub use pins::{Pin, PinIndex, PinSet};
pub use rapier_world::RapierWorld;
pub use scene::Scene;
pub use state::{GameEvent, GameState, Throw, ThrowPhase};
pub use tick::{TickInput, advance, apply_input, manual_reset, resolve};
pub use tracker::{displacement, sample_pins};
pub use world::{BodyDesc, BodyHandle, BodyKind, Material, RigidBodyWorld, Shape};
