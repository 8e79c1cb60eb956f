//! Pin displacement tracker
//!
//! A pin counts as down the first time its live X position drifts more
//! than [`DOWN_THRESHOLD`] from where it was racked. Pins with no body
//! (kept off the deck from an earlier throw) are never sampled.

use super::pins::PinIndex;
use super::scene::Scene;
use super::state::GameState;
use super::world::RigidBodyWorld;
use crate::consts::DOWN_THRESHOLD;

/// Horizontal drift along the lane, in lane units
#[inline]
pub fn displacement(live_x: f32, rest_x: f32) -> f32 {
    (live_x - rest_x).abs()
}

/// Sample every standing pin once. Latches newly fallen pins, credits
/// them to the current throw and returns them in slot order.
pub fn sample_pins<W: RigidBodyWorld>(
    scene: &mut Scene,
    world: &W,
    state: &mut GameState,
    now: f64,
) -> Vec<PinIndex> {
    let mut fallen = Vec::new();
    for pin in scene.pins.iter_mut().filter(|p| p.is_standing()) {
        let Some(body) = pin.body else { continue };
        let Some(live) = world.position(body) else {
            continue;
        };
        if displacement(live.x, pin.rest.x) > DOWN_THRESHOLD {
            pin.down = true;
            if state.record_down(pin.index, now) {
                log::debug!(
                    "Pin {} down (drift {:.3})",
                    pin.index.get(),
                    displacement(live.x, pin.rest.x)
                );
                fallen.push(pin.index);
            }
        }
    }
    fallen
}
