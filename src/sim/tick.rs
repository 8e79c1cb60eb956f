//! Throw/frame state machine
//!
//! Input is applied before the physics catch-up steps for a rendered frame
//! and [`advance`] runs once after them: sample pins, run the settle timer,
//! and resolve the throw when the pins have had time to stop moving.

use glam::Vec3;

use super::pins::PinSet;
use super::scene::Scene;
use super::state::{GameEvent, GameState, ThrowPhase};
use super::tracker;
use super::world::RigidBodyWorld;
use crate::consts::*;
use crate::settings::Settings;

/// One-shot input for a rendered frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch button went down
    pub launch_pressed: bool,
    /// Launch button came up
    pub launch_released: bool,
    /// Clear the lane and rerack without scoring
    pub manual_reset: bool,
}

/// Apply button and reset input. Manual reset wins over everything else.
pub fn apply_input<W: RigidBodyWorld>(
    state: &mut GameState,
    scene: &mut Scene,
    world: &mut W,
    input: &TickInput,
    now: f64,
    settings: &Settings,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.manual_reset {
        manual_reset(state, scene, world);
        events.push(GameEvent::ManualReset);
        return events;
    }

    if input.launch_pressed {
        if state.phase == ThrowPhase::Aiming {
            state.meter.arm(now);
            state.phase = ThrowPhase::Charging;
            events.push(GameEvent::ChargeStarted);
        } else {
            log::debug!("Launch press ignored in {:?}", state.phase);
        }
    }

    if input.launch_released {
        if state.phase == ThrowPhase::Charging {
            if let Some(click_ms) = launch(state, scene, world, now, settings) {
                events.push(GameEvent::Launched { click_ms });
            }
        } else {
            log::debug!("Launch release ignored in {:?}", state.phase);
        }
    }

    events
}

/// Freeze the meter and spin the ball toward the pins
fn launch<W: RigidBodyWorld>(
    state: &mut GameState,
    scene: &Scene,
    world: &mut W,
    now: f64,
    settings: &Settings,
) -> Option<u32> {
    state.meter.release(now)?;
    let click_ms = state.meter.consume()?;

    // Negative spin about Z rolls the ball toward +X (the pin deck)
    let spin = -(click_ms as f32) * settings.spin_per_ms;
    match scene.ball {
        Some(ball) => world.set_angular_velocity(ball, Vec3::new(0.0, 0.0, spin)),
        None => log::warn!("Launch with no ball on the lane"),
    }

    state.throw.click_ms = Some(click_ms);
    state.phase = ThrowPhase::Launched;
    log::info!(
        "Throw {} launched: meter {} ms ({:?})",
        state.throw_number,
        click_ms,
        super::meter::MeterZone::for_click(click_ms)
    );
    Some(click_ms)
}

/// Post-physics update for one rendered frame
pub fn advance<W: RigidBodyWorld>(
    state: &mut GameState,
    scene: &mut Scene,
    world: &mut W,
    now: f64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.phase.ball_in_play() {
        return events;
    }

    for pin in tracker::sample_pins(scene, world, state, now) {
        events.push(GameEvent::PinDown { pin });
    }

    if state.phase == ThrowPhase::Launched && state.throw.first_down_at.is_some() {
        state.phase = ThrowPhase::Settling;
    }

    if state.phase == ThrowPhase::Settling
        && state
            .throw
            .settle_elapsed(now)
            .is_some_and(|elapsed| elapsed >= SETTLE_SECS)
    {
        events.extend(resolve(state, scene, world));
    }

    events
}

/// Score the finished throw and set up the next one
pub fn resolve<W: RigidBodyWorld>(
    state: &mut GameState,
    scene: &mut Scene,
    world: &mut W,
) -> Vec<GameEvent> {
    state.phase = ThrowPhase::Resolving;
    let throw_number = state.throw_number;
    let pins = state.throw.downed.len() as u8;
    state.scorecard.record_throw(pins);

    if state.is_first_throw() && !state.frame_down.is_full() {
        // Second ball: only the survivors go back up
        let keep = state.frame_down;
        scene.reset(world, keep);
        let frame_score = state.frame_score;
        log::info!(
            "Throw {}: {} pins, frame {} at {}",
            throw_number,
            pins,
            state.frame_number(),
            frame_score
        );
        state.throw_number += 1;
        state.begin_throw();
        return vec![GameEvent::ThrowResolved {
            throw_number,
            pins,
            frame_score,
        }];
    }

    let strike = state.is_first_throw();
    let frame_score = state.frame_score;
    state.total_score += frame_score as u32;
    state.frames_completed += 1;
    state.scorecard.close_frame(frame_score);

    scene.rack(world);
    // A strike skips the frame's second throw
    state.throw_number += if strike { 2 } else { 1 };
    state.clear_frame();

    log::info!(
        "Frame {} complete: {} (total {}){}",
        state.frames_completed,
        frame_score,
        state.total_score,
        if strike { " STRIKE" } else { "" }
    );

    vec![GameEvent::FrameCompleted {
        throw_number,
        frame_score,
        total_score: state.total_score,
        strike,
    }]
}

/// Throw away the frame in progress and rerack all ten pins.
/// The throw number never goes back; a reset on a second throw moves on to
/// the next odd throw so the fresh rack opens a frame.
pub fn manual_reset<W: RigidBodyWorld>(state: &mut GameState, scene: &mut Scene, world: &mut W) {
    if !state.is_first_throw() {
        state.throw_number += 1;
    }
    state.scorecard.abandon_frame();
    state.clear_frame();
    let rebuilt: PinSet = scene.rack(world);
    log::info!(
        "Manual reset: frame {} racked with {} pins",
        state.frame_number(),
        rebuilt.len()
    );
}
