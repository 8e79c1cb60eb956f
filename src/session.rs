//! Session loop
//!
//! Everything one lane needs between rendered frames: the world, scene,
//! scoring state, camera, queued input and the fixed-timestep accumulator.

use std::mem;

use glam::{Mat4, Vec3};

use crate::camera::{Camera, CameraCommand};
use crate::consts::*;
use crate::render::Renderer;
use crate::settings::Settings;
use crate::sim::meter::meter_color;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{self, TickInput};
use crate::sim::{RigidBodyWorld, Scene};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    debt: f64,
}

impl FixedStep {
    pub fn new(step: f64) -> Self {
        Self { step, debt: 0.0 }
    }

    /// Add a frame delta and return how many whole steps are owed.
    /// Deltas of a second or more (stalls) are dropped entirely.
    pub fn advance(&mut self, delta: f64) -> u32 {
        if !(0.0..MAX_FRAME_DELTA).contains(&delta) {
            log::debug!("Skipping physics for a {:.3}s frame", delta);
            return 0;
        }
        self.debt += delta;
        let mut steps = 0;
        while self.debt >= self.step {
            self.debt -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn debt(&self) -> f64 {
        self.debt
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

pub struct Session<W: RigidBodyWorld> {
    pub world: W,
    pub scene: Scene,
    pub state: GameState,
    pub camera: Camera,
    pub settings: Settings,
    stepper: FixedStep,
    input: TickInput,
    camera_queue: Vec<CameraCommand>,
    last_time: Option<f64>,
}

impl<W: RigidBodyWorld> Session<W> {
    /// Rack the lane in `world` and start at the first throw
    pub fn new(mut world: W, settings: Settings) -> Self {
        let mut scene = Scene::new();
        scene.rack(&mut world);
        log::info!("Lane racked with {} bodies", world.body_count());
        Self {
            world,
            scene,
            state: GameState::new(),
            camera: Camera::default(),
            settings,
            stepper: FixedStep::default(),
            input: TickInput::default(),
            camera_queue: Vec::new(),
            last_time: None,
        }
    }

    pub fn press_launch(&mut self) {
        self.input.launch_pressed = true;
    }

    pub fn release_launch(&mut self) {
        self.input.launch_released = true;
    }

    /// Picked up at the start of the next frame, before physics
    pub fn request_reset(&mut self) {
        self.input.manual_reset = true;
    }

    pub fn camera_command(&mut self, cmd: CameraCommand) {
        self.camera_queue.push(cmd);
    }

    /// Run one rendered frame at session time `now` (seconds, monotonic)
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        let delta = self.last_time.map_or(0.0, |t| now - t);
        self.last_time = Some(now);

        for cmd in self.camera_queue.drain(..) {
            self.camera.apply(
                cmd,
                self.settings.turn_speed,
                self.settings.move_speed,
                self.settings.look_sensitivity,
            );
        }

        // Clear one-shot inputs once they are consumed
        let input = mem::take(&mut self.input);
        let mut events = tick::apply_input(
            &mut self.state,
            &mut self.scene,
            &mut self.world,
            &input,
            now,
            &self.settings,
        );

        for _ in 0..self.stepper.advance(delta) {
            self.world.step(SIM_DT as f32);
        }

        events.extend(tick::advance(
            &mut self.state,
            &mut self.scene,
            &mut self.world,
            now,
        ));
        events
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        self.scene.render(&self.world, renderer);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Meter reading (ms) and bar color at `now`
    pub fn meter(&self, now: f64) -> (u32, Vec3) {
        let reading = self.state.meter.reading(now);
        (reading, meter_color(reading))
    }

    pub fn ball_position(&self) -> Option<Vec3> {
        self.scene.ball.and_then(|b| self.world.position(b))
    }
}

/// Plain-text score line for an event, if it is a scoring event
pub fn score_line(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::ThrowResolved {
            throw_number,
            pins,
            frame_score,
        } => Some(format!(
            "Throw {}: {} pins, frame score {}",
            throw_number, pins, frame_score
        )),
        GameEvent::FrameCompleted {
            throw_number,
            frame_score,
            total_score,
            strike,
        } => Some(format!(
            "Throw {}: frame score {}, total {}{}",
            throw_number,
            frame_score,
            total_score,
            if *strike { " (strike)" } else { "" }
        )),
        _ => None,
    }
}
