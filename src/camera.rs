//! Fly camera over the lane
//!
//! Keyboard turns and moves on the lane plane; mouse deltas pitch and yaw.
//! Purely presentational: nothing here touches scoring.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, yaw_direction};

/// Discrete camera input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraCommand {
    TurnLeft,
    TurnRight,
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    /// Mouse movement in pixels since the last event
    Look { dx: f32, dy: f32 },
}

const MAX_PITCH: f32 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Radians; 0 looks down -Z
    pub yaw: f32,
    /// Radians, positive looks up
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    /// Planar forward direction (ignores pitch)
    pub fn forward(&self) -> Vec3 {
        yaw_direction(self.yaw)
    }

    pub fn side(&self) -> Vec3 {
        self.forward().cross(Vec3::Y)
    }

    /// View direction including pitch
    pub fn direction(&self) -> Vec3 {
        let flat = self.forward();
        (flat * self.pitch.cos() + Vec3::Y * self.pitch.sin()).normalize()
    }

    pub fn apply(&mut self, cmd: CameraCommand, turn_speed: f32, move_speed: f32, sensitivity: f32) {
        match cmd {
            CameraCommand::TurnLeft => self.yaw = normalize_angle(self.yaw - turn_speed),
            CameraCommand::TurnRight => self.yaw = normalize_angle(self.yaw + turn_speed),
            CameraCommand::Forward => self.position += self.forward() * move_speed,
            CameraCommand::Back => self.position -= self.forward() * move_speed,
            CameraCommand::StrafeLeft => self.position -= self.side() * move_speed,
            CameraCommand::StrafeRight => self.position += self.side() * move_speed,
            CameraCommand::Look { dx, dy } => {
                self.yaw = normalize_angle(self.yaw + dx * sensitivity);
                self.pitch = (self.pitch - dy * sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction(), Vec3::Y)
    }
}
