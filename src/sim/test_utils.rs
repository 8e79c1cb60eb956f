//! In-memory world for driving the state machine without a solver

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};

use super::world::{BodyDesc, BodyHandle, RigidBodyWorld};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldOp {
    Add(BodyHandle),
    Remove(BodyHandle),
}

#[derive(Debug, Clone)]
pub struct MockBody {
    pub desc: BodyDesc,
    pub position: Vec3,
    pub angvel: Vec3,
}

/// Bodies never move on their own; tests push them around with [`MockWorld::shove`]
#[derive(Debug, Default)]
pub struct MockWorld {
    pub bodies: BTreeMap<BodyHandle, MockBody>,
    pub ops: Vec<WorldOp>,
    pub steps: u32,
    next: u32,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a body sideways along the lane's X axis
    pub fn shove(&mut self, handle: BodyHandle, dx: f32) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position.x += dx;
        }
    }

    pub fn angvel(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&handle).map(|b| b.angvel)
    }
}

impl RigidBodyWorld for MockWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        self.next += 1;
        let handle = BodyHandle(self.next);
        self.bodies.insert(
            handle,
            MockBody {
                desc: *desc,
                position: desc.position,
                angvel: Vec3::ZERO,
            },
        );
        self.ops.push(WorldOp::Add(handle));
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.ops.push(WorldOp::Remove(handle));
        self.bodies.remove(&handle).is_some()
    }

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
    }

    fn transform(&self, handle: BodyHandle) -> Option<Mat4> {
        self.bodies
            .get(&handle)
            .map(|b| Mat4::from_translation(b.position))
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.bodies.get(&handle).map(|b| b.position)
    }

    fn set_angular_velocity(&mut self, handle: BodyHandle, angvel: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.angvel = angvel;
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
