//! Rapier-backed lane world
//!
//! Owns the whole Rapier pipeline and hands out our own [`BodyHandle`]s so
//! nothing outside this file sees nalgebra or Rapier types.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use rapier3d::na::Unit;
use rapier3d::prelude::*;

use super::world::{BodyDesc, BodyHandle, BodyKind, RigidBodyWorld, Shape};

pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    // Required by the pipeline; the lane has no joints
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    handles: HashMap<BodyHandle, RigidBodyHandle>,
    next_handle: u32,
}

impl RapierWorld {
    /// Create an empty world with downward gravity of `gravity` m/s²
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity: vector![0.0, -gravity, 0.0],
            integration_params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: HashMap::new(),
            next_handle: 1,
        }
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.handles.get(&handle).and_then(|h| self.bodies.get(*h))
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn collider_for(desc: &BodyDesc) -> Collider {
    let builder = match desc.shape {
        Shape::Plane { normal } => ColliderBuilder::halfspace(Unit::new_normalize(to_vector(normal))),
        Shape::Sphere { radius } => ColliderBuilder::ball(radius),
        Shape::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    };
    let builder = builder
        .friction(desc.material.friction)
        .restitution(desc.material.restitution);
    match desc.kind {
        BodyKind::Dynamic => builder.mass(desc.mass).build(),
        BodyKind::Fixed => builder.build(),
    }
}

impl RigidBodyWorld for RapierWorld {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            // Fast ball against thin pins: keep CCD on so nothing tunnels
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().ccd_enabled(true),
        };
        let body = builder
            .translation(to_vector(desc.position))
            .linvel(vector![0.0, 0.0, 0.0])
            .build();

        let rh = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider_for(desc), rh, &mut self.bodies);

        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.insert(handle, rh);
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(rh) = self.handles.remove(&handle) else {
            return false;
        };
        self.bodies
            .remove(
                rh,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    fn transform(&self, handle: BodyHandle) -> Option<Mat4> {
        let m = self.body(handle)?.position().to_homogeneous();
        // nalgebra and glam are both column-major
        Some(Mat4::from_cols_slice(m.as_slice()))
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        let t = self.body(handle)?.translation();
        Some(Vec3::new(t.x, t.y, t.z))
    }

    fn set_angular_velocity(&mut self, handle: BodyHandle, angvel: Vec3) {
        let Some(rh) = self.handles.get(&handle) else {
            log::warn!("set_angular_velocity on unknown body {:?}", handle);
            return;
        };
        if let Some(body) = self.bodies.get_mut(*rh) {
            body.set_angvel(to_vector(angvel), true);
        }
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }
}
