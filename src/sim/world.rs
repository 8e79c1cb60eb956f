//! Rigid body world seam
//!
//! The lane's physics is an external collaborator. The scene and the state
//! machine only ever talk to it through [`RigidBodyWorld`], which keeps the
//! scoring logic testable without a real solver.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle to a body owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Infinite plane through the body origin, normal pointing out of the solid side
    Plane { normal: Vec3 },
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Surface material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

/// Whether a body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Fixed,
    Dynamic,
}

/// Everything needed to create a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub shape: Shape,
    pub position: Vec3,
    pub material: Material,
    /// Total mass for dynamic bodies (ignored for fixed ones)
    pub mass: f32,
}

/// Physics world collaborator
pub trait RigidBodyWorld {
    /// Create a body at rest and return its handle
    fn add_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Remove a body. Returns false if the handle was unknown.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Advance the simulation by exactly `dt` seconds
    fn step(&mut self, dt: f32);

    /// World-space transform of a body
    fn transform(&self, handle: BodyHandle) -> Option<Mat4>;

    /// World-space position of a body
    fn position(&self, handle: BodyHandle) -> Option<Vec3>;

    /// Overwrite a body's angular velocity (waking it)
    fn set_angular_velocity(&mut self, handle: BodyHandle, angvel: Vec3);

    /// Number of live bodies
    fn body_count(&self) -> usize;
}
