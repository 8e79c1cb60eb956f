//! Renderer collaborator
//!
//! Drawing is delegated to whatever graphics backend hosts the lane. The
//! scene only needs to say which mesh goes where with which texture.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::pins::PinIndex;

/// Meshes the lane uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshId {
    Plane,
    Sphere,
    Pin,
}

/// Textures the lane uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    Ground,
    Ball,
    Pin,
}

/// What a body represents in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneObject {
    Ground,
    Ball,
    Pin(PinIndex),
}

/// A drawable instance bound to one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    pub object: SceneObject,
    pub mesh: MeshId,
    pub texture: TextureId,
    /// Applied before the physics transform (model scale)
    pub local: Mat4,
}

impl Renderable {
    pub fn ground() -> Self {
        Self {
            object: SceneObject::Ground,
            mesh: MeshId::Plane,
            texture: TextureId::Ground,
            local: Mat4::IDENTITY,
        }
    }

    pub fn ball() -> Self {
        Self {
            object: SceneObject::Ball,
            mesh: MeshId::Sphere,
            texture: TextureId::Ball,
            local: Mat4::from_scale(Vec3::splat(crate::consts::BALL_SIZE * 0.5)),
        }
    }

    pub fn pin(index: PinIndex) -> Self {
        Self {
            object: SceneObject::Pin(index),
            mesh: MeshId::Pin,
            texture: TextureId::Pin,
            local: Mat4::from_scale(Vec3::splat(crate::consts::PIN_SIZE)),
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, mesh: MeshId, transform: Mat4, texture: TextureId);
}

/// Headless renderer: logs draw calls at trace level and counts them
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub draws: u64,
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, mesh: MeshId, transform: Mat4, texture: TextureId) {
        self.draws += 1;
        log::trace!(
            "draw {:?} ({:?}) at {:?}",
            mesh,
            texture,
            transform.w_axis.truncate()
        );
    }
}
