//! Lane scene and the reset protocol
//!
//! The scene owns the pin deck, the ball/ground handles and the lookup
//! table from body handle to renderable. Bodies themselves live in the
//! world; the scene only remembers which handle is which.

use std::collections::HashMap;

use glam::Vec3;

use super::pins::{Pin, PinIndex, PinSet};
use super::world::{BodyDesc, BodyHandle, BodyKind, Material, RigidBodyWorld, Shape};
use crate::consts::*;
use crate::render::{Renderable, Renderer, SceneObject};
use crate::{BALL_START, PIN_SLOTS};

const LANE_MATERIAL: Material = Material {
    friction: LANE_FRICTION,
    restitution: LANE_RESTITUTION,
};

const BALL_MATERIAL: Material = Material {
    friction: BALL_FRICTION,
    restitution: BALL_RESTITUTION,
};

fn ground_desc() -> BodyDesc {
    BodyDesc {
        kind: BodyKind::Fixed,
        shape: Shape::Plane { normal: Vec3::Y },
        position: Vec3::ZERO,
        material: LANE_MATERIAL,
        mass: 0.0,
    }
}

fn ball_desc() -> BodyDesc {
    BodyDesc {
        kind: BodyKind::Dynamic,
        shape: Shape::Sphere {
            radius: BALL_RADIUS,
        },
        position: BALL_START,
        material: BALL_MATERIAL,
        mass: BALL_MASS,
    }
}

fn pin_desc(index: PinIndex) -> BodyDesc {
    BodyDesc {
        kind: BodyKind::Dynamic,
        shape: Shape::Cuboid {
            half_extents: Vec3::splat(PIN_SIZE * 0.5),
        },
        position: PIN_SLOTS[index.get()],
        material: LANE_MATERIAL,
        mass: PIN_MASS,
    }
}

/// All bodies on the lane and how to draw them
#[derive(Debug)]
pub struct Scene {
    pub pins: [Pin; PIN_COUNT],
    pub ball: Option<BodyHandle>,
    pub ground: Option<BodyHandle>,
    renderables: HashMap<BodyHandle, Renderable>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// An empty scene; call [`Scene::reset`] to populate the world
    pub fn new() -> Self {
        Self {
            pins: Pin::deck(),
            ball: None,
            ground: None,
            renderables: HashMap::new(),
        }
    }

    pub fn pin(&self, index: PinIndex) -> &Pin {
        &self.pins[index.get()]
    }

    /// Pins that currently have a body in the world
    pub fn pins_on_deck(&self) -> PinSet {
        self.pins
            .iter()
            .filter(|p| p.body.is_some())
            .map(|p| p.index)
            .collect()
    }

    /// Pins latched down this frame
    pub fn pins_down(&self) -> PinSet {
        self.pins.iter().filter(|p| p.down).map(|p| p.index).collect()
    }

    /// Renderable bound to a body, if any
    pub fn renderable(&self, handle: BodyHandle) -> Option<&Renderable> {
        self.renderables.get(&handle)
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    /// Rebuild the lane, leaving the pins in `keep_down` off the deck.
    ///
    /// Every existing body is removed before anything is created. Pins
    /// that are recreated get their slot as the new rest position; pins in
    /// `keep_down` keep their latched flag. Returns the recreated pins.
    pub fn reset<W: RigidBodyWorld>(&mut self, world: &mut W, keep_down: PinSet) -> PinSet {
        self.remove_all(world);

        let ground = world.add_body(&ground_desc());
        self.renderables.insert(ground, Renderable::ground());
        self.ground = Some(ground);

        let ball = world.add_body(&ball_desc());
        self.renderables.insert(ball, Renderable::ball());
        self.ball = Some(ball);

        let rebuilt = keep_down.complement();
        for index in rebuilt.iter() {
            let handle = world.add_body(&pin_desc(index));
            self.renderables.insert(handle, Renderable::pin(index));
            let pin = &mut self.pins[index.get()];
            pin.rest = PIN_SLOTS[index.get()];
            pin.down = false;
            pin.body = Some(handle);
        }

        log::debug!(
            "Scene reset: {} pins standing, {} kept down",
            rebuilt.len(),
            keep_down.len()
        );
        rebuilt
    }

    /// Reset from raw slot numbers; out-of-range slots are ignored
    pub fn reset_with_indexes<W: RigidBodyWorld>(
        &mut self,
        world: &mut W,
        keep_down: &[usize],
    ) -> PinSet {
        self.reset(world, PinSet::from_indexes(keep_down))
    }

    /// Full rack: all ten pins, latched flags cleared
    pub fn rack<W: RigidBodyWorld>(&mut self, world: &mut W) -> PinSet {
        self.reset(world, PinSet::EMPTY)
    }

    fn remove_all<W: RigidBodyWorld>(&mut self, world: &mut W) {
        let pin_bodies = self.pins.iter_mut().filter_map(|p| p.body.take());
        let handles: Vec<BodyHandle> = pin_bodies
            .chain(self.ball.take())
            .chain(self.ground.take())
            .collect();
        for handle in handles {
            if !world.remove_body(handle) {
                log::warn!("Body {:?} was already gone from the world", handle);
            }
            self.renderables.remove(&handle);
        }
    }

    /// Draw every body that has a renderable
    pub fn render<W: RigidBodyWorld, R: Renderer>(&self, world: &W, renderer: &mut R) {
        let mut handles: Vec<_> = self.renderables.keys().copied().collect();
        handles.sort();
        for handle in handles {
            let Some(r) = self.renderables.get(&handle) else {
                continue;
            };
            let Some(transform) = world.transform(handle) else {
                continue;
            };
            renderer.draw(r.mesh, transform * r.local, r.texture);
        }
    }

    /// Find which pin a body belongs to
    pub fn pin_for_body(&self, handle: BodyHandle) -> Option<PinIndex> {
        match self.renderables.get(&handle)?.object {
            SceneObject::Pin(index) => Some(index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_utils::{MockWorld, WorldOp};

    #[test]
    fn test_rack_creates_everything() {
        let mut world = MockWorld::new();
        let mut scene = Scene::new();

        let rebuilt = scene.rack(&mut world);
        assert!(rebuilt.is_full());
        // ground + ball + 10 pins
        assert_eq!(world.body_count(), 12);
        assert_eq!(scene.renderable_count(), 12);
        for (i, pin) in scene.pins.iter().enumerate() {
            assert!(pin.is_standing());
            assert_eq!(pin.rest, PIN_SLOTS[i]);
            let body = pin.body.unwrap();
            assert_eq!(world.position(body), Some(PIN_SLOTS[i]));
            assert_eq!(scene.pin_for_body(body), Some(pin.index));
        }
        assert_eq!(world.position(scene.ball.unwrap()), Some(BALL_START));
    }

    #[test]
    fn test_bodies_rest_on_the_lane() {
        let mut world = MockWorld::new();
        let mut scene = Scene::new();
        scene.reset(&mut world, PinSet::from_indexes(&[2]));

        let ball = &world.bodies[&scene.ball.unwrap()];
        assert_eq!(ball.desc.mass, BALL_MASS);
        assert_eq!(ball.desc.material, BALL_MATERIAL);
        assert_eq!(ball.desc.position.y, BALL_RADIUS);

        for pin in scene.pins.iter().filter(|p| p.body.is_some()) {
            let body = &world.bodies[&pin.body.unwrap()];
            let Shape::Cuboid { half_extents } = body.desc.shape else {
                panic!("pin {} is not a box", pin.index.get());
            };
            // bottom face sits on the ground plane
            assert_eq!(body.desc.position.y - half_extents.y, 0.0);
            assert_eq!(body.desc.mass, PIN_MASS);
            assert_eq!(pin.rest.x, PIN_SLOTS[pin.index.get()].x);
        }
    }

    #[test]
    fn test_partial_reset_keeps_down_pins_off_deck() {
        let mut world = MockWorld::new();
        let mut scene = Scene::new();
        scene.rack(&mut world);

        let down = PinSet::from_indexes(&[0, 2, 5]);
        for pin in down.iter() {
            scene.pins[pin.get()].down = true;
        }

        let rebuilt = scene.reset(&mut world, down);
        assert_eq!(rebuilt.len(), 7);
        assert_eq!(scene.pins_on_deck().to_vec(), vec![1, 3, 4, 6, 7, 8, 9]);
        // latched flags survive for the pins kept down
        assert_eq!(scene.pins_down(), down);
        assert_eq!(world.body_count(), 9);
        assert_eq!(scene.renderable_count(), 9);
    }

    #[test]
    fn test_removals_precede_creations() {
        let mut world = MockWorld::new();
        let mut scene = Scene::new();
        scene.rack(&mut world);
        world.ops.clear();

        scene.reset(&mut world, PinSet::from_indexes(&[3]));

        let first_add = world
            .ops
            .iter()
            .position(|op| matches!(op, WorldOp::Add(_)))
            .unwrap();
        let last_remove = world
            .ops
            .iter()
            .rposition(|op| matches!(op, WorldOp::Remove(_)))
            .unwrap();
        assert!(last_remove < first_add);
        assert_eq!(
            world.ops.iter().filter(|op| matches!(op, WorldOp::Remove(_))).count(),
            12
        );
    }

    #[test]
    fn test_invalid_indexes_are_ignored() {
        let mut world = MockWorld::new();
        let mut scene = Scene::new();
        let rebuilt = scene.reset_with_indexes(&mut world, &[1, 11, 99]);
        assert_eq!(rebuilt.len(), 9);
        assert!(scene.pins[1].body.is_none());
    }

    #[test]
    fn test_render_draws_each_body() {
        struct Recorder(Vec<crate::render::MeshId>);
        impl Renderer for Recorder {
            fn draw(&mut self, mesh: crate::render::MeshId, _: glam::Mat4, _: crate::render::TextureId) {
                self.0.push(mesh);
            }
        }

        let mut world = MockWorld::new();
        let mut scene = Scene::new();
        scene.reset(&mut world, PinSet::from_indexes(&[0]));

        let mut recorder = Recorder(Vec::new());
        scene.render(&world, &mut recorder);
        assert_eq!(recorder.0.len(), 11);
        assert_eq!(
            recorder.0.iter().filter(|m| **m == crate::render::MeshId::Pin).count(),
            9
        );
    }
}
