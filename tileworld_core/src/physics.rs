use tileworld_ids::ObjectId;

use crate::components::BoxCollider;
use crate::scene::Scene;
use crate::structs2d::{Coordinate2D, Rect};

/// Downward acceleration applied per tick to gravity-enabled bodies, in
/// velocity units per tick.
pub const DEFAULT_GRAVITY: f32 = 0.03;

/// Gap left between colliders after a resolved collision, so the resolved
/// pair does not re-collide on the next tick.
pub const DEFAULT_COLLISION_OFFSET: f32 = 0.01;

/// Per-object gravity and collision stepper. Movement is resolved one axis at
/// a time, X before Y, so a diagonal mover sliding along a wall keeps its
/// velocity on the free axis.
#[derive(Clone, Copy, Debug)]
pub struct KineticEngine {
    pub gravity: f32,
    pub collision_offset: f32,
}

impl KineticEngine {
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            collision_offset: DEFAULT_COLLISION_OFFSET,
        }
    }

    /// Advances one object by one logic tick: gravity, then axis-separated
    /// movement with collision clamping against the other root objects.
    /// `delta` scales gravity only; position always advances by the raw
    /// per-tick velocity.
    ///
    /// Objects without an enabled `PhysicsBody` are untouched. An object with
    /// a body but no enabled collider moves freely. Collision candidates are
    /// scanned in root-list order and only the first hit per axis is
    /// resolved.
    pub fn step(&self, scene: &mut Scene, id: ObjectId, delta: f32) {
        let Some(object) = scene.objects.get(id) else {
            return;
        };
        let Some(body) = object.components.physics() else {
            return;
        };
        if !body.enabled {
            return;
        }

        let mut velocity = body.velocity;
        if body.gravity_enabled {
            velocity.y += self.gravity * delta;
        }

        let mut position = object.coordinates();
        match object.components.enabled_collider().cloned() {
            None => {
                position.x += velocity.x;
                position.y += velocity.y;
            }
            Some(collider) => {
                self.resolve_axis_x(scene, id, &collider, &mut position, &mut velocity);
                self.resolve_axis_y(scene, id, &collider, &mut position, &mut velocity);
            }
        }

        let Some(object) = scene.objects.get_mut(id) else {
            return;
        };
        object.coordinates = position;
        if let Some(body) = object.components.physics_mut() {
            body.velocity = velocity;
        }
    }

    // The axis scans run even at zero velocity: a pre-overlapping pair is
    // pushed apart rather than left interpenetrated.
    fn resolve_axis_x(
        &self,
        scene: &Scene,
        id: ObjectId,
        collider: &BoxCollider,
        position: &mut Coordinate2D,
        velocity: &mut Coordinate2D,
    ) {
        let moved = Coordinate2D::new(position.x + velocity.x, position.y);
        let candidate = collider.bounds(moved);

        match self.first_hit(scene, id, collider, candidate) {
            Some(hit) => {
                if velocity.x > 0.0 {
                    position.x = hit.left() - candidate.w - self.collision_offset;
                } else {
                    position.x = hit.right() + self.collision_offset;
                }
                velocity.x = 0.0;
            }
            None => position.x = moved.x,
        }
    }

    fn resolve_axis_y(
        &self,
        scene: &Scene,
        id: ObjectId,
        collider: &BoxCollider,
        position: &mut Coordinate2D,
        velocity: &mut Coordinate2D,
    ) {
        let moved = Coordinate2D::new(position.x, position.y + velocity.y);
        let candidate = collider.bounds(moved);

        match self.first_hit(scene, id, collider, candidate) {
            Some(hit) => {
                if velocity.y > 0.0 {
                    position.y = hit.top() - candidate.h - self.collision_offset;
                } else {
                    position.y = hit.bottom() + self.collision_offset;
                }
                velocity.y = 0.0;
            }
            None => position.y = moved.y,
        }
    }

    /// Bounds of the first other root whose enabled, same-group collider
    /// overlaps `candidate`, in root-list order. Stops at the first hit.
    fn first_hit(
        &self,
        scene: &Scene,
        id: ObjectId,
        collider: &BoxCollider,
        candidate: Rect,
    ) -> Option<Rect> {
        for &other_id in scene.roots() {
            if other_id == id {
                continue;
            }
            let Some(other) = scene.objects.get(other_id) else {
                continue;
            };
            let Some(other_collider) = other.components.enabled_collider() else {
                continue;
            };
            if !collider.same_group(other_collider) {
                continue;
            }
            let other_bounds = other_collider.bounds(other.coordinates());
            if candidate.overlaps(&other_bounds) {
                return Some(other_bounds);
            }
        }
        None
    }
}

impl Default for KineticEngine {
    fn default() -> Self {
        Self::new()
    }
}
