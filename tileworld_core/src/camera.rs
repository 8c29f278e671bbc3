use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tileworld_ids::ObjectId;

use crate::error::WorldError;
use crate::object::WorldObject;
use crate::object_arena::ObjectArena;
use crate::services::EngineMode;
use crate::structs2d::{Coordinate2D, Size2D};

/// Projection constant: world-to-viewport scale is `viewport.height * VIEW_SCALE_FACTOR`.
pub const VIEW_SCALE_FACTOR: f32 = 0.004;

const DEFAULT_PAN_SPEED: f32 = 0.01;

/// How the camera computes its own coordinates. Transitions are only ever set
/// externally; the camera never switches modes on its own.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Recenter on the subject every render update (play mode only).
    #[default]
    Follow,
    /// Advance by the external pan vector, scaled by pan speed.
    Scriptable,
    /// Only explicit `move_to`/`center_on` calls move it.
    Fixed,
}

/// A specialized world object whose coordinates are the view offset applied
/// to everything the renderer draws.
#[derive(Debug, Clone)]
pub struct Camera {
    base: WorldObject,
    pub mode: CameraMode,
    subject: ObjectId,
    pan_speed: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            base: WorldObject::new("Camera"),
            mode: CameraMode::Follow,
            subject: ObjectId::nil(),
            pan_speed: DEFAULT_PAN_SPEED,
        }
    }

    pub fn subject(&self) -> ObjectId {
        self.subject
    }

    pub fn set_subject(&mut self, subject: ObjectId) {
        self.subject = subject;
    }

    pub fn pan_speed(&self) -> f32 {
        self.pan_speed
    }

    pub fn set_pan_speed(&mut self, speed: f32) -> Result<(), WorldError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(WorldError::NonPositivePanSpeed(speed));
        }
        self.pan_speed = speed;
        Ok(())
    }

    /// Per-mode update, run once per render tick before traversal.
    pub fn update(
        &mut self,
        objects: &ObjectArena,
        viewport: Size2D,
        mode: EngineMode,
        pan: Coordinate2D,
    ) {
        match self.mode {
            CameraMode::Follow => self.update_follow(objects, viewport, mode),
            CameraMode::Scriptable => {
                // Panning stays live in editor mode as well.
                let step = pan * self.pan_speed;
                self.base.coordinates += step;
            }
            CameraMode::Fixed => {}
        }
    }

    fn update_follow(&mut self, objects: &ObjectArena, viewport: Size2D, mode: EngineMode) {
        if mode != EngineMode::Play {
            // Frozen outside play mode; skipped update for this frame only.
            return;
        }

        let Some(subject_pos) = objects.world_position(self.subject) else {
            warn!("follow camera has no live subject, skipping update");
            return;
        };

        let scale = viewport.height() * VIEW_SCALE_FACTOR;
        let (half_w, half_h) = match objects
            .get(self.subject)
            .and_then(|o| o.components.collider())
        {
            Some(collider) => (
                collider.hitbox.width() / 2.0,
                collider.hitbox.height() / 2.0,
            ),
            None => (0.0, 0.0),
        };

        self.base.coordinates.x = -subject_pos.x + (viewport.width() / 2.0) / scale - half_w;
        self.base.coordinates.y = -subject_pos.y + (viewport.height() / 2.0) / scale - half_h;
    }

    /// Centers the view on an entity. Mode-independent.
    pub fn center_on(
        &mut self,
        objects: &ObjectArena,
        entity: ObjectId,
        viewport: Size2D,
    ) -> Result<(), WorldError> {
        let position = objects
            .world_position(entity)
            .ok_or(WorldError::DeadObject(entity))?;
        let scale = viewport.height() * VIEW_SCALE_FACTOR;
        self.base.coordinates.x = -position.x + (viewport.width() / 2.0) / scale;
        self.base.coordinates.y = -position.y + (viewport.height() / 2.0) / scale;
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Camera {
    type Target = WorldObject;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for Camera {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BoxCollider, Component};
    use crate::structs2d::Size2D;

    fn subject_arena(x: f32, y: f32, hitbox: Option<(f32, f32)>) -> (ObjectArena, ObjectId) {
        let mut arena = ObjectArena::new();
        let mut subject = WorldObject::new("subject");
        subject.move_to(x, y).unwrap();
        if let Some((w, h)) = hitbox {
            subject.components.attach(Component::Collider(BoxCollider::new(
                Size2D::new(w, h).unwrap(),
            )));
        }
        let id = arena.insert(subject);
        (arena, id)
    }

    #[test]
    fn follow_recenters_on_subject() {
        let (arena, id) = subject_arena(20.0, 560.0, Some((20.0, 4.0)));
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.set_subject(id);
        camera.update(&arena, viewport, EngineMode::Play, Coordinate2D::ZERO);

        let scale = 600.0 * VIEW_SCALE_FACTOR;
        assert!((scale - 2.4).abs() < 1e-6);
        let expected_x = -20.0 + (800.0 / 2.0) / scale - 10.0;
        let expected_y = -560.0 + (600.0 / 2.0) / scale - 2.0;
        assert!((camera.coordinates().x - expected_x).abs() < 1e-3);
        assert!((camera.coordinates().y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn follow_without_collider_uses_zero_extent() {
        let (arena, id) = subject_arena(100.0, 100.0, None);
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.set_subject(id);
        camera.update(&arena, viewport, EngineMode::Play, Coordinate2D::ZERO);

        let scale = 600.0 * VIEW_SCALE_FACTOR;
        assert!((camera.coordinates().x - (-100.0 + 400.0 / scale)).abs() < 1e-3);
    }

    #[test]
    fn follow_freezes_in_editor_mode() {
        let (arena, id) = subject_arena(20.0, 560.0, None);
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.set_subject(id);
        camera.move_to(7.0, 8.0).unwrap();
        camera.update(&arena, viewport, EngineMode::Editor, Coordinate2D::ZERO);
        assert_eq!(camera.coordinates(), Coordinate2D::new(7.0, 8.0));
    }

    #[test]
    fn follow_with_dead_subject_skips_update() {
        let (mut arena, id) = subject_arena(1.0, 1.0, None);
        arena.remove(id);
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.set_subject(id);
        camera.move_to(3.0, 4.0).unwrap();
        camera.update(&arena, viewport, EngineMode::Play, Coordinate2D::ZERO);
        assert_eq!(camera.coordinates(), Coordinate2D::new(3.0, 4.0));
    }

    #[test]
    fn scriptable_applies_scaled_pan() {
        let arena = ObjectArena::new();
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.mode = CameraMode::Scriptable;
        camera.set_pan_speed(2.0).unwrap();
        camera.update(
            &arena,
            viewport,
            EngineMode::Editor,
            Coordinate2D::new(3.0, -1.0),
        );
        assert_eq!(camera.coordinates(), Coordinate2D::new(6.0, -2.0));
    }

    #[test]
    fn fixed_only_moves_explicitly() {
        let (arena, id) = subject_arena(50.0, 50.0, None);
        let viewport = Size2D::new(800.0, 600.0).unwrap();

        let mut camera = Camera::new();
        camera.mode = CameraMode::Fixed;
        camera.set_subject(id);
        camera.update(&arena, viewport, EngineMode::Play, Coordinate2D::new(9.0, 9.0));
        assert_eq!(camera.coordinates(), Coordinate2D::ZERO);

        camera.center_on(&arena, id, viewport).unwrap();
        let scale = 600.0 * VIEW_SCALE_FACTOR;
        assert!((camera.coordinates().x - (-50.0 + 400.0 / scale)).abs() < 1e-3);
    }

    #[test]
    fn pan_speed_must_be_positive() {
        let mut camera = Camera::new();
        assert!(camera.set_pan_speed(0.0).is_err());
        assert!(camera.set_pan_speed(-1.0).is_err());
        assert!(camera.set_pan_speed(0.5).is_ok());
    }
}
