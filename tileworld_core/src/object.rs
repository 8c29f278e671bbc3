use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tileworld_ids::ObjectId;

use crate::components::ComponentSet;
use crate::error::WorldError;
use crate::structs2d::Coordinate2D;

/// A node in the positioned scene tree. Coordinates are local to the parent;
/// parent and children are non-owning arena ids — the arena owns the slots,
/// the scene enforces the tree invariants.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldObject {
    pub name: Cow<'static, str>,

    pub(crate) coordinates: Coordinate2D,

    pub components: ComponentSet,

    #[serde(skip)]
    pub(crate) parent: ObjectId,

    #[serde(skip)]
    pub(crate) children: Vec<ObjectId>,
}

impl WorldObject {
    /// Creates a detached object at the origin with no components.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinate2D::ZERO,
            components: ComponentSet::new(),
            parent: ObjectId::nil(),
            children: Vec::new(),
        }
    }

    pub fn coordinates(&self) -> Coordinate2D {
        self.coordinates
    }

    /// Validated local-position assignment.
    pub fn move_to(&mut self, x: f32, y: f32) -> Result<(), WorldError> {
        self.coordinates.set(x, y)
    }

    /// Validated relative move.
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), WorldError> {
        self.coordinates
            .set(self.coordinates.x + dx, self.coordinates.y + dy)
    }

    pub fn parent(&self) -> ObjectId {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, child: ObjectId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: ObjectId) {
        self.children.retain(|&c| c != child);
    }
}

impl Default for WorldObject {
    fn default() -> Self {
        Self::new("WorldObject")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, PhysicsBody};

    #[test]
    fn move_to_rejects_non_finite() {
        let mut object = WorldObject::new("player");
        assert!(object.move_to(f32::NAN, 0.0).is_err());
        assert_eq!(object.coordinates(), Coordinate2D::ZERO);
        object.move_to(3.0, -4.0).unwrap();
        object.translate(1.0, 1.0).unwrap();
        assert_eq!(object.coordinates(), Coordinate2D::new(4.0, -3.0));
    }

    #[test]
    fn json_round_trip_keeps_components() {
        let mut object = WorldObject::new("player");
        object.move_to(12.0, 34.0).unwrap();
        object.components.attach(Component::Physics(PhysicsBody::new()));

        let json = serde_json::to_string(&object).unwrap();
        let back: WorldObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "player");
        assert_eq!(back.coordinates(), Coordinate2D::new(12.0, 34.0));
        assert!(back.components.physics().is_some());
        // Graph links are runtime state, not data.
        assert!(back.parent().is_nil());
        assert!(back.children().is_empty());
    }
}
