pub mod collider;
pub mod label;
pub mod physics_body;
pub mod sprite;

pub use collider::{BASE_COLLISION_GROUP, BoxCollider};
pub use label::{Label, TextAlign};
pub use physics_body::PhysicsBody;
pub use sprite::Sprite;

use serde::{Deserialize, Serialize};

/// The closed set of capability kinds an object can carry.
/// One dense slot per kind — no string lookup, exhaustiveness checked at
/// compile time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Collider,
    Physics,
    Sprite,
    Label,
}

/// A component payload tagged with its kind, used for uniform attachment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Component {
    Collider(BoxCollider),
    Physics(PhysicsBody),
    Sprite(Sprite),
    Label(Label),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Collider(_) => ComponentKind::Collider,
            Component::Physics(_) => ComponentKind::Physics,
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::Label(_) => ComponentKind::Label,
        }
    }
}

/// At most one component per kind. Attaching replaces any existing component
/// of the same kind; there are no ordering constraints between kinds.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ComponentSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collider: Option<BoxCollider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    physics: Option<PhysicsBody>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    sprite: Option<Sprite>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<Label>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, component: Component) {
        match component {
            Component::Collider(c) => self.collider = Some(c),
            Component::Physics(p) => self.physics = Some(p),
            Component::Sprite(s) => self.sprite = Some(s),
            Component::Label(l) => self.label = Some(l),
        }
    }

    /// Removes the component of `kind`, returning whether one was present.
    pub fn remove(&mut self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Collider => self.collider.take().is_some(),
            ComponentKind::Physics => self.physics.take().is_some(),
            ComponentKind::Sprite => self.sprite.take().is_some(),
            ComponentKind::Label => self.label.take().is_some(),
        }
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Collider => self.collider.is_some(),
            ComponentKind::Physics => self.physics.is_some(),
            ComponentKind::Sprite => self.sprite.is_some(),
            ComponentKind::Label => self.label.is_some(),
        }
    }

    pub fn collider(&self) -> Option<&BoxCollider> {
        self.collider.as_ref()
    }

    pub fn collider_mut(&mut self) -> Option<&mut BoxCollider> {
        self.collider.as_mut()
    }

    /// Collider, but only if present and enabled — the filter the resolver
    /// and the follow camera apply.
    pub fn enabled_collider(&self) -> Option<&BoxCollider> {
        self.collider.as_ref().filter(|c| c.enabled)
    }

    pub fn physics(&self) -> Option<&PhysicsBody> {
        self.physics.as_ref()
    }

    pub fn physics_mut(&mut self) -> Option<&mut PhysicsBody> {
        self.physics.as_mut()
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        self.sprite.as_mut()
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn label_mut(&mut self) -> Option<&mut Label> {
        self.label.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs2d::Size2D;

    #[test]
    fn attach_replaces_same_kind() {
        let mut set = ComponentSet::new();
        set.attach(Component::Collider(BoxCollider::new(
            Size2D::new(10.0, 10.0).unwrap(),
        )));
        set.attach(Component::Collider(BoxCollider::new(
            Size2D::new(20.0, 20.0).unwrap(),
        )));
        assert_eq!(set.collider().unwrap().hitbox.width(), 20.0);
        assert!(set.contains(ComponentKind::Collider));
        assert!(!set.contains(ComponentKind::Physics));
    }

    #[test]
    fn remove_reports_presence() {
        let mut set = ComponentSet::new();
        set.attach(Component::Physics(PhysicsBody::new()));
        assert!(set.remove(ComponentKind::Physics));
        assert!(!set.remove(ComponentKind::Physics));
    }

    #[test]
    fn enabled_collider_respects_flag() {
        let mut set = ComponentSet::new();
        let mut collider = BoxCollider::new(Size2D::new(5.0, 5.0).unwrap());
        collider.enabled = false;
        set.attach(Component::Collider(collider));
        assert!(set.collider().is_some());
        assert!(set.enabled_collider().is_none());
    }
}
