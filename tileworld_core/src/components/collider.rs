use serde::{Deserialize, Serialize};

use crate::structs2d::{Coordinate2D, Rect, Size2D};

/// Default collision group; colliders only resolve against others in the same
/// group, and every collider starts here unless reassigned.
pub const BASE_COLLISION_GROUP: &str = "Base";

fn default_group() -> String {
    BASE_COLLISION_GROUP.to_string()
}

fn default_enabled() -> bool {
    true
}

/// Rectangular collision box. The hitbox is a validated `Size2D`, so the
/// resolver can assume non-negative extents.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoxCollider {
    pub hitbox: Size2D,

    /// Editor/debug offset of the hitbox relative to the object; the resolver
    /// anchors bounds at the object's coordinates directly.
    #[serde(default)]
    pub offset: Coordinate2D,

    #[serde(default = "default_group")]
    pub collision_group: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl BoxCollider {
    pub fn new(hitbox: Size2D) -> Self {
        Self {
            hitbox,
            offset: Coordinate2D::ZERO,
            collision_group: default_group(),
            enabled: true,
        }
    }

    /// World-space bounds when the owning object sits at `origin`.
    pub fn bounds(&self, origin: Coordinate2D) -> Rect {
        Rect::from_origin_size(origin, self.hitbox)
    }

    pub fn same_group(&self, other: &BoxCollider) -> bool {
        self.collision_group == other.collision_group
    }
}
