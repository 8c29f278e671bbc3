use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::structs2d::Coordinate2D;

fn default_true() -> bool {
    true
}

/// Kinetic state driving an object through the collision engine: velocity in
/// units per tick, optional gravity. Disabled bodies are skipped entirely.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhysicsBody {
    pub velocity: Coordinate2D,

    #[serde(default = "default_true")]
    pub gravity_enabled: bool,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PhysicsBody {
    pub fn new() -> Self {
        Self {
            velocity: Coordinate2D::ZERO,
            gravity_enabled: true,
            enabled: true,
        }
    }

    /// Validated velocity assignment for external callers.
    pub fn set_velocity(&mut self, x: f32, y: f32) -> Result<(), WorldError> {
        self.velocity.set(x, y)
    }
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self::new()
    }
}
