use thiserror::Error;

use tileworld_ids::ObjectId;

/// Errors raised by world mutation and value assignment.
/// Configuration errors (non-finite coordinates, negative sizes) fail at the
/// point of assignment, never inside the physics resolver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be >= 0, got {value}")]
    NegativeSize { field: &'static str, value: f32 },

    #[error("pan speed must be positive, got {0}")]
    NonPositivePanSpeed(f32),

    #[error("object {0} is dead or was never spawned")]
    DeadObject(ObjectId),

    #[error("reparenting {child} under {parent} would create a cycle")]
    CycleDetected { child: ObjectId, parent: ObjectId },

    #[error("no scene named '{0}' is registered")]
    NoSuchScene(String),
}
