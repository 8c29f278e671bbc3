use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// 2D extent in world units. Construction-time validated: both dimensions are
/// always finite and >= 0, so consumers (the collision resolver in particular)
/// never re-check.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(try_from = "RawSize2D")]
pub struct Size2D {
    width: f32,
    height: f32,
}

/// Unvalidated mirror used for deserialization.
#[derive(Deserialize)]
struct RawSize2D {
    width: f32,
    height: f32,
}

impl TryFrom<RawSize2D> for Size2D {
    type Error = WorldError;

    fn try_from(raw: RawSize2D) -> Result<Self, Self::Error> {
        Size2D::new(raw.width, raw.height)
    }
}

impl Size2D {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Result<Self, WorldError> {
        check_extent("width", width)?;
        check_extent("height", height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_width(&mut self, width: f32) -> Result<(), WorldError> {
        check_extent("width", width)?;
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: f32) -> Result<(), WorldError> {
        check_extent("height", height)?;
        self.height = height;
        Ok(())
    }
}

fn check_extent(field: &'static str, value: f32) -> Result<(), WorldError> {
    if !value.is_finite() {
        return Err(WorldError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(WorldError::NegativeSize { field, value });
    }
    Ok(())
}
