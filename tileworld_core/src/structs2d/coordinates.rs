use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::WorldError;

/// 2D position or displacement in world units.
/// Fields are open for the hot physics path; external assignment goes through
/// the validated `set` so non-finite values are rejected up front.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

impl Coordinate2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Validated assignment: rejects NaN and infinities.
    pub fn set(&mut self, x: f32, y: f32) -> Result<(), WorldError> {
        if !x.is_finite() {
            return Err(WorldError::NonFinite {
                field: "x",
                value: x,
            });
        }
        if !y.is_finite() {
            return Err(WorldError::NonFinite {
                field: "y",
                value: y,
            });
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// --- Add ---
impl Add for Coordinate2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl AddAssign for Coordinate2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

// --- Sub ---
impl Sub for Coordinate2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl SubAssign for Coordinate2D {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// --- Mul (scalar) ---
impl Mul<f32> for Coordinate2D {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}
impl MulAssign<f32> for Coordinate2D {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Neg for Coordinate2D {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
