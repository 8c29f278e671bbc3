use serde::{Deserialize, Serialize};
use tileworld_ids::ImageId;

use crate::structs2d::{Coordinate2D, Size2D};

fn default_true() -> bool {
    true
}

/// Render descriptor consumed by the draw sink. Pure data: the core never
/// touches pixels, it only forwards the handle, destination and flip flag.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Handle issued by the image cache; nil means "nothing loaded yet" and
    /// the renderer skips the draw.
    #[serde(skip)]
    pub image: ImageId,

    pub size: Size2D,

    #[serde(default)]
    pub offset: Coordinate2D,

    #[serde(default)]
    pub flip_horizontal: bool,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Sprite {
    pub fn new(image: ImageId, size: Size2D) -> Self {
        Self {
            image,
            size,
            offset: Coordinate2D::ZERO,
            flip_horizontal: false,
            enabled: true,
        }
    }
}
