pub mod coordinates;
pub mod rect;
pub mod size;

pub use coordinates::Coordinate2D;
pub use rect::Rect;
pub use size::Size2D;
