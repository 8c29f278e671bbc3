pub mod assets;
pub mod camera;
pub mod components;
pub mod error;
pub mod object;
pub mod object_arena;
pub mod physics;
pub mod render;
pub mod scene;
pub mod services;
pub mod structs2d;
pub mod ticks;

pub use assets::{ImageCache, ImageLoader};
pub use camera::{Camera, CameraMode, VIEW_SCALE_FACTOR};
pub use components::{
    BASE_COLLISION_GROUP, BoxCollider, Component, ComponentKind, ComponentSet, Label, PhysicsBody,
    Sprite, TextAlign,
};
pub use error::WorldError;
pub use object::WorldObject;
pub use object_arena::ObjectArena;
pub use physics::{DEFAULT_COLLISION_OFFSET, DEFAULT_GRAVITY, KineticEngine};
pub use render::{DrawSink, TextStyle, render_scene};
pub use scene::{Scene, SceneRegistry};
pub use services::{Behavior, EngineMode, FixedMode, ModeProvider, NullPan, PanInput, Services};
pub use structs2d::{Coordinate2D, Rect, Size2D};
pub use ticks::{TickError, TickRegistry};
