use tileworld_ids::ObjectId;

use crate::assets::ImageCache;
use crate::scene::Scene;
use crate::structs2d::Coordinate2D;
use crate::ticks::TickRegistry;

/// World/editor mode. Gates camera follow updates (and, outside the core,
/// raw input).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineMode {
    #[default]
    Play,
    Editor,
}

/// External mode query, polled on every camera update.
pub trait ModeProvider {
    fn mode(&self) -> EngineMode;
}

/// External pan vector consumed by scriptable-mode camera updates.
pub trait PanInput {
    fn pan(&self) -> Coordinate2D;
}

/// Mode provider pinned to a single value; the default collaborator when no
/// editor shell is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedMode(pub EngineMode);

impl ModeProvider for FixedMode {
    fn mode(&self) -> EngineMode {
        self.0
    }
}

/// Pan input that never pans.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPan;

impl PanInput for NullPan {
    fn pan(&self) -> Coordinate2D {
        Coordinate2D::ZERO
    }
}

/// The collaborator bundle handed to behavior hooks each tick.
pub struct Services {
    pub mode: Box<dyn ModeProvider>,
    pub pan: Box<dyn PanInput>,
    pub images: ImageCache,
    pub ticks: TickRegistry,
}

impl Services {
    pub fn new(
        mode: Box<dyn ModeProvider>,
        pan: Box<dyn PanInput>,
        images: ImageCache,
    ) -> Self {
        Self {
            mode,
            pan,
            images,
            ticks: TickRegistry::new(),
        }
    }
}

/// Per-object behavior hook, run once per logic tick for each root object
/// that has one.
///
/// Hooks are called strictly sequentially in root-list order and each call
/// runs to completion before the next object is processed — a slow hook
/// delays every object after it in the same tick. An `Err` is caught and
/// logged by the scheduler; the tick continues with the next object.
pub trait Behavior {
    fn update(
        &mut self,
        scene: &mut Scene,
        services: &mut Services,
        id: ObjectId,
        delta: f32,
    ) -> anyhow::Result<()>;
}
