use std::env;
use std::fs;
use std::thread;
use std::time::Duration;

use log::info;
use tileworld_core::assets::{ImageCache, ImageLoader};
use tileworld_core::components::{BoxCollider, Component, PhysicsBody, Sprite};
use tileworld_core::object::WorldObject;
use tileworld_core::render::{DrawSink, TextStyle};
use tileworld_core::scene::Scene;
use tileworld_core::services::{EngineMode, FixedMode, NullPan, Services};
use tileworld_core::structs2d::{Coordinate2D, Rect, Size2D};
use tileworld_ids::ImageId;
use tileworld_runtime::{Engine, EngineConfig};

/// Headless loader: issues handles without decoding anything, so the demo
/// runs without a graphics backend.
struct CountingLoader {
    next: u32,
}

impl ImageLoader for CountingLoader {
    fn load(&mut self, path: &str) -> anyhow::Result<ImageId> {
        let id = ImageId::new(self.next);
        self.next += 1;
        info!("loaded '{path}' as {id}");
        Ok(id)
    }
}

/// Sink that logs draw calls instead of rasterizing them.
struct LogSink;

impl DrawSink for LogSink {
    fn clear(&mut self, area: Rect) {
        info!("clear {:?}", area);
    }

    fn set_scale(&mut self, scale: f32) {
        info!("scale {scale}");
    }

    fn save_state(&mut self) {}

    fn restore_state(&mut self) {}

    fn draw_image(&mut self, image: ImageId, destination: Rect, flip_horizontal: bool) {
        info!("image {image} at {destination:?} flipped={flip_horizontal}");
    }

    fn draw_text(&mut self, text: &str, position: Coordinate2D, _style: &TextStyle) {
        info!("text '{text}' at {position:?}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
            EngineConfig::from_toml_str(&fs::read_to_string(path)?)?
        }
        None => EngineConfig::default(),
    };

    let fallback = config.fallback_image.clone();
    let mut images = ImageCache::new(Box::new(CountingLoader { next: 1 }), &fallback);
    let crate_image = images.load_image("assets/crate.png");
    let services = Services::new(
        Box::new(FixedMode(EngineMode::Play)),
        Box::new(NullPan),
        images,
    );

    let mut engine = Engine::new(config, services)?;

    let mut scene = Scene::new();
    let mut floor = WorldObject::new("floor");
    floor.move_to(0.0, 500.0)?;
    floor
        .components
        .attach(Component::Collider(BoxCollider::new(Size2D::new(
            800.0, 40.0,
        )?)));
    scene.spawn(floor);

    let mut falling = WorldObject::new("crate");
    falling.move_to(100.0, 0.0)?;
    falling
        .components
        .attach(Component::Collider(BoxCollider::new(Size2D::new(
            27.0, 27.0,
        )?)));
    falling
        .components
        .attach(Component::Physics(PhysicsBody::new()));
    falling
        .components
        .attach(Component::Sprite(Sprite::new(
            crate_image,
            Size2D::new(27.0, 27.0)?,
        )));
    let falling_id = scene.spawn(falling);
    scene.camera.set_subject(falling_id);

    engine.scenes.insert("demo", scene);
    engine.scenes.set_active("demo")?;
    engine.start();

    let mut sink = LogSink;
    for _ in 0..300 {
        engine.pump(&mut sink);
        thread::sleep(Duration::from_millis(4));
    }
    engine.stop();

    let scene = engine
        .scenes
        .active()
        .ok_or_else(|| anyhow::anyhow!("demo scene vanished"))?;
    if let Some(object) = scene.objects.get(falling_id) {
        info!("crate came to rest at {:?}", object.coordinates());
    }
    Ok(())
}
