use std::time::Instant;

use log::{error, warn};
use tileworld_core::assets::ImageCache;
use tileworld_core::physics::KineticEngine;
use tileworld_core::render::{DrawSink, render_scene};
use tileworld_core::scene::SceneRegistry;
use tileworld_core::services::Services;
use tileworld_core::structs2d::Size2D;

use crate::config::EngineConfig;

/// How many overdue logic ticks `pump` will replay before resynchronizing the
/// deadline instead of spiraling after a long stall.
const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineState {
    Stopped,
    Running,
}

/// The driver: owns the scene registry and services, and runs logic and
/// render on independent clocks. Logic advances every `tick_rate_ms`, frames
/// every `refresh_rate_ms`; a slow frame never drops a logic tick and a slow
/// tick only delays frames, not simulation time.
pub struct Engine {
    pub scenes: SceneRegistry,
    pub services: Services,
    pub kinetics: KineticEngine,
    config: EngineConfig,
    viewport: Size2D,
    state: EngineState,
    last_tick: Option<Instant>,
    next_logic: Option<Instant>,
    next_render: Option<Instant>,
}

impl Engine {
    /// Builds an engine over a validated config; a degenerate viewport or a
    /// zero tick rate is rejected here, before any clock starts.
    pub fn new(config: EngineConfig, services: Services) -> anyhow::Result<Self> {
        config.validate()?;
        let viewport = Size2D::new(config.viewport_width, config.viewport_height)?;
        Ok(Self {
            scenes: SceneRegistry::new(),
            services,
            kinetics: KineticEngine::new(),
            config,
            viewport,
            state: EngineState::Stopped,
            last_tick: None,
            next_logic: None,
            next_render: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size2D {
        self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Starts both clocks. Starting an already-running engine is a logged
    /// no-op.
    pub fn start(&mut self) {
        if self.state == EngineState::Running {
            warn!("engine already running, start ignored");
            return;
        }
        let now = Instant::now();
        self.state = EngineState::Running;
        self.last_tick = None;
        self.next_logic = Some(now);
        self.next_render = Some(now);
    }

    /// Stops both clocks. Stopping an already-stopped engine is a logged
    /// no-op.
    pub fn stop(&mut self) {
        if self.state == EngineState::Stopped {
            warn!("engine already stopped, stop ignored");
            return;
        }
        self.state = EngineState::Stopped;
        self.last_tick = None;
        self.next_logic = None;
        self.next_render = None;
    }

    /// Runs every logic tick and frame whose deadline has passed. Call this
    /// from the host loop as often as convenient; deadlines, not call
    /// frequency, decide what runs.
    pub fn pump(&mut self, sink: &mut dyn DrawSink) {
        if self.state != EngineState::Running {
            return;
        }
        let now = Instant::now();
        let tick_rate = self.config.tick_rate_ms as f32;

        let mut replayed = 0;
        while let Some(deadline) = self.next_logic {
            if now < deadline {
                break;
            }
            let delta = match self.last_tick {
                Some(last) => (now - last).as_millis() as f32 / tick_rate,
                None => 0.0,
            };
            self.last_tick = Some(now);
            self.step(delta);

            let interval = std::time::Duration::from_millis(self.config.tick_rate_ms);
            replayed += 1;
            if replayed >= MAX_CATCH_UP_TICKS {
                // Long stall: resynchronize instead of replaying the backlog.
                self.next_logic = Some(now + interval);
                break;
            }
            self.next_logic = Some(deadline + interval);
        }

        if let Some(deadline) = self.next_render {
            if now >= deadline {
                self.render(sink);
                let interval = std::time::Duration::from_millis(self.config.refresh_rate_ms);
                self.next_render = Some(now + interval);
            }
        }
    }

    /// Blocking convenience loop: pumps until `duration` has elapsed,
    /// sleeping until the nearest deadline between pumps.
    pub fn run_for(&mut self, duration: std::time::Duration, sink: &mut dyn DrawSink) {
        let end = Instant::now() + duration;
        while Instant::now() < end && self.state == EngineState::Running {
            self.pump(sink);
            let now = Instant::now();
            let next = [self.next_logic, self.next_render, Some(end)]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(end);
            if next > now {
                std::thread::sleep(next - now);
            }
        }
    }

    /// One logic tick over the active scene: behavior hooks in root-list
    /// order, then gravity and collisions, then tick counters. `delta` is in
    /// tick units (1.0 = one nominal tick interval).
    ///
    /// A hook error is logged and the tick continues with the next object; a
    /// misbehaving object never stalls the rest of the scene.
    pub fn step(&mut self, delta: f32) {
        let Some(scene) = self.scenes.active_mut() else {
            warn!("no active scene, logic tick skipped");
            return;
        };

        // Snapshot: hooks may spawn or despawn roots mid-tick.
        let roots: Vec<_> = scene.roots().to_vec();
        for id in roots {
            if let Some(mut behavior) = scene.take_behavior(id) {
                if let Err(err) = behavior.update(scene, &mut self.services, id, delta) {
                    error!("behavior for {id} failed: {err:#}");
                }
                // The hook may have despawned its own object; restoring then
                // would leak the box, so only restore for live objects.
                if scene.objects.contains(id) {
                    scene.restore_behavior(id, behavior);
                }
            }
            self.kinetics.step(scene, id, delta);
        }

        self.services.ticks.advance_all();
    }

    /// One frame: per-mode camera update, then scene traversal into the sink.
    pub fn render(&mut self, sink: &mut dyn DrawSink) {
        let viewport = self.viewport();
        let mode = self.services.mode.mode();
        let pan = self.services.pan.pan();

        let Some(scene) = self.scenes.active_mut() else {
            warn!("no active scene, frame skipped");
            return;
        };
        let (objects, camera) = (&scene.objects, &mut scene.camera);
        camera.update(objects, viewport, mode, pan);
        render_scene(scene, viewport, sink);
    }

    pub fn image_cache_mut(&mut self) -> &mut ImageCache {
        &mut self.services.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_core::assets::ImageLoader;
    use tileworld_core::object::WorldObject;
    use tileworld_core::scene::Scene;
    use tileworld_core::services::{Behavior, EngineMode, FixedMode, NullPan};
    use tileworld_ids::{ImageId, ObjectId};

    struct NullLoader;

    impl ImageLoader for NullLoader {
        fn load(&mut self, _path: &str) -> anyhow::Result<ImageId> {
            Ok(ImageId::new(1))
        }
    }

    fn engine() -> Engine {
        let services = Services::new(
            Box::new(FixedMode(EngineMode::Play)),
            Box::new(NullPan),
            ImageCache::new(Box::new(NullLoader), "fallback.png"),
        );
        Engine::new(EngineConfig::default(), services).unwrap()
    }

    /// Hook that leaves a movement trail, then fails.
    struct FailingBehavior;

    impl Behavior for FailingBehavior {
        fn update(
            &mut self,
            scene: &mut Scene,
            _services: &mut Services,
            id: ObjectId,
            _delta: f32,
        ) -> anyhow::Result<()> {
            if let Some(object) = scene.objects.get_mut(id) {
                object.translate(1.0, 0.0)?;
            }
            anyhow::bail!("scripted failure")
        }
    }

    /// Hook that walks its object rightward each tick.
    struct WalkRight;

    impl Behavior for WalkRight {
        fn update(
            &mut self,
            scene: &mut Scene,
            _services: &mut Services,
            id: ObjectId,
            delta: f32,
        ) -> anyhow::Result<()> {
            if let Some(object) = scene.objects.get_mut(id) {
                object.translate(1.0 * delta, 0.0)?;
            }
            Ok(())
        }
    }

    /// Hook that despawns its own object on the first call.
    struct SelfDespawn;

    impl Behavior for SelfDespawn {
        fn update(
            &mut self,
            scene: &mut Scene,
            _services: &mut Services,
            id: ObjectId,
            _delta: f32,
        ) -> anyhow::Result<()> {
            scene.despawn(id)?;
            Ok(())
        }
    }

    #[test]
    fn failing_behavior_does_not_stall_other_objects() {
        let mut engine = engine();
        let mut scene = Scene::new();
        let bad = scene.spawn(WorldObject::new("bad"));
        let walker = scene.spawn(WorldObject::new("walker"));
        scene.set_behavior(bad, Box::new(FailingBehavior));
        scene.set_behavior(walker, Box::new(WalkRight));
        engine.scenes.insert("main", scene);
        engine.scenes.set_active("main").unwrap();

        for _ in 0..100 {
            engine.step(1.0);
        }

        let scene = engine.scenes.active().unwrap();
        assert!((scene.objects.get(walker).unwrap().coordinates().x - 100.0).abs() < 1e-4);
        // The failing hook itself kept being called every tick.
        assert!((scene.objects.get(bad).unwrap().coordinates().x - 100.0).abs() < 1e-4);
    }

    #[test]
    fn tick_counters_advance_once_per_step() {
        let mut engine = engine();
        engine.scenes.insert("main", Scene::new());
        engine.scenes.set_active("main").unwrap();
        engine.services.ticks.register("hud", "frames");

        for _ in 0..7 {
            engine.step(1.0);
        }
        assert_eq!(engine.services.ticks.get("hud", "frames").unwrap(), 7);
    }

    #[test]
    fn step_without_active_scene_is_a_no_op() {
        let mut engine = engine();
        engine.step(1.0);
        engine.scenes.insert("main", Scene::new());
        // Still inactive until selected.
        engine.step(1.0);
        assert!(engine.scenes.active().is_none());
    }

    #[test]
    fn self_despawning_behavior_is_dropped() {
        let mut engine = engine();
        let mut scene = Scene::new();
        let id = scene.spawn(WorldObject::new("ephemeral"));
        scene.set_behavior(id, Box::new(SelfDespawn));
        engine.scenes.insert("main", scene);
        engine.scenes.set_active("main").unwrap();

        engine.step(1.0);
        let scene = engine.scenes.active().unwrap();
        assert!(!scene.objects.contains(id));
        assert!(scene.roots().is_empty());

        // Subsequent ticks find nothing to run.
        engine.step(1.0);
    }

    #[test]
    fn degenerate_viewport_fails_construction() {
        let services = Services::new(
            Box::new(FixedMode(EngineMode::Play)),
            Box::new(NullPan),
            ImageCache::new(Box::new(NullLoader), "fallback.png"),
        );
        let config = EngineConfig {
            viewport_height: 0.0,
            ..EngineConfig::default()
        };
        assert!(Engine::new(config, services).is_err());
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut engine = engine();
        assert!(!engine.is_running());
        engine.start();
        assert!(engine.is_running());
        engine.start();
        assert!(engine.is_running());
        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn behavior_delta_scales_movement() {
        let mut engine = engine();
        let mut scene = Scene::new();
        let walker = scene.spawn(WorldObject::new("walker"));
        scene.set_behavior(walker, Box::new(WalkRight));
        engine.scenes.insert("main", scene);
        engine.scenes.set_active("main").unwrap();

        engine.step(0.5);
        engine.step(2.0);
        let scene = engine.scenes.active().unwrap();
        assert!((scene.objects.get(walker).unwrap().coordinates().x - 2.5).abs() < 1e-4);
    }
}
