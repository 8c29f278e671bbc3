pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::Engine;
