use serde::{Deserialize, Serialize};

fn default_tick_rate_ms() -> u64 {
    16
}

fn default_refresh_rate_ms() -> u64 {
    33
}

fn default_viewport_width() -> f32 {
    800.0
}

fn default_viewport_height() -> f32 {
    600.0
}

fn default_fallback_image() -> String {
    "assets/fallback.png".to_string()
}

/// Host-facing engine settings, loadable from a TOML file. Every field has a
/// default so an empty document is a valid config.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Logic tick interval in milliseconds. Also the unit of `delta`: a tick
    /// arriving exactly on schedule has delta 1.0.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Render interval in milliseconds, independent of the logic rate.
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,

    /// Image substituted whenever a sprite's own image fails to load.
    #[serde(default = "default_fallback_image")]
    pub fallback_image: String,
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the engine cannot run with. A zero viewport
    /// would give a zero projection scale and non-finite camera coordinates,
    /// so it fails here rather than downstream.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_rate_ms > 0, "tick_rate_ms must be positive");
        anyhow::ensure!(self.refresh_rate_ms > 0, "refresh_rate_ms must be positive");
        anyhow::ensure!(
            self.viewport_width.is_finite() && self.viewport_width > 0.0,
            "viewport_width must be positive and finite, got {}",
            self.viewport_width
        );
        anyhow::ensure!(
            self.viewport_height.is_finite() && self.viewport_height > 0.0,
            "viewport_height must be positive and finite, got {}",
            self.viewport_height
        );
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            refresh_rate_ms: default_refresh_rate_ms(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            fallback_image: default_fallback_image(),
        }
    }
}
