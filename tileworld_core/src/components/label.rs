use serde::{Deserialize, Serialize};

/// Horizontal alignment for label text, forwarded to the sink verbatim.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

fn default_text() -> String {
    "Label".to_string()
}

fn default_size() -> f32 {
    12.0
}

fn default_color() -> String {
    "White".to_string()
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_true() -> bool {
    true
}

/// Text overlay drawn through the sink's `draw_text` at the object's
/// camera-projected position.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Label {
    #[serde(default = "default_text")]
    pub text: String,

    #[serde(default = "default_size")]
    pub size_px: f32,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub align: TextAlign,

    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size_px: default_size(),
            color: default_color(),
            align: TextAlign::default(),
            font: default_font(),
            enabled: true,
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new(default_text())
    }
}
