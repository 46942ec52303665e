use serde::{Deserialize, Serialize};
use thiserror::Error;

use sigpad_core::config::{
    DEFAULT_BACKGROUND, DEFAULT_HEIGHT, DEFAULT_MULTIPLIER, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH,
    DEFAULT_WIDTH,
};
use sigpad_core::{ConfigError, RenderConfig, Rgb};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Render settings as stored in a JSON settings file.
///
/// Every field is optional and falls back to the stock signature look.
/// Colors are `[r, g, b]` triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub transparent: bool,
    pub pen_color: [u8; 3],
    pub pen_width: u32,
    pub multiplier: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: rgb_triple(DEFAULT_BACKGROUND),
            transparent: false,
            pen_color: rgb_triple(DEFAULT_PEN_COLOR),
            pen_width: DEFAULT_PEN_WIDTH,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

fn rgb_triple(c: Rgb) -> [u8; 3] {
    [c.r, c.g, c.b]
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate into a [`RenderConfig`].
    pub fn into_config(self) -> Result<RenderConfig, SettingsError> {
        let [br, bg, bb] = self.background;
        let [pr, pg, pb] = self.pen_color;
        let mut builder = RenderConfig::builder()
            .with_size(self.width, self.height)
            .with_background(br, bg, bb)
            .with_pen_color(pr, pg, pb)
            .with_pen_width(self.pen_width)
            .with_multiplier(self.multiplier);
        if self.transparent {
            builder = builder.with_transparent_background();
        }
        Ok(builder.build()?)
    }
}

impl From<&RenderConfig> for RenderSettings {
    fn from(c: &RenderConfig) -> Self {
        let background = match c.background() {
            sigpad_core::Background::Opaque(color) => color,
            sigpad_core::Background::Transparent => DEFAULT_BACKGROUND,
        };
        Self {
            width: c.width(),
            height: c.height(),
            background: rgb_triple(background),
            transparent: c.is_transparent(),
            pen_color: rgb_triple(c.pen_color()),
            pen_width: c.pen_width(),
            multiplier: c.multiplier(),
        }
    }
}
