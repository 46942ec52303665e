use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Background, Rgb};

pub const DEFAULT_WIDTH: u32 = 198;
pub const DEFAULT_HEIGHT: u32 = 55;
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(255, 255, 255);
pub const DEFAULT_PEN_COLOR: Rgb = Rgb::new(20, 83, 148);
pub const DEFAULT_PEN_WIDTH: u32 = 2;
pub const DEFAULT_MULTIPLIER: u32 = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Image size must be positive, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Pen width must be positive")]
    InvalidPenWidth,

    #[error("Supersampling multiplier must be at least 1")]
    InvalidMultiplier,
}

/// Immutable settings for one signature render.
///
/// Only obtainable through [`RenderConfig::builder`] or [`Default`], so every
/// value seen by the renderer has passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RenderConfigBuilder", into = "RenderConfigBuilder")]
pub struct RenderConfig {
    width: u32,
    height: u32,
    background: Background,
    pen_color: Rgb,
    pen_width: u32,
    multiplier: u32,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn is_transparent(&self) -> bool {
        self.background.is_transparent()
    }

    pub fn pen_color(&self) -> Rgb {
        self.pen_color
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Half-width of a stroke on the supersampled canvas.
    ///
    /// The quad is offset by this amount on both sides of the centerline,
    /// so the visible stroke is `pen_width` final pixels wide.
    pub fn scaled_pen_thickness(&self) -> u32 {
        (self.pen_width as u64 * self.multiplier as u64 / 2).min(u32::MAX as u64) as u32
    }

    /// Size of the working canvas, `None` if it does not fit in `u32`.
    pub fn working_size(&self) -> Option<(u32, u32)> {
        Some((
            self.width.checked_mul(self.multiplier)?,
            self.height.checked_mul(self.multiplier)?,
        ))
    }

    pub fn to_builder(&self) -> RenderConfigBuilder {
        RenderConfigBuilder::from(*self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: Background::Opaque(DEFAULT_BACKGROUND),
            pen_color: DEFAULT_PEN_COLOR,
            pen_width: DEFAULT_PEN_WIDTH,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

/// Collects render settings and validates them once in [`build`](Self::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfigBuilder {
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub pen_color: Rgb,
    pub pen_width: u32,
    pub multiplier: u32,
}

impl Default for RenderConfigBuilder {
    fn default() -> Self {
        RenderConfig::default().into()
    }
}

impl RenderConfigBuilder {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_background(mut self, r: u8, g: u8, b: u8) -> Self {
        self.background = Background::Opaque(Rgb::new(r, g, b));
        self
    }

    pub fn with_transparent_background(mut self) -> Self {
        self.background = Background::Transparent;
        self
    }

    pub fn with_pen_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.pen_color = Rgb::new(r, g, b);
        self
    }

    pub fn with_pen_width(mut self, width: u32) -> Self {
        self.pen_width = width;
        self
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.pen_width == 0 {
            return Err(ConfigError::InvalidPenWidth);
        }
        if self.multiplier == 0 {
            return Err(ConfigError::InvalidMultiplier);
        }

        log::debug!(
            "Render config: {}x{} px, pen width {}, multiplier {}, transparent: {}",
            self.width,
            self.height,
            self.pen_width,
            self.multiplier,
            self.background.is_transparent()
        );

        Ok(RenderConfig {
            width: self.width,
            height: self.height,
            background: self.background,
            pen_color: self.pen_color,
            pen_width: self.pen_width,
            multiplier: self.multiplier,
        })
    }
}

impl From<RenderConfig> for RenderConfigBuilder {
    fn from(c: RenderConfig) -> Self {
        Self {
            width: c.width,
            height: c.height,
            background: c.background,
            pen_color: c.pen_color,
            pen_width: c.pen_width,
            multiplier: c.multiplier,
        }
    }
}

impl TryFrom<RenderConfigBuilder> for RenderConfig {
    type Error = ConfigError;

    fn try_from(builder: RenderConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RenderConfig::default();
        assert_eq!((c.width(), c.height()), (198, 55));
        assert_eq!(c.background(), Background::Opaque(Rgb::new(255, 255, 255)));
        assert_eq!(c.pen_color(), Rgb::new(20, 83, 148));
        assert_eq!(c.pen_width(), 2);
        assert_eq!(c.multiplier(), 12);
        assert!(!c.is_transparent());
    }

    #[test]
    fn test_builder_roundtrips_default() {
        assert_eq!(RenderConfig::builder().build().unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_builder_setters() {
        let c = RenderConfig::builder()
            .with_size(300, 100)
            .with_pen_color(0, 0, 0)
            .with_pen_width(3)
            .with_multiplier(4)
            .with_transparent_background()
            .build()
            .unwrap();
        assert_eq!(c.working_size(), Some((1200, 400)));
        assert!(c.is_transparent());
        assert_eq!(c.pen_color(), Rgb::BLACK);
    }

    #[test]
    fn test_background_switch_is_exclusive() {
        let c = RenderConfig::builder()
            .with_transparent_background()
            .with_background(1, 2, 3)
            .build()
            .unwrap();
        assert_eq!(c.background(), Background::Opaque(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_rejects_zero_values() {
        assert_eq!(
            RenderConfig::builder().with_size(0, 10).build(),
            Err(ConfigError::InvalidSize { width: 0, height: 10 })
        );
        assert_eq!(
            RenderConfig::builder().with_pen_width(0).build(),
            Err(ConfigError::InvalidPenWidth)
        );
        assert_eq!(
            RenderConfig::builder().with_multiplier(0).build(),
            Err(ConfigError::InvalidMultiplier)
        );
    }

    #[test]
    fn test_scaled_pen_thickness_truncates() {
        let c = RenderConfig::default();
        assert_eq!(c.scaled_pen_thickness(), 12);

        let odd = RenderConfig::builder()
            .with_pen_width(3)
            .with_multiplier(5)
            .build()
            .unwrap();
        assert_eq!(odd.scaled_pen_thickness(), 7);
    }

    #[test]
    fn test_working_size_overflow() {
        let c = RenderConfig::builder()
            .with_size(u32::MAX, 1)
            .with_multiplier(2)
            .build()
            .unwrap();
        assert_eq!(c.working_size(), None);
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let c = RenderConfig::builder().with_size(10, 20).build().unwrap();
        let json = c.to_json().unwrap();
        assert_eq!(RenderConfig::from_json(&json).unwrap(), c);

        assert!(RenderConfig::from_json(r#"{"width":0}"#).is_err());
        let partial = RenderConfig::from_json(r#"{"pen_width":5}"#).unwrap();
        assert_eq!(partial.pen_width(), 5);
        assert_eq!(partial.width(), DEFAULT_WIDTH);
    }
}
