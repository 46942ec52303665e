//! # Sigpad Core
//!
//! Signature geometry (points, segments, stroke quads), colors, and the
//! validated render configuration shared by the renderer and I/O crates.

pub mod geometry;
pub mod color;
pub mod config;

pub use geometry::{PixelPoint, Point, Quad, Segment};
pub use color::{Background, Rgb, Rgba8};
pub use config::{ConfigError, RenderConfig, RenderConfigBuilder};
