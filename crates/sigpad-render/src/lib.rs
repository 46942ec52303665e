//! # Sigpad Renderer
//!
//! Turns signature segments into an antialiased pixel buffer. Each segment is
//! widened into a quad and filled on a supersampled working canvas, which is
//! then shrunk with area averaging to the requested output size.

pub mod canvas;
pub mod error;
pub mod rasterizer;
pub mod renderer;
pub mod resample;

pub use canvas::{Canvas, PixelLayout};
pub use error::RenderError;
pub use rasterizer::{fill_polygon, fill_thick_segment};
pub use renderer::{render, SignatureRenderer};
pub use resample::downsample_area;
