use serde::{Deserialize, Serialize};
use sigpad_core::Rgba8;

use crate::error::RenderError;

/// Byte layout produced by [`Canvas::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// 3 bytes per pixel, alpha dropped.
    Rgb,
    /// 4 bytes per pixel, non-premultiplied.
    Rgba,
}

impl PixelLayout {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// A row-major pixel buffer.
///
/// Freshly allocated canvases are opaque black. With alpha blending on,
/// [`Canvas::put_pixel`] composites onto what is already there; with it off,
/// the incoming pixel (alpha included) replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    layout: PixelLayout,
    alpha_blending: bool,
    pixels: Vec<Rgba8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(RenderError::CanvasTooLarge {
                width,
                height,
                multiplier: 1,
            })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|source| RenderError::Allocation { pixels: len, source })?;
        pixels.resize(len, Rgba8::OPAQUE_BLACK);

        Ok(Self {
            width,
            height,
            layout,
            alpha_blending: true,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn alpha_blending(&self) -> bool {
        self.alpha_blending
    }

    pub fn set_alpha_blending(&mut self, enabled: bool) {
        self.alpha_blending = enabled;
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixels of row `y`, or `None` if `y` is past the last row.
    pub fn row(&self, y: u32) -> Option<&[Rgba8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if self.contains(x as i64, y as i64) {
            Some(self.pixels[self.index_of(x, y)])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    pub fn copy_pixel(&mut self, x: i64, y: i64, color: Rgba8) {
        if self.contains(x, y) {
            let index = self.index_of(x as u32, y as u32);
            self.pixels[index] = color;
        }
    }

    /// Overwrite pixels `x1..=x2` on row `y`, clipped to the canvas.
    pub fn copy_hline(&mut self, x1: i64, x2: i64, y: i64, color: Rgba8) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let lo = lo.max(0);
        let hi = hi.min(self.width as i64 - 1);
        if lo > hi {
            return;
        }
        let start = self.index_of(lo as u32, y as u32);
        let end = self.index_of(hi as u32, y as u32);
        self.pixels[start..=end].fill(color);
    }

    /// Store a pixel honoring the alpha blending mode.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if !self.contains(x as i64, y as i64) {
            return;
        }
        let index = self.index_of(x, y);
        self.pixels[index] = if self.alpha_blending {
            color.over(self.pixels[index])
        } else {
            color
        };
    }

    /// Packed bytes in this canvas' [`PixelLayout`], rows top to bottom.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * self.layout.bytes_per_pixel());
        match self.layout {
            PixelLayout::Rgb => {
                for p in &self.pixels {
                    out.extend_from_slice(&[p.r, p.g, p.b]);
                }
            }
            PixelLayout::Rgba => {
                for p in &self.pixels {
                    out.extend_from_slice(&[p.r, p.g, p.b, p.a]);
                }
            }
        }
        out
    }
}
