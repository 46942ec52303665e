use sigpad_core::{RenderConfig, Rgba8, Segment};

use crate::canvas::{Canvas, PixelLayout};
use crate::error::RenderError;
use crate::rasterizer::fill_thick_segment;
use crate::resample::downsample_area;

/// Renders signatures with one fixed configuration.
///
/// Holds no canvas between calls, so one renderer can be shared freely
/// across threads; each [`render`](Self::render) allocates its own buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRenderer {
    config: RenderConfig,
}

impl SignatureRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn layout(&self) -> PixelLayout {
        if self.config.is_transparent() {
            PixelLayout::Rgba
        } else {
            PixelLayout::Rgb
        }
    }

    /// Draw `segments` in order and return the antialiased image.
    pub fn render(&self, segments: &[Segment]) -> Result<Canvas, RenderError> {
        let working = self.paint_working_canvas(segments)?;

        let mut output = Canvas::new(self.config.width(), self.config.height(), self.layout())?;
        if self.config.is_transparent() {
            output.set_alpha_blending(false);
        }
        downsample_area(&working, &mut output)?;

        Ok(output)
    }

    /// Supersampled canvas with the background and every stroke painted.
    pub fn paint_working_canvas(&self, segments: &[Segment]) -> Result<Canvas, RenderError> {
        let multiplier = self.config.multiplier();
        let (width, height) = self
            .config
            .working_size()
            .ok_or(RenderError::CanvasTooLarge {
                width: self.config.width(),
                height: self.config.height(),
                multiplier,
            })?;

        log::debug!(
            "Rendering {} segments on a {}x{} working canvas",
            segments.len(),
            width,
            height
        );

        let mut canvas = Canvas::new(width, height, self.layout())?;
        canvas.fill(self.config.background().fill_color());

        let pen: Rgba8 = self.config.pen_color().into();
        let thickness = self.config.scaled_pen_thickness() as f64;
        for segment in segments {
            let scaled = to_working_space(segment, multiplier);
            fill_thick_segment(&mut canvas, &scaled, pen, thickness);
        }

        Ok(canvas)
    }
}

impl Default for SignatureRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// Scale to the working canvas and snap each coordinate toward zero.
fn to_working_space(segment: &Segment, multiplier: u32) -> Segment {
    let scaled = segment.scale(multiplier as f64);
    Segment::new(
        scaled.start_x.trunc(),
        scaled.start_y.trunc(),
        scaled.end_x.trunc(),
        scaled.end_y.trunc(),
    )
}

/// Render `segments` with `config` in one call.
pub fn render(segments: &[Segment], config: &RenderConfig) -> Result<Canvas, RenderError> {
    SignatureRenderer::new(*config).render(segments)
}
