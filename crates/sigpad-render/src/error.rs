use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Canvas size must be positive, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Canvas of {width}x{height} pixels (x{multiplier}) does not fit in memory")]
    CanvasTooLarge {
        width: u32,
        height: u32,
        multiplier: u32,
    },

    #[error("Failed to allocate {pixels} pixels: {source}")]
    Allocation {
        pixels: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Cannot resample {src_width}x{src_height} up to {dst_width}x{dst_height}")]
    NotADownsample {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },
}
