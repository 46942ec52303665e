//! Area-averaging downsampler.
//!
//! Every destination pixel covers a rectangle of the source. Its value is the
//! average of the source pixels under that rectangle, each weighted by how
//! much of it lies inside. Colors are additionally weighted by alpha so that
//! fully transparent pixels contribute coverage but no color.

use sigpad_core::Rgba8;

use crate::canvas::Canvas;
use crate::error::RenderError;

/// Source indices and their overlap with one destination pixel along an axis.
type Contributions = Vec<Vec<(usize, f64)>>;

fn axis_contributions(src_len: u32, dst_len: u32) -> Contributions {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 0.0).then_some((s, overlap))
                })
                .collect()
        })
        .collect()
}

/// Shrink `src` onto the whole of `dst`.
///
/// Results are written with [`Canvas::put_pixel`], so `dst`'s alpha blending
/// mode decides whether they are composited or stored as-is.
pub fn downsample_area(src: &Canvas, dst: &mut Canvas) -> Result<(), RenderError> {
    if dst.width() > src.width() || dst.height() > src.height() {
        return Err(RenderError::NotADownsample {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    let columns = axis_contributions(src.width(), dst.width());
    let rows = axis_contributions(src.height(), dst.height());

    log::debug!(
        "Downsampling {}x{} -> {}x{}",
        src.width(),
        src.height(),
        dst.width(),
        dst.height()
    );

    for (dy, row_weights) in rows.iter().enumerate() {
        for (dx, col_weights) in columns.iter().enumerate() {
            let pixel = average(src, row_weights, col_weights);
            dst.put_pixel(dx as u32, dy as u32, pixel);
        }
    }
    Ok(())
}

fn average(src: &Canvas, row_weights: &[(usize, f64)], col_weights: &[(usize, f64)]) -> Rgba8 {
    let (mut r, mut g, mut b, mut a) = (0.0, 0.0, 0.0, 0.0);
    let mut coverage = 0.0;
    let mut alpha_weight = 0.0;

    for &(sy, wy) in row_weights {
        let Some(row) = src.row(sy as u32) else {
            continue;
        };
        for &(sx, wx) in col_weights {
            let Some(&p) = row.get(sx) else {
                continue;
            };
            let w = wx * wy;
            let wa = w * p.a as f64 / 255.0;
            r += p.r as f64 * wa;
            g += p.g as f64 * wa;
            b += p.b as f64 * wa;
            a += p.a as f64 * w;
            coverage += w;
            alpha_weight += wa;
        }
    }

    if alpha_weight <= 0.0 || coverage <= 0.0 {
        return Rgba8::TRANSPARENT;
    }

    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgba8::new(
        channel(r / alpha_weight),
        channel(g / alpha_weight),
        channel(b / alpha_weight),
        channel(a / coverage),
    )
}
