//! Thick-segment rasterization.
//!
//! A segment is widened into a quad by pushing both endpoints out along the
//! segment's normal, then the quad is scan-converted with a flat color. No
//! coverage is computed here; smooth edges come from downsampling later.

use sigpad_core::{PixelPoint, Quad, Rgba8, Segment};

/// Build the quad for `segment` at the given half-width.
pub fn thick_segment_quad(segment: &Segment, thickness: f64) -> Option<Quad> {
    Quad::around_segment(segment, thickness)
}

/// Paint `segment` as a filled quad `thickness` pixels to each side of it.
///
/// Pixels inside the quad are overwritten. Segments whose corners are not
/// finite are skipped.
pub fn fill_thick_segment(canvas: &mut crate::Canvas, segment: &Segment, color: Rgba8, thickness: f64) {
    match thick_segment_quad(segment, thickness) {
        Some(quad) => {
            log::trace!("Segment {:?} -> quad {:?}", segment, quad.corners);
            fill_polygon(canvas, &quad.corners, color);
        }
        None => log::warn!("Skipping segment with non-finite geometry: {:?}", segment),
    }
}

/// Scanline-fill a closed polygon with integer vertices.
///
/// Each scanline collects the x positions where it crosses the polygon's
/// non-horizontal edges (half-open in y, except on the bottom row where the
/// edge's lower end is included) and fills between sorted pairs, both ends
/// inclusive. Crossings are rounded half up, then truncated toward zero. A
/// polygon with no height collapses to a single span.
pub fn fill_polygon(canvas: &mut crate::Canvas, points: &[PixelPoint], color: Rgba8) {
    if points.is_empty() {
        return;
    }

    let mut min_y = points[0].y;
    let mut max_y = points[0].y;
    for p in &points[1..] {
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    if min_y == max_y {
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
        canvas.copy_hline(min_x, max_x, min_y, color);
        return;
    }

    // The bottom-row rule compares against the unclipped extent.
    let poly_max_y = max_y;
    let first_y = min_y.max(0);
    let last_y = max_y.min(canvas.height() as i64 - 1);

    let n = points.len();
    let mut intersections = Vec::with_capacity(n);

    for y in first_y..=last_y {
        intersections.clear();

        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let (top, bottom) = match a.y.cmp(&b.y) {
                std::cmp::Ordering::Less => (a, b),
                std::cmp::Ordering::Greater => (b, a),
                std::cmp::Ordering::Equal => continue,
            };

            let crosses = (y >= top.y && y < bottom.y)
                || (y == poly_max_y && y > top.y && y <= bottom.y);
            if crosses {
                // Corners may sit at the ends of the i64 range, so subtract in f64.
                let (yf, x1, y1) = (y as f64, top.x as f64, top.y as f64);
                let t = (yf - y1) * (bottom.x as f64 - x1) / (bottom.y as f64 - y1);
                intersections.push((t + 0.5 + x1).trunc() as i64);
            }
        }

        intersections.sort_unstable();
        for pair in intersections.chunks_exact(2) {
            canvas.copy_hline(pair[0], pair[1], y, color);
        }
    }
}
