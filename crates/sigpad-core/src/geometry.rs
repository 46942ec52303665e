use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates (pixels, Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// One straight stroke of a signature, in unscaled output-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Segment {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Multiply every coordinate by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::from_points(self.start().scale(factor), self.end().scale(factor))
    }

    /// Angle of the stroke with Y inverted, as seen on a screen where Y grows downward.
    pub fn screen_angle(&self) -> f64 {
        (self.start_y - self.end_y).atan2(self.end_x - self.start_x)
    }
}

/// An integer pixel position on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A four-cornered polygon built around a segment, wound P1 → P2 → P3 → P4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [PixelPoint; 4],
}

impl Quad {
    /// Offset both endpoints of `segment` perpendicular to it by `thickness`,
    /// rounding every corner up to the next whole pixel. Corners beyond the
    /// `i64` range saturate at its ends.
    ///
    /// Returns `None` if any corner is not finite.
    pub fn around_segment(segment: &Segment, thickness: f64) -> Option<Self> {
        let angle = segment.screen_angle();
        let dist_x = thickness * angle.sin();
        let dist_y = thickness * angle.cos();

        let raw = [
            (segment.start_x + dist_x, segment.start_y + dist_y),
            (segment.end_x + dist_x, segment.end_y + dist_y),
            (segment.end_x - dist_x, segment.end_y - dist_y),
            (segment.start_x - dist_x, segment.start_y - dist_y),
        ];
        if raw.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return None;
        }

        let corners = raw.map(|(x, y)| PixelPoint::new(x.ceil() as i64, y.ceil() as i64));
        Some(Self { corners })
    }
}
