use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8::opaque(self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A non-premultiplied RGBA pixel. Alpha 0 is fully transparent, 255 fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);
    pub const OPAQUE_BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Source-over composite of `self` onto `dst`.
    pub fn over(&self, dst: Rgba8) -> Rgba8 {
        if self.is_opaque() || dst.is_transparent() {
            return *self;
        }
        if self.is_transparent() {
            return dst;
        }

        let sa = self.a as f64 / 255.0;
        let da = dst.a as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let v = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba8::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

impl From<Rgb> for Rgba8 {
    fn from(c: Rgb) -> Self {
        c.to_rgba8()
    }
}

/// What sits behind the strokes. Exactly one of the two is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Opaque(Rgb),
    Transparent,
}

impl Background {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Background::Transparent)
    }

    /// The pixel value the working canvas is cleared to.
    pub fn fill_color(&self) -> Rgba8 {
        match self {
            Background::Opaque(c) => c.to_rgba8(),
            Background::Transparent => Rgba8::TRANSPARENT,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Opaque(Rgb::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fill_color() {
        assert_eq!(
            Background::Opaque(Rgb::new(1, 2, 3)).fill_color(),
            Rgba8::new(1, 2, 3, 255)
        );
        assert!(Background::Transparent.fill_color().is_transparent());
    }

    #[test]
    fn test_over_opaque_source_wins() {
        let src = Rgba8::opaque(10, 20, 30);
        assert_eq!(src.over(Rgba8::opaque(200, 200, 200)), src);
    }

    #[test]
    fn test_over_transparent_source_keeps_destination() {
        let dst = Rgba8::opaque(200, 100, 50);
        assert_eq!(Rgba8::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_over_half_alpha() {
        let src = Rgba8::new(255, 0, 0, 128);
        let out = src.over(Rgba8::opaque(0, 0, 255));
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135);
        assert!(out.b > 120 && out.b < 135);
    }

    #[test]
    fn test_background_serde() {
        let json = serde_json::to_string(&Background::Transparent).unwrap();
        assert_eq!(json, "\"transparent\"");
        let bg: Background = serde_json::from_str(r#"{"opaque":{"r":1,"g":2,"b":3}}"#).unwrap();
        assert_eq!(bg, Background::Opaque(Rgb::new(1, 2, 3)));
    }
}
