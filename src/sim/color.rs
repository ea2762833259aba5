//! Colors for entities and overlays

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque 8-bit RGB color
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

    /// Attach an alpha channel (0.0 - 1.0)
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }
}

/// CSS color syntax, e.g. `rgb(12,200,7)`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// RGB color with alpha, used for translucent overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_formatting() {
        assert_eq!(Rgb::new(1, 22, 255).to_string(), "rgb(1,22,255)");
        assert_eq!(Rgb::BLACK.with_alpha(0.25).to_string(), "rgba(0, 0, 0, 0.25)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgb::WHITE.with_alpha(3.0).a, 1.0);
        assert_eq!(Rgb::WHITE.with_alpha(-1.0).a, 0.0);
    }
}
