//! Rendering adapter
//!
//! The simulation draws through the [`Surface`] trait. Hosts provide an implementation
//! (a 2D canvas context on the web, [`RecordingSurface`] for headless runs and tests).

pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::color::{Rgb, Rgba};

/// A drawable area with a fixed size
pub trait Surface {
    /// Width in pixels (fixed for the run)
    fn width(&self) -> u32;
    /// Height in pixels (fixed for the run)
    fn height(&self) -> u32;

    /// Fill an axis-aligned rectangle, blending with what is already drawn
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    /// Fill a solid disc
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgb);
    /// Stroke a circle outline
    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgb, line_width: f32);
}

/// Paint a translucent black overlay over the whole surface
///
/// Previous frames show through, which leaves short motion trails behind the balls.
pub fn fade(surface: &mut impl Surface, alpha: f32) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    surface.fill_rect(0.0, 0.0, w, h, Rgb::BLACK.with_alpha(alpha));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_covers_surface() {
        let mut surface = RecordingSurface::new(640, 480);
        fade(&mut surface, 0.25);
        assert_eq!(
            surface.commands(),
            &[DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                w: 640.0,
                h: 480.0,
                color: Rgb::BLACK.with_alpha(0.25),
            }]
        );
    }
}
