//! In-memory surface that records draw calls instead of rasterizing them

use glam::Vec2;

use super::Surface;
use crate::sim::color::{Rgb, Rgba};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba,
    },
    FillDisc {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    StrokeRing {
        center: Vec2,
        radius: f32,
        color: Rgb,
        line_width: f32,
    },
}

/// Headless surface; keeps the draw calls issued since the last [`clear`](Self::clear)
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands (call between frames to bound memory)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of filled discs recorded (one per living ball per frame)
    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillDisc { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillDisc {
            center,
            radius,
            color,
        });
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgb, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRing {
            center,
            radius,
            color,
            line_width,
        });
    }
}
