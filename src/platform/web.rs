//! Browser host: 2D canvas surface and DOM counter

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::CounterSink;
use crate::renderer::Surface;
use crate::sim::color::{Rgb, Rgba};

/// Canvas 2D context sized once at startup
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    /// Grab the 2D context of a canvas whose size is already set
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width(),
            height: canvas.height(),
        })
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgb, line_width: f32) {
        self.ctx.set_line_width(line_width as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.circle_path(center, radius);
        self.ctx.stroke();
    }
}

/// Writes the live count as the text of a DOM element
pub struct DomCounter {
    element: Element,
}

impl DomCounter {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl CounterSink for DomCounter {
    fn publish(&mut self, live_count: u32) {
        self.element.set_text_content(Some(&live_count.to_string()));
    }
}
