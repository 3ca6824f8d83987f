//! Canvas 2D implementation of the render surface

use std::f64::consts::TAU;

use game_core::{Color, Surface, TextAlign};
use glam::Vec2;
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn set_line_dash(&self, pattern: &[f32]) {
        let segments: Array = pattern.iter().map(|&v| JsValue::from_f64(v as f64)).collect();
        if let Err(err) = self.ctx.set_line_dash(&segments) {
            tracing::warn!(?err, "setLineDash failed");
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        match self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            Ok(()) => self.ctx.fill(),
            Err(err) => tracing::warn!(?err, "arc failed"),
        }
    }

    fn dashed_line(&mut self, from: Vec2, to: Vec2, pattern: [f32; 2], color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.set_line_dash(&pattern);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.set_line_dash(&[]);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_fill_style_str(&color.to_css());
        if let Err(err) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            tracing::warn!(?err, "fillText failed");
        }
    }
}
