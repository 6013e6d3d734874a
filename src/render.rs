use crate::core::{Painter, Rgba};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

/// [`Painter`] over a browser 2D context whose transform already carries the
/// device pixel ratio.
pub struct CanvasPainter<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(ctx: &'a web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    #[allow(deprecated)]
    fn fill_style(&self, color: Rgba) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
    }

    #[allow(deprecated)]
    fn stroke_style(&self, color: Rgba, width: f32) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.ctx.set_line_width(width as f64);
    }
}

impl<'a> Painter for CanvasPainter<'a> {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.fill_style(color);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.stroke_style(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.fill_style(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.stroke_style(color, width);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    #[allow(deprecated)]
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Rgba, outer: Rgba) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius.max(0.0) as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("[render] radial gradient unavailable: {:?}", e);
                return;
            }
        };
        _ = gradient.add_color_stop(0.0, &inner.to_css());
        _ = gradient.add_color_stop(1.0, &outer.to_css());
        self.ctx.set_fill_style(&gradient);
        self.ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
    }

    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Rgba) {
        self.fill_style(color);
        let (x, y) = (center.x as f64, center.y as f64);
        self.ctx.begin_path();
        self.ctx.move_to(x, y);
        if self
            .ctx
            .arc(x, y, radius.max(0.0) as f64, start as f64, end as f64)
            .is_ok()
        {
            self.ctx.close_path();
            self.ctx.fill();
        }
    }
}
