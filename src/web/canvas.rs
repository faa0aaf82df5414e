// canvas.rs - Surface backed by a 2D canvas context

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{EngineError, Result};
use crate::render::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| EngineError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| EngineError::SurfaceUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::SurfaceUnavailable("context is not 2d".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_radial(&mut self, x: f32, y: f32, radius: f32, inner: Rgba, outer: Rgba, alpha: f32) {
        let (x, y, r) = (x as f64, y as f64, radius as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        if gradient.add_color_stop(0.0, &inner.css()).is_err() || gradient.add_color_stop(1.0, &outer.css()).is_err() {
            return;
        }
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
        self.ctx.set_global_alpha(1.0);
    }
}
