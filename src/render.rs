// render.rs - Drawing surface abstraction and layer painters
//
// Simulation code never talks to a canvas directly. It paints onto a Surface:
//   web::CanvasSurface  - browser 2D context
//   RasterSurface       - RGBA image buffer (cosmic-preview binary)
//   DisplayList         - headless op recorder

use serde::Serialize;

use crate::field::NebulaCloud;
use crate::sim::{Constellation, LINK_WIDTH, Link};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` form for the canvas API
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Something the render loop can paint on
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, w: u32, h: u32);
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba);
    /// Radial gradient disc; `alpha` scales the whole fill (canvas globalAlpha)
    fn fill_radial(&mut self, x: f32, y: f32, radius: f32, inner: Rgba, outer: Rgba, alpha: f32);
}

/// Paint every constellation point
pub fn draw_points<S: Surface + ?Sized>(surface: &mut S, points: &Constellation) {
    for i in 0..points.len() {
        let color = Rgba::WHITE.with_alpha(points.opacity[i]);
        surface.fill_circle(points.x[i], points.y[i], points.radius[i], color);
    }
}

/// Stroke each link with its own distance-derived opacity
pub fn draw_links<S: Surface + ?Sized>(surface: &mut S, points: &Constellation, links: &[Link]) {
    for link in links {
        let from = (points.x[link.a], points.y[link.a]);
        let to = (points.x[link.b], points.y[link.b]);
        surface.stroke_line(from, to, LINK_WIDTH, Rgba::WHITE.with_alpha(link.opacity));
    }
}

/// Paint nebula clouds at the surface's current size
pub fn draw_nebula<S: Surface + ?Sized>(surface: &mut S, clouds: &[NebulaCloud]) {
    surface.clear();
    let (w, h) = surface.size();
    for cloud in clouds {
        let (x, y, r) = cloud.pixel_geometry(w, h);
        if r <= 0.0 {
            continue;
        }
        let (inner, outer) = cloud.color_stops;
        surface.fill_radial(x, y, r, inner, outer, cloud.opacity_level);
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Resize { w: u32, h: u32 },
    Circle { x: f32, y: f32, radius: f32, color: Rgba },
    Line { from: (f32, f32), to: (f32, f32), width: f32, color: Rgba },
    Radial { x: f32, y: f32, radius: f32, inner: Rgba, outer: Rgba, alpha: f32 },
}

/// Headless surface that records every call
///
/// Clearing keeps the `Clear` op and drops everything before it, so `ops()`
/// always holds the most recent frame. `mutations()` counts every call ever
/// made, which is what teardown checks look at.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    w: u32,
    h: u32,
    ops: Vec<DrawOp>,
    mutations: u64,
}

impl DisplayList {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h, ops: Vec::new(), mutations: 0 }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    fn record(&mut self, op: DrawOp) {
        self.mutations += 1;
        self.ops.push(op);
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn set_size(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.record(DrawOp::Resize { w, h });
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.record(DrawOp::Clear);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.record(DrawOp::Circle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.record(DrawOp::Line { from, to, width, color });
    }

    fn fill_radial(&mut self, x: f32, y: f32, radius: f32, inner: Rgba, outer: Rgba, alpha: f32) {
        self.record(DrawOp::Radial { x, y, radius, inner, outer, alpha });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::NebulaCloud;

    #[test]
    fn test_css_format() {
        assert_eq!(Rgba::new(147, 51, 234, 0.4).css(), "rgba(147, 51, 234, 0.4)");
    }

    #[test]
    fn test_nebula_scales_with_surface() {
        let mut rng = fastrand::Rng::with_seed(3);
        let clouds = NebulaCloud::presets(5, 0.0, &mut rng);

        let mut surface = DisplayList::new(1000, 500);
        draw_nebula(&mut surface, &clouds);
        let radial: Vec<_> = surface.ops().iter().filter(|op| matches!(op, DrawOp::Radial { .. })).collect();
        assert_eq!(radial.len(), 5);
        let DrawOp::Radial { x, y, radius, .. } = radial[0] else { unreachable!() };
        assert_eq!((*x, *y, *radius), (200.0, 150.0, 500.0));

        surface.set_size(2000, 1000);
        draw_nebula(&mut surface, &clouds);
        let DrawOp::Radial { x, radius, .. } = &surface.ops()[1] else { unreachable!() };
        assert_eq!((*x, *radius), (400.0, 1000.0));
    }

    #[test]
    fn test_zero_sized_surface_draws_no_clouds() {
        let mut rng = fastrand::Rng::with_seed(3);
        let clouds = NebulaCloud::presets(5, 0.0, &mut rng);
        let mut surface = DisplayList::new(0, 0);
        draw_nebula(&mut surface, &clouds);
        assert_eq!(surface.ops(), &[DrawOp::Clear]);
    }
}
