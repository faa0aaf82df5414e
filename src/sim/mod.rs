// sim/ - Per-frame physics layer
//
// Only the constellation needs a hand-driven frame loop; everything else is
// tween-driven (see timeline). RenderLoop owns the drawing surface and the
// points and does exactly one integrate/bounce/draw pass per tick.

mod constellation;
mod links;

pub use constellation::{Constellation, ConstellationPoint};
pub use links::{LINK_DISTANCE, LINK_MAX_OPACITY, LINK_WIDTH, Link, collect_links, link_opacity};

use crate::render::{Surface, draw_links, draw_points};

/// Constellation render loop state
pub struct RenderLoop<S: Surface> {
    surface: S,
    points: Constellation,
    links: Vec<Link>,
    frames: u64,
}

impl<S: Surface> RenderLoop<S> {
    pub fn new(surface: S, points: Constellation) -> Self {
        Self { surface, points, links: Vec::new(), frames: 0 }
    }

    /// Re-apply surface dimensions; points keep their absolute positions
    pub fn resize(&mut self, w: u32, h: u32) {
        self.surface.set_size(w, h);
        log::debug!("constellation surface resized to {}x{}", w, h);
    }

    pub fn tick(&mut self) {
        let (w, h) = self.surface.size();

        self.points.step(w as f32, h as f32);

        self.surface.clear();
        draw_points(&mut self.surface, &self.points);

        collect_links(&self.points, &mut self.links);
        draw_links(&mut self.surface, &self.points, &self.links);

        self.frames += 1;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn points(&self) -> &Constellation {
        &self.points
    }

    /// Links drawn on the last tick
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
