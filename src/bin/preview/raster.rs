// raster.rs - CPU surface over an RGBA image buffer
//
// Coverage is computed per pixel center with a one-pixel soft edge, then
// blended source-over. Good enough for previews; not a canvas replacement.

use cosmic_engine::render::{Rgba, Surface};
use image::{Rgba as Pixel, RgbaImage};

pub struct RasterSurface {
    img: RgbaImage,
}

impl RasterSurface {
    pub fn new(w: u32, h: u32) -> Self {
        Self { img: RgbaImage::new(w, h) }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Blend `color` over pixel (x, y) with extra `coverage` in [0, 1]
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let a = (color.a * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = self.img.get_pixel_mut(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = a + da * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        let mix = |s: u8, d: u8| ((s as f32 * a + d as f32 * da * (1.0 - a)) / out_a).round().clamp(0.0, 255.0) as u8;
        *dst = Pixel([
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Pixel range covering [lo, hi] along an axis of length `len`
    fn span(lo: f32, hi: f32, len: u32) -> std::ops::Range<u32> {
        let start = lo.floor().max(0.0) as u32;
        let end = (hi.ceil().max(0.0) as u32).min(len);
        start..end.max(start)
    }

    fn fill_with(&mut self, bounds: (f32, f32, f32, f32), mut shade: impl FnMut(f32, f32) -> Option<(Rgba, f32)>) {
        let (w, h) = self.img.dimensions();
        let (x0, y0, x1, y1) = bounds;
        for py in Self::span(y0, y1, h) {
            for px in Self::span(x0, x1, w) {
                if let Some((color, coverage)) = shade(px as f32 + 0.5, py as f32 + 0.5) {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let c = |x: u8, y: u8| lerp(x as f32, y as f32, t).round() as u8;
    Rgba::new(c(a.r, b.r), c(a.g, b.g), c(a.b, b.b), lerp(a.a, b.a, t))
}

/// Distance from p to segment ab
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 { (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
    let (cx, cy) = (a.0 + dx * t, a.1 + dy * t);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn set_size(&mut self, w: u32, h: u32) {
        if self.img.dimensions() != (w, h) {
            self.img = RgbaImage::new(w, h);
        }
    }

    fn clear(&mut self) {
        self.img.pixels_mut().for_each(|p| *p = Pixel([0, 0, 0, 0]));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        let r = radius + 0.5;
        self.fill_with((x - r, y - r, x + r, y + r), |px, py| {
            let d = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
            let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        let half = width / 2.0;
        let pad = half + 1.0;
        let bounds = (from.0.min(to.0) - pad, from.1.min(to.1) - pad, from.0.max(to.0) + pad, from.1.max(to.1) + pad);
        self.fill_with(bounds, |px, py| {
            let d = segment_distance((px, py), from, to);
            // Hairlines still get partial coverage
            let coverage = (half - d + 0.5).clamp(0.0, 1.0).min(width.max(0.0));
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn fill_radial(&mut self, x: f32, y: f32, radius: f32, inner: Rgba, outer: Rgba, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        self.fill_with((x - radius, y - radius, x + radius, y + radius), |px, py| {
            let t = ((px - x).powi(2) + (py - y).powi(2)).sqrt() / radius;
            (t <= 1.0).then(|| (lerp_color(inner, outer, t), alpha))
        });
    }
}
