// nebula.rs - Static nebula clouds
//
// Five fixed colour clouds, each nudged by a small random jitter. Geometry is
// stored as viewport fractions and re-derived in pixels on every resize.

use serde::Serialize;

use crate::render::Rgba;

struct Preset {
    center: (f32, f32),
    radius: f32,
    inner: Rgba,
    opacity: f32,
}

const PRESETS: [Preset; 5] = [
    // Deep purple
    Preset { center: (0.2, 0.3), radius: 0.5, inner: Rgba::new(147, 51, 234, 0.4), opacity: 0.08 },
    // Pink
    Preset { center: (0.8, 0.7), radius: 0.6, inner: Rgba::new(236, 72, 153, 0.4), opacity: 0.08 },
    // Blue
    Preset { center: (0.5, 0.5), radius: 0.7, inner: Rgba::new(59, 130, 246, 0.3), opacity: 0.07 },
    // Teal
    Preset { center: (0.3, 0.8), radius: 0.4, inner: Rgba::new(20, 184, 166, 0.3), opacity: 0.06 },
    // Violet
    Preset { center: (0.7, 0.2), radius: 0.4, inner: Rgba::new(139, 92, 246, 0.3), opacity: 0.07 },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NebulaCloud {
    /// Center as a fraction of viewport (w, h)
    pub center: (f32, f32),
    /// Radius as a fraction of viewport width
    pub radius: f32,
    pub color_stops: (Rgba, Rgba),
    pub opacity_level: f32,
}

impl NebulaCloud {
    /// First `count` presets (max 5), centers jittered by up to `jitter`
    pub fn presets(count: usize, jitter: f32, rng: &mut fastrand::Rng) -> Vec<Self> {
        PRESETS
            .iter()
            .take(count)
            .map(|p| {
                let mut nudge = || (rng.f32() * 2.0 - 1.0) * jitter;
                let cx = (p.center.0 + nudge()).clamp(0.0, 1.0);
                let cy = (p.center.1 + nudge()).clamp(0.0, 1.0);
                Self {
                    center: (cx, cy),
                    radius: p.radius,
                    color_stops: (p.inner, Rgba::TRANSPARENT),
                    opacity_level: p.opacity,
                }
            })
            .collect()
    }

    /// (x, y, radius) in pixels for a w x h surface
    pub fn pixel_geometry(&self, w: u32, h: u32) -> (f32, f32, f32) {
        let (w, h) = (w as f32, h as f32);
        (self.center.0 * w, self.center.1 * h, self.radius * w)
    }
}
