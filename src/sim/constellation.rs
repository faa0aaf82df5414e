// constellation.rs - Drifting constellation points
//
// Structure-of-Arrays layout, same as the other per-frame entities.
// Points live in pixel space and bounce elastically off the surface edges.

use crate::config::ConstellationConfig;

/// One point, gathered from the SoA columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstellationPoint {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Constellation {
    // Position (px)
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity (px per frame)
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Look
    pub radius: Vec<f32>,
    pub opacity: Vec<f32>,
}

impl Constellation {
    /// Scatter `config.count` points over a w x h surface
    pub fn generate(config: &ConstellationConfig, w: u32, h: u32, rng: &mut fastrand::Rng) -> Self {
        let n = config.count;
        let mut points = Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            vx: Vec::with_capacity(n),
            vy: Vec::with_capacity(n),
            radius: Vec::with_capacity(n),
            opacity: Vec::with_capacity(n),
        };
        for _ in 0..n {
            points.push(ConstellationPoint {
                x: rng.f32() * w as f32,
                y: rng.f32() * h as f32,
                radius: config.radius.sample(rng),
                vx: config.velocity.sample(rng),
                vy: config.velocity.sample(rng),
                opacity: config.opacity.sample(rng),
            });
        }
        points
    }

    pub fn push(&mut self, p: ConstellationPoint) {
        self.x.push(p.x);
        self.y.push(p.y);
        self.vx.push(p.vx);
        self.vy.push(p.vy);
        self.radius.push(p.radius);
        self.opacity.push(p.opacity);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> ConstellationPoint {
        ConstellationPoint {
            x: self.x[i],
            y: self.y[i],
            radius: self.radius[i],
            vx: self.vx[i],
            vy: self.vy[i],
            opacity: self.opacity[i],
        }
    }

    /// Integrate one frame and bounce off the [0, w] x [0, h] box
    pub fn step(&mut self, w: f32, h: f32) {
        let (w, h) = (w.max(0.0), h.max(0.0));
        for i in 0..self.len() {
            self.x[i] += self.vx[i];
            self.y[i] += self.vy[i];
            bounce(&mut self.x[i], &mut self.vx[i], w);
            bounce(&mut self.y[i], &mut self.vy[i], h);
        }
    }
}

// Clamp back inside, then point the velocity inward. Using the sign instead
// of flipping keeps a point that is still outside after a shrinking resize
// from oscillating across the edge.
#[inline(always)]
fn bounce(pos: &mut f32, vel: &mut f32, limit: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos > limit {
        *pos = limit;
        *vel = -vel.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(x: f32, y: f32, vx: f32, vy: f32) -> Constellation {
        let mut c = Constellation::default();
        c.push(ConstellationPoint { x, y, radius: 1.0, vx, vy, opacity: 0.5 });
        c
    }

    #[test]
    fn test_generate_inside_surface() {
        let config = ConstellationConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        let c = Constellation::generate(&config, 800, 600, &mut rng);
        assert_eq!(c.len(), 50);
        for i in 0..c.len() {
            let p = c.point(i);
            assert!((0.0..=800.0).contains(&p.x) && (0.0..=600.0).contains(&p.y));
            assert!(config.radius.contains(p.radius));
            assert!(config.velocity.contains(p.vx) && config.velocity.contains(p.vy));
            assert!(config.opacity.contains(p.opacity));
        }
    }

    #[test]
    fn test_zero_count() {
        let config = ConstellationConfig { count: 0, ..Default::default() };
        let c = Constellation::generate(&config, 800, 600, &mut fastrand::Rng::with_seed(1));
        assert!(c.is_empty());
    }

    #[test]
    fn test_bounce_right_edge() {
        let mut c = single(99.95, 10.0, 0.1, 0.0);
        c.step(100.0, 100.0);
        assert_eq!(c.x[0], 100.0);
        assert!(c.vx[0] < 0.0);
        c.step(100.0, 100.0);
        assert!(c.x[0] < 100.0);
    }

    #[test]
    fn test_bounce_top_edge() {
        let mut c = single(10.0, 0.05, 0.0, -0.1);
        c.step(100.0, 100.0);
        assert_eq!(c.y[0], 0.0);
        assert!(c.vy[0] > 0.0);
    }

    #[test]
    fn test_stays_in_bounds_after_many_steps() {
        let config = ConstellationConfig { velocity: crate::config::Span::new(-3.0, 3.0), ..Default::default() };
        let mut rng = fastrand::Rng::with_seed(5);
        let mut c = Constellation::generate(&config, 300, 200, &mut rng);
        for _ in 0..10_000 {
            c.step(300.0, 200.0);
            for i in 0..c.len() {
                assert!((0.0..=300.0).contains(&c.x[i]));
                assert!((0.0..=200.0).contains(&c.y[i]));
            }
        }
    }

    #[test]
    fn test_shrink_pulls_points_inside() {
        let mut c = single(500.0, 400.0, 0.1, 0.1);
        c.step(100.0, 50.0);
        assert_eq!((c.x[0], c.y[0]), (100.0, 50.0));
        assert!(c.vx[0] < 0.0 && c.vy[0] < 0.0);
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut c = single(5.0, 5.0, 0.1, -0.1);
        c.step(0.0, 0.0);
        assert_eq!((c.x[0], c.y[0]), (0.0, 0.0));
    }
}
