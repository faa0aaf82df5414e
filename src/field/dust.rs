// dust.rs - Cosmic dust particles
//
// Small tinted specks that drift back and forth around their spawn point.

use serde::Serialize;

use crate::config::{DustConfig, POSITION};
use crate::render::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChannel {
    Purple,
    Pink,
    Blue,
}

impl ColorChannel {
    /// Half purple, a quarter each pink and blue
    fn pick(rng: &mut fastrand::Rng) -> Self {
        if rng.bool() {
            ColorChannel::Purple
        } else if rng.bool() {
            ColorChannel::Pink
        } else {
            ColorChannel::Blue
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorChannel::Purple => (147, 51, 234),
            ColorChannel::Pink => (236, 72, 153),
            ColorChannel::Blue => (59, 130, 246),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DustParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color_channel: ColorChannel,
    pub alpha: f32,
    /// Peak (dx, dy) offset in px
    pub drift: (f32, f32),
    pub scale_peak: f32,
    pub drift_period: f32,
}

impl DustParticle {
    pub fn generate(config: &DustConfig, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: POSITION.sample(rng),
            y: POSITION.sample(rng),
            size: config.size.sample(rng),
            color_channel: ColorChannel::pick(rng),
            alpha: config.alpha.sample(rng),
            drift: (config.drift.sample(rng), config.drift.sample(rng)),
            scale_peak: config.scale_peak.sample(rng),
            drift_period: config.period.sample(rng),
        }
    }

    /// Largest distance the particle strays from its anchor
    pub fn drift_amplitude(&self) -> f32 {
        (self.drift.0 * self.drift.0 + self.drift.1 * self.drift.1).sqrt()
    }

    pub fn color(&self) -> Rgba {
        let (r, g, b) = self.color_channel.rgb();
        Rgba::new(r, g, b, self.alpha)
    }
}
