// celestial.rs - Large blurred celestial bodies
//
// Slowly rotating gradient discs with the strongest parallax of the field.

use serde::Serialize;

use crate::config::{CelestialConfig, POSITION};
use crate::render::Rgba;

/// Seconds per rotation cycle
pub const ROTATION_CYCLE: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CelestialGradient {
    PurpleIndigo,
    PinkPurple,
    BlueCyan,
    IndigoBlue,
    VioletFuchsia,
}

impl CelestialGradient {
    const ALL: [CelestialGradient; 5] = [
        CelestialGradient::PurpleIndigo,
        CelestialGradient::PinkPurple,
        CelestialGradient::BlueCyan,
        CelestialGradient::IndigoBlue,
        CelestialGradient::VioletFuchsia,
    ];

    /// (from, to) stops of the disc gradient
    pub const fn stops(self) -> (Rgba, Rgba) {
        match self {
            CelestialGradient::PurpleIndigo => (Rgba::new(147, 51, 234, 0.2), Rgba::new(79, 70, 229, 0.05)),
            CelestialGradient::PinkPurple => (Rgba::new(219, 39, 119, 0.2), Rgba::new(147, 51, 234, 0.05)),
            CelestialGradient::BlueCyan => (Rgba::new(37, 99, 235, 0.2), Rgba::new(8, 145, 178, 0.05)),
            CelestialGradient::IndigoBlue => (Rgba::new(79, 70, 229, 0.2), Rgba::new(37, 99, 235, 0.05)),
            CelestialGradient::VioletFuchsia => (Rgba::new(124, 58, 237, 0.2), Rgba::new(192, 38, 211, 0.05)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialObject {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub gradient: CelestialGradient,
    /// Starting angle in degrees
    pub rotation: f32,
    /// Turns per rotation cycle, always positive
    pub rotation_speed: f32,
    pub clockwise: bool,
    pub parallax_intensity: f32,
}

impl CelestialObject {
    pub fn generate(config: &CelestialConfig, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: POSITION.sample(rng),
            y: POSITION.sample(rng),
            size: config.size.sample(rng),
            opacity: config.opacity.sample(rng),
            gradient: CelestialGradient::ALL[rng.usize(..CelestialGradient::ALL.len())],
            rotation: rng.f32() * 360.0,
            rotation_speed: config.rotation_speed.sample(rng),
            clockwise: rng.bool(),
            parallax_intensity: config.parallax.sample(rng),
        }
    }

    /// Angle reached at the end of one cycle
    pub fn end_rotation(&self) -> f32 {
        let sweep = 360.0 * self.rotation_speed;
        if self.clockwise { self.rotation + sweep } else { self.rotation - sweep }
    }
}
