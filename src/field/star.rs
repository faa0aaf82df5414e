// star.rs - Background stars
//
// Positions are viewport percentages. Roughly a third of the stars blink;
// all of them follow the pointer with their own parallax depth.

use serde::Serialize;

use crate::config::{POSITION, StarConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub base_opacity: f32,
    pub blinking: bool,
    /// Seconds per blink half-cycle
    pub blink_period: f32,
    pub parallax_intensity: f32,
}

impl Star {
    pub fn generate(config: &StarConfig, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: POSITION.sample(rng),
            y: POSITION.sample(rng),
            size: config.size.sample(rng),
            base_opacity: config.opacity.sample(rng),
            blinking: rng.f32() < config.blink_chance,
            blink_period: config.blink_period.sample(rng),
            parallax_intensity: config.parallax.sample(rng),
        }
    }

    /// Glow radius used for the box-shadow halo
    pub fn glow(&self) -> f32 {
        self.size * 2.0
    }
}
