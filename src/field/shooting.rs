// shooting.rs - Shooting stars
//
// A streak rotated by `angle_degrees` that slides along its own axis,
// fading in and out, then waits `repeat_delay` seconds before the next pass.

use serde::Serialize;

use crate::config::{POSITION, ShootingStarConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootingStar {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub angle_degrees: f32,
    /// Travel distance in streak lengths
    pub speed: f32,
    pub start_delay: f32,
    pub travel_duration: f32,
    pub repeat_delay: f32,
}

impl ShootingStar {
    pub fn generate(config: &ShootingStarConfig, rng: &mut fastrand::Rng) -> Self {
        Self {
            x: POSITION.sample(rng),
            y: POSITION.sample(rng),
            length: config.length.sample(rng),
            angle_degrees: config.angle.sample(rng),
            speed: config.speed.sample(rng),
            start_delay: config.delay.sample(rng),
            travel_duration: config.duration.sample(rng),
            repeat_delay: config.repeat_delay.sample(rng),
        }
    }

    /// Pixels travelled along the streak axis in one pass
    #[inline]
    pub fn travel(&self) -> f32 {
        self.speed * self.length
    }
}
