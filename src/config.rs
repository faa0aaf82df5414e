// config.rs - Entity counts and value ranges
//
// Every generated number comes from a Span in here. Spans are validated once
// at load time so generation can never produce a reversed range or a
// non-positive duration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError};

/// Closed interval that generated values are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in [min, max]
    #[inline]
    pub fn sample(self, rng: &mut fastrand::Rng) -> f32 {
        (self.min + rng.f32() * (self.max - self.min)).clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(self, field: &'static str) -> Result<(), ConfigError> {
        let (min, max) = (self.min, self.max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NotFinite { field, min, max });
        }
        if min > max {
            return Err(ConfigError::Reversed { field, min, max });
        }
        Ok(())
    }

    fn check_duration(self, field: &'static str) -> Result<(), ConfigError> {
        self.check(field)?;
        if self.min <= 0.0 {
            return Err(ConfigError::NonPositiveDuration { field, min: self.min });
        }
        Ok(())
    }

    fn check_within(self, field: &'static str, lo: f32, hi: f32) -> Result<(), ConfigError> {
        self.check(field)?;
        for value in [self.min, self.max] {
            if value < lo || value > hi {
                return Err(ConfigError::OutOfBounds { field, value, lo, hi });
            }
        }
        Ok(())
    }
}

/// Normalized viewport coordinates are percentages
pub const POSITION: Span = Span::new(0.0, 100.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub size: Span,
    pub opacity: Span,
    pub blink_chance: f32,
    pub blink_period: Span,
    pub parallax: Span,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 200,
            size: Span::new(0.5, 3.5),
            opacity: Span::new(0.3, 1.0),
            blink_chance: 0.3,
            blink_period: Span::new(2.0, 5.0),
            parallax: Span::new(5.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingStarConfig {
    pub count: usize,
    pub length: Span,
    pub angle: Span,
    pub speed: Span,
    pub delay: Span,
    pub duration: Span,
    pub repeat_delay: Span,
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self {
            count: 8,
            length: Span::new(100.0, 300.0),
            angle: Span::new(-30.0, 30.0),
            speed: Span::new(10.0, 25.0),
            delay: Span::new(0.0, 15.0),
            duration: Span::new(1.0, 3.0),
            repeat_delay: Span::new(15.0, 25.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub count: usize,
    pub size: Span,
    pub alpha: Span,
    pub drift: Span,
    pub scale_peak: Span,
    pub period: Span,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: 80,
            size: Span::new(1.0, 5.0),
            alpha: Span::new(0.1, 0.3),
            drift: Span::new(-25.0, 25.0),
            scale_peak: Span::new(1.0, 2.5),
            period: Span::new(15.0, 35.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelestialConfig {
    pub count: usize,
    pub size: Span,
    pub opacity: Span,
    /// Turns per rotation cycle; direction is picked at random
    pub rotation_speed: Span,
    pub parallax: Span,
}

impl Default for CelestialConfig {
    fn default() -> Self {
        Self {
            count: 5,
            size: Span::new(60.0, 100.0),
            opacity: Span::new(0.05, 0.2),
            rotation_speed: Span::new(0.01, 0.05),
            parallax: Span::new(10.0, 30.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    /// Number of clouds, taken from the preset list in order (max 5)
    pub count: usize,
    /// Random offset applied to each preset center, fraction of viewport
    pub jitter: f32,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self { count: 5, jitter: 0.05 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub count: usize,
    pub radius: Span,
    /// Per-axis velocity in px per frame
    pub velocity: Span,
    pub opacity: Span,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            count: 50,
            radius: Span::new(0.5, 2.0),
            velocity: Span::new(-0.1, 0.1),
            opacity: Span::new(0.3, 0.8),
        }
    }
}

/// Full engine configuration
///
/// Missing sections fall back to their defaults, so `{}` is a valid config
/// and `{"stars": {"count": 0}}` only disables the star layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stars: StarConfig,
    pub shooting_stars: ShootingStarConfig,
    pub dust: DustConfig,
    pub celestial: CelestialConfig,
    pub nebula: NebulaConfig,
    pub constellation: ConstellationConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.stars;
        s.size.check_within("stars.size", 0.0, f32::MAX)?;
        s.opacity.check_within("stars.opacity", 0.0, 1.0)?;
        probability("stars.blink_chance", s.blink_chance)?;
        s.blink_period.check_duration("stars.blink_period")?;
        s.parallax.check("stars.parallax")?;

        let sh = &self.shooting_stars;
        sh.length.check_within("shooting_stars.length", 0.0, f32::MAX)?;
        sh.angle.check_within("shooting_stars.angle", -180.0, 180.0)?;
        sh.speed.check("shooting_stars.speed")?;
        sh.delay.check_within("shooting_stars.delay", 0.0, f32::MAX)?;
        sh.duration.check_duration("shooting_stars.duration")?;
        sh.repeat_delay.check_within("shooting_stars.repeat_delay", 0.0, f32::MAX)?;

        let d = &self.dust;
        d.size.check_within("dust.size", 0.0, f32::MAX)?;
        d.alpha.check_within("dust.alpha", 0.0, 1.0)?;
        d.drift.check("dust.drift")?;
        d.scale_peak.check_within("dust.scale_peak", 0.0, f32::MAX)?;
        d.period.check_duration("dust.period")?;

        let c = &self.celestial;
        c.size.check_within("celestial.size", 0.0, f32::MAX)?;
        c.opacity.check_within("celestial.opacity", 0.0, 1.0)?;
        c.rotation_speed.check_duration("celestial.rotation_speed")?;
        c.parallax.check("celestial.parallax")?;

        let n = &self.nebula;
        if !(0.0..=0.5).contains(&n.jitter) {
            return Err(ConfigError::OutOfBounds { field: "nebula.jitter", value: n.jitter, lo: 0.0, hi: 0.5 });
        }

        let p = &self.constellation;
        p.radius.check_within("constellation.radius", 0.0, f32::MAX)?;
        p.velocity.check("constellation.velocity")?;
        p.opacity.check_within("constellation.opacity", 0.0, 1.0)?;

        Ok(())
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}
