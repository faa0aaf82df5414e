// field/ - Decorative entity generation
//
// Every layer is sampled once per mount from the ranges in EngineConfig.
// Generation is pure apart from advancing the caller's RNG: calling it again
// gives a different, equally valid layout.
//
// Constellation points live in pixel space and are generated by
// sim::Constellation instead.

mod celestial;
mod dust;
mod nebula;
mod shooting;
mod star;

pub use celestial::{CelestialGradient, CelestialObject, ROTATION_CYCLE};
pub use dust::{ColorChannel, DustParticle};
pub use nebula::NebulaCloud;
pub use shooting::ShootingStar;
pub use star::Star;

use serde::Serialize;

use crate::config::EngineConfig;

/// All tween-driven entities of one mounted background
#[derive(Debug, Clone, Default, Serialize)]
pub struct Field {
    pub stars: Vec<Star>,
    pub shooting_stars: Vec<ShootingStar>,
    pub dust: Vec<DustParticle>,
    pub celestial: Vec<CelestialObject>,
    pub nebula: Vec<NebulaCloud>,
}

impl Field {
    pub fn generate(config: &EngineConfig, rng: &mut fastrand::Rng) -> Self {
        let field = Self {
            stars: (0..config.stars.count).map(|_| Star::generate(&config.stars, rng)).collect(),
            shooting_stars: (0..config.shooting_stars.count)
                .map(|_| ShootingStar::generate(&config.shooting_stars, rng))
                .collect(),
            dust: (0..config.dust.count).map(|_| DustParticle::generate(&config.dust, rng)).collect(),
            celestial: (0..config.celestial.count)
                .map(|_| CelestialObject::generate(&config.celestial, rng))
                .collect(),
            nebula: NebulaCloud::presets(config.nebula.count, config.nebula.jitter, rng),
        };
        log::debug!(
            "field: {} stars, {} shooting, {} dust, {} celestial, {} clouds",
            field.stars.len(),
            field.shooting_stars.len(),
            field.dust.len(),
            field.celestial.len(),
            field.nebula.len()
        );
        field
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
            && self.shooting_stars.is_empty()
            && self.dust.is_empty()
            && self.celestial.is_empty()
            && self.nebula.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::POSITION;

    fn field(seed: u64) -> (EngineConfig, Field) {
        let config = EngineConfig::default();
        let mut rng = fastrand::Rng::with_seed(seed);
        let field = Field::generate(&config, &mut rng);
        (config, field)
    }

    #[test]
    fn test_counts_follow_config() {
        let (config, field) = field(1);
        assert_eq!(field.stars.len(), config.stars.count);
        assert_eq!(field.shooting_stars.len(), config.shooting_stars.count);
        assert_eq!(field.dust.len(), config.dust.count);
        assert_eq!(field.celestial.len(), config.celestial.count);
        assert_eq!(field.nebula.len(), 5);
    }

    #[test]
    fn test_zero_counts_yield_empty_field() {
        let mut config = EngineConfig::default();
        config.stars.count = 0;
        config.shooting_stars.count = 0;
        config.dust.count = 0;
        config.celestial.count = 0;
        config.nebula.count = 0;
        let field = Field::generate(&config, &mut fastrand::Rng::with_seed(9));
        assert!(field.is_empty());
    }

    #[test]
    fn test_every_value_in_range() {
        for seed in 0..20 {
            let (c, field) = field(seed);

            for s in &field.stars {
                assert!(POSITION.contains(s.x) && POSITION.contains(s.y));
                assert!((0.5..=3.5).contains(&s.size));
                assert!((0.3..=1.0).contains(&s.base_opacity));
                assert!(s.blink_period > 0.0 && c.stars.blink_period.contains(s.blink_period));
                assert!(c.stars.parallax.contains(s.parallax_intensity));
            }
            for s in &field.shooting_stars {
                assert!(POSITION.contains(s.x) && POSITION.contains(s.y));
                assert!(c.shooting_stars.length.contains(s.length));
                assert!(c.shooting_stars.angle.contains(s.angle_degrees));
                assert!(c.shooting_stars.speed.contains(s.speed));
                assert!(c.shooting_stars.delay.contains(s.start_delay));
                assert!(s.travel_duration > 0.0 && c.shooting_stars.duration.contains(s.travel_duration));
                assert!(c.shooting_stars.repeat_delay.contains(s.repeat_delay));
            }
            for d in &field.dust {
                assert!(POSITION.contains(d.x) && POSITION.contains(d.y));
                assert!(c.dust.size.contains(d.size));
                assert!(c.dust.alpha.contains(d.alpha));
                assert!(c.dust.drift.contains(d.drift.0) && c.dust.drift.contains(d.drift.1));
                assert!(c.dust.scale_peak.contains(d.scale_peak));
                assert!(d.drift_period > 0.0);
            }
            for o in &field.celestial {
                assert!(POSITION.contains(o.x) && POSITION.contains(o.y));
                assert!(c.celestial.size.contains(o.size));
                assert!(c.celestial.opacity.contains(o.opacity));
                assert!((0.0..360.0).contains(&o.rotation));
                assert!(o.rotation_speed > 0.0 && c.celestial.rotation_speed.contains(o.rotation_speed));
                assert!(c.celestial.parallax.contains(o.parallax_intensity));
            }
            for n in &field.nebula {
                assert!((0.0..=1.0).contains(&n.center.0) && (0.0..=1.0).contains(&n.center.1));
                assert!(n.radius > 0.0);
                assert!(n.opacity_level > 0.0 && n.opacity_level <= 1.0);
            }
        }
    }

    #[test]
    fn test_regeneration_gives_new_layout() {
        let config = EngineConfig::default();
        let mut rng = fastrand::Rng::with_seed(42);
        let a = Field::generate(&config, &mut rng);
        let b = Field::generate(&config, &mut rng);
        assert_ne!(a.stars, b.stars);
    }
}
