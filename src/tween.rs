// tween.rs - Keyframe tweens and springs
//
// A Tween is plain data: keyframes, duration, delay and repeat behaviour.
// Sampling is a pure function of elapsed seconds, so nothing ever has to
// step a tween forward; the timeline just asks for the value at time t.
//
// Springs are the exception: they integrate toward a moving target (the
// parallax offset) and are stepped with the frame delta.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            // Cubic in-out
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Never,
    Times(u32),
    Forever,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Restart from the first keyframe
    Loop,
    /// Play odd cycles backwards
    Reverse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub keyframes: Vec<f32>,
    /// Seconds per cycle, strictly positive
    pub duration: f32,
    /// Seconds before the first cycle
    pub delay: f32,
    pub repeat: Repeat,
    pub mode: RepeatMode,
    /// Seconds of rest between cycles
    pub repeat_delay: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(keyframes: impl Into<Vec<f32>>, duration: f32) -> Self {
        let keyframes = keyframes.into();
        debug_assert!(!keyframes.is_empty(), "tween needs at least one keyframe");
        debug_assert!(duration > 0.0 && duration.is_finite(), "tween duration must be positive");
        Self {
            keyframes,
            duration,
            delay: 0.0,
            repeat: Repeat::Never,
            mode: RepeatMode::Loop,
            repeat_delay: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn mode(mut self, mode: RepeatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn repeat_delay(mut self, seconds: f32) -> Self {
        self.repeat_delay = seconds.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Shorthand for the ping-pong loops used everywhere in the background
    pub fn forever_reverse(self) -> Self {
        self.repeat(Repeat::Forever).mode(RepeatMode::Reverse)
    }

    fn cycles(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Never => Some(1),
            Repeat::Times(n) => Some(n as u64 + 1),
            Repeat::Forever => None,
        }
    }

    /// Cycle index and linear progress in [0, 1] at time `t`
    fn position(&self, t: f32) -> (u64, f32) {
        let local = t - self.delay;
        if local <= 0.0 {
            return (0, 0.0);
        }

        let period = self.duration + self.repeat_delay;
        let cycle = (local / period).floor() as u64;

        if let Some(total) = self.cycles() {
            if cycle >= total {
                return (total - 1, 1.0);
            }
        }

        let within = local - cycle as f32 * period;
        (cycle, (within / self.duration).min(1.0))
    }

    pub fn is_finished(&self, t: f32) -> bool {
        match self.cycles() {
            None => false,
            Some(total) => t - self.delay >= total as f32 * (self.duration + self.repeat_delay) - self.repeat_delay,
        }
    }

    pub fn sample(&self, t: f32) -> f32 {
        let (cycle, mut p) = self.position(t);
        if self.mode == RepeatMode::Reverse && cycle % 2 == 1 {
            p = 1.0 - p;
        }
        interpolate(&self.keyframes, p, self.easing)
    }
}

/// Evenly spaced keyframe interpolation, eased within each segment
fn interpolate(keys: &[f32], p: f32, easing: Easing) -> f32 {
    match keys {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (keys.len() - 1) as f32;
            let scaled = p.clamp(0.0, 1.0) * segments;
            let i = (scaled.floor() as usize).min(keys.len() - 2);
            let frac = easing.apply(scaled - i as f32);
            keys[i] + (keys[i + 1] - keys[i]) * frac
        }
    }
}

/// Damped spring following a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
}

const SPRING_SUBSTEP: f32 = 1.0 / 240.0;
const SPRING_REST: f32 = 1e-3;

impl Spring {
    /// Parallax follow spring (stiffness 50, damping 30)
    pub const PARALLAX: Spring = Spring::new(50.0, 30.0);

    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping, mass: 1.0, value: 0.0, velocity: 0.0, target: 0.0 }
    }

    /// Advance by `dt` seconds using fixed substeps
    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SPRING_REST && self.velocity.abs() < SPRING_REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_two_keyframes() {
        let t = Tween::new([0.0, 10.0], 2.0).easing(Easing::Linear);
        assert_eq!(t.sample(0.0), 0.0);
        assert_relative_eq!(t.sample(1.0), 5.0);
        assert_eq!(t.sample(2.0), 10.0);
        assert_eq!(t.sample(50.0), 10.0);
        assert!(t.is_finished(2.0));
        assert!(!t.is_finished(1.9));
    }

    #[test]
    fn test_three_keyframes_peak_in_middle() {
        let t = Tween::new([1.0, 0.3, 1.0], 4.0).easing(Easing::Linear);
        assert_relative_eq!(t.sample(2.0), 0.3);
        assert_relative_eq!(t.sample(1.0), 0.65);
        assert_relative_eq!(t.sample(3.0), 0.65);
    }

    #[test]
    fn test_delay_holds_first_keyframe() {
        let t = Tween::new([0.0, 1.0], 1.0).delay(5.0).easing(Easing::Linear);
        assert_eq!(t.sample(0.0), 0.0);
        assert_eq!(t.sample(4.99), 0.0);
        assert_relative_eq!(t.sample(5.5), 0.5);
    }

    #[test]
    fn test_reverse_mode_plays_back() {
        let t = Tween::new([0.0, 10.0], 1.0).easing(Easing::Linear).forever_reverse();
        assert_relative_eq!(t.sample(0.25), 2.5);
        assert_relative_eq!(t.sample(1.25), 7.5);
        assert_relative_eq!(t.sample(2.25), 2.5);
        assert!(!t.is_finished(1e6));
    }

    #[test]
    fn test_loop_with_repeat_delay() {
        let t = Tween::new([0.0, 1.0], 1.0)
            .easing(Easing::Linear)
            .repeat(Repeat::Forever)
            .repeat_delay(3.0);
        assert_relative_eq!(t.sample(0.5), 0.5);
        // Resting at the end of the cycle
        assert_eq!(t.sample(2.0), 1.0);
        // Next cycle starts at 4.0
        assert_relative_eq!(t.sample(4.5), 0.5);
    }

    #[test]
    fn test_repeat_times_ends_on_last_cycle() {
        let t = Tween::new([0.0, 1.0], 1.0).easing(Easing::Linear).repeat(Repeat::Times(1)).mode(RepeatMode::Reverse);
        assert!(!t.is_finished(1.5));
        assert!(t.is_finished(2.0));
        // Second cycle runs backwards, so it comes to rest at the start
        assert_eq!(t.sample(10.0), 0.0);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(Easing::EaseInOut.apply(0.0), 0.0);
        assert_eq!(Easing::EaseInOut.apply(1.0), 1.0);
        assert_relative_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn test_easing_restarts_each_segment() {
        let t = Tween::new([0.0, 1.0, 0.0], 1.0);
        assert_relative_eq!(t.sample(0.25), 0.5);
        assert_relative_eq!(t.sample(0.75), 0.5);
        assert_relative_eq!(t.sample(0.125), Easing::EaseInOut.apply(0.25));
        assert_relative_eq!(t.sample(0.5), 1.0);
    }

    #[test]
    fn test_single_keyframe_is_constant() {
        let t = Tween::new([0.7], 1.0);
        assert_eq!(t.sample(0.3), 0.7);
    }

    #[test]
    fn test_spring_converges_to_target() {
        let mut s = Spring::PARALLAX;
        s.target = -15.0;
        for _ in 0..600 {
            s.step(1.0 / 60.0);
        }
        assert_eq!(s.value, -15.0);
        assert!(s.is_settled());
    }

    #[test]
    fn test_spring_does_not_overshoot() {
        // Overdamped: damping^2 > 4 * stiffness * mass
        let mut s = Spring::PARALLAX;
        s.target = 10.0;
        for _ in 0..300 {
            s.step(1.0 / 60.0);
            assert!(s.value <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_spring_ignores_negative_dt() {
        let mut s = Spring::PARALLAX;
        s.target = 1.0;
        s.step(-1.0);
        assert_eq!(s.value, 0.0);
    }
}
