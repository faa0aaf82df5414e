// timeline.rs - Tween interpreter
//
// Holds every (entity, property, tween) track of a scene and evaluates them
// at a given time. Cancelling is final: a cancelled timeline yields nothing,
// so no entity keeps animating after its owner is torn down.

use crate::tween::Tween;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    OffsetX,
    OffsetY,
    Opacity,
    Scale,
    Rotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub entity: usize,
    pub property: Property,
    pub tween: Tween,
}

#[derive(Debug, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    cancelled: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: usize, property: Property, tween: Tween) {
        if self.cancelled {
            return;
        }
        self.tracks.push(Track { entity, property, tween });
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Values of every track at `t` seconds
    pub fn sample(&self, t: f32) -> impl Iterator<Item = (usize, Property, f32)> + '_ {
        let tracks: &[Track] = if self.cancelled { &[] } else { &self.tracks };
        tracks.iter().map(move |track| (track.entity, track.property, track.tween.sample(t)))
    }

    /// True once every finite track has played out
    pub fn is_finished(&self, t: f32) -> bool {
        self.cancelled || self.tracks.iter().all(|track| track.tween.is_finished(t))
    }

    /// Stop all in-flight tweens for good
    pub fn cancel(&mut self) {
        if !self.cancelled {
            log::debug!("timeline cancelled with {} tracks", self.tracks.len());
        }
        self.cancelled = true;
        self.tracks.clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::{Easing, Repeat};

    #[test]
    fn test_sample_yields_every_track() {
        let mut timeline = Timeline::new();
        timeline.push(0, Property::Opacity, Tween::new([0.0, 1.0], 1.0).easing(Easing::Linear));
        timeline.push(3, Property::Scale, Tween::new([1.0, 2.0], 2.0).easing(Easing::Linear));

        let values: Vec<_> = timeline.sample(0.5).collect();
        assert_eq!(values, vec![(0, Property::Opacity, 0.5), (3, Property::Scale, 1.25)]);
    }

    #[test]
    fn test_cancel_silences_timeline() {
        let mut timeline = Timeline::new();
        timeline.push(0, Property::Rotation, Tween::new([0.0, 360.0], 120.0).repeat(Repeat::Forever));
        assert!(!timeline.is_finished(1000.0));

        timeline.cancel();
        timeline.cancel();
        assert_eq!(timeline.sample(5.0).count(), 0);
        assert!(timeline.is_finished(0.0));

        timeline.push(1, Property::Opacity, Tween::new([0.0, 1.0], 1.0));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_finite_timeline_finishes() {
        let mut timeline = Timeline::new();
        timeline.push(0, Property::OffsetX, Tween::new([0.0, 5.0], 1.0).delay(1.0));
        assert!(!timeline.is_finished(1.5));
        assert!(timeline.is_finished(2.0));
    }
}
