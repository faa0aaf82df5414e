// scene.rs - Tween-driven background entities
//
// Turns a Field into timeline tracks, then evaluates them per frame together
// with the parallax springs and encodes the result into a flat f32 buffer
// the page reads straight out of wasm memory.
//
// Output encoding (STRIDE floats per entity, in slot order):
//   0  dx        px, includes parallax
//   1  dy        px, includes parallax
//   2  opacity
//   3  scale
//   4  rotation  degrees
//
// Shooting stars travel along their own rotated axis, so their dx is
// measured along the streak rather than the screen x axis.

use serde::Serialize;

use crate::field::{CelestialObject, DustParticle, Field, ROTATION_CYCLE, ShootingStar, Star};
use crate::parallax::ParallaxReader;
use crate::timeline::{Property, Timeline};
use crate::tween::{Easing, Repeat, Spring, Tween};

pub const STRIDE: usize = 5;

// Longest frame gap the springs integrate over (tab switches etc.)
const MAX_FRAME_DT: f32 = 0.1;

const GLOW_PERIOD: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum EntityKind {
    Star = 0,
    ShootingStar = 1,
    Dust = 2,
    Celestial = 3,
    Glow = 4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityState {
    pub dx: f32,
    pub dy: f32,
    pub opacity: f32,
    pub scale: f32,
    pub rotation: f32,
}

impl EntityState {
    const fn resting(opacity: f32, rotation: f32) -> Self {
        Self { dx: 0.0, dy: 0.0, opacity, scale: 1.0, rotation }
    }

    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::OffsetX => self.dx = value,
            Property::OffsetY => self.dy = value,
            Property::Opacity => self.opacity = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    kind: EntityKind,
    /// Index into the Field collection of this kind
    index: usize,
    base: EntityState,
    parallax: Option<f32>,
    springs: (Spring, Spring),
}

/// Flat f32 output buffer
pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new(entities: usize) -> Self {
        Self { out: vec![0.0; entities * STRIDE] }
    }

    #[inline]
    fn put(&mut self, slot: usize, s: &EntityState) {
        let o = slot * STRIDE;
        self.out[o..o + STRIDE].copy_from_slice(&[s.dx, s.dy, s.opacity, s.scale, s.rotation]);
    }

    pub fn get(&self, slot: usize) -> Option<EntityState> {
        let o = slot * STRIDE;
        let v = self.out.get(o..o + STRIDE)?;
        Some(EntityState { dx: v[0], dy: v[1], opacity: v[2], scale: v[3], rotation: v[4] })
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}

/// All tween-driven entities of one mounted background
pub struct AmbientScene {
    slots: Vec<Slot>,
    timeline: Timeline,
    parallax: ParallaxReader,
    encoder: Encoder,
    last_time: Option<f32>,
}

impl AmbientScene {
    pub fn new(field: &Field, parallax: ParallaxReader) -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            timeline: Timeline::new(),
            parallax,
            encoder: Encoder::new(0),
            last_time: None,
        };

        for (i, star) in field.stars.iter().enumerate() {
            scene.add_star(i, star);
        }
        for (i, shooting) in field.shooting_stars.iter().enumerate() {
            scene.add_shooting_star(i, shooting);
        }
        for (i, dust) in field.dust.iter().enumerate() {
            scene.add_dust(i, dust);
        }
        for (i, object) in field.celestial.iter().enumerate() {
            scene.add_celestial(i, object);
        }
        scene.add_glow();

        scene.encoder = Encoder::new(scene.slots.len());
        for (i, slot) in scene.slots.iter().enumerate() {
            scene.encoder.put(i, &slot.base);
        }
        log::debug!("scene: {} entities, {} tracks", scene.slots.len(), scene.timeline.len());
        scene
    }

    fn slot(&mut self, kind: EntityKind, index: usize, base: EntityState, parallax: Option<f32>) -> usize {
        self.slots.push(Slot { kind, index, base, parallax, springs: (Spring::PARALLAX, Spring::PARALLAX) });
        self.slots.len() - 1
    }

    fn add_star(&mut self, index: usize, star: &Star) {
        let o = star.base_opacity;
        let slot = self.slot(EntityKind::Star, index, EntityState::resting(o, 0.0), Some(star.parallax_intensity));
        if star.blinking {
            let period = star.blink_period;
            self.timeline.push(slot, Property::Opacity, Tween::new([o, o * 0.3, o], period).forever_reverse());
            self.timeline.push(slot, Property::Scale, Tween::new([1.0, 1.2, 1.0], period).forever_reverse());
        }
    }

    fn add_shooting_star(&mut self, index: usize, s: &ShootingStar) {
        let slot = self.slot(EntityKind::ShootingStar, index, EntityState::resting(0.0, s.angle_degrees), None);
        let pass = |keys: Vec<f32>| {
            Tween::new(keys, s.travel_duration)
                .delay(s.start_delay)
                .repeat(Repeat::Forever)
                .repeat_delay(s.repeat_delay)
        };
        self.timeline.push(slot, Property::OffsetX, pass(vec![0.0, s.travel()]));
        self.timeline.push(slot, Property::Opacity, pass(vec![0.0, 0.8, 0.0]));
    }

    fn add_dust(&mut self, index: usize, d: &DustParticle) {
        let slot = self.slot(EntityKind::Dust, index, EntityState::resting(0.1, 0.0), None);
        let period = d.drift_period;
        self.timeline.push(slot, Property::OffsetX, Tween::new([0.0, d.drift.0], period).forever_reverse());
        self.timeline.push(slot, Property::OffsetY, Tween::new([0.0, d.drift.1], period).forever_reverse());
        self.timeline.push(slot, Property::Opacity, Tween::new([0.1, 0.4, 0.1], period).forever_reverse());
        self.timeline
            .push(slot, Property::Scale, Tween::new([1.0, d.scale_peak, 1.0], period).forever_reverse());
    }

    fn add_celestial(&mut self, index: usize, c: &CelestialObject) {
        let base = EntityState::resting(c.opacity, c.rotation);
        let slot = self.slot(EntityKind::Celestial, index, base, Some(c.parallax_intensity));
        let spin = Tween::new([c.rotation, c.end_rotation()], ROTATION_CYCLE)
            .easing(Easing::Linear)
            .repeat(Repeat::Forever);
        self.timeline.push(slot, Property::Rotation, spin);
    }

    // Pulsating energy disc in the middle of the viewport
    fn add_glow(&mut self) {
        let slot = self.slot(EntityKind::Glow, 0, EntityState::resting(0.3, 0.0), None);
        self.timeline.push(slot, Property::Opacity, Tween::new([0.3, 0.7, 0.3], GLOW_PERIOD).forever_reverse());
        self.timeline.push(slot, Property::Scale, Tween::new([1.0, 1.2, 1.0], GLOW_PERIOD).forever_reverse());
    }

    /// Evaluate every entity at `time` seconds since mount
    ///
    /// After cancel() the buffer is left untouched.
    pub fn frame(&mut self, time: f32) -> &[f32] {
        if self.timeline.is_cancelled() {
            return self.encoder.as_slice();
        }

        let dt = match self.last_time {
            Some(last) => (time - last).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(time);

        let mut states: Vec<EntityState> = self.slots.iter().map(|s| s.base).collect();
        for (slot, property, value) in self.timeline.sample(time) {
            states[slot].set(property, value);
        }

        let vector = self.parallax.get();
        for (slot, state) in self.slots.iter_mut().zip(states.iter_mut()) {
            let Some(intensity) = slot.parallax else { continue };
            let (tx, ty) = vector.offset(intensity);
            slot.springs.0.target = tx;
            slot.springs.1.target = ty;
            slot.springs.0.step(dt);
            slot.springs.1.step(dt);
            state.dx += slot.springs.0.value;
            state.dy += slot.springs.1.value;
        }

        for (i, state) in states.iter().enumerate() {
            self.encoder.put(i, state);
        }
        self.encoder.as_slice()
    }

    /// Stop every tween; further frames change nothing
    pub fn cancel(&mut self) {
        self.timeline.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.timeline.is_cancelled()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind(&self, slot: usize) -> Option<(EntityKind, usize)> {
        self.slots.get(slot).map(|s| (s.kind, s.index))
    }

    /// Kind code per slot, for the page to map slots to elements
    pub fn kinds(&self) -> Vec<u8> {
        self.slots.iter().map(|s| s.kind as u8).collect()
    }

    pub fn state(&self, slot: usize) -> Option<EntityState> {
        self.encoder.get(slot)
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}
