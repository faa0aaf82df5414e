// parallax.rs - Pointer-driven parallax vector
//
// One writer (the tracker, fed by pointer-move events) and any number of
// read-only handles. Writes land in a shared Cell, so every reader sees the
// latest pointer position within the same event-loop turn.

use std::cell::Cell;
use std::rc::Rc;

/// Pointer offset from viewport center, each axis in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParallaxVector {
    pub x: f32,
    pub y: f32,
}

impl ParallaxVector {
    pub const ZERO: ParallaxVector = ParallaxVector { x: 0.0, y: 0.0 };

    /// Map a pointer position to [-1, 1]^2
    ///
    /// Returns None for a degenerate viewport so the caller can keep the
    /// previous value.
    pub fn from_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) || !client_x.is_finite() || !client_y.is_finite() {
            return None;
        }
        Some(Self {
            x: ((client_x / width - 0.5) * 2.0).clamp(-1.0, 1.0),
            y: ((client_y / height - 0.5) * 2.0).clamp(-1.0, 1.0),
        })
    }

    /// Pixel offset for an entity; entities move against the pointer
    #[inline]
    pub fn offset(self, intensity: f32) -> (f32, f32) {
        (-self.x * intensity, -self.y * intensity)
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Sole writer of the parallax vector for one mounted background
#[derive(Debug)]
pub struct ParallaxTracker {
    shared: Rc<Cell<ParallaxVector>>,
}

impl ParallaxTracker {
    /// Fresh tracker starting at (0, 0)
    pub fn new() -> Self {
        Self { shared: Rc::new(Cell::new(ParallaxVector::ZERO)) }
    }

    /// Feed a pointer-move event; returns the vector now in effect
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32, width: f32, height: f32) -> ParallaxVector {
        if let Some(v) = ParallaxVector::from_pointer(client_x, client_y, width, height) {
            self.shared.set(v);
        }
        self.shared.get()
    }

    pub fn current(&self) -> ParallaxVector {
        self.shared.get()
    }

    pub fn reader(&self) -> ParallaxReader {
        ParallaxReader { shared: Rc::clone(&self.shared) }
    }
}

impl Default for ParallaxTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a tracker's vector
#[derive(Debug, Clone)]
pub struct ParallaxReader {
    shared: Rc<Cell<ParallaxVector>>,
}

impl ParallaxReader {
    /// A reader with no tracker behind it; always (0, 0)
    pub fn detached() -> Self {
        Self { shared: Rc::new(Cell::new(ParallaxVector::ZERO)) }
    }

    #[inline]
    pub fn get(&self) -> ParallaxVector {
        self.shared.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero() {
        assert_eq!(ParallaxVector::from_pointer(400.0, 300.0, 800.0, 600.0), Some(ParallaxVector::ZERO));
    }

    #[test]
    fn test_corners() {
        assert_eq!(
            ParallaxVector::from_pointer(0.0, 0.0, 800.0, 600.0),
            Some(ParallaxVector { x: -1.0, y: -1.0 })
        );
        assert_eq!(
            ParallaxVector::from_pointer(800.0, 600.0, 800.0, 600.0),
            Some(ParallaxVector { x: 1.0, y: 1.0 })
        );
    }

    #[test]
    fn test_outside_viewport_is_clamped() {
        let v = ParallaxVector::from_pointer(-50.0, 900.0, 800.0, 600.0).unwrap();
        assert_eq!(v, ParallaxVector { x: -1.0, y: 1.0 });
    }

    #[test]
    fn test_zero_viewport_keeps_last_value() {
        let mut tracker = ParallaxTracker::new();
        tracker.pointer_moved(800.0, 600.0, 800.0, 600.0);
        let v = tracker.pointer_moved(10.0, 10.0, 0.0, 0.0);
        assert_eq!(v, ParallaxVector { x: 1.0, y: 1.0 });
    }

    #[test]
    fn test_readers_see_write_immediately() {
        let mut tracker = ParallaxTracker::new();
        let a = tracker.reader();
        let b = a.clone();
        assert_eq!(a.get(), ParallaxVector::ZERO);

        tracker.pointer_moved(0.0, 600.0, 800.0, 600.0);
        assert_eq!(a.get(), ParallaxVector { x: -1.0, y: 1.0 });
        assert_eq!(b.get(), a.get());
    }

    #[test]
    fn test_offset_moves_against_pointer() {
        let v = ParallaxVector { x: 0.5, y: -1.0 };
        assert_eq!(v.offset(10.0), (-5.0, 10.0));
        assert_eq!(ParallaxVector::ZERO.offset(30.0).0, 0.0);
    }

    #[test]
    fn test_new_tracker_starts_at_zero() {
        let mut old = ParallaxTracker::new();
        old.pointer_moved(0.0, 0.0, 100.0, 100.0);
        let fresh = ParallaxTracker::new();
        assert_eq!(fresh.current(), ParallaxVector::ZERO);
    }
}
