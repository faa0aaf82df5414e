// links.rs - Proximity links between constellation points
//
// Two points closer than LINK_DISTANCE are joined by a line whose opacity
// falls off linearly with distance.

use super::Constellation;

pub const LINK_DISTANCE: f32 = 150.0;
pub const LINK_MAX_OPACITY: f32 = 0.1;
pub const LINK_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// Opacity of a link at `distance`, or None if the points are too far apart
#[inline]
pub fn link_opacity(distance: f32) -> Option<f32> {
    if distance < LINK_DISTANCE {
        Some(LINK_MAX_OPACITY * (1.0 - distance / LINK_DISTANCE))
    } else {
        None
    }
}

/// Collect every linked pair (a < b) into `out`
pub fn collect_links(points: &Constellation, out: &mut Vec<Link>) {
    out.clear();
    let n = points.len();
    for a in 0..n {
        for b in (a + 1)..n {
            let dx = points.x[a] - points.x[b];
            let dy = points.y[a] - points.y[b];
            let distance = (dx * dx + dy * dy).sqrt();
            if let Some(opacity) = link_opacity(distance) {
                out.push(Link { a, b, distance, opacity });
            }
        }
    }
}
