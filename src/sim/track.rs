//! Oval track geometry
//!
//! The track is a stadium shape in a `width x height` viewport: two
//! half-ellipses centred at `width/3` and `2*width/3` joined by a full-height
//! rectangle. The infield is the same shape scaled down by `1/size`. A point
//! is on the asphalt when it is inside the outer boundary and outside the
//! infield. Collision is a pure containment test, no pixel sampling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which side of the track's vertical midline a point is on.
///
/// Crossing the midline is the lap-counting proxy: a full lap is two
/// crossings (top straight and bottom straight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackSide {
    Left,
    Right,
}

/// The oval track in viewport coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Viewport width (pixels)
    pub width: f32,
    /// Viewport height (pixels)
    pub height: f32,
    /// Infield scale divisor; larger values leave a wider asphalt band
    pub size: f32,
}

/// Scaled ellipse field value: negative inside, zero on the boundary.
///
/// Not a true distance - the value is in normalized ellipse space - but the
/// sign is all the containment tests need.
#[inline]
fn ellipse_field(p: Vec2, center: Vec2, rx: f32, ry: f32) -> f32 {
    let d = p - center;
    (d.x / rx) * (d.x / rx) + (d.y / ry) * (d.y / ry) - 1.0
}

impl Track {
    pub fn new(width: f32, height: f32, size: f32) -> Self {
        Self {
            width,
            height,
            size,
        }
    }

    /// X coordinate of the left ellipse centre / straight start
    #[inline]
    pub fn straight_left(&self) -> f32 {
        self.width / 3.0
    }

    /// X coordinate of the right ellipse centre / straight end
    #[inline]
    pub fn straight_right(&self) -> f32 {
        2.0 * self.width / 3.0
    }

    /// X coordinate of the vertical midline (start/finish line)
    #[inline]
    pub fn midline_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Outer boundary semi-axes
    #[inline]
    pub fn outer_radii(&self) -> (f32, f32) {
        (self.width / 3.0, self.height / 2.0)
    }

    /// Infield semi-axes (outer radii scaled by `1/size`)
    #[inline]
    pub fn infield_radii(&self) -> (f32, f32) {
        let (rx, ry) = self.outer_radii();
        (rx / self.size, ry / self.size)
    }

    /// Is the point inside the outer stadium boundary?
    fn contains_outer(&self, p: Vec2) -> bool {
        let (rx, ry) = self.outer_radii();
        let cy = self.height / 2.0;

        if p.x < self.straight_left() {
            ellipse_field(p, Vec2::new(self.straight_left(), cy), rx, ry) <= 0.0
        } else if p.x > self.straight_right() {
            ellipse_field(p, Vec2::new(self.straight_right(), cy), rx, ry) <= 0.0
        } else {
            p.y >= 0.0 && p.y <= self.height
        }
    }

    /// Is the point inside the infield (grass)?
    fn contains_infield(&self, p: Vec2) -> bool {
        let (rx, ry) = self.infield_radii();
        let cy = self.height / 2.0;

        if p.x < self.straight_left() {
            ellipse_field(p, Vec2::new(self.straight_left(), cy), rx, ry) < 0.0
        } else if p.x > self.straight_right() {
            ellipse_field(p, Vec2::new(self.straight_right(), cy), rx, ry) < 0.0
        } else {
            (p.y - cy).abs() < ry
        }
    }

    /// Is the point on the asphalt?
    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_outer(p) && !self.contains_infield(p)
    }

    /// Side of the vertical midline for an x coordinate.
    ///
    /// The midline itself counts as `Left`, so players that spawn exactly on
    /// the start line switch sides on their first frame of movement.
    #[inline]
    pub fn side_of(&self, x: f32) -> TrackSide {
        if x > self.midline_x() {
            TrackSide::Right
        } else {
            TrackSide::Left
        }
    }

    /// Height of the asphalt band on each straight
    #[inline]
    pub fn straight_band(&self) -> f32 {
        (self.height - self.height / self.size) / 2.0
    }

    /// Starting grid: `n` positions evenly gapped across the bottom straight,
    /// all on the start line.
    pub fn start_positions(&self, n: usize) -> Vec<Vec2> {
        let band = self.straight_band();
        let gap = band / (n as f32 + 1.0);
        let band_top = self.height - band;

        (0..n)
            .map(|i| Vec2::new(self.midline_x(), band_top + gap * (i as f32 + 1.0)))
            .collect()
    }

    /// Start line segment on the bottom straight (for rendering)
    pub fn start_line(&self) -> (Vec2, Vec2) {
        let (_, ry) = self.infield_radii();
        let x = self.midline_x();
        (
            Vec2::new(x, self.height / 2.0 + ry),
            Vec2::new(x, self.height),
        )
    }
}
