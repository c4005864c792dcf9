use glam::DVec2;

/// A point or direction in canvas space.
///
/// Double precision keeps deep refinement stable: after a dozen rounds the
/// per-segment jitter is a few hundredths of a pixel.
pub type Vector2 = DVec2;

/// Index of a segment inside [`crate::bolt::Bolt::segments`].
///
/// Only meaningful for the bolt it was taken from.
pub type SegmentId = usize;

/// A directed edge from `start` to `end`.
///
/// Direction matters for the perpendicular used during displacement,
/// not for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vector2,
    pub end: Vector2,
}

impl Segment {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[inline]
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }

    /// Segment as `(x0, y0, x1, y1)`.
    #[inline]
    pub fn quadruple(&self) -> (f64, f64, f64, f64) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }
}
