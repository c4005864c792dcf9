//! Midpoint-displacement bolt generation.
//!
//! A bolt starts as the single segment `origin -> tail`. Every refinement
//! round splits each segment at its midpoint and pushes the new vertex
//! sideways, along the segment's perpendicular, by a uniform draw from
//! `[-offset, offset]`. The offset halves after each round, so the path
//! converges to a bounded jagged line.

use rand::Rng;

use crate::{
    config::{self, MAX_REFINEMENT_ROUNDS},
    error::{BoltError, Result},
    types::{Segment, Vector2},
    vector,
};

/// Line thickness given to a freshly generated bolt.
pub const DEFAULT_INTENSITY: u32 = 1;

/// One continuous jagged path.
///
/// Segments are contiguous: `segments[i].end == segments[i + 1].start`,
/// and there is always at least one segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    segments: Vec<Segment>,
    intensity: u32,
}

impl Bolt {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    /// Returns the bolt with its line thickness replaced (at least `1`).
    pub fn with_intensity(mut self, intensity: u32) -> Self {
        self.intensity = intensity.max(1);
        self
    }

    pub fn origin(&self) -> Vector2 {
        self.segments[0].start
    }

    pub fn tail(&self) -> Vector2 {
        self.segments[self.segments.len() - 1].end
    }

    /// Segments as `(x0, y0, x1, y1)` in path order.
    pub fn quadruples(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.segments.iter().map(Segment::quadruple)
    }
}

/// Generates a jagged bolt from `origin` to `tail`.
///
/// The result has exactly `2^refinement_rounds` segments. Rounds above
/// [`MAX_REFINEMENT_ROUNDS`] are clamped. With zero rounds the single
/// segment `(origin, tail)` is returned untouched.
///
/// ### Parameters
/// - `origin` - First point of the path.
/// - `tail` - Last point of the path.
/// - `max_offset` - Displacement bound for the first round. Its sign is ignored.
/// - `refinement_rounds` - Number of subdivision passes.
/// - `rng` - Source of the uniform displacement draws.
///
/// ### Errors
/// - [`BoltError::DegenerateBolt`] if `origin == tail`.
/// - [`BoltError::InvalidConfig`] if an endpoint is not finite, or if
///   `max_offset` is too large for `[-max_offset, max_offset]` to have a
///   finite width.
pub fn generate_bolt(
    origin: Vector2,
    tail: Vector2,
    max_offset: f64,
    refinement_rounds: u32,
    rng: &mut impl Rng,
) -> Result<Bolt> {
    if !(origin.is_finite() && tail.is_finite()) {
        return Err(BoltError::InvalidConfig(format!(
            "bolt endpoints must be finite, got {origin} and {tail}"
        )));
    }
    if origin == tail {
        return Err(BoltError::DegenerateBolt { origin });
    }
    config::check_offset(max_offset)?;

    let rounds = if refinement_rounds > MAX_REFINEMENT_ROUNDS {
        log::warn!(
            "refinement_rounds {refinement_rounds} exceeds ceiling, clamping to {MAX_REFINEMENT_ROUNDS}"
        );
        MAX_REFINEMENT_ROUNDS
    } else {
        refinement_rounds
    };

    let mut segments = vec![Segment::new(origin, tail)];
    let mut offset = max_offset.abs();
    for _ in 0..rounds {
        segments = subdivide(&segments, offset, rng);
        offset /= 2.0;
    }

    Ok(Bolt {
        segments,
        intensity: DEFAULT_INTENSITY,
    })
}

/// Performs one refinement round.
///
/// Every segment `(start, end)` becomes `(start, mid')` and `(mid', end)`,
/// where `mid'` is the midpoint moved along the segment's perpendicular by
/// a uniform draw from `[-offset, offset]`. A zero-length segment is split
/// without displacement.
///
/// ### Panics
/// Panics if `2 * offset` is not finite. [`generate_bolt`] rejects such
/// offsets before subdividing.
pub fn subdivide(segments: &[Segment], offset: f64, rng: &mut impl Rng) -> Vec<Segment> {
    let offset = offset.abs();
    let mut out = Vec::with_capacity(segments.len() * 2);

    for seg in segments {
        let mid = vector::midpoint(seg.start, seg.end);
        let mid = match vector::perpendicular(seg.delta()) {
            Ok(perp) => mid + perp * rng.random_range(-offset..=offset),
            Err(_) => mid,
        };

        out.push(Segment::new(seg.start, mid));
        out.push(Segment::new(mid, seg.end));
    }
    out
}
