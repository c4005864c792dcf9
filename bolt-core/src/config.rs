use serde::Deserialize;

use crate::error::{BoltError, Result};

/// Hard ceiling on refinement rounds. A bolt never holds more than
/// `2^MAX_REFINEMENT_ROUNDS` segments, however long it is.
pub const MAX_REFINEMENT_ROUNDS: u32 = 16;

/// Tunables for bolt and strike generation.
///
/// ### Fields
/// - `max_offset` - Displacement bound for the first refinement round; halved every round.
/// - `refinement_divisor` - Path length per refinement round (`round(len / divisor)`).
/// - `max_refinement_rounds` - Per-bolt cap on rounds, never above [`MAX_REFINEMENT_ROUNDS`].
/// - `branch_count_range` - Inclusive `(min, max)` number of branches per strike.
/// - `branch_angle_deg` - Angle by which branch directions are turned, sign chosen at random.
/// - `branch_length_scale` - Multiplier on the distance from a branch origin to the tail.
/// - `frame_count` - Number of flash frames in an animation.
/// - `main_intensity` - Line thickness of the main bolt.
/// - `branch_intensity` - Line thickness of branch bolts.
/// - `origin_y` - Vertical position of the strike origin (top of the canvas).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_offset: f64,
    pub refinement_divisor: f64,
    pub max_refinement_rounds: u32,
    pub branch_count_range: (u32, u32),
    pub branch_angle_deg: f64,
    pub branch_length_scale: f64,
    pub frame_count: u32,
    pub main_intensity: u32,
    pub branch_intensity: u32,
    pub origin_y: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_offset: 100.0,
            refinement_divisor: 80.0,
            max_refinement_rounds: 14,
            branch_count_range: (3, 6),
            branch_angle_deg: 30.0,
            branch_length_scale: 1.0,
            frame_count: 50,
            main_intensity: 3,
            branch_intensity: 2,
            origin_y: 10.0,
        }
    }
}

impl GeneratorConfig {
    /// Returns a copy with cosmetic values clamped into range.
    ///
    /// Intensities are raised to at least `1`, the branch range is
    /// reordered so that `min <= max`, and the round cap is lowered to
    /// [`MAX_REFINEMENT_ROUNDS`]. Values that have no sensible clamp are
    /// rejected.
    ///
    /// A negative `branch_length_scale` is raised to `0`.
    ///
    /// ### Errors
    /// [`BoltError::InvalidConfig`] if `refinement_divisor` is not a positive
    /// finite number, if `branch_angle_deg`, `branch_length_scale` or
    /// `origin_y` is not finite, or if `max_offset` fails [`check_offset`].
    pub fn sanitized(&self) -> Result<Self> {
        if !(self.refinement_divisor.is_finite() && self.refinement_divisor > 0.0) {
            return Err(BoltError::InvalidConfig(format!(
                "refinement_divisor must be positive, got {}",
                self.refinement_divisor
            )));
        }
        for (name, value) in [
            ("branch_angle_deg", self.branch_angle_deg),
            ("branch_length_scale", self.branch_length_scale),
            ("origin_y", self.origin_y),
        ] {
            if !value.is_finite() {
                return Err(BoltError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        check_offset(self.max_offset)?;

        let mut cfg = *self;
        if cfg.branch_length_scale < 0.0 {
            log::warn!(
                "branch_length_scale {} is negative, clamping to 0",
                cfg.branch_length_scale
            );
            cfg.branch_length_scale = 0.0;
        }
        if cfg.max_refinement_rounds > MAX_REFINEMENT_ROUNDS {
            log::warn!(
                "max_refinement_rounds {} exceeds ceiling, clamping to {}",
                cfg.max_refinement_rounds,
                MAX_REFINEMENT_ROUNDS
            );
            cfg.max_refinement_rounds = MAX_REFINEMENT_ROUNDS;
        }
        let (lo, hi) = cfg.branch_count_range;
        if lo > hi {
            log::warn!("branch_count_range ({lo}, {hi}) is reversed, swapping");
            cfg.branch_count_range = (hi, lo);
        }
        cfg.max_offset = cfg.max_offset.abs();
        cfg.main_intensity = cfg.main_intensity.max(1);
        cfg.branch_intensity = cfg.branch_intensity.max(1);
        Ok(cfg)
    }

    /// Number of refinement rounds for a bolt spanning `length` units.
    ///
    /// Longer bolts get more rounds, `round(length / refinement_divisor)`,
    /// capped at `max_refinement_rounds` and [`MAX_REFINEMENT_ROUNDS`].
    pub fn refinement_rounds_for(&self, length: f64) -> u32 {
        let cap = self.max_refinement_rounds.min(MAX_REFINEMENT_ROUNDS);
        let rounds = (length / self.refinement_divisor).round();
        if rounds.is_nan() || rounds <= 0.0 {
            0
        } else if rounds >= cap as f64 {
            cap
        } else {
            rounds as u32
        }
    }
}

/// Checks that displacement draws from `[-max_offset, max_offset]` are possible.
///
/// ### Errors
/// [`BoltError::InvalidConfig`] if `max_offset` is not finite or the range
/// width `2 * |max_offset|` overflows.
pub fn check_offset(max_offset: f64) -> Result<()> {
    if (2.0 * max_offset.abs()).is_finite() {
        Ok(())
    } else {
        Err(BoltError::InvalidConfig(format!(
            "max_offset must be finite and at most {}, got {max_offset}",
            f64::MAX / 2.0
        )))
    }
}
