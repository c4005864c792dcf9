//! Vector helpers used by the bolt generator.
//!
//! Component-wise arithmetic (add, subtract, scale, divide) comes from the
//! operators on [`Vector2`]. This module adds the handful of operations whose
//! behaviour needs pinning down: the angle convention, a normalization that
//! refuses zero-length input, and rotation through polar form.

use std::f64::consts::FRAC_PI_2;

use crate::{
    error::{BoltError, Result},
    types::Vector2,
};

/// Returns the angle of `v` in radians, `atan2(y, x)`, in `(-π, π]`.
#[inline]
pub fn angle(v: Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Returns `v` scaled to unit length.
///
/// ### Errors
/// [`BoltError::DegenerateVector`] if `v` has zero length.
pub fn normalize(v: Vector2) -> Result<Vector2> {
    let len = v.length();
    if len == 0.0 {
        return Err(BoltError::DegenerateVector);
    }
    Ok(v / len)
}

/// Rotates `v` counter-clockwise by `theta` radians.
///
/// The rotation is computed in polar form: the new angle is
/// `angle(v) + theta` and the length is preserved. This agrees with the
/// usual rotation matrix up to floating-point rounding.
pub fn rotate(v: Vector2, theta: f64) -> Vector2 {
    let len = v.length();
    let (sin, cos) = (angle(v) + theta).sin_cos();
    Vector2::new(cos * len, sin * len)
}

/// Returns the point halfway between `a` and `b`.
#[inline]
pub fn midpoint(a: Vector2, b: Vector2) -> Vector2 {
    (a + b) / 2.0
}

/// Unit vector perpendicular to `v`, rotated a quarter turn counter-clockwise.
///
/// ### Errors
/// [`BoltError::DegenerateVector`] if `v` has zero length.
pub fn perpendicular(v: Vector2) -> Result<Vector2> {
    Ok(rotate(normalize(v)?, FRAC_PI_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(
            (a - b).length() < EPS,
            "expected {b:?}, got {a:?} (diff {})",
            (a - b).length()
        );
    }

    #[test]
    fn angle_follows_atan2_convention() {
        assert_eq!(angle(Vector2::new(1.0, 0.0)), 0.0);
        assert!((angle(Vector2::new(0.0, 1.0)) - FRAC_PI_2).abs() < EPS);
        assert!((angle(Vector2::new(-1.0, 0.0)) - PI).abs() < EPS);
        assert!((angle(Vector2::new(0.0, -1.0)) + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn normalize_returns_unit_vector() {
        let n = normalize(Vector2::new(3.0, 4.0)).unwrap();
        assert_close(n, Vector2::new(0.6, 0.8));
        assert!((n.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(normalize(Vector2::ZERO), Err(BoltError::DegenerateVector));
    }

    #[test]
    fn rotate_quarter_turn_and_back_is_identity() {
        let v = Vector2::new(123.456, -78.9);
        let back = rotate(rotate(v, FRAC_PI_2), -FRAC_PI_2);
        assert_close(back, v);
    }

    #[test]
    fn rotate_matches_rotation_matrix() {
        let v = Vector2::new(-2.5, 7.25);
        for theta in [0.0, 0.3, FRAC_PI_2, 2.0, -1.1, PI] {
            let expected = Vector2::from_angle(theta).rotate(v);
            assert_close(rotate(v, theta), expected);
        }
    }

    #[test]
    fn rotate_preserves_length() {
        let v = Vector2::new(10.0, 0.0);
        let r = rotate(v, 1.234);
        assert!((r.length() - 10.0).abs() < EPS);
    }

    #[test]
    fn midpoint_is_average_of_endpoints() {
        let m = midpoint(Vector2::new(10.0, 10.0), Vector2::new(500.0, 500.0));
        assert_eq!(m, Vector2::new(255.0, 255.0));
    }

    #[test]
    fn perpendicular_turns_left() {
        // (1, 0) rotated a quarter turn counter-clockwise is (0, 1).
        assert_close(
            perpendicular(Vector2::new(5.0, 0.0)).unwrap(),
            Vector2::new(0.0, 1.0),
        );
        assert!(perpendicular(Vector2::ZERO).is_err());
    }
}
