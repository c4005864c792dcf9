//! Strike planning: a main bolt plus angle-offset branches.
//!
//! A strike runs from a random origin near the top of the canvas to a tail
//! below it. Branches start at the end of randomly chosen, distinct main
//! segments. Each branch heads along the direction from the *strike origin*
//! to its attachment point, turned by `±branch_angle_deg`, so branches
//! follow the overall strike instead of the local jitter. A branch reaches
//! as far as the distance from its attachment point to the tail.

use rand::{Rng, seq::index};
use serde::Deserialize;

use crate::{
    bolt::{self, Bolt},
    config::GeneratorConfig,
    error::{BoltError, Result},
    scene::Scene,
    types::{SegmentId, Vector2},
    vector,
};

/// Where strikes may appear.
///
/// ### Fields
/// - `origin_x` - Inclusive range of the origin's x coordinate.
/// - `span_x` - Inclusive range of the horizontal distance from origin to tail.
/// - `span_y` - Vertical distance from origin to tail.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct StrikeBounds {
    pub origin_x: (f64, f64),
    pub span_x: (f64, f64),
    pub span_y: f64,
}

impl StrikeBounds {
    /// Bounds that keep strikes inside a `width` x `height` canvas.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            origin_x: (width * 0.2, width * 0.8),
            span_x: (-width * 0.15, width * 0.15),
            span_y: height * 0.8,
        }
    }

    fn validate(&self) -> Result<()> {
        let values = [
            self.origin_x.0,
            self.origin_x.1,
            self.span_x.0,
            self.span_x.1,
            self.span_y,
        ];
        let widths = [
            self.origin_x.1 - self.origin_x.0,
            self.span_x.1 - self.span_x.0,
        ];
        if values.iter().chain(&widths).all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(BoltError::InvalidConfig(format!(
                "strike bounds and range widths must be finite, got {self:?}"
            )))
        }
    }
}

/// Generates one strike with a random origin and tail inside `bounds`.
///
/// The origin is `(x, cfg.origin_y)` with `x` drawn from `bounds.origin_x`;
/// the tail is the origin plus `(dx, bounds.span_y)` with `dx` drawn from
/// `bounds.span_x`. See [`plan_strike`] for the rest.
///
/// ### Errors
/// - [`BoltError::InvalidConfig`] for unusable configuration or bounds.
/// - [`BoltError::DegenerateBolt`] if the drawn origin and tail coincide.
pub fn generate_strike(
    bounds: &StrikeBounds,
    cfg: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Scene> {
    bounds.validate()?;

    let x = sample_between(rng, bounds.origin_x);
    let dx = sample_between(rng, bounds.span_x);

    let origin = Vector2::new(x, cfg.origin_y);
    let tail = origin + Vector2::new(dx, bounds.span_y);

    plan_strike(origin, tail, cfg, rng)
}

/// Builds a strike between fixed endpoints.
///
/// 1. Generates the main bolt with `cfg.main_intensity`.
/// 2. Draws a branch count from `cfg.branch_count_range`, clamped to the
///    number of attachment candidates. Every main segment except the last
///    is a candidate (the last one ends on the tail).
/// 3. Samples that many distinct segments and grows one branch from the
///    end of each, with `cfg.branch_intensity`.
///
/// Branches come out in path order of their attachment points.
///
/// ### Errors
/// - [`BoltError::InvalidConfig`] if `cfg` fails [`GeneratorConfig::sanitized`].
/// - [`BoltError::DegenerateBolt`] if `origin == tail`.
pub fn plan_strike(
    origin: Vector2,
    tail: Vector2,
    cfg: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Scene> {
    let cfg = cfg.sanitized()?;

    let rounds = cfg.refinement_rounds_for((tail - origin).length());
    let main = bolt::generate_bolt(origin, tail, cfg.max_offset, rounds, rng)?
        .with_intensity(cfg.main_intensity);

    let (lo, hi) = cfg.branch_count_range;
    let wanted = rng.random_range(lo..=hi) as usize;
    let candidates = main.segments().len() - 1;
    let count = if wanted > candidates {
        log::debug!("main bolt has {candidates} attachment points, clamping {wanted} branches");
        candidates
    } else {
        wanted
    };

    let mut picks = index::sample(rng, candidates, count).into_vec();
    picks.sort_unstable();

    let angle = cfg.branch_angle_deg.to_radians();
    let mut branches = Vec::with_capacity(picks.len());
    for id in picks {
        if let Some(branch) = grow_branch(&main, id, origin, tail, angle, &cfg, rng)? {
            branches.push((id, branch));
        }
    }

    log::debug!(
        "strike: {rounds} rounds, {} main segments, {} branches",
        main.segments().len(),
        branches.len()
    );
    Ok(Scene::new(main, branches))
}

/// Grows the branch attached to the end of main segment `id`.
///
/// Returns `Ok(None)` when the branch would be degenerate, which only
/// happens if the attachment point lands exactly on the origin or tail.
fn grow_branch(
    main: &Bolt,
    id: SegmentId,
    origin: Vector2,
    tail: Vector2,
    angle: f64,
    cfg: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<Option<Bolt>> {
    let start = main.segments()[id].end;

    // Direction is taken from the strike origin, not the local segment.
    let Ok(dir) = vector::normalize(start - origin) else {
        log::warn!("branch {id} starts on the strike origin, skipping");
        return Ok(None);
    };
    let turn = if rng.random_bool(0.5) { angle } else { -angle };
    let dir = vector::rotate(dir, turn);

    let magnitude = (tail - start).length() * cfg.branch_length_scale;
    let end = start + dir * magnitude;
    let rounds = cfg.refinement_rounds_for(magnitude);

    match bolt::generate_bolt(start, end, cfg.max_offset, rounds, rng) {
        Ok(branch) => Ok(Some(branch.with_intensity(cfg.branch_intensity))),
        Err(BoltError::DegenerateBolt { .. }) => {
            log::warn!("branch {id} has zero length, skipping");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Uniform draw from an inclusive `(lo, hi)` range given in either order.
fn sample_between(rng: &mut impl Rng, (a, b): (f64, f64)) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi { lo } else { rng.random_range(lo..=hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn cfg() -> GeneratorConfig {
        GeneratorConfig {
            max_refinement_rounds: 6,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn strike_origin_and_tail_stay_in_bounds() {
        let bounds = StrikeBounds {
            origin_x: (100.0, 200.0),
            span_x: (-50.0, 50.0),
            span_y: 400.0,
        };
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let scene = generate_strike(&bounds, &cfg(), &mut rng).unwrap();
            let main = scene.main_bolt();
            let (o, t) = (main.origin(), main.tail());

            assert_eq!(o.y, cfg().origin_y);
            assert!((100.0..=200.0).contains(&o.x));
            assert!((t.y - o.y - 400.0).abs() < 1e-9);
            assert!((-50.0..=50.0).contains(&(t.x - o.x)));
        }
    }

    #[test]
    fn branch_count_within_range_and_attachments_distinct() {
        let mut rng = StdRng::seed_from_u64(9);
        let origin = Vector2::new(300.0, 10.0);
        let tail = Vector2::new(320.0, 500.0);

        for _ in 0..30 {
            let scene = plan_strike(origin, tail, &cfg(), &mut rng).unwrap();
            let n = scene.branches().len();
            assert!((3..=6).contains(&n), "got {n} branches");

            let ids = scene.attachments();
            for w in ids.windows(2) {
                assert!(w[0] < w[1], "attachments {ids:?} not distinct");
            }
            assert!(ids.iter().all(|&id| id + 1 < scene.main_bolt().segments().len()));
        }
    }

    #[test]
    fn branches_start_at_attachment_points() {
        let mut rng = StdRng::seed_from_u64(21);
        let scene = plan_strike(
            Vector2::new(50.0, 10.0),
            Vector2::new(90.0, 600.0),
            &cfg(),
            &mut rng,
        )
        .unwrap();

        let main = scene.main_bolt();
        for (branch, &id) in scene.branches().iter().zip(scene.attachments()) {
            assert_eq!(branch.origin(), main.segments()[id].end);
            assert_eq!(branch.intensity(), cfg().branch_intensity);
        }
        assert_eq!(main.intensity(), cfg().main_intensity);
    }

    #[test]
    fn branch_direction_is_turned_from_strike_origin() {
        // With no displacement every branch is a straight chord, so its
        // heading can be compared against origin -> attachment exactly.
        let cfg = GeneratorConfig {
            max_offset: 0.0,
            ..cfg()
        };
        let origin = Vector2::new(0.0, 0.0);
        let tail = Vector2::new(0.0, 480.0);
        let mut rng = StdRng::seed_from_u64(4);

        let scene = plan_strike(origin, tail, &cfg, &mut rng).unwrap();
        assert!(!scene.branches().is_empty());

        let turn = cfg.branch_angle_deg.to_radians();
        for branch in scene.branches() {
            let start = branch.origin();
            let base = vector::angle(start - origin);
            let heading = vector::angle(branch.tail() - start);
            let delta = (heading - base).abs();
            assert!((delta - turn).abs() < 1e-9, "turned by {delta}");

            let reach = (branch.tail() - start).length();
            assert!((reach - (tail - start).length()).abs() < 1e-9);
        }
    }

    #[test]
    fn branch_length_scale_shortens_branches() {
        let cfg = GeneratorConfig {
            max_offset: 0.0,
            branch_length_scale: 0.5,
            ..cfg()
        };
        let origin = Vector2::new(0.0, 0.0);
        let tail = Vector2::new(0.0, 480.0);

        let scene = plan_strike(origin, tail, &cfg, &mut StdRng::seed_from_u64(8)).unwrap();
        for branch in scene.branches() {
            let reach = (branch.tail() - branch.origin()).length();
            assert!((reach - 0.5 * (tail - branch.origin()).length()).abs() < 1e-9);
        }
    }

    #[test]
    fn branch_count_is_clamped_to_available_segments() {
        // A 100-unit strike gets one round: two segments, one candidate.
        let cfg = GeneratorConfig {
            branch_count_range: (5, 5),
            ..cfg()
        };
        let scene = plan_strike(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 100.0),
            &cfg,
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();

        assert_eq!(scene.main_bolt().segments().len(), 2);
        assert_eq!(scene.attachments(), &[0]);
    }

    #[test]
    fn short_strike_has_no_branches() {
        let scene = plan_strike(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 10.0),
            &cfg(),
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();

        assert_eq!(scene.main_bolt().segments().len(), 1);
        assert!(scene.branches().is_empty());
    }

    #[test]
    fn degenerate_strike_is_rejected() {
        let bounds = StrikeBounds {
            origin_x: (10.0, 10.0),
            span_x: (0.0, 0.0),
            span_y: 0.0,
        };
        let res = generate_strike(&bounds, &cfg(), &mut StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(BoltError::DegenerateBolt { .. })));
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let bounds = StrikeBounds {
            span_y: f64::NAN,
            ..StrikeBounds::for_canvas(100.0, 100.0)
        };
        let res = generate_strike(&bounds, &cfg(), &mut StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(BoltError::InvalidConfig(_))));
    }

    #[test]
    fn bounds_with_overflowing_width_are_rejected() {
        let wide_origin = StrikeBounds {
            origin_x: (-1e308, 1e308),
            ..StrikeBounds::for_canvas(100.0, 100.0)
        };
        let wide_span = StrikeBounds {
            span_x: (f64::MAX, -f64::MAX),
            ..StrikeBounds::for_canvas(100.0, 100.0)
        };
        for bounds in [wide_origin, wide_span] {
            let res = generate_strike(&bounds, &cfg(), &mut StdRng::seed_from_u64(1));
            assert!(matches!(res, Err(BoltError::InvalidConfig(_))));
        }
    }

    #[test]
    fn strike_reaching_past_f64_range_is_rejected() {
        let bounds = StrikeBounds {
            origin_x: (1e308, 1e308),
            span_x: (1e308, 1e308),
            span_y: 100.0,
        };
        let res = generate_strike(&bounds, &cfg(), &mut StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(BoltError::InvalidConfig(_))));
    }

    #[test]
    fn negative_branch_length_scale_gives_point_branches_at_most() {
        let cfg = GeneratorConfig {
            branch_length_scale: -1.0,
            ..cfg()
        };
        let scene = plan_strike(
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 480.0),
            &cfg,
            &mut StdRng::seed_from_u64(6),
        )
        .unwrap();

        // Clamped to zero, every branch collapses and is skipped.
        assert!(scene.branches().is_empty());
        assert!(scene.attachments().is_empty());
    }

    #[test]
    fn sample_between_accepts_reversed_and_empty_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_between(&mut rng, (4.0, 4.0)), 4.0);
        for _ in 0..50 {
            let v = sample_between(&mut rng, (10.0, -10.0));
            assert!((-10.0..=10.0).contains(&v));
        }
    }
}
