//! Curve rasterizer: dense sampling with clipping and breaks.
//!
//! Functions are sampled at `curve_samples + 1` evenly spaced x values. The
//! path is clipped against the y-range: leaving the range draws one segment to
//! the crossed bound and breaks the path, re-entering starts a new sub-path on
//! the bound. A jump larger than `discontinuity_jump · y_span` between two
//! visible samples also breaks the path.
//!
//! Straight lines don't need sampling and are clipped analytically.

use glam::{DVec2, dvec2};

use crate::spec::{FunctionObject, LineForm, SegmentObject};
use crate::types::{Bounds, Range};

use super::config::EngineConfig;
use super::eval::{self, LineEquation};
use super::path_builder::PathBuilder;
use super::types::Path;

/// Which side of the y-range a sample falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Below,
    Inside,
    Above,
}

fn band(range: Range, y: f64) -> Band {
    if y < range.min() {
        Band::Below
    } else if y > range.max() {
        Band::Above
    } else {
        Band::Inside
    }
}

/// The bound a sample outside the range has crossed
fn crossed_bound(range: Range, b: Band) -> f64 {
    match b {
        Band::Above => range.max(),
        _ => range.min(),
    }
}

/// Point on the chord `p → q` whose y is `y`
fn interpolate_at_y(p: DVec2, q: DVec2, y: f64) -> DVec2 {
    let t = (y - p.y) / (q.y - p.y);
    dvec2(p.x + t * (q.x - p.x), y)
}

/// Sample a function over `bounds.x` into a clipped, broken path.
pub fn rasterize_function(
    f: &FunctionObject,
    bounds: &Bounds,
    config: &EngineConfig,
) -> Path<DVec2> {
    rasterize_with(
        |x| Some(eval::evaluate_function(f, x)),
        bounds,
        config.curve_samples,
        config.discontinuity_jump,
    )
}

/// Sample any `x → y` over `bounds.x`.
///
/// `None` or non-finite values break the path, like an excursion would.
pub fn rasterize_with(
    eval: impl Fn(f64) -> Option<f64>,
    bounds: &Bounds,
    samples: usize,
    jump: f64,
) -> Path<DVec2> {
    let y_range = bounds.y;
    let max_jump = jump * y_range.span();
    let mut builder = PathBuilder::new();
    let mut prev: Option<(DVec2, Band)> = None;

    for i in 0..=samples {
        let x = bounds.x.lattice(i, samples);
        let Some(y) = eval(x).filter(|y| y.is_finite()) else {
            builder.lift();
            prev = None;
            continue;
        };
        let cur = dvec2(x, y);
        let cur_band = band(y_range, y);

        match (prev, cur_band) {
            (None, Band::Inside) => builder.move_to(cur),
            (None, _) => {}

            (Some((p, Band::Inside)), Band::Inside) => {
                if (cur.y - p.y).abs() > max_jump {
                    crate::log::debug!(x, "discontinuity, breaking path");
                    builder.lift();
                }
                builder.line_to(cur);
            }

            // leaving the visible range
            (Some((p, Band::Inside)), out) => {
                builder.line_to(interpolate_at_y(p, cur, crossed_bound(y_range, out)));
                builder.lift();
            }

            // re-entering
            (Some((p, out)), Band::Inside) => {
                builder.move_to(interpolate_at_y(p, cur, crossed_bound(y_range, out)));
                builder.line_to(cur);
            }

            // crossed the whole visible band between two samples
            (Some((p, from)), to) if from != to => {
                builder.move_to(interpolate_at_y(p, cur, crossed_bound(y_range, from)));
                builder.line_to(interpolate_at_y(p, cur, crossed_bound(y_range, to)));
                builder.lift();
            }

            (Some(_), _) => {}
        }
        prev = Some((cur, cur_band));
    }

    builder.build()
}

/// The visible part of a line: its two crossings of the plot box.
///
/// `None` when the line misses the box or only touches a corner.
pub fn clip_line(line: LineEquation, bounds: &Bounds) -> Option<(DVec2, DVec2)> {
    match line {
        LineEquation::Vertical { x } => bounds
            .x
            .contains(x)
            .then(|| (dvec2(x, bounds.y.min()), dvec2(x, bounds.y.max()))),
        LineEquation::Sloped { m, b } if m == 0.0 => bounds
            .y
            .contains(b)
            .then(|| (dvec2(bounds.x.min(), b), dvec2(bounds.x.max(), b))),
        LineEquation::Sloped { m, b } => {
            let xa = (bounds.y.min() - b) / m;
            let xb = (bounds.y.max() - b) / m;
            let lo = bounds.x.min().max(xa.min(xb));
            let hi = bounds.x.max().min(xa.max(xb));
            if lo >= hi {
                return None;
            }
            let at = |x: f64| dvec2(x, bounds.y.clamp(m * x + b));
            Some((at(lo), at(hi)))
        }
    }
}

/// An authored line clipped to the plot box. Empty when it is not visible.
pub fn line_path(form: &LineForm, bounds: &Bounds) -> Path<DVec2> {
    match clip_line(eval::line_equation(form), bounds) {
        Some((from, to)) => Path::polyline([from, to]),
        None => Path::new(),
    }
}

/// A segment, end to end
pub fn segment_path(segment: &SegmentObject) -> Path<DVec2> {
    Path::polyline([segment.start(), segment.end()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::PathCommand;

    fn bounds(x: [f64; 2], y: [f64; 2]) -> Bounds {
        Bounds::new(Range::from_pair(x).unwrap(), Range::from_pair(y).unwrap())
    }

    fn assert_near(a: DVec2, b: DVec2) {
        assert!((a - b).length() < 1e-9, "{a:?} vs {b:?}");
    }

    #[test]
    fn fully_visible_parabola_is_one_subpath() {
        let f = FunctionObject::new("f", 1.0, 0.0, 0.0);
        let view = bounds([-2.0, 2.0], [-1.0, 5.0]);
        let path = rasterize_function(&f, &view, &EngineConfig::default());
        assert_eq!(path.subpath_count(), 1);
        assert_eq!(path.len(), 601);
        assert_near(path.commands()[0].point(), dvec2(-2.0, 4.0));
        assert_near(path.commands()[600].point(), dvec2(2.0, 4.0));
    }

    #[test]
    fn vertex_below_range_splits_the_curve() {
        // x² - 10 dips below y = -5 between x = ±√5
        let f = FunctionObject::new("f", 1.0, 0.0, -10.0);
        let view = bounds([-5.0, 5.0], [-5.0, 5.0]);
        let path = rasterize_function(&f, &view, &EngineConfig::default());
        assert_eq!(path.subpath_count(), 2);
    }

    #[test]
    fn clipped_ends_land_on_the_bound() {
        let f = FunctionObject::new("f", 1.0, 0.0, -10.0);
        let view = bounds([-5.0, 5.0], [-5.0, 5.0]);
        let path = rasterize_function(&f, &view, &EngineConfig::default());
        let y_on_bounds = path
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .map(|c| c.point().y)
            .collect::<Vec<_>>();
        // the left branch starts above the range, so it enters at the top;
        // the right branch re-enters at the bottom
        assert_eq!(y_on_bounds, vec![5.0, -5.0]);
        for p in path.points() {
            assert!(p.y >= -5.0 && p.y <= 5.0, "{p:?} escapes the range");
        }
    }

    #[test]
    fn discontinuity_breaks_the_path() {
        let step = |x: f64| Some(if x < 0.0 { -1.0 } else { 1.0 });
        // a jump of 2 against a y-span of 4
        let path = rasterize_with(step, &bounds([-1.0, 1.0], [-2.0, 2.0]), 10, 0.25);
        assert_eq!(path.subpath_count(), 2);
    }

    #[test]
    fn small_steps_do_not_break() {
        let path = rasterize_with(|x| Some(x), &bounds([-1.0, 1.0], [-2.0, 2.0]), 10, 0.5);
        assert_eq!(path.subpath_count(), 1);
        assert_eq!(path.len(), 11);
    }

    #[test]
    fn undefined_values_break_the_path() {
        let holey = |x: f64| (x.abs() > 0.25).then_some(x);
        let path = rasterize_with(holey, &bounds([-1.0, 1.0], [-2.0, 2.0]), 8, 0.5);
        assert_eq!(path.subpath_count(), 2);
    }

    #[test]
    fn invisible_curve_is_empty() {
        let f = FunctionObject::new("f", 0.0, 0.0, 100.0);
        let view = bounds([-5.0, 5.0], [-5.0, 5.0]);
        let path = rasterize_function(&f, &view, &EngineConfig::default());
        assert!(path.is_empty());
    }

    #[test]
    fn clip_diagonal_to_corners() {
        let b = bounds([-5.0, 5.0], [-5.0, 5.0]);
        let (from, to) = clip_line(LineEquation::Sloped { m: 1.0, b: 0.0 }, &b).unwrap();
        assert_near(from, dvec2(-5.0, -5.0));
        assert_near(to, dvec2(5.0, 5.0));
    }

    #[test]
    fn clip_steep_line_to_top_and_bottom() {
        let b = bounds([-5.0, 5.0], [-5.0, 5.0]);
        let (from, to) = clip_line(LineEquation::Sloped { m: 4.0, b: 2.0 }, &b).unwrap();
        assert_near(from, dvec2(-1.75, -5.0));
        assert_near(to, dvec2(0.75, 5.0));
    }

    #[test]
    fn clip_horizontal_and_vertical() {
        let b = bounds([0.0, 10.0], [0.0, 4.0]);
        assert_eq!(
            clip_line(LineEquation::Sloped { m: 0.0, b: 1.0 }, &b),
            Some((dvec2(0.0, 1.0), dvec2(10.0, 1.0)))
        );
        assert_eq!(
            clip_line(LineEquation::Vertical { x: 3.0 }, &b),
            Some((dvec2(3.0, 0.0), dvec2(3.0, 4.0)))
        );
        assert_eq!(clip_line(LineEquation::Vertical { x: 11.0 }, &b), None);
        assert_eq!(clip_line(LineEquation::Sloped { m: 0.0, b: 9.0 }, &b), None);
    }

    #[test]
    fn line_missing_the_box_has_no_path() {
        let b = bounds([0.0, 1.0], [0.0, 1.0]);
        assert!(line_path(&LineForm::SlopeIntercept { m: 1.0, b: 5.0 }, &b).is_empty());
        assert_eq!(line_path(&LineForm::Horizontal { y: 0.5 }, &b).len(), 2);
    }

    #[test]
    fn segment_is_drawn_end_to_end() {
        let segment = SegmentObject {
            id: "s".into(),
            from: [0.0, 0.0],
            to: [3.0, 4.0],
            style: None,
        };
        let path = segment_path(&segment);
        assert_eq!(path.points().collect::<Vec<_>>(), vec![dvec2(0.0, 0.0), dvec2(3.0, 4.0)]);
    }
}
