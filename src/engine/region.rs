//! Region sampler.
//!
//! - Inequality regions test every point of a `(n + 1)²` grid over the plot
//!   box against the conjunction of their constraints.
//! - Between-curves regions interpolate vertically between two curves at
//!   evenly spaced x positions and also get a closed outline.

use glam::{DVec2, dvec2};

use crate::spec::{Constraint, GraphObject, Region};
use crate::types::{Bounds, Range};

use super::config::EngineConfig;
use super::defaults;
use super::eval::{self, LineEquation};
use super::registry::{ObjectRegistry, Target};
use super::types::Path;

/// Sampled interior of a region, in math coordinates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSamples {
    pub interior: Vec<DVec2>,
    /// Closed boundary (between-curves regions only)
    pub outline: Option<Path<DVec2>>,
}

/// Sample any region.
pub fn sample_region(
    region: &Region,
    registry: &ObjectRegistry<'_>,
    bounds: &Bounds,
    config: &EngineConfig,
) -> RegionSamples {
    match region {
        Region::Inequalities { constraints, .. } => RegionSamples {
            interior: sample_inequalities(constraints, registry, bounds, config.grid_samples),
            outline: None,
        },
        Region::BetweenCurves {
            top, bottom, x_range, ..
        } => sample_between(
            top,
            bottom,
            *x_range,
            registry,
            config.between_x_samples,
            config.between_y_samples,
        ),
    }
}

// ============================================================================
// Inequalities
// ============================================================================

/// A constraint with its reference already looked up
#[derive(Debug, Clone, Copy)]
enum Predicate<'a> {
    XWithin(f64, f64),
    YWithin(f64, f64),
    AboveCurve(Target<'a>),
    BelowCurve(Target<'a>),
    LeftOf(f64),
    RightOf(f64),
    InsideCircle(DVec2, f64),
    OutsideCircle(DVec2, f64),
    /// Unresolvable or unsupported: no point satisfies it
    Never,
}

/// x position of a vertical reference: the y-axis or a vertical line
fn vertical_at(target: Target<'_>) -> Option<f64> {
    match target {
        Target::YAxis => Some(0.0),
        Target::Object(GraphObject::Line(l)) => match eval::line_equation(&l.form) {
            LineEquation::Vertical { x } => Some(x),
            LineEquation::Sloped { .. } => None,
        },
        _ => None,
    }
}

fn compile<'a>(constraint: &Constraint, registry: &ObjectRegistry<'a>) -> Predicate<'a> {
    use GraphObject as G;

    let Some(of) = constraint.reference() else {
        return match *constraint {
            Constraint::XBetween { min, max } => Predicate::XWithin(min, max),
            Constraint::YBetween { min, max } => Predicate::YWithin(min, max),
            _ => Predicate::Never,
        };
    };
    let Some(target) = registry.resolve(of) else {
        crate::log::warn!(of, "constraint references an unknown id");
        return Predicate::Never;
    };

    let predicate = match (constraint, target) {
        (Constraint::Above { .. }, Target::XAxis | Target::Object(G::Function(_) | G::Line(_))) => {
            Predicate::AboveCurve(target)
        }
        (Constraint::Below { .. }, Target::XAxis | Target::Object(G::Function(_) | G::Line(_))) => {
            Predicate::BelowCurve(target)
        }
        (Constraint::AboveFunction { .. }, Target::Object(G::Function(_))) => {
            Predicate::AboveCurve(target)
        }
        (Constraint::BelowFunction { .. }, Target::Object(G::Function(_))) => {
            Predicate::BelowCurve(target)
        }
        (Constraint::LeftOf { .. }, _) => {
            vertical_at(target).map_or(Predicate::Never, Predicate::LeftOf)
        }
        (Constraint::RightOf { .. }, _) => {
            vertical_at(target).map_or(Predicate::Never, Predicate::RightOf)
        }
        (
            Constraint::InsideCircle { .. } | Constraint::OutsideCircle { .. },
            Target::Object(G::Circle(c)),
        ) if !c.has_radius() => {
            crate::log::warn!(
                id = %c.id,
                radius = c.radius,
                "circle without a positive radius, skipped"
            );
            return Predicate::Never;
        }
        (Constraint::InsideCircle { .. }, Target::Object(G::Circle(c))) => {
            Predicate::InsideCircle(c.center_point(), c.radius)
        }
        (Constraint::OutsideCircle { .. }, Target::Object(G::Circle(c))) => {
            Predicate::OutsideCircle(c.center_point(), c.radius)
        }
        _ => Predicate::Never,
    };
    if matches!(predicate, Predicate::Never) {
        crate::log::warn!(of, "constraint does not apply to the referenced object");
    }
    predicate
}

impl Predicate<'_> {
    fn test(self, p: DVec2) -> bool {
        match self {
            Predicate::XWithin(min, max) => min <= p.x && p.x <= max,
            Predicate::YWithin(min, max) => min <= p.y && p.y <= max,
            Predicate::AboveCurve(t) => t.value_at(p.x).is_some_and(|g| p.y >= g),
            Predicate::BelowCurve(t) => t.value_at(p.x).is_some_and(|g| p.y <= g),
            Predicate::LeftOf(x0) => p.x <= x0,
            Predicate::RightOf(x0) => p.x >= x0,
            Predicate::InsideCircle(c, r) => (p - c).length_squared() <= r * r,
            Predicate::OutsideCircle(c, r) => (p - c).length_squared() >= r * r,
            Predicate::Never => false,
        }
    }
}

/// Whether `p` satisfies a single constraint. Unknown references are `false`.
pub fn satisfies(constraint: &Constraint, p: DVec2, registry: &ObjectRegistry<'_>) -> bool {
    compile(constraint, registry).test(p)
}

/// Grid points of `bounds` that satisfy every constraint.
pub fn sample_inequalities(
    constraints: &[Constraint],
    registry: &ObjectRegistry<'_>,
    bounds: &Bounds,
    n: usize,
) -> Vec<DVec2> {
    let predicates: Vec<Predicate<'_>> = constraints.iter().map(|c| compile(c, registry)).collect();

    let mut interior = Vec::new();
    for i in 0..=n {
        let x = bounds.x.lattice(i, n);
        for j in 0..=n {
            let p = dvec2(x, bounds.y.lattice(j, n));
            if predicates.iter().all(|pred| pred.test(p)) {
                interior.push(p);
            }
        }
    }
    crate::log::debug!(count = interior.len(), "inequality region sampled");
    interior
}

// ============================================================================
// Between curves
// ============================================================================

/// Interior and outline of the area between `top` and `bottom` over `x_range`.
///
/// `nx` x positions include both ends; at each one where `top > bottom`,
/// `ny` points lie strictly between the curves. The outline walks the top
/// curve left to right, then the bottom curve right to left.
pub fn sample_between(
    top: &str,
    bottom: &str,
    x_range: [f64; 2],
    registry: &ObjectRegistry<'_>,
    nx: usize,
    ny: usize,
) -> RegionSamples {
    let (Some(top_curve), Some(bottom_curve)) = (registry.resolve(top), registry.resolve(bottom))
    else {
        crate::log::warn!(top, bottom, "between-curves region references an unknown id");
        return RegionSamples::default();
    };
    let xs = match Range::from_pair(x_range) {
        Ok(range) => range,
        Err(reason) => {
            crate::log::warn!(?x_range, %reason, "between-curves region has an invalid x range");
            return RegionSamples::default();
        }
    };

    let steps = nx.saturating_sub(1);
    // capacity hints only; callers outside `resolve` may pass unvalidated counts
    let columns = nx.min(defaults::BETWEEN_X_SAMPLES * defaults::MAX_COUNT_FACTOR);
    let rows = ny.min(defaults::BETWEEN_Y_SAMPLES * defaults::MAX_COUNT_FACTOR);
    let mut interior = Vec::with_capacity(columns.saturating_mul(rows));
    let mut upper = Vec::with_capacity(columns);
    let mut lower = Vec::with_capacity(columns);

    for i in 0..nx {
        let x = xs.lattice(i, steps);
        let (Some(t), Some(b)) = (top_curve.value_at(x), bottom_curve.value_at(x)) else {
            continue;
        };
        upper.push(dvec2(x, t));
        lower.push(dvec2(x, b));
        if t > b {
            for j in 1..=ny {
                interior.push(dvec2(x, b + (t - b) * j as f64 / (ny + 1) as f64));
            }
        }
    }

    let outline = (!upper.is_empty())
        .then(|| Path::polyline(upper.into_iter().chain(lower.into_iter().rev())).close());
    RegionSamples { interior, outline }
}
