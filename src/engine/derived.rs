//! Derived objects: tangents and intersections.
//!
//! Everything here is closed form. Intersections reduce to
//! `a·x² + b·x + c = 0` (or its linear degenerate) and go through
//! [`solve_quadratic`]; pairings without a closed-form solver yield no points.

use glam::{DVec2, dvec2};

use crate::spec::{FunctionObject, GraphObject, LineForm, PickStrategy, TangentAt};

use super::eval::{self, LineEquation};
use super::registry::{ObjectRegistry, Target};

/// A tangent line `y = slope·x + intercept` touching `function` at `point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tangent {
    pub point: DVec2,
    pub slope: f64,
    pub intercept: f64,
}

impl Tangent {
    /// The tangent as an authored line form
    pub fn line_form(&self) -> LineForm {
        LineForm::SlopeIntercept {
            m: self.slope,
            b: self.intercept,
        }
    }
}

/// Tangent to `f` at `x = t`.
pub fn tangent_at(f: &FunctionObject, t: f64) -> Tangent {
    let slope = eval::derivative(f, t);
    let y = eval::evaluate_function(f, t);
    Tangent {
        point: dvec2(t, y),
        slope,
        intercept: y - slope * t,
    }
}

/// Resolve a tangent declaration. `None` when `function` is missing or is not
/// a function object.
pub fn resolve_tangent(
    registry: &ObjectRegistry<'_>,
    function: &str,
    at: TangentAt,
) -> Option<Tangent> {
    match registry.get(function) {
        Some(GraphObject::Function(f)) => Some(tangent_at(f, at.x())),
        Some(_) => {
            crate::log::warn!(function, "tangent target is not a function");
            None
        }
        None => {
            crate::log::warn!(function, "tangent target not found");
            None
        }
    }
}

// ============================================================================
// Root finding
// ============================================================================

/// Real roots of `a·x² + b·x + c = 0`.
///
/// - `|a| < eps`: solved as linear; no roots if `|b| < eps` too.
/// - negative discriminant: no roots.
/// - zero discriminant: the repeated root, once.
/// - otherwise `(−b + √D)/2a` followed by `(−b − √D)/2a` (not sorted).
pub fn solve_quadratic(a: f64, b: f64, c: f64, eps: f64) -> Vec<f64> {
    if a.abs() < eps {
        if b.abs() < eps {
            crate::log::debug!(b, c, "degenerate equation, no unique root");
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-b / (2.0 * a)];
    }

    let sqrt_d = discriminant.sqrt();
    vec![(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)]
}

fn function_function(f: &FunctionObject, g: &FunctionObject, eps: f64) -> Vec<DVec2> {
    solve_quadratic(f.a - g.a, f.b - g.b, f.c - g.c, eps)
        .into_iter()
        .map(|x| dvec2(x, eval::evaluate_function(f, x)))
        .collect()
}

fn function_line(f: &FunctionObject, line: LineEquation, eps: f64) -> Vec<DVec2> {
    match line {
        LineEquation::Sloped { m, b } => solve_quadratic(f.a, f.b - m, f.c - b, eps)
            .into_iter()
            .map(|x| dvec2(x, eval::evaluate_function(f, x)))
            .collect(),
        LineEquation::Vertical { x } => vec![dvec2(x, eval::evaluate_function(f, x))],
    }
}

fn line_line(p: LineEquation, q: LineEquation, eps: f64) -> Vec<DVec2> {
    match (p, q) {
        (LineEquation::Sloped { m: m1, b: b1 }, LineEquation::Sloped { m: m2, b: b2 }) => {
            if (m1 - m2).abs() < eps {
                return Vec::new();
            }
            let x = (b2 - b1) / (m1 - m2);
            vec![dvec2(x, m1 * x + b1)]
        }
        (LineEquation::Sloped { m, b }, LineEquation::Vertical { x })
        | (LineEquation::Vertical { x }, LineEquation::Sloped { m, b }) => {
            vec![dvec2(x, m * x + b)]
        }
        (LineEquation::Vertical { .. }, LineEquation::Vertical { .. }) => Vec::new(),
    }
}

/// The axes as lines, for the pairings that treat them that way
fn axis_line(target: Target<'_>) -> Option<LineEquation> {
    match target {
        Target::XAxis => Some(LineEquation::Sloped { m: 0.0, b: 0.0 }),
        Target::YAxis => Some(LineEquation::Vertical { x: 0.0 }),
        Target::Object(_) => None,
    }
}

/// Every intersection point of two targets that has a closed-form solver.
/// Unsupported pairings return an empty list.
pub fn intersect(p: Target<'_>, q: Target<'_>, eps: f64) -> Vec<DVec2> {
    use GraphObject as G;

    match (p, q) {
        (Target::Object(G::Function(f)), Target::Object(G::Function(g))) => {
            function_function(f, g, eps)
        }

        (Target::Object(G::Function(f)), Target::Object(G::Line(l)))
        | (Target::Object(G::Line(l)), Target::Object(G::Function(f))) => {
            function_line(f, eval::line_equation(&l.form), eps)
        }

        (Target::Object(G::Function(f)), Target::XAxis)
        | (Target::XAxis, Target::Object(G::Function(f))) => solve_quadratic(f.a, f.b, f.c, eps)
            .into_iter()
            .map(|x| dvec2(x, 0.0))
            .collect(),

        (Target::Object(G::Function(f)), Target::YAxis)
        | (Target::YAxis, Target::Object(G::Function(f))) => {
            vec![dvec2(0.0, eval::evaluate_function(f, 0.0))]
        }

        (Target::Object(G::Line(l1)), Target::Object(G::Line(l2))) => {
            line_line(eval::line_equation(&l1.form), eval::line_equation(&l2.form), eps)
        }

        (Target::Object(G::Line(l)), axis @ (Target::XAxis | Target::YAxis))
        | (axis @ (Target::XAxis | Target::YAxis), Target::Object(G::Line(l))) => {
            match axis_line(axis) {
                Some(axis) => line_line(eval::line_equation(&l.form), axis, eps),
                None => Vec::new(),
            }
        }

        _ => {
            crate::log::debug!("no closed-form solver for this pairing");
            Vec::new()
        }
    }
}

/// Choose one candidate. Without a strategy the first candidate wins.
pub fn pick(candidates: &[DVec2], strategy: Option<PickStrategy>) -> Option<DVec2> {
    let first = *candidates.first()?;
    let Some(strategy) = strategy else {
        return Some(first);
    };

    let better = |p: DVec2, best: DVec2| match strategy {
        PickStrategy::Leftmost => p.x < best.x,
        PickStrategy::Rightmost => p.x > best.x,
        PickStrategy::Topmost => p.y > best.y,
        PickStrategy::Bottommost => p.y < best.y,
    };

    Some(
        candidates[1..]
            .iter()
            .fold(first, |best, &p| if better(p, best) { p } else { best }),
    )
}

/// Resolve an intersection declaration to a single point.
///
/// `None` when either id is unknown, the pairing is unsupported, or the
/// curves do not meet.
pub fn resolve_intersection(
    registry: &ObjectRegistry<'_>,
    of: &[String; 2],
    strategy: Option<PickStrategy>,
    eps: f64,
) -> Option<DVec2> {
    let (Some(p), Some(q)) = (registry.resolve(&of[0]), registry.resolve(&of[1])) else {
        crate::log::warn!(a = %of[0], b = %of[1], "intersection references an unknown id");
        return None;
    };
    let candidates = intersect(p, q, eps);
    crate::log::debug!(a = %of[0], b = %of[1], count = candidates.len(), "intersection candidates");
    pick(&candidates, strategy)
}
