//! Analytic evaluators: quadratic functions and lines at a given x.

use crate::spec::{FunctionObject, LineForm, SegmentObject};

/// A line normalized out of any of its authored forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEquation {
    /// `y = m·x + b`
    Sloped { m: f64, b: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl LineEquation {
    /// The line's y at `x`, `None` for vertical lines
    pub fn value_at(self, x: f64) -> Option<f64> {
        match self {
            LineEquation::Sloped { m, b } => Some(m * x + b),
            LineEquation::Vertical { .. } => None,
        }
    }

    /// Line through two points; vertical when they share an x.
    pub fn through(p1: [f64; 2], p2: [f64; 2]) -> LineEquation {
        let [x1, y1] = p1;
        let [x2, y2] = p2;
        if x1 == x2 {
            return LineEquation::Vertical { x: x1 };
        }
        let m = (y2 - y1) / (x2 - x1);
        LineEquation::Sloped { m, b: y1 - m * x1 }
    }
}

/// Normalize any line form to slope/intercept or vertical.
pub fn line_equation(form: &LineForm) -> LineEquation {
    match *form {
        LineForm::SlopeIntercept { m, b } => LineEquation::Sloped { m, b },
        LineForm::Horizontal { y } => LineEquation::Sloped { m: 0.0, b: y },
        LineForm::Vertical { x } => LineEquation::Vertical { x },
        LineForm::TwoPoint { p1, p2 } => LineEquation::through(p1, p2),
    }
}

/// `a·x² + b·x + c`
#[inline]
pub fn evaluate_function(f: &FunctionObject, x: f64) -> f64 {
    f.a * x * x + f.b * x + f.c
}

/// `f'(x) = 2·a·x + b`
#[inline]
pub fn derivative(f: &FunctionObject, x: f64) -> f64 {
    2.0 * f.a * x + f.b
}

/// The line's y at `x`, or `None` when it is vertical.
pub fn evaluate_line(form: &LineForm, x: f64) -> Option<f64> {
    line_equation(form).value_at(x)
}

/// A segment's y at `x` along its supporting line, only within its x-span.
pub fn evaluate_segment(segment: &SegmentObject, x: f64) -> Option<f64> {
    let lo = segment.from[0].min(segment.to[0]);
    let hi = segment.from[0].max(segment.to[0]);
    if x < lo || x > hi {
        return None;
    }
    LineEquation::through(segment.from, segment.to).value_at(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_quadratic() {
        let f = FunctionObject::new("f", 1.0, -5.0, 6.0);
        assert_eq!(evaluate_function(&f, 2.0), 0.0);
        assert_eq!(evaluate_function(&f, 0.0), 6.0);
        assert_eq!(derivative(&f, 3.0), 1.0);
    }

    #[test]
    fn evaluates_every_line_form() {
        assert_eq!(evaluate_line(&LineForm::SlopeIntercept { m: 2.0, b: 3.0 }, 1.0), Some(5.0));
        assert_eq!(evaluate_line(&LineForm::Horizontal { y: -2.0 }, 100.0), Some(-2.0));
        assert_eq!(evaluate_line(&LineForm::Vertical { x: 1.0 }, 1.0), None);

        let two_point = LineForm::TwoPoint { p1: [0.0, 1.0], p2: [2.0, 5.0] };
        assert_eq!(evaluate_line(&two_point, 1.0), Some(3.0));
    }

    #[test]
    fn two_points_sharing_x_are_vertical() {
        let form = LineForm::TwoPoint { p1: [3.0, 1.0], p2: [3.0, 7.0] };
        assert_eq!(line_equation(&form), LineEquation::Vertical { x: 3.0 });
        assert_eq!(evaluate_line(&form, 3.0), None);
    }

    #[test]
    fn segment_is_defined_only_over_its_span() {
        let seg = SegmentObject {
            id: "s".into(),
            from: [2.0, 0.0],
            to: [0.0, 4.0],
            style: None,
        };
        assert_eq!(evaluate_segment(&seg, 1.0), Some(2.0));
        assert_eq!(evaluate_segment(&seg, 2.5), None);
        assert_eq!(evaluate_segment(&seg, -0.1), None);
    }
}
