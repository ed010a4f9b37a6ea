//! GraphSpec data model.
//!
//! These types mirror the JSON contract one to one: camelCase keys, snake_case
//! type tags. Every kind-dependent choice is an enum so that the engine can
//! match exhaustively instead of probing object shapes.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::engine::eval;

/// Sentinel id naming the x-axis (`y = 0`) wherever an object id is accepted.
pub const X_AXIS: &str = "x_axis";
/// Sentinel id naming the y-axis (`x = 0`) wherever an object id is accepted.
pub const Y_AXIS: &str = "y_axis";

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[inline]
pub(crate) fn point(p: [f64; 2]) -> DVec2 {
    dvec2(p[0], p[1])
}

/// The root of a diagram description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    #[serde(default = "default_version")]
    pub version: u32,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    #[serde(default)]
    pub axes: Axes,
    #[serde(default)]
    pub objects: Vec<GraphObject>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub marks: Marks,
    #[serde(default)]
    pub derived: Vec<DerivedObject>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Axis display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axes {
    #[serde(default = "default_true")]
    pub show: bool,
    #[serde(default = "default_true")]
    pub arrowheads: bool,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
}

impl Default for Axes {
    fn default() -> Self {
        Axes {
            show: true,
            arrowheads: true,
            x_label: None,
            y_label: None,
        }
    }
}

/// Stroke/fill hints passed through to the drawing layer untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

// ============================================================================
// Graph objects
// ============================================================================

/// Discriminant of a [`GraphObject`], handy for logging and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Function,
    Line,
    Segment,
    Circle,
}

/// Behaviour shared by every authored object
#[enum_dispatch]
pub trait Object {
    /// Unique id within the spec
    fn id(&self) -> &str;

    /// Optional style hints
    fn style(&self) -> Option<&Style>;

    fn kind(&self) -> ObjectKind;

    /// The object's y at `x`, or `None` when it has no single value there
    /// (vertical lines, circles, x outside a segment's span).
    fn value_at(&self, x: f64) -> Option<f64>;
}

/// An authored object
#[enum_dispatch(Object)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphObject {
    Function(FunctionObject),
    Line(LineObject),
    Segment(SegmentObject),
    Circle(CircleObject),
}

/// `f(x) = a·x² + b·x + c`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionObject {
    pub id: String,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl FunctionObject {
    pub fn new(id: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        FunctionObject {
            id: id.into(),
            a,
            b,
            c,
            style: None,
        }
    }
}

impl Object for FunctionObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Function
    }

    fn value_at(&self, x: f64) -> Option<f64> {
        Some(eval::evaluate_function(self, x))
    }
}

/// The four ways a straight line can be written down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineForm {
    SlopeIntercept { m: f64, b: f64 },
    TwoPoint { p1: [f64; 2], p2: [f64; 2] },
    Horizontal { y: f64 },
    Vertical { x: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub id: String,
    pub form: LineForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl LineObject {
    pub fn new(id: impl Into<String>, form: LineForm) -> Self {
        LineObject {
            id: id.into(),
            form,
            style: None,
        }
    }
}

impl Object for LineObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Line
    }

    fn value_at(&self, x: f64) -> Option<f64> {
        eval::evaluate_line(&self.form, x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentObject {
    pub id: String,
    pub from: [f64; 2],
    pub to: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl SegmentObject {
    pub fn start(&self) -> DVec2 {
        point(self.from)
    }

    pub fn end(&self) -> DVec2 {
        point(self.to)
    }
}

impl Object for SegmentObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Segment
    }

    fn value_at(&self, x: f64) -> Option<f64> {
        eval::evaluate_segment(self, x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleObject {
    pub id: String,
    pub center: [f64; 2],
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl CircleObject {
    pub fn new(id: impl Into<String>, center: [f64; 2], radius: f64) -> Self {
        CircleObject {
            id: id.into(),
            center,
            radius,
            style: None,
        }
    }

    pub fn center_point(&self) -> DVec2 {
        point(self.center)
    }

    /// Circles without a finite positive radius are neither drawn nor shaded
    pub fn has_radius(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0
    }
}

impl Object for CircleObject {
    fn id(&self) -> &str {
        &self.id
    }

    fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Circle
    }

    fn value_at(&self, _x: f64) -> Option<f64> {
        None
    }
}

// ============================================================================
// Derived objects
// ============================================================================

/// Where a tangent touches its function: an x value or a point (x is used).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TangentAt {
    X(f64),
    Point([f64; 2]),
}

impl TangentAt {
    pub fn x(self) -> f64 {
        match self {
            TangentAt::X(x) => x,
            TangentAt::Point(p) => p[0],
        }
    }
}

/// Rule for choosing one of several intersection candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStrategy {
    /// Minimal x
    Leftmost,
    /// Maximal x
    Rightmost,
    /// Visually highest: maximal mathematical y
    Topmost,
    /// Visually lowest: minimal mathematical y
    Bottommost,
}

/// An object computed from other objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DerivedObject {
    Tangent {
        id: String,
        function: String,
        at: TangentAt,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<Style>,
    },
    Intersection {
        id: String,
        of: [String; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pick: Option<PickStrategy>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<Style>,
    },
}

impl DerivedObject {
    pub fn id(&self) -> &str {
        match self {
            DerivedObject::Tangent { id, .. } | DerivedObject::Intersection { id, .. } => id,
        }
    }
}

// ============================================================================
// Regions
// ============================================================================

/// One clause of an inequality region. All clauses of a region are ANDed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    XBetween { min: f64, max: f64 },
    YBetween { min: f64, max: f64 },
    Above { of: String },
    Below { of: String },
    LeftOf { of: String },
    RightOf { of: String },
    AboveFunction { of: String },
    BelowFunction { of: String },
    InsideCircle { of: String },
    OutsideCircle { of: String },
}

impl Constraint {
    /// The object id this clause refers to, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            Constraint::XBetween { .. } | Constraint::YBetween { .. } => None,
            Constraint::Above { of }
            | Constraint::Below { of }
            | Constraint::LeftOf { of }
            | Constraint::RightOf { of }
            | Constraint::AboveFunction { of }
            | Constraint::BelowFunction { of }
            | Constraint::InsideCircle { of }
            | Constraint::OutsideCircle { of } => Some(of),
        }
    }
}

/// How a region label is positioned
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
    #[default]
    Auto,
    Manual { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub text: String,
    #[serde(default)]
    pub placement: LabelPlacement,
}

/// A shaded part of the plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Region {
    Inequalities {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default)]
        constraints: Vec<Constraint>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<RegionLabel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<Style>,
    },
    BetweenCurves {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        top: String,
        bottom: String,
        x_range: [f64; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<RegionLabel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<Style>,
    },
}

impl Region {
    pub fn id(&self) -> Option<&str> {
        match self {
            Region::Inequalities { id, .. } | Region::BetweenCurves { id, .. } => id.as_deref(),
        }
    }

    pub fn label(&self) -> Option<&RegionLabel> {
        match self {
            Region::Inequalities { label, .. } | Region::BetweenCurves { label, .. } => {
                label.as_ref()
            }
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            Region::Inequalities { style, .. } | Region::BetweenCurves { style, .. } => {
                style.as_ref()
            }
        }
    }
}

// ============================================================================
// Marks and annotations
// ============================================================================

/// A tick on one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMark {
    pub at: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A free point marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMark {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marks {
    #[serde(default)]
    pub x_marks: Vec<AxisMark>,
    #[serde(default)]
    pub y_marks: Vec<AxisMark>,
    #[serde(default)]
    pub points: Vec<PointMark>,
}

/// Free-floating text at a mathematical coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}
