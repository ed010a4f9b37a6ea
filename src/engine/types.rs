//! Resolved, canvas-ready geometry produced by the engine

use glam::DVec2;
use serde::Serialize;

use crate::spec::{ObjectKind, Style};
use crate::types::{Bounds, CanvasPoint, Px, Size};

use super::svg;

// ============================================================================
// Paths
// ============================================================================

/// One drawing command. `MoveTo` starts a new sub-path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCommand<P> {
    MoveTo(P),
    LineTo(P),
}

impl<P: Copy> PathCommand<P> {
    pub fn point(&self) -> P {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        }
    }
}

/// An ordered list of move/line commands, in math space (`Path<DVec2>`) or on
/// the canvas (`Path<CanvasPoint>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path<P> {
    commands: Vec<PathCommand<P>>,
    /// The last vertex connects back to the first
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    closed: bool,
}

impl<P> Default for Path<P> {
    fn default() -> Self {
        Path {
            commands: Vec::new(),
            closed: false,
        }
    }
}

impl<P: Copy> Path<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single open polyline through `points`
    pub fn polyline(points: impl IntoIterator<Item = P>) -> Self {
        points
            .into_iter()
            .enumerate()
            .map(|(i, p)| if i == 0 { PathCommand::MoveTo(p) } else { PathCommand::LineTo(p) })
            .collect()
    }

    pub fn push(&mut self, cmd: PathCommand<P>) {
        self.commands.push(cmd);
    }

    /// Mark the path as closed
    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn commands(&self) -> &[PathCommand<P>] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand<P>> {
        self.commands.iter()
    }

    /// Number of vertices (commands)
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `MoveTo` commands
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    pub fn points(&self) -> impl Iterator<Item = P> + '_ {
        self.commands.iter().map(PathCommand::point)
    }
}

impl<P> FromIterator<PathCommand<P>> for Path<P> {
    fn from_iter<I: IntoIterator<Item = PathCommand<P>>>(iter: I) -> Self {
        Path {
            commands: iter.into_iter().collect(),
            closed: false,
        }
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a PathCommand<P>;
    type IntoIter = std::slice::Iter<'a, PathCommand<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl Path<CanvasPoint> {
    /// Render as the `d` attribute of an SVG `<path>`.
    pub fn to_svg_data(&self) -> String {
        svg::path_data(self)
    }
}

// ============================================================================
// Resolved graph
// ============================================================================

/// Everything a drawing layer needs, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGraph {
    pub size: Size<Px>,
    /// The mathematical plotting domain the canvas shows
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axes: Option<ResolvedAxes>,
    pub ticks: Vec<ResolvedTick>,
    pub objects: Vec<ResolvedObject>,
    pub points: Vec<ResolvedPoint>,
    pub regions: Vec<ResolvedRegion>,
    pub annotations: Vec<ResolvedText>,
}

impl ResolvedGraph {
    /// Look up a resolved object (authored or tangent) by id
    pub fn object(&self, id: &str) -> Option<&ResolvedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Look up a resolved point by id
    pub fn point(&self, id: &str) -> Option<&ResolvedPoint> {
        self.points.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Look up a region by id
    pub fn region(&self, id: &str) -> Option<&ResolvedRegion> {
        self.regions.iter().find(|r| r.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// One drawn axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLine {
    pub from: CanvasPoint,
    /// The positive end, where an arrowhead goes
    pub to: CanvasPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ResolvedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAxes {
    pub x: AxisLine,
    pub y: AxisLine,
    pub arrowheads: bool,
}

/// An axis tick mark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTick {
    pub axis: Axis,
    pub value: f64,
    pub at: CanvasPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Where a resolved object came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum Origin {
    Authored,
    /// Tangent to `function`, touching it at `point` (math coordinates)
    Tangent {
        function: String,
        point: DVec2,
        slope: f64,
        intercept: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Primitive {
    Path { path: Path<CanvasPoint> },
    /// A circle under the (possibly non-uniform) canvas scale
    Ellipse { center: CanvasPoint, rx: Px, ry: Px },
}

impl Primitive {
    pub fn as_path(&self) -> Option<&Path<CanvasPoint>> {
        match self {
            Primitive::Path { path } => Some(path),
            Primitive::Ellipse { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedObject {
    pub id: String,
    pub kind: ObjectKind,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    pub dashed: bool,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSource {
    Mark,
    Intersection,
}

/// A point marker, authored or solved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: PointSource,
    /// Position in math coordinates
    pub math: DVec2,
    pub at: CanvasPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Inequalities,
    BetweenCurves,
}

/// An auto- or manually-placed region label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLabel {
    pub text: String,
    pub math: DVec2,
    pub at: CanvasPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRegion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: RegionKind,
    /// Interior sample points
    pub samples: Vec<CanvasPoint>,
    /// Size of one grid cell, for drawing inequality samples as tiles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<Size<Px>>,
    /// Closed boundary, for between-curves regions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Path<CanvasPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ResolvedLabel>,
}

/// Text anchored on the canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedText {
    pub text: String,
    pub at: CanvasPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}
