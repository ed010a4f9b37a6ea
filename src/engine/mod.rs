//! Geometry evaluation engine
//!
//! This module is organized into submodules:
//! - `defaults`, `config`: sizing and sampling constants
//! - `context`: EngineContext, the validated inputs of one run
//! - `registry`: id → object lookup with the axis sentinels
//! - `eval`: closed-form evaluation of functions and lines
//! - `derived`: tangents and intersections
//! - `region`: region sampling
//! - `label`: region label placement
//! - `raster`, `path_builder`: curve sampling and line clipping
//! - `transform`: math ↔ canvas coordinates
//! - `types`, `svg`: resolved output and SVG path data
//!
//! Stages run leaves first: registry, derived objects, rasterizer, region
//! sampler, label placer, then everything is mapped onto the canvas.

pub mod config;
pub mod context;
pub mod defaults;
pub mod derived;
pub mod eval;
pub mod label;
pub mod path_builder;
pub mod raster;
pub mod region;
pub mod registry;
pub mod svg;
pub mod transform;
pub mod types;

pub use config::{CanvasConfig, EngineConfig};
pub use context::EngineContext;
pub use registry::{ObjectRegistry, Target};
pub use transform::CanvasTransform;
pub use types::*;

use glam::dvec2;

use crate::errors::SpecError;
use crate::spec::{DerivedObject, GraphObject, GraphSpec, Object, ObjectKind, Region};
use crate::types::{Px, Size};

/// Resolve a spec with the default configuration.
pub fn resolve(spec: &GraphSpec) -> Result<ResolvedGraph, SpecError> {
    resolve_with(spec, &EngineConfig::default())
}

/// Resolve a spec into canvas-ready geometry.
///
/// Fails only on an invalid configuration or range. Unknown references,
/// unsupported pairings and empty regions degrade to missing output.
pub fn resolve_with(spec: &GraphSpec, config: &EngineConfig) -> Result<ResolvedGraph, SpecError> {
    let ctx = EngineContext::new(spec, config)?;

    let mut objects = resolve_objects(&ctx);
    objects.extend(resolve_tangents(&ctx));

    let mut points = resolve_marks(&ctx);
    points.extend(resolve_intersections(&ctx));

    Ok(ResolvedGraph {
        size: Size {
            w: Px(config.canvas.width),
            h: Px(config.canvas.height),
        },
        bounds: ctx.bounds,
        axes: resolve_axes(&ctx),
        ticks: resolve_ticks(&ctx),
        objects,
        points,
        regions: spec.regions.iter().map(|r| resolve_region(&ctx, r)).collect(),
        annotations: resolve_annotations(&ctx),
    })
}

// ============================================================================
// Axes and ticks
// ============================================================================

/// Where the axes cross, clamped into the visible box
fn axis_origin(ctx: &EngineContext<'_>) -> glam::DVec2 {
    dvec2(ctx.bounds.x.clamp(0.0), ctx.bounds.y.clamp(0.0))
}

fn resolve_axes(ctx: &EngineContext<'_>) -> Option<ResolvedAxes> {
    let axes = &ctx.spec.axes;
    if !axes.show {
        return None;
    }
    let origin = axis_origin(ctx);
    let t = &ctx.transform;
    let label = |text: &Option<String>, at| {
        text.as_ref().map(|text| ResolvedText {
            text: text.clone(),
            at,
            style: None,
        })
    };

    let x_end = t.to_canvas(dvec2(ctx.bounds.x.max(), origin.y));
    let y_end = t.to_canvas(dvec2(origin.x, ctx.bounds.y.max()));
    Some(ResolvedAxes {
        x: AxisLine {
            from: t.to_canvas(dvec2(ctx.bounds.x.min(), origin.y)),
            to: x_end,
            label: label(&axes.x_label, x_end),
        },
        y: AxisLine {
            from: t.to_canvas(dvec2(origin.x, ctx.bounds.y.min())),
            to: y_end,
            label: label(&axes.y_label, y_end),
        },
        arrowheads: axes.arrowheads,
    })
}

fn resolve_ticks(ctx: &EngineContext<'_>) -> Vec<ResolvedTick> {
    let origin = axis_origin(ctx);
    let marks = &ctx.spec.marks;
    let x_ticks = marks.x_marks.iter().map(|m| (Axis::X, m, dvec2(m.at, origin.y)));
    let y_ticks = marks.y_marks.iter().map(|m| (Axis::Y, m, dvec2(origin.x, m.at)));

    x_ticks
        .chain(y_ticks)
        .filter(|(_, _, p)| {
            let visible = ctx.bounds.contains(*p);
            if !visible {
                crate::log::debug!(?p, "tick outside the plot, skipped");
            }
            visible
        })
        .map(|(axis, mark, p)| ResolvedTick {
            axis,
            value: mark.at,
            at: ctx.transform.to_canvas(p),
            label: mark.label.clone(),
        })
        .collect()
}

// ============================================================================
// Objects
// ============================================================================

fn resolve_objects(ctx: &EngineContext<'_>) -> Vec<ResolvedObject> {
    let t = &ctx.transform;
    let mut out = Vec::with_capacity(ctx.spec.objects.len());

    for obj in &ctx.spec.objects {
        // Duplicate ids: only the registered (first) object is drawn
        if !ctx.registry.get(obj.id()).is_some_and(|o| std::ptr::eq(o, obj)) {
            continue;
        }
        let primitive = match obj {
            GraphObject::Function(f) => Primitive::Path {
                path: t.path(&raster::rasterize_function(f, &ctx.bounds, ctx.config)),
            },
            GraphObject::Line(l) => Primitive::Path {
                path: t.path(&raster::line_path(&l.form, &ctx.bounds)),
            },
            GraphObject::Segment(s) => Primitive::Path {
                path: t.path(&raster::segment_path(s)),
            },
            GraphObject::Circle(c) => {
                if !c.has_radius() {
                    crate::log::warn!(
                        id = %c.id,
                        radius = c.radius,
                        "circle without a positive radius, skipped"
                    );
                    continue;
                }
                Primitive::Ellipse {
                    center: t.to_canvas(c.center_point()),
                    rx: Px(c.radius * t.scale_x()),
                    ry: Px(c.radius * t.scale_y()),
                }
            }
        };
        let style = obj.style().cloned();
        out.push(ResolvedObject {
            id: obj.id().to_string(),
            kind: obj.kind(),
            origin: Origin::Authored,
            dashed: style.as_ref().and_then(|s| s.dashed).unwrap_or(false),
            style,
            primitive,
        });
    }
    out
}

/// Tangent lines, drawn dashed across the plot box
fn resolve_tangents(ctx: &EngineContext<'_>) -> Vec<ResolvedObject> {
    ctx.spec
        .derived
        .iter()
        .filter_map(|d| match d {
            DerivedObject::Tangent {
                id,
                function,
                at,
                style,
            } => {
                let tangent = derived::resolve_tangent(&ctx.registry, function, *at)?;
                let path = raster::line_path(&tangent.line_form(), &ctx.bounds);
                Some(ResolvedObject {
                    id: id.clone(),
                    kind: ObjectKind::Line,
                    origin: Origin::Tangent {
                        function: function.clone(),
                        point: tangent.point,
                        slope: tangent.slope,
                        intercept: tangent.intercept,
                    },
                    style: style.clone(),
                    dashed: true,
                    primitive: Primitive::Path {
                        path: ctx.transform.path(&path),
                    },
                })
            }
            DerivedObject::Intersection { .. } => None,
        })
        .collect()
}

// ============================================================================
// Points
// ============================================================================

fn resolve_marks(ctx: &EngineContext<'_>) -> Vec<ResolvedPoint> {
    ctx.spec
        .marks
        .points
        .iter()
        .filter(|m| m.x.is_finite() && m.y.is_finite())
        .map(|m| {
            let math = dvec2(m.x, m.y);
            ResolvedPoint {
                id: m.id.clone(),
                source: PointSource::Mark,
                math,
                at: ctx.transform.to_canvas(math),
                label: m.label.clone(),
                style: m.style.clone(),
            }
        })
        .collect()
}

fn resolve_intersections(ctx: &EngineContext<'_>) -> Vec<ResolvedPoint> {
    ctx.spec
        .derived
        .iter()
        .filter_map(|d| match d {
            DerivedObject::Intersection {
                id,
                of,
                pick,
                label,
                style,
            } => {
                let eps = ctx.config.root_epsilon;
                let Some(math) = derived::resolve_intersection(&ctx.registry, of, *pick, eps) else {
                    crate::log::debug!(id = %id, "intersection has no solution, skipped");
                    return None;
                };
                Some(ResolvedPoint {
                    id: Some(id.clone()),
                    source: PointSource::Intersection,
                    math,
                    at: ctx.transform.to_canvas(math),
                    label: label.clone(),
                    style: style.clone(),
                })
            }
            DerivedObject::Tangent { .. } => None,
        })
        .collect()
}

// ============================================================================
// Regions and annotations
// ============================================================================

fn resolve_region(ctx: &EngineContext<'_>, region: &Region) -> ResolvedRegion {
    let t = &ctx.transform;
    let samples = region::sample_region(region, &ctx.registry, &ctx.bounds, ctx.config);

    let (kind, cell) = match region {
        Region::Inequalities { .. } => {
            let n = ctx.config.grid_samples as f64;
            let cell = Size {
                w: Px(ctx.config.canvas.plot_width() / n),
                h: Px(ctx.config.canvas.plot_height() / n),
            };
            (RegionKind::Inequalities, Some(cell))
        }
        Region::BetweenCurves { .. } => (RegionKind::BetweenCurves, None),
    };

    let label = region.label().map(|authored| {
        let math = label::place_label(
            authored.placement,
            region,
            &samples.interior,
            &ctx.registry,
            &ctx.bounds,
            ctx.config,
        );
        ResolvedLabel {
            text: authored.text.clone(),
            math,
            at: t.to_canvas(math),
        }
    });

    ResolvedRegion {
        id: region.id().map(str::to_string),
        kind,
        samples: samples.interior.iter().map(|p| t.to_canvas(*p)).collect(),
        cell,
        outline: samples.outline.as_ref().map(|o| t.path(o)),
        style: region.style().cloned(),
        label,
    }
}

fn resolve_annotations(ctx: &EngineContext<'_>) -> Vec<ResolvedText> {
    ctx.spec
        .annotations
        .iter()
        .map(|a| ResolvedText {
            text: a.text.clone(),
            at: ctx.transform.to_canvas(dvec2(a.x, a.y)),
            style: a.style.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FunctionObject, LineForm, LineObject};

    fn spec(json: serde_json::Value) -> GraphSpec {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn empty_spec_has_axes_only() {
        let json = serde_json::json!({ "xRange": [-5, 5], "yRange": [-5, 5] });
        let graph = resolve(&spec(json)).unwrap();
        assert!(graph.axes.is_some());
        assert!(graph.objects.is_empty());
        assert!(graph.points.is_empty());
        assert_eq!(graph.size, Size { w: Px(480.0), h: Px(360.0) });
    }

    #[test]
    fn axes_are_clamped_into_view() {
        let json = serde_json::json!({ "xRange": [1, 5], "yRange": [2, 6] });
        let graph = resolve(&spec(json)).unwrap();
        let axes = graph.axes.unwrap();
        let config = EngineConfig::default();
        // x-axis drawn at the bottom edge, y-axis at the left edge
        assert_eq!(axes.x.from.y, Px(config.canvas.height - config.canvas.pad_bottom));
        assert_eq!(axes.y.from.x, Px(config.canvas.pad_left));
    }

    #[test]
    fn hidden_axes() {
        let graph = resolve(&spec(serde_json::json!({
            "xRange": [-1, 1], "yRange": [-1, 1], "axes": { "show": false }
        })))
        .unwrap();
        assert!(graph.axes.is_none());
    }

    #[test]
    fn duplicate_ids_draw_the_first_object() {
        let mut s = spec(serde_json::json!({ "xRange": [-5, 5], "yRange": [-5, 5] }));
        s.objects = vec![
            LineObject::new("l", LineForm::Horizontal { y: 1.0 }).into(),
            FunctionObject::new("l", 1.0, 0.0, 0.0).into(),
        ];
        let graph = resolve(&s).unwrap();
        assert_eq!(graph.objects.len(), 1);
        assert_eq!(graph.objects[0].kind, ObjectKind::Line);
    }

    #[test]
    fn ticks_outside_the_plot_are_skipped() {
        let graph = resolve(&spec(serde_json::json!({
            "xRange": [0, 4], "yRange": [0, 4],
            "marks": { "xMarks": [{ "at": 1, "label": "1" }, { "at": 9 }], "yMarks": [{ "at": 2 }] }
        })))
        .unwrap();
        assert_eq!(graph.ticks.len(), 2);
        assert_eq!(graph.ticks[0].axis, Axis::X);
        assert_eq!(graph.ticks[0].label.as_deref(), Some("1"));
        assert_eq!(graph.ticks[1].axis, Axis::Y);
    }
}
