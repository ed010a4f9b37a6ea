//! Region label placement.
//!
//! Auto labels start at the centroid of the region's interior samples, then
//! take a few fixed-size steps away from whichever boundary is closest. The
//! candidate is clamped into the plot box after every step.

use glam::{DVec2, dvec2};

use crate::spec::{Constraint, GraphObject, LabelPlacement, Region};
use crate::types::Bounds;

use super::config::EngineConfig;
use super::eval::{self, LineEquation};
use super::registry::{ObjectRegistry, Target};

/// Which side of its boundary the region lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Above => 1.0,
            Side::Below => -1.0,
        }
    }
}

/// A curve, line, axis or circle that bounds a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary<'a> {
    pub target: Target<'a>,
    pub side: Side,
}

/// The boundaries a label should keep away from.
///
/// Only `above`/`below` style constraints bound an inequality region; a
/// between-curves region lies above its bottom curve and below its top curve.
/// Unknown ids are skipped.
pub fn boundaries<'a>(region: &Region, registry: &ObjectRegistry<'a>) -> Vec<Boundary<'a>> {
    let referenced: Vec<(&str, Side)> = match region {
        Region::Inequalities { constraints, .. } => constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::Above { of } | Constraint::AboveFunction { of } => {
                    Some((of.as_str(), Side::Above))
                }
                Constraint::Below { of } | Constraint::BelowFunction { of } => {
                    Some((of.as_str(), Side::Below))
                }
                _ => None,
            })
            .collect(),
        Region::BetweenCurves { top, bottom, .. } => {
            vec![(bottom.as_str(), Side::Above), (top.as_str(), Side::Below)]
        }
    };

    referenced
        .into_iter()
        .filter_map(|(id, side)| registry.resolve(id).map(|target| Boundary { target, side }))
        .collect()
}

/// Arithmetic mean of the samples
pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec2 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}

/// Distance from `p` to a boundary, and the unit direction that moves away
/// from it on the region's side.
fn clearance(boundary: Boundary<'_>, p: DVec2) -> Option<(f64, DVec2)> {
    // Off the boundary the candidate keeps its side; on it, the constraint decides
    let away = |delta: f64| {
        if delta > 0.0 {
            1.0
        } else if delta < 0.0 {
            -1.0
        } else {
            boundary.side.sign()
        }
    };

    match boundary.target {
        Target::YAxis => Some((p.x.abs(), dvec2(away(p.x), 0.0))),
        Target::Object(GraphObject::Line(line)) => match eval::line_equation(&line.form) {
            LineEquation::Vertical { x } => Some(((p.x - x).abs(), dvec2(away(p.x - x), 0.0))),
            LineEquation::Sloped { m, b } => {
                let dy = p.y - (m * p.x + b);
                Some((dy.abs(), dvec2(0.0, away(dy))))
            }
        },
        Target::Object(GraphObject::Circle(circle)) => {
            let offset = p - circle.center_point();
            let dr = offset.length() - circle.radius;
            Some((dr.abs(), offset.normalize_or_zero() * away(dr)))
        }
        target => {
            let dy = p.y - target.value_at(p.x)?;
            Some((dy.abs(), dvec2(0.0, away(dy))))
        }
    }
}

/// Nudge a candidate away from its nearest boundary, `config.label_passes` times.
///
/// Each step is `config.label_step` of the axis range along the direction it
/// moves. Boundaries with no defined distance at the candidate (a segment
/// outside its span) are ignored for that pass.
pub fn refine(
    candidate: DVec2,
    boundaries: &[Boundary<'_>],
    bounds: &Bounds,
    config: &EngineConfig,
) -> DVec2 {
    let step = bounds.span() * config.label_step;
    let mut p = candidate;

    for _ in 0..config.label_passes {
        let nearest = boundaries
            .iter()
            .filter_map(|b| clearance(*b, p))
            .fold(None, |best: Option<(f64, DVec2)>, (d, dir)| match best {
                Some((best_d, _)) if best_d <= d => best,
                _ => Some((d, dir)),
            });
        let Some((_, direction)) = nearest else {
            break;
        };
        p = bounds.clamp(p + direction * step);
    }
    crate::log::debug!(from = ?candidate, to = ?p, "label refined");
    p
}

/// Resolve a region label to a math-space anchor.
///
/// `interior` is the region's sampled interior. Manual placements are returned
/// as authored; an empty region puts its label at the plot center.
pub fn place_label(
    placement: LabelPlacement,
    region: &Region,
    interior: &[DVec2],
    registry: &ObjectRegistry<'_>,
    bounds: &Bounds,
    config: &EngineConfig,
) -> DVec2 {
    if let LabelPlacement::Manual { x, y } = placement {
        return dvec2(x, y);
    }
    let Some(start) = centroid(interior) else {
        crate::log::debug!("empty region, label at plot center");
        return bounds.center();
    };
    refine(start, &boundaries(region, registry), bounds, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::region::sample_region;
    use crate::spec::{CircleObject, FunctionObject, LineForm, LineObject, X_AXIS};
    use crate::types::Range;

    fn bounds(x: [f64; 2], y: [f64; 2]) -> Bounds {
        Bounds::new(Range::from_pair(x).unwrap(), Range::from_pair(y).unwrap())
    }

    fn band_objects() -> Vec<GraphObject> {
        vec![
            LineObject::new("low", LineForm::Horizontal { y: 1.0 }).into(),
            LineObject::new("high", LineForm::Horizontal { y: 3.0 }).into(),
        ]
    }

    fn auto_label(region: &Region, objects: &[GraphObject], b: &Bounds) -> DVec2 {
        let registry = ObjectRegistry::build(objects);
        let config = EngineConfig::default();
        let samples = sample_region(region, &registry, b, &config);
        place_label(LabelPlacement::Auto, region, &samples.interior, &registry, b, &config)
    }

    #[test]
    fn band_between_curves_is_labelled_in_the_middle() {
        let objects = band_objects();
        let b = bounds([0.0, 10.0], [0.0, 4.0]);
        let region = Region::BetweenCurves {
            id: None,
            top: "high".into(),
            bottom: "low".into(),
            x_range: [0.0, 10.0],
            label: None,
            style: None,
        };
        let p = auto_label(&region, &objects, &b);
        let step = 4.0 * EngineConfig::default().label_step;
        assert!((p.y - 2.0).abs() <= step + 1e-9, "{p:?}");
        assert!((p.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn band_of_inequalities_is_labelled_in_the_middle() {
        let objects = band_objects();
        let b = bounds([0.0, 10.0], [0.0, 4.0]);
        let region = Region::Inequalities {
            id: None,
            constraints: vec![
                Constraint::Above { of: "low".into() },
                Constraint::Below { of: "high".into() },
            ],
            label: None,
            style: None,
        };
        let p = auto_label(&region, &objects, &b);
        let step = 4.0 * EngineConfig::default().label_step;
        assert!((p.y - 2.0).abs() <= step + 1e-9, "{p:?}");
    }

    #[test]
    fn manual_placement_is_returned_unchanged() {
        let objects = band_objects();
        let registry = ObjectRegistry::build(&objects);
        let region = Region::Inequalities {
            id: None,
            constraints: Vec::new(),
            label: None,
            style: None,
        };
        let b = bounds([0.0, 1.0], [0.0, 1.0]);
        // even outside the plot box
        let p = place_label(
            LabelPlacement::Manual { x: 7.0, y: -3.0 },
            &region,
            &[dvec2(0.5, 0.5)],
            &registry,
            &b,
            &EngineConfig::default(),
        );
        assert_eq!(p, dvec2(7.0, -3.0));
    }

    #[test]
    fn empty_region_uses_plot_center() {
        let objects: Vec<GraphObject> = vec![FunctionObject::new("f", 0.0, 0.0, 100.0).into()];
        let b = bounds([-2.0, 6.0], [0.0, 10.0]);
        let region = Region::Inequalities {
            id: None,
            constraints: vec![Constraint::AboveFunction { of: "f".into() }],
            label: None,
            style: None,
        };
        assert_eq!(auto_label(&region, &objects, &b), dvec2(2.0, 5.0));
    }

    #[test]
    fn refine_moves_away_from_nearest_boundary() {
        let b = bounds([-10.0, 10.0], [-10.0, 10.0]);
        let boundaries = [Boundary { target: Target::XAxis, side: Side::Above }];
        let config = EngineConfig {
            label_passes: 1,
            ..EngineConfig::default()
        };
        let p = refine(dvec2(0.0, 1.0), &boundaries, &b, &config);
        assert!((p - dvec2(0.0, 1.4)).length() < 1e-12);

        // on the boundary the side decides
        let below = [Boundary { target: Target::XAxis, side: Side::Below }];
        let p = refine(dvec2(0.0, 0.0), &below, &b, &config);
        assert!((p - dvec2(0.0, -0.4)).length() < 1e-12);
    }

    #[test]
    fn refine_clamps_into_the_plot() {
        let b = bounds([0.0, 1.0], [0.0, 1.0]);
        let boundaries = [Boundary { target: Target::XAxis, side: Side::Above }];
        let p = refine(dvec2(0.5, 0.999), &boundaries, &b, &EngineConfig::default());
        assert_eq!(p, dvec2(0.5, 1.0));
    }

    #[test]
    fn refine_without_boundaries_keeps_the_centroid() {
        let b = bounds([0.0, 1.0], [0.0, 1.0]);
        assert_eq!(refine(dvec2(0.3, 0.3), &[], &b, &EngineConfig::default()), dvec2(0.3, 0.3));
    }

    #[test]
    fn circle_pushes_radially() {
        let objects: Vec<GraphObject> = vec![CircleObject::new("c", [0.0, 0.0], 2.0).into()];
        let registry = ObjectRegistry::build(&objects);
        let boundary = Boundary {
            target: registry.resolve("c").unwrap(),
            side: Side::Below,
        };
        let (d, dir) = clearance(boundary, dvec2(1.0, 0.0)).unwrap();
        assert_eq!(d, 1.0);
        // inside the circle: pushed toward the center
        assert_eq!(dir, dvec2(-1.0, 0.0));
    }

    #[test]
    fn between_curves_boundaries() {
        let objects = band_objects();
        let registry = ObjectRegistry::build(&objects);
        let region = Region::BetweenCurves {
            id: None,
            top: "high".into(),
            bottom: X_AXIS.into(),
            x_range: [0.0, 1.0],
            label: None,
            style: None,
        };
        let found = boundaries(&region, &registry);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], Boundary { target: Target::XAxis, side: Side::Above });
        assert_eq!(found[1].side, Side::Below);
    }

    #[test]
    fn centroid_of_nothing() {
        assert_eq!(centroid(&[]), None);
        assert_eq!(centroid(&[dvec2(0.0, 0.0), dvec2(2.0, 4.0)]), Some(dvec2(1.0, 2.0)));
    }
}
