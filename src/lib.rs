//! Geometry evaluation for exam-style maths diagrams.
//!
//! A [`GraphSpec`](spec::GraphSpec) declares curves, lines, circles, derived
//! constructs (tangents, intersections), shaded regions and marks. The engine
//! turns it into canvas-ready geometry: clipped curve paths, solved points,
//! region samples and placed labels.
//!
//! ```ignore
//! let graph = graphspec::graph(r#"{
//!     "xRange": [-1, 5], "yRange": [-2, 8],
//!     "objects": [{ "type": "function", "id": "f", "a": 1, "b": -5, "c": 6 }]
//! }"#)?;
//! let d = graph.objects[0].primitive.as_path().unwrap().to_svg_data();
//! ```

pub mod engine;
pub mod errors;
pub mod log;
pub mod parse;
pub mod spec;
pub mod types;

pub use engine::{EngineConfig, ResolvedGraph, resolve, resolve_with};
pub use errors::{ParseError, SpecError};
pub use spec::GraphSpec;

/// Parse GraphSpec JSON and resolve it with the default configuration.
///
/// Returns the resolved geometry, or an error with diagnostics.
pub fn graph(source: &str) -> Result<ResolvedGraph, miette::Report> {
    let spec = parse::parse(source)?;
    Ok(resolve(&spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_runs_the_whole_pipeline() {
        let graph = graph(
            r#"{
                "xRange": [-1, 5], "yRange": [-2, 8],
                "objects": [{ "type": "function", "id": "f", "a": 1, "b": -5, "c": 6 }],
                "derived": [{
                    "type": "intersection", "id": "r",
                    "of": ["f", "x_axis"], "pick": "rightmost"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(graph.objects.len(), 1);
        let r = graph.point("r").unwrap();
        assert!((r.math.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn graph_reports_parse_errors() {
        let err = graph("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed JSON"), "{err}");
    }

    #[test]
    fn graph_reports_invalid_ranges() {
        let err = graph(r#"{ "xRange": [1, 1], "yRange": [0, 1] }"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid x range [1, 1]: min must be strictly less than max");
    }
}
