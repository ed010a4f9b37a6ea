//! Parse GraphSpec JSON into the typed model

use miette::SourceSpan;
use serde_json::error::Category;

use crate::errors::{ParseError, SourceContext};
use crate::spec::GraphSpec;

/// Parse GraphSpec JSON text
pub fn parse(source: &str) -> Result<GraphSpec, ParseError> {
    parse_named("<input>", source)
}

/// Parse GraphSpec JSON text, naming the source in diagnostics (usually a path).
pub fn parse_named(name: &str, source: &str) -> Result<GraphSpec, ParseError> {
    serde_json::from_str(source).map_err(|e| to_parse_error(e, SourceContext::new(name, source)))
}

/// Read and parse a GraphSpec file
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<GraphSpec, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    parse_named(&path.display().to_string(), &source)
}

fn to_parse_error(err: serde_json::Error, ctx: SourceContext) -> ParseError {
    // serde_json reports 1-based line/column; column 0 means "no position"
    let offset = ctx.offset_of(err.line(), err.column().max(1));
    let span = SourceSpan::new(offset.into(), 0);
    let message = strip_position(&err.to_string());
    let src = ctx.named_source();

    match err.classify() {
        Category::Syntax => ParseError::Syntax { message, src, span },
        Category::Eof => ParseError::UnexpectedEof { message, src, span },
        Category::Data => ParseError::Schema { message, src, span },
        Category::Io => ParseError::Io(std::io::Error::other(message)),
    }
}

/// serde_json appends " at line L column C"; the span already says where.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Constraint, DerivedObject, GraphObject, LineForm, PickStrategy, Region};

    const QUADRATIC: &str = r#"{
        "version": 1,
        "xRange": [-1, 5],
        "yRange": [-2, 8],
        "axes": { "show": true, "arrowheads": false, "xLabel": "x" },
        "objects": [
            { "type": "function", "id": "f", "a": 1, "b": -5, "c": 6 },
            {
                "type": "line", "id": "l",
                "form": { "kind": "two_point", "p1": [0, 0], "p2": [1, 2] }
            },
            {
                "type": "circle", "id": "c", "center": [2, 2], "radius": 1,
                "style": { "dashed": true }
            }
        ],
        "derived": [
            {
                "type": "intersection", "id": "r", "of": ["f", "x_axis"],
                "pick": "leftmost", "label": "A"
            },
            { "type": "tangent", "id": "t", "function": "f", "at": [3, 0] }
        ],
        "regions": [
            {
                "type": "inequalities",
                "constraints": [
                    { "kind": "x_between", "min": 0, "max": 4 },
                    { "kind": "below_function", "of": "f" }
                ],
                "label": { "text": "R" }
            },
            { "type": "between_curves", "top": "l", "bottom": "f", "xRange": [1, 4] }
        ]
    }"#;

    #[test]
    fn parses_a_full_spec() {
        let spec = parse(QUADRATIC).unwrap();
        assert_eq!(spec.version, 1);
        assert_eq!(spec.x_range, [-1.0, 5.0]);
        assert!(!spec.axes.arrowheads);
        assert_eq!(spec.axes.x_label.as_deref(), Some("x"));
        assert_eq!(spec.objects.len(), 3);

        match &spec.objects[1] {
            GraphObject::Line(l) => {
                assert_eq!(l.form, LineForm::TwoPoint { p1: [0.0, 0.0], p2: [1.0, 2.0] })
            }
            other => panic!("expected a line, got {other:?}"),
        }
        match &spec.derived[0] {
            DerivedObject::Intersection { of, pick, .. } => {
                assert_eq!(of, &["f".to_string(), "x_axis".to_string()]);
                assert_eq!(*pick, Some(PickStrategy::Leftmost));
            }
            other => panic!("expected an intersection, got {other:?}"),
        }
        match &spec.regions[0] {
            Region::Inequalities { constraints, .. } => {
                assert_eq!(constraints[1], Constraint::BelowFunction { of: "f".into() });
            }
            other => panic!("expected inequalities, got {other:?}"),
        }
        match &spec.regions[1] {
            Region::BetweenCurves { x_range, .. } => assert_eq!(*x_range, [1.0, 4.0]),
            other => panic!("expected between_curves, got {other:?}"),
        }
    }

    #[test]
    fn minimal_spec_gets_defaults() {
        let spec = parse(r#"{ "xRange": [0, 1], "yRange": [0, 1] }"#).unwrap();
        assert_eq!(spec.version, 1);
        assert!(spec.axes.show);
        assert!(spec.objects.is_empty());
        assert!(spec.marks.points.is_empty());
    }

    #[test]
    fn syntax_error_points_into_the_source() {
        let source = "{\n  \"xRange\": [0, 1],\n  \"yRange\": [0, 1]\n  \"objects\": []\n}";
        match parse(source) {
            Err(ParseError::Syntax { span, .. }) => {
                // third line is missing its trailing comma; error is reported on line 4
                assert_eq!(source[..span.offset()].lines().count(), 4);
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_input_is_eof() {
        assert!(matches!(parse(r#"{ "xRange": [0, 1"#), Err(ParseError::UnexpectedEof { .. })));
    }

    #[test]
    fn unknown_object_type_is_a_schema_error() {
        let source = r#"{
            "xRange": [0, 1], "yRange": [0, 1],
            "objects": [{ "type": "spline", "id": "s" }]
        }"#;
        match parse(source) {
            Err(ParseError::Schema { message, .. }) => {
                assert!(message.contains("spline"), "{message}");
                assert!(!message.contains(" at line "));
            }
            other => panic!("expected a schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_range_is_a_schema_error() {
        assert!(matches!(parse(r#"{ "xRange": [0, 1] }"#), Err(ParseError::Schema { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("graphspec-does-not-exist").join("spec.json");
        match parse_file(&path) {
            Err(ParseError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected an io error, got {other:?}"),
        }
    }

    #[test]
    fn file_errors_are_named_after_the_path() {
        let path = std::env::temp_dir().join(format!("graphspec-{}-bad.json", std::process::id()));
        std::fs::write(&path, r#"{ "xRange": [0, 1] }"#).unwrap();
        let result = parse_file(&path);
        std::fs::remove_file(&path).unwrap();

        match result {
            Err(ParseError::Schema { src, .. }) => {
                assert_eq!(src.name(), path.display().to_string());
            }
            other => panic!("expected a schema error, got {other:?}"),
        }
    }
}
