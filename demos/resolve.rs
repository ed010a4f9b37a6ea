//! Resolve a GraphSpec file (or a built-in sample) and print the geometry as JSON.
//!
//! ```text
//! cargo run --example resolve --features tracing -- path/to/spec.json
//! RUST_LOG=graphspec=debug cargo run --example resolve --features tracing
//! ```

use graphspec::engine::Primitive;

const SAMPLE: &str = r#"{
    "xRange": [-1, 5],
    "yRange": [-2, 8],
    "axes": { "xLabel": "x", "yLabel": "y" },
    "objects": [
        { "type": "function", "id": "f", "a": 1, "b": -5, "c": 6 },
        { "type": "line", "id": "l", "form": { "kind": "horizontal", "y": 2 } }
    ],
    "derived": [
        {
            "type": "intersection", "id": "A", "of": ["f", "x_axis"],
            "pick": "leftmost", "label": "A"
        },
        { "type": "tangent", "id": "t", "function": "f", "at": 4 }
    ],
    "regions": [
        {
            "type": "inequalities",
            "id": "R",
            "constraints": [
                { "kind": "above_function", "of": "f" },
                { "kind": "below", "of": "l" }
            ],
            "label": { "text": "R" }
        }
    ]
}"#;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let spec = match std::env::args().nth(1) {
        Some(path) => graphspec::parse::parse_file(&path)?,
        None => graphspec::parse::parse_named("<sample>", SAMPLE)?,
    };
    let graph = graphspec::resolve(&spec)?;

    for obj in &graph.objects {
        if let Primitive::Path { path } = &obj.primitive {
            eprintln!("{:>8}: {} sub-path(s)", obj.id, path.subpath_count());
        }
    }

    let json = serde_json::to_string_pretty(&graph).map_err(|e| miette::miette!("{e}"))?;
    println!("{json}");
    Ok(())
}
