//! Engine context - everything one resolve run shares

use crate::errors::SpecError;
use crate::spec::GraphSpec;
use crate::types::{Bounds, Range};

use super::config::EngineConfig;
use super::registry::ObjectRegistry;
use super::transform::CanvasTransform;

/// Validated inputs for one engine run, borrowed from the GraphSpec
pub struct EngineContext<'a> {
    pub spec: &'a GraphSpec,
    pub config: &'a EngineConfig,
    /// Id lookup over `spec.objects`
    pub registry: ObjectRegistry<'a>,
    /// The plotting domain
    pub bounds: Bounds,
    pub transform: CanvasTransform,
}

impl<'a> EngineContext<'a> {
    /// Validate the configuration and both ranges, then index the objects.
    pub fn new(spec: &'a GraphSpec, config: &'a EngineConfig) -> Result<Self, SpecError> {
        config.validate()?;

        let x = axis_range("x", spec.x_range)?;
        let y = axis_range("y", spec.y_range)?;
        let bounds = Bounds::new(x, y);
        let transform = CanvasTransform::try_new(bounds, config.canvas)?;

        if spec.version != 1 {
            crate::log::warn!(
                version = spec.version,
                "unknown GraphSpec version, reading as version 1"
            );
        }

        Ok(EngineContext {
            spec,
            config,
            registry: ObjectRegistry::build(&spec.objects),
            bounds,
            transform,
        })
    }
}

fn axis_range(axis: &'static str, pair: [f64; 2]) -> Result<Range, SpecError> {
    Range::from_pair(pair).map_err(|reason| SpecError::InvalidRange {
        axis,
        min: pair[0],
        max: pair[1],
        reason,
    })
}
