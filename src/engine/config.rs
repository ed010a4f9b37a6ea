//! Engine configuration: every sizing and sampling constant in one value.
//!
//! Hosts usually take [`EngineConfig::default`]; tests and alternative
//! renderers override individual fields (partial JSON works too, missing keys
//! fall back to [`super::defaults`]).

use serde::{Deserialize, Serialize};

use crate::errors::SpecError;
use crate::types::{NumericError, check_finite, check_positive};

use super::defaults;

/// Canvas geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            pad_left: defaults::PAD_LEFT,
            pad_right: defaults::PAD_RIGHT,
            pad_top: defaults::PAD_TOP,
            pad_bottom: defaults::PAD_BOTTOM,
        }
    }
}

impl CanvasConfig {
    /// A canvas with the same padding on every side
    pub fn uniform(width: f64, height: f64, pad: f64) -> Self {
        CanvasConfig {
            width,
            height,
            pad_left: pad,
            pad_right: pad,
            pad_top: pad,
            pad_bottom: pad,
        }
    }

    /// Width of the plotting area inside the padding
    pub fn plot_width(&self) -> f64 {
        self.width - self.pad_left - self.pad_right
    }

    /// Height of the plotting area inside the padding
    pub fn plot_height(&self) -> f64 {
        self.height - self.pad_top - self.pad_bottom
    }
}

/// Sampling densities, iteration counts and tolerances for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub grid_samples: usize,
    pub curve_samples: usize,
    pub between_x_samples: usize,
    pub between_y_samples: usize,
    pub label_passes: usize,
    pub label_step: f64,
    pub discontinuity_jump: f64,
    pub root_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            canvas: CanvasConfig::default(),
            grid_samples: defaults::GRID_SAMPLES,
            curve_samples: defaults::CURVE_SAMPLES,
            between_x_samples: defaults::BETWEEN_X_SAMPLES,
            between_y_samples: defaults::BETWEEN_Y_SAMPLES,
            label_passes: defaults::LABEL_PASSES,
            label_step: defaults::LABEL_STEP,
            discontinuity_jump: defaults::DISCONTINUITY_JUMP,
            root_epsilon: defaults::ROOT_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Reject values that would make a stage divide by zero, loop on nothing,
    /// or run unbounded.
    ///
    /// `label_passes` may be zero (centroid only). Counts are capped at
    /// [`defaults::MAX_COUNT_FACTOR`] times their default.
    pub fn validate(&self) -> Result<(), SpecError> {
        let invalid = |field: &'static str, reason: NumericError| SpecError::InvalidConfig {
            field,
            reason: reason.to_string(),
        };

        for (field, value) in [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
        ] {
            check_positive(value).map_err(|e| invalid(field, e))?;
        }
        for (field, value) in [
            ("canvas.padLeft", self.canvas.pad_left),
            ("canvas.padRight", self.canvas.pad_right),
            ("canvas.padTop", self.canvas.pad_top),
            ("canvas.padBottom", self.canvas.pad_bottom),
        ] {
            check_finite(value).map_err(|e| invalid(field, e))?;
        }
        check_positive(self.canvas.plot_width()).map_err(|e| invalid("canvas (plot width)", e))?;
        check_positive(self.canvas.plot_height()).map_err(|e| invalid("canvas (plot height)", e))?;

        for (field, value, min, default) in [
            ("gridSamples", self.grid_samples, 1, defaults::GRID_SAMPLES),
            ("curveSamples", self.curve_samples, 1, defaults::CURVE_SAMPLES),
            ("betweenXSamples", self.between_x_samples, 2, defaults::BETWEEN_X_SAMPLES),
            ("betweenYSamples", self.between_y_samples, 1, defaults::BETWEEN_Y_SAMPLES),
            ("labelPasses", self.label_passes, 0, defaults::LABEL_PASSES),
        ] {
            check_count(field, value, min, default * defaults::MAX_COUNT_FACTOR)?;
        }

        check_positive(self.label_step).map_err(|e| invalid("labelStep", e))?;
        check_positive(self.discontinuity_jump).map_err(|e| invalid("discontinuityJump", e))?;
        check_positive(self.root_epsilon).map_err(|e| invalid("rootEpsilon", e))?;
        Ok(())
    }
}

/// Keep a count inside `[min, max]` so every stage has bounded cost
fn check_count(field: &'static str, value: usize, min: usize, max: usize) -> Result<(), SpecError> {
    if value < min {
        return Err(SpecError::InvalidConfig {
            field,
            reason: format!("must be at least {min}"),
        });
    }
    if value > max {
        return Err(SpecError::InvalidConfig {
            field,
            reason: format!("must be at most {max}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas.plot_width(), 420.0);
        assert_eq!(config.canvas.plot_height(), 300.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "gridSamples": 20, "canvas": { "width": 600 } }"#).unwrap();
        assert_eq!(config.grid_samples, 20);
        assert_eq!(config.canvas.width, 600.0);
        assert_eq!(config.canvas.height, defaults::CANVAS_HEIGHT);
        assert_eq!(config.curve_samples, defaults::CURVE_SAMPLES);
    }

    #[test]
    fn rejects_padding_that_swallows_the_plot() {
        let config = EngineConfig {
            canvas: CanvasConfig::uniform(100.0, 100.0, 50.0),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpecError::InvalidConfig { field: "canvas (plot width)", .. })
        ));
    }

    #[test]
    fn rejects_zero_sample_counts() {
        let config = EngineConfig {
            grid_samples: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpecError::InvalidConfig { field: "gridSamples", .. })
        ));

        let config = EngineConfig {
            between_x_samples: 1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unbounded_sample_counts() {
        let json = r#"{ "betweenXSamples": 4294967296, "betweenYSamples": 4294967296 }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SpecError::InvalidConfig { field: "betweenXSamples", .. })
        ));

        let config = EngineConfig {
            grid_samples: usize::MAX,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid engine configuration `gridSamples`: must be at most 600"
        );

        let config = EngineConfig {
            label_passes: defaults::LABEL_PASSES * defaults::MAX_COUNT_FACTOR,
            curve_samples: defaults::CURVE_SAMPLES * defaults::MAX_COUNT_FACTOR,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
