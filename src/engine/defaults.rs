//! Default sizes and sampling densities

/// Canvas size in pixels
pub const CANVAS_WIDTH: f64 = 480.0;
pub const CANVAS_HEIGHT: f64 = 360.0;

/// Padding around the plot area in pixels (room for tick labels on the left/bottom)
pub const PAD_LEFT: f64 = 40.0;
pub const PAD_RIGHT: f64 = 20.0;
pub const PAD_TOP: f64 = 20.0;
pub const PAD_BOTTOM: f64 = 40.0;

/// Grid cells per axis for inequality regions; the grid has `(n + 1)²` points
pub const GRID_SAMPLES: usize = 60;
/// Intervals across the x-range when rasterizing a function
pub const CURVE_SAMPLES: usize = 600;
/// x positions sampled across a between-curves region
pub const BETWEEN_X_SAMPLES: usize = 100;
/// Points interpolated between the two curves at each x position
pub const BETWEEN_Y_SAMPLES: usize = 20;

/// Refinement passes run by the label placer
pub const LABEL_PASSES: usize = 5;
/// Label nudge per pass, as a fraction of the axis range
pub const LABEL_STEP: f64 = 0.02;

/// Jump between consecutive curve samples, as a fraction of the y-range,
/// treated as a discontinuity
pub const DISCONTINUITY_JUMP: f64 = 0.5;

/// Leading coefficients below this are treated as zero
pub const ROOT_EPSILON: f64 = 1e-10;

/// Upper bound on any configured count, as a multiple of its default
pub const MAX_COUNT_FACTOR: usize = 10;
