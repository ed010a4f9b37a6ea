//! Strongly-typed numeric primitives for graphspec.
//!
//! - `Range`/`Bounds`: validated plotting intervals (finite, `min < max`)
//! - `Px`: canvas pixels, never mixed with mathematical units
//! - `Point`/`Size`: generic 2D containers used for canvas values
//!
//! Mathematical coordinates use `glam::DVec2` directly.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{DVec2, dvec2};
use serde::Serialize;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero or negative when strictly positive required
    NotPositive,
    /// Interval is empty or a single point (`min >= max`)
    Empty,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::NotPositive => write!(f, "value is not positive"),
            NumericError::Empty => write!(f, "min must be strictly less than max"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinities, zero and negative values.
#[inline]
pub fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val <= 0.0 {
        Err(NumericError::NotPositive)
    } else {
        Ok(val)
    }
}

// ============================================================================
// Ranges and bounds
// ============================================================================

/// A closed, non-degenerate interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Create a Range with validation (finite endpoints, `min < max`)
    pub fn try_new(min: f64, max: f64) -> Result<Range, NumericError> {
        let min = check_finite(min)?;
        let max = check_finite(max)?;
        if min >= max {
            return Err(NumericError::Empty);
        }
        Ok(Range { min, max })
    }

    /// Validate an ordered pair as found in a GraphSpec (`[min, max]`).
    pub fn from_pair(pair: [f64; 2]) -> Result<Range, NumericError> {
        Range::try_new(pair[0], pair[1])
    }

    #[inline]
    pub fn min(self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(self) -> f64 {
        self.max
    }

    /// Length of the interval (always > 0)
    #[inline]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    #[inline]
    pub fn clamp(self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// The `i`-th of `n + 1` evenly spaced values from `min` to `max` inclusive.
    ///
    /// Computed from the index rather than by accumulation so that the last
    /// sample lands exactly on `max`.
    #[inline]
    pub fn lattice(self, i: usize, n: usize) -> f64 {
        if n == 0 {
            return self.min;
        }
        if i >= n {
            return self.max;
        }
        self.min + self.span() * (i as f64) / (n as f64)
    }
}

/// The plotting domain: `xRange × yRange`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub x: Range,
    pub y: Range,
}

impl Bounds {
    pub fn new(x: Range, y: Range) -> Self {
        Bounds { x, y }
    }

    /// Center of the bounding box
    pub fn center(&self) -> DVec2 {
        dvec2(self.x.center(), self.y.center())
    }

    pub fn contains(&self, p: DVec2) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y)
    }

    /// Clamp a point into the box
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        dvec2(self.x.clamp(p.x), self.y.clamp(p.y))
    }

    /// Per-axis spans as a vector
    pub fn span(&self) -> DVec2 {
        dvec2(self.x.span(), self.y.span())
    }
}

// ============================================================================
// Canvas units
// ============================================================================

/// Canvas pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}
impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Px> {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

/// A point on the canvas
pub type CanvasPoint = Point<Px>;
