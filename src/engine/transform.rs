//! Mathematical ↔ canvas coordinates.
//!
//! The map is affine per axis. Canvas y grows downward, mathematical y grows
//! upward, so y is flipped:
//!
//! ```text
//! canvas_x = pad_left + (x − x_min) / (x_max − x_min) · plot_width
//! canvas_y = pad_top  + (y_max − y) / (y_max − y_min) · plot_height
//! ```

use glam::{DVec2, dvec2};

use crate::errors::SpecError;
use crate::types::{Bounds, CanvasPoint, Point, Px, check_positive};

use super::config::CanvasConfig;
use super::types::{Path, PathCommand};

/// Stateless linear map from the plotting domain onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    bounds: Bounds,
    canvas: CanvasConfig,
}

impl CanvasTransform {
    /// Create a transform with validation (the plot area must be positive).
    ///
    /// `bounds` is non-degenerate by construction.
    pub fn try_new(bounds: Bounds, canvas: CanvasConfig) -> Result<Self, SpecError> {
        for (field, value) in [
            ("canvas (plot width)", canvas.plot_width()),
            ("canvas (plot height)", canvas.plot_height()),
        ] {
            check_positive(value).map_err(|e| SpecError::InvalidConfig {
                field,
                reason: e.to_string(),
            })?;
        }
        Ok(CanvasTransform { bounds, canvas })
    }

    /// Pixels per mathematical unit along x
    pub fn scale_x(&self) -> f64 {
        self.canvas.plot_width() / self.bounds.x.span()
    }

    /// Pixels per mathematical unit along y
    pub fn scale_y(&self) -> f64 {
        self.canvas.plot_height() / self.bounds.y.span()
    }

    pub fn to_canvas_x(&self, x: f64) -> Px {
        let t = (x - self.bounds.x.min()) / self.bounds.x.span();
        Px(self.canvas.pad_left + t * self.canvas.plot_width())
    }

    pub fn to_canvas_y(&self, y: f64) -> Px {
        let t = (self.bounds.y.max() - y) / self.bounds.y.span();
        Px(self.canvas.pad_top + t * self.canvas.plot_height())
    }

    pub fn to_canvas(&self, p: DVec2) -> CanvasPoint {
        Point::new(self.to_canvas_x(p.x), self.to_canvas_y(p.y))
    }

    /// Inverse of [`Self::to_canvas_x`]
    pub fn from_canvas_x(&self, x: Px) -> f64 {
        let t = (x.0 - self.canvas.pad_left) / self.canvas.plot_width();
        self.bounds.x.min() + t * self.bounds.x.span()
    }

    /// Inverse of [`Self::to_canvas_y`]
    pub fn from_canvas_y(&self, y: Px) -> f64 {
        let t = (y.0 - self.canvas.pad_top) / self.canvas.plot_height();
        self.bounds.y.max() - t * self.bounds.y.span()
    }

    pub fn from_canvas(&self, p: CanvasPoint) -> DVec2 {
        dvec2(self.from_canvas_x(p.x), self.from_canvas_y(p.y))
    }

    /// Map every command of a path onto the canvas
    pub fn path(&self, path: &Path<DVec2>) -> Path<CanvasPoint> {
        let mapped: Path<CanvasPoint> = path
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(self.to_canvas(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(self.to_canvas(p)),
            })
            .collect();
        if path.is_closed() { mapped.close() } else { mapped }
    }
}
