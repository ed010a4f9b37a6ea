//! Path builder for sampled curves.
//!
//! A small pen state machine. The rasterizer feeds it points and breaks; the
//! builder decides when a point starts a new sub-path.
//!
//! - **Pen up**: the next `line_to` becomes a `MoveTo` (a new sub-path).
//! - **Pen down**: `line_to` extends the current sub-path.
//! - `lift()` puts the pen up, so a break never produces a connecting line.
//!
//! Sub-paths made of a lone `MoveTo` carry nothing drawable and are dropped by
//! [`PathBuilder::build`].

use glam::DVec2;

use super::types::{Path, PathCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pen {
    #[default]
    Up,
    Down,
}

/// Builder for math-space paths with breaks.
///
/// ```ignore
/// let mut builder = PathBuilder::new();
/// builder.line_to(dvec2(0.0, 0.0)); // pen was up: MoveTo
/// builder.line_to(dvec2(1.0, 1.0)); // LineTo
/// builder.lift();
/// builder.line_to(dvec2(3.0, 1.0)); // MoveTo again
/// builder.line_to(dvec2(4.0, 0.0));
/// let path = builder.build(); // two sub-paths
/// ```
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand<DVec2>>,
    pen: Pen,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new sub-path at `p`.
    pub fn move_to(&mut self, p: DVec2) {
        self.commands.push(PathCommand::MoveTo(p));
        self.pen = Pen::Down;
    }

    /// Extend the current sub-path to `p`, or start one if the pen is up.
    pub fn line_to(&mut self, p: DVec2) {
        match self.pen {
            Pen::Up => self.move_to(p),
            Pen::Down => self.commands.push(PathCommand::LineTo(p)),
        }
    }

    /// Break the path: nothing connects the last point to the next one.
    pub fn lift(&mut self) {
        self.pen = Pen::Up;
    }

    /// Finish the path, dropping sub-paths that never drew a line.
    pub fn build(self) -> Path<DVec2> {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut pending: Option<DVec2> = None;

        for cmd in self.commands {
            match cmd {
                PathCommand::MoveTo(p) => pending = Some(p),
                PathCommand::LineTo(p) => {
                    if let Some(start) = pending.take() {
                        out.push(PathCommand::MoveTo(start));
                    }
                    out.push(PathCommand::LineTo(p));
                }
            }
        }
        out.into_iter().collect()
    }
}
