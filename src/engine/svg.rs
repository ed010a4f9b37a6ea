//! SVG path-data formatting

use std::fmt::Write;

use crate::types::CanvasPoint;

use super::types::{Path, PathCommand};

/// Format a number with 6 significant figures, trailing zeros trimmed (like C's `%g`).
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// `M x y L x y ...`, one space between commands, `Z` for closed paths.
pub(crate) fn path_data(path: &Path<CanvasPoint>) -> String {
    let mut out = String::new();
    for cmd in path {
        if !out.is_empty() {
            out.push(' ');
        }
        let (op, p) = match *cmd {
            PathCommand::MoveTo(p) => ('M', p),
            PathCommand::LineTo(p) => ('L', p),
        };
        // Writing to a String cannot fail
        let _ = write!(out, "{op}{} {}", fmt_num(p.x.raw()), fmt_num(p.y.raw()));
    }
    if path.is_closed() && !path.is_empty() {
        out.push_str(" Z");
    }
    out
}
