//! Error types with rich diagnostics using miette
//!
//! Parse errors carry the source text and a byte span so the offending JSON is
//! shown in context. Spec errors are the few fail-fast validations; everything
//! else in the engine degrades instead of erroring.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based line/column position, clamped to the source.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (idx, text) in self.source.split_inclusive('\n').enumerate() {
            if idx + 1 == line {
                let within = column.saturating_sub(1).min(text.len());
                return offset + within;
            }
            offset += text.len();
        }
        self.source.len()
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while reading GraphSpec JSON
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed JSON: {message}")]
    #[diagnostic(code(graphspec::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unexpected end of input: {message}")]
    #[diagnostic(code(graphspec::parse::eof))]
    UnexpectedEof {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("not a valid GraphSpec: {message}")]
    #[diagnostic(
        code(graphspec::parse::schema),
        help(
            "objects, regions and derived entries need a \"type\" tag; \
             constraints and line forms need a \"kind\" tag"
        )
    )]
    Schema {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("does not match the GraphSpec shape")]
        span: SourceSpan,
    },

    #[error("failed to read GraphSpec: {0}")]
    #[diagnostic(code(graphspec::parse::io))]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Spec Errors
// ============================================================================

/// Validation failures that stop a render before any geometry is computed
#[derive(Error, Diagnostic, Debug)]
pub enum SpecError {
    #[error("invalid {axis} range [{min}, {max}]: {reason}")]
    #[diagnostic(
        code(graphspec::spec::invalid_range),
        help("ranges must be finite with min strictly less than max")
    )]
    InvalidRange {
        axis: &'static str,
        min: f64,
        max: f64,
        reason: NumericError,
    },

    #[error("invalid engine configuration `{field}`: {reason}")]
    #[diagnostic(code(graphspec::config::invalid))]
    InvalidConfig { field: &'static str, reason: String },
}
