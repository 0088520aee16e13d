//! Error types for the SGF codec.

use derive_more::{Display, Error};

/// A fatal parse failure. The collection is never partially returned.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("parse error at byte {}: {}", offset, message)]
pub struct ParseError {
    /// Byte offset into the input where the failure was detected.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
    /// Grammar contexts enclosing the failure, innermost first.
    pub trail: Vec<String>,
}

impl ParseError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            message: message.into(),
            trail: Vec::new(),
        }
    }

    pub(crate) fn pushed(mut self, context: &str) -> ParseError {
        self.trail.push(context.to_string());
        self
    }
}

/// A value that cannot be expressed in SGF text.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum RenderError {
    /// A real-valued payload was NaN or infinite.
    #[display("property {} holds a non-finite value {}", _0, _1)]
    NonFiniteReal(#[error(not(source))] String, f64),
    /// An unknown property carries an identifier that is not 1-4
    /// uppercase ASCII letters.
    #[display("invalid property identifier {:?}", _0)]
    BadIdentifier(#[error(not(source))] String),
}
