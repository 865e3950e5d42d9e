//! Error types for parsing engine vocabulary from text.
//!
//! The engine itself never fails; these only cover turning user or file
//! input into typed values.

use thiserror::Error;

/// Failed to parse a name into one of the engine's enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown pane '{0}' (expected 'source' or 'target')")]
    Pane(String),
    #[error("unknown direction '{0}' (expected 'left' or 'right')")]
    Direction(String),
    #[error("unknown layout '{0}' (expected 'ltr' or 'rtl')")]
    Layout(String),
    #[error("unknown filter mode '{0}' (expected 'substring' or 'fuzzy')")]
    FilterMode(String),
}
