use thiserror::Error;

/// Errors raised by the conversion and addressing entry points.
///
/// Structural edits never fail: an edit whose operand does not apply is a
/// no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    /// The input cannot be described as null, bool, number, string, array,
    /// or string-keyed object.
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(String),
    /// The tree does not have the node kinds the requested target expects.
    #[error("invalid node kind: {0}")]
    InvalidNodeKind(String),
    /// A JSON Pointer that is neither empty nor starts with `/`.
    #[error("invalid json pointer: {0:?}")]
    InvalidPointer(String),
}
