use thiserror::Error;

/// Errors surfaced by parsing, decoding, checking and editing an outline.
///
/// Boundary cases of the edit operations (first line, last line, depth 0) are
/// no-ops, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("Malformed record on line {line_number}: {reason}")]
    MalformedRecord { line_number: usize, reason: String },

    #[error("Invalid pointer {pointer} at index {index}: must reference an earlier line")]
    InvalidPointer { index: usize, pointer: i64 },

    #[error("Line index {index} out of range for outline of {len} lines")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Line at index {index} has indent {found} but its pointers decode to {expected}")]
    Inconsistent {
        index: usize,
        expected: usize,
        found: usize,
    },
}
