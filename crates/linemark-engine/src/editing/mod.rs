//! # Edit Operations
//!
//! The operations a UI invokes by line index. Each one adjusts indents at or
//! just after the target, relabels the target, then re-runs the encoder over
//! the whole sequence so both views agree again.
//!
//! Reaching a document edge (indenting the first line, outdenting the last, or
//! outdenting a depth-0 line) is a no-op. Only an index outside the outline is
//! an error.

pub mod commands;
pub mod patch;

pub use commands::{
    Cmd, apply, decrease_indent, delete, exclude, increase_indent, insert_break, join,
};
pub use patch::Patch;
