//! # Pointer/Indent Encoding
//!
//! The two inverse transforms between the views of an outline:
//!
//! - **`decode`**: pointer + label view to indent view. Pure function of the
//!   previous line, one pass.
//! - **`encode`**: indent view to pointer + label view, using an explicit stack
//!   of still-open block openers.
//!
//! ## Key Invariants
//!
//! - `decode(encode(x))` reproduces the indents of `encode(x)`
//! - `encode` is idempotent
//! - Positive pointers only ever reference strictly earlier lines

pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::encode;
