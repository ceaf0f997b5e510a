pub mod editing;
pub mod encoding;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;


// Re-export key types for easier usage
pub use editing::{Cmd, Patch};
pub use encoding::{decode, encode};
pub use error::OutlineError;
pub use io::*;
pub use models::{EncodeOptions, ExcludedLines, Label, Line, MalformedPolicy, Outline, Pointer};
