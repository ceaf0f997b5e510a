pub mod line;
pub mod outline;

pub use line::{Label, Line, Pointer};
pub use outline::{EncodeOptions, ExcludedLines, MalformedPolicy, Outline};
