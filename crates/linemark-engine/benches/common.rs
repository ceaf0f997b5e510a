// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use linemark_engine::{EncodeOptions, Label, Line, Outline, Pointer};

/// Indents of a repeating section that opens and closes blocks up to depth 3
#[allow(dead_code)]
pub fn generate_indents(sections: usize) -> Vec<usize> {
    let base = [0, 1, 1, 2, 3, 3, 2, 1, 0, 1, 2];
    base.iter().copied().cycle().take(base.len() * sections).collect()
}

#[allow(dead_code)]
pub fn generate_outline(sections: usize) -> Outline {
    let lines = generate_indents(sections)
        .into_iter()
        .enumerate()
        .map(|(i, indent)| Line {
            indent,
            ..Line::new(format!("line {i}"), Pointer::Unset, Some(Label::SameLevel))
        })
        .collect();
    Outline::from_indents(lines, EncodeOptions::default())
}

#[allow(dead_code)]
pub fn generate_record_text(sections: usize) -> String {
    generate_outline(sections).to_text()
}
