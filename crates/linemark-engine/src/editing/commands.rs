use crate::encoding::encode;
use crate::error::OutlineError;
use crate::models::{EncodeOptions, Label, Line};

/// Commands that can be applied to an outline, each targeting one line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Start a new sibling block at the target.
    InsertBreak { at: usize },
    /// Mark the target removed.
    Delete { at: usize },
    /// Exclude the target from downstream use.
    Exclude { at: usize },
    /// Merge the target with the following line (backspace).
    Join { at: usize },
    IncreaseIndent { at: usize },
    DecreaseIndent { at: usize },
}

impl Cmd {
    pub fn target(self) -> usize {
        match self {
            Cmd::InsertBreak { at }
            | Cmd::Delete { at }
            | Cmd::Exclude { at }
            | Cmd::Join { at }
            | Cmd::IncreaseIndent { at }
            | Cmd::DecreaseIndent { at } => at,
        }
    }
}

/// Apply a command to a copy of `lines` and re-encode it.
///
/// A command that hits a document edge returns the input unchanged.
pub fn apply(lines: &[Line], cmd: Cmd, options: &EncodeOptions) -> Result<Vec<Line>, OutlineError> {
    let at = cmd.target();
    if at >= lines.len() {
        return Err(OutlineError::IndexOutOfRange {
            index: at,
            len: lines.len(),
        });
    }

    let mut edited = lines.to_vec();
    let changed = match cmd {
        Cmd::InsertBreak { at } => relabel(&mut edited, at, Label::SameLevel),
        Cmd::Delete { at } => relabel(&mut edited, at, Label::Delete),
        Cmd::Exclude { at } => relabel(&mut edited, at, Label::Ignore),
        Cmd::Join { at } => join_next(&mut edited, at, options),
        Cmd::IncreaseIndent { at } => indent(&mut edited, at, options),
        Cmd::DecreaseIndent { at } => outdent(&mut edited, at),
    };

    if !changed {
        log::debug!("{cmd:?} is a no-op");
        return Ok(lines.to_vec());
    }
    Ok(encode(&edited, options))
}

pub fn insert_break(
    lines: &[Line],
    at: usize,
    options: &EncodeOptions,
) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::InsertBreak { at }, options)
}

pub fn delete(lines: &[Line], at: usize, options: &EncodeOptions) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::Delete { at }, options)
}

pub fn exclude(lines: &[Line], at: usize, options: &EncodeOptions) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::Exclude { at }, options)
}

pub fn join(lines: &[Line], at: usize, options: &EncodeOptions) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::Join { at }, options)
}

pub fn increase_indent(
    lines: &[Line],
    at: usize,
    options: &EncodeOptions,
) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::IncreaseIndent { at }, options)
}

pub fn decrease_indent(
    lines: &[Line],
    at: usize,
    options: &EncodeOptions,
) -> Result<Vec<Line>, OutlineError> {
    apply(lines, Cmd::DecreaseIndent { at }, options)
}

/// If `target` opens a block, pull its descendants up one level so they are
/// not orphaned when it stops being an opener.
fn demote_descendants(lines: &mut [Line], target: usize) {
    if !lines[target].is_block_opener() {
        return;
    }
    let depth = lines[target].indent;
    for line in lines[target + 1..]
        .iter_mut()
        .take_while(|l| l.indent > depth)
    {
        line.indent -= 1;
    }
}

fn relabel(lines: &mut [Line], at: usize, label: Label) -> bool {
    demote_descendants(lines, at);
    lines[at].label = Some(label);
    true
}

fn join_next(lines: &mut [Line], at: usize, options: &EncodeOptions) -> bool {
    demote_descendants(lines, at);
    lines[at].label = Some(Label::Continuous);
    if let Some(next) = (at + 1..lines.len()).find(|&i| options.participates(&lines[i])) {
        lines[next].indent = lines[at].indent;
    }
    true
}

fn indent(lines: &mut [Line], at: usize, options: &EncodeOptions) -> bool {
    let Some(prev) = (0..at).rev().find(|&i| options.participates(&lines[i])) else {
        return false;
    };
    if lines[prev].indent < lines[at].indent {
        return false;
    }
    lines[at].indent += 1;
    lines[at].label = Some(Label::SameLevel);
    true
}

fn outdent(lines: &mut [Line], at: usize) -> bool {
    if at + 1 == lines.len() || lines[at].indent == 0 {
        return false;
    }
    demote_descendants(lines, at);
    lines[at].indent -= 1;
    lines[at].label = Some(Label::SameLevel);
    true
}
