use serde::{Deserialize, Serialize};

use crate::editing::{Cmd, commands};
use crate::encoding::{decode, encode};
use crate::error::OutlineError;
use crate::models::Line;
use crate::parsing;

/// How records that fail to parse are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// The whole parse fails on the first malformed record.
    #[default]
    Reject,
    /// The record is kept and labelled `Ignore`.
    Ignore,
}

/// Whether `Delete`/`Ignore` lines take part in the nesting structure.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcludedLines {
    /// Excluded lines are skipped when pairing adjacent lines; they inherit the
    /// depth of the next live line and never carry a pointer.
    #[default]
    Inert,
    /// Excluded lines are ordinary members of the tree.
    InTree,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub malformed: MalformedPolicy,
    pub excluded: ExcludedLines,
}

impl EncodeOptions {
    /// True when `line` participates in nesting under these options.
    pub fn participates(&self, line: &Line) -> bool {
        match self.excluded {
            ExcludedLines::Inert => !line.is_excluded(),
            ExcludedLines::InTree => true,
        }
    }
}

/// An ordered sequence of lines with both views kept consistent.
///
/// Every edit returns a fresh `Outline`; the receiver is never mutated, so a
/// caller may keep earlier values around as undo snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    lines: Vec<Line>,
    options: EncodeOptions,
}

impl Outline {
    /// Parse record text and bootstrap indents from the pointer view.
    pub fn parse(text: &str, options: EncodeOptions) -> Result<Self, OutlineError> {
        let records = parsing::parse(text, options.malformed)?;
        let lines = decode(&records)?;
        Ok(Self { lines, options })
    }

    /// Build from lines whose pointers are authoritative.
    pub fn from_pointers(lines: Vec<Line>, options: EncodeOptions) -> Result<Self, OutlineError> {
        let lines = decode(&lines)?;
        Ok(Self { lines, options })
    }

    /// Build from lines whose indents are authoritative.
    pub fn from_indents(lines: Vec<Line>, options: EncodeOptions) -> Self {
        let lines = encode(&lines, &options);
        Self { lines, options }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn options(&self) -> EncodeOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn indents(&self) -> Vec<usize> {
        self.lines.iter().map(|l| l.indent).collect()
    }

    /// Apply an edit command and return the re-encoded outline.
    pub fn apply(&self, cmd: Cmd) -> Result<Self, OutlineError> {
        log::debug!("applying {cmd:?} to outline of {} lines", self.len());
        let lines = commands::apply(&self.lines, cmd, &self.options)?;
        Ok(Self {
            lines,
            options: self.options,
        })
    }

    /// Serialize the pointer view back to record text.
    pub fn to_text(&self) -> String {
        parsing::serialize(&self.lines)
    }
}
