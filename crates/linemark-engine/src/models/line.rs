use std::fmt;

use serde::Serialize;

/// Where nesting resumes after a line.
///
/// On the wire this is a signed integer: `-1` for [`Pointer::Root`], `0` for
/// [`Pointer::Unset`], and a positive 1-indexed line reference otherwise.
/// [`Pointer::Line`] holds the 0-based index; the +1 offset only exists in
/// [`Pointer::to_wire`] / [`Pointer::from_wire`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pointer {
    /// Nesting closes all the way back to the top level.
    Root,
    /// No continuation target.
    #[default]
    Unset,
    /// Nesting returns to the level opened by this (earlier) line.
    Line(usize),
}

impl Pointer {
    pub const ROOT_WIRE: i64 = -1;
    pub const UNSET_WIRE: i64 = 0;

    /// Convert a wire integer into a pointer. Returns `None` for values below `-1`.
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            Self::ROOT_WIRE => Some(Pointer::Root),
            Self::UNSET_WIRE => Some(Pointer::Unset),
            v if v > 0 => Some(Pointer::Line((v - 1) as usize)),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i64 {
        match self {
            Pointer::Root => Self::ROOT_WIRE,
            Pointer::Unset => Self::UNSET_WIRE,
            Pointer::Line(index) => index as i64 + 1,
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

/// Transition kind between a line and the one following it.
///
/// The set is closed; anything else found in a record is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    /// Same paragraph, the line break carries no meaning.
    Continuous,
    /// Same paragraph, the line break is meaningful.
    Address,
    /// New paragraph within the same block.
    Block,
    /// New sibling block.
    SameLevel,
    /// Opens a child block; the next line is its first child.
    IndentedBlock,
    /// Line marked removed.
    Delete,
    /// Line excluded from downstream use.
    Ignore,
}

impl Label {
    pub const ALL: [Label; 7] = [
        Label::Continuous,
        Label::Address,
        Label::Block,
        Label::SameLevel,
        Label::IndentedBlock,
        Label::Delete,
        Label::Ignore,
    ];

    pub fn code(self) -> char {
        match self {
            Label::Continuous => 'c',
            Label::Address => 'a',
            Label::Block => 'b',
            Label::SameLevel => 's',
            Label::IndentedBlock => 'd',
            Label::Delete => 'x',
            Label::Ignore => 'i',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.code() == code)
    }

    /// `Delete` and `Ignore`: lines that are kept for positional bookkeeping only.
    pub fn is_excluded(self) -> bool {
        matches!(self, Label::Delete | Label::Ignore)
    }

    /// Labels owned by the encoder rather than the caller.
    pub fn is_structural(self) -> bool {
        matches!(self, Label::SameLevel | Label::IndentedBlock)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One record of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Opaque payload, never inspected.
    pub text: String,
    pub pointer: Pointer,
    /// `None` when the record carries an empty label field.
    pub label: Option<Label>,
    /// Derived nesting depth, 0 at the document root.
    pub indent: usize,
}

impl Line {
    pub fn new(text: impl Into<String>, pointer: Pointer, label: Option<Label>) -> Self {
        Self {
            text: text.into(),
            pointer,
            label,
            indent: 0,
        }
    }

    pub fn is_block_opener(&self) -> bool {
        self.label == Some(Label::IndentedBlock)
    }

    pub fn is_excluded(&self) -> bool {
        self.label.is_some_and(Label::is_excluded)
    }

    /// Wire form of the label field: one character, or empty.
    pub fn label_code(&self) -> String {
        self.label.map(|l| l.code().to_string()).unwrap_or_default()
    }
}
