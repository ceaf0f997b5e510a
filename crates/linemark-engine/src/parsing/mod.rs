//! # Record Codec
//!
//! Converts between record text and [`Line`]s. One record per physical line:
//!
//! ```text
//! text<TAB>pointer<TAB>label
//! ```
//!
//! - `pointer` is a base-10 integer: `-1` root, `0` unset, `n > 0` refers to line `n`
//!   (1-indexed)
//! - `label` is one character code from [`Label`] or empty
//! - Blank lines are dropped; trailing `\r` is stripped. A line holding tabs is a
//!   record, never blank
//!
//! Malformed records (wrong field count, non-integer pointer, unknown label) are
//! handled by a single [`MalformedPolicy`] per parse. Pointers below `-1` are always
//! an error, whatever the policy.

pub mod invariants;

pub use invariants::check;

use crate::error::OutlineError;
use crate::models::{Label, Line, MalformedPolicy, Pointer};

enum RecordError {
    Malformed(String),
    InvalidPointer(i64),
}

/// Parse record text into lines. Indents are left at 0; run the decoder next.
pub fn parse(text: &str, policy: MalformedPolicy) -> Result<Vec<Line>, OutlineError> {
    let mut lines = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let raw = raw.trim_end_matches('\r');
        if raw.trim_matches(|c: char| c.is_whitespace() && c != '\t').is_empty() {
            continue;
        }

        match parse_record(raw) {
            Ok(line) => lines.push(line),
            Err(RecordError::InvalidPointer(pointer)) => {
                return Err(OutlineError::InvalidPointer {
                    index: lines.len(),
                    pointer,
                });
            }
            Err(RecordError::Malformed(reason)) => match policy {
                MalformedPolicy::Reject => {
                    return Err(OutlineError::MalformedRecord {
                        line_number: number + 1,
                        reason,
                    });
                }
                MalformedPolicy::Ignore => {
                    log::warn!("line {}: {reason}; keeping it as ignored", number + 1);
                    lines.push(coerce(raw));
                }
            },
        }
    }

    Ok(lines)
}

fn parse_record(raw: &str) -> Result<Line, RecordError> {
    let fields: Vec<&str> = raw.split('\t').collect();
    let [text, pointer, label] = fields[..] else {
        return Err(RecordError::Malformed(format!(
            "expected 3 tab-separated fields, found {}",
            fields.len()
        )));
    };

    let value = parse_pointer(pointer)
        .ok_or_else(|| RecordError::Malformed(format!("pointer `{pointer}` is not an integer")))?;
    let pointer = Pointer::from_wire(value).ok_or(RecordError::InvalidPointer(value))?;

    Ok(Line::new(text, pointer, parse_label(label)?))
}

/// Plain base-10 literal: optional `-`, then digits only.
fn parse_pointer(field: &str) -> Option<i64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_label(field: &str) -> Result<Option<Label>, RecordError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(code), None) => Label::from_code(code)
            .map(Some)
            .ok_or_else(|| RecordError::Malformed(format!("unknown label `{field}`"))),
        _ => Err(RecordError::Malformed(format!("unknown label `{field}`"))),
    }
}

/// Salvage what can be read from a malformed record.
fn coerce(raw: &str) -> Line {
    let mut fields = raw.split('\t');
    let text = fields.next().unwrap_or_default();
    let pointer = fields
        .next()
        .and_then(parse_pointer)
        .and_then(Pointer::from_wire)
        .unwrap_or_default();
    Line::new(text, pointer, Some(Label::Ignore))
}

/// Join lines back into record text, no trailing newline.
pub fn serialize(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|l| format!("{}\t{}\t{}", l.text, l.pointer, l.label_code()))
        .collect::<Vec<_>>()
        .join("\n")
}
