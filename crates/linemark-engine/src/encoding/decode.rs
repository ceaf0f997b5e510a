use crate::error::OutlineError;
use crate::models::{Line, Pointer};

/// Derive every line's indent from the pointer view.
///
/// Single left-to-right pass: line `i`'s depth depends only on line `i-1`'s
/// label, pointer and (already final) indent. Pointers and labels are copied
/// through untouched. Every pointer must reference an earlier line, including
/// those the pass never follows.
pub fn decode(lines: &[Line]) -> Result<Vec<Line>, OutlineError> {
    validate_pointers(lines)?;

    let mut out = lines.to_vec();
    let mut current = 0;

    for i in 0..out.len() {
        if i > 0 {
            current = next_indent(&out, i - 1, current);
        }
        out[i].indent = current;
    }

    Ok(out)
}

fn validate_pointers(lines: &[Line]) -> Result<(), OutlineError> {
    match lines
        .iter()
        .enumerate()
        .find(|(index, line)| matches!(line.pointer, Pointer::Line(target) if target >= *index))
    {
        Some((index, line)) => Err(OutlineError::InvalidPointer {
            index,
            pointer: line.pointer.to_wire(),
        }),
        None => Ok(()),
    }
}

/// Depth of the line after `prev`, given the running depth.
fn next_indent(lines: &[Line], prev: usize, current: usize) -> usize {
    let line = &lines[prev];
    if line.is_block_opener() {
        return current + 1;
    }

    match line.pointer {
        Pointer::Line(target) => lines[target].indent + 1,
        Pointer::Root => 0,
        Pointer::Unset => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;
    use crate::tests::records;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn indents(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(|l| l.indent).collect()
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(decode(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_label_opens_block_even_with_unset_pointer() {
        let lines = records(&[("A", -1, "s"), ("B", 0, "d"), ("C", -1, "s")]);
        assert_eq!(indents(&decode(&lines).unwrap()), vec![0, 0, 1]);
    }

    #[test]
    fn test_pointer_jumps_to_referenced_depth() {
        // A opens, B opens, C closes back to A's children
        let lines = records(&[
            ("A", 0, "d"),
            ("B", 0, "d"),
            ("C", 1, "s"),
            ("D", -1, "s"),
            ("E", 0, "s"),
        ]);
        assert_eq!(indents(&decode(&lines).unwrap()), vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_unset_pointer_keeps_depth() {
        let lines = records(&[("A", 0, "d"), ("B", 0, "c"), ("C", 0, "a"), ("D", 0, "")]);
        assert_eq!(indents(&decode(&lines).unwrap()), vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_stale_indent_is_overwritten() {
        let mut lines = records(&[("A", 0, "s"), ("B", 0, "s")]);
        lines[0].indent = 4;
        lines[1].indent = 7;
        assert_eq!(indents(&decode(&lines).unwrap()), vec![0, 0]);
    }

    #[test]
    fn test_pointers_and_labels_untouched() {
        let lines = records(&[("A", 0, "d"), ("B", -1, "x"), ("C", 0, "i")]);
        let decoded = decode(&lines).unwrap();
        assert_eq!(decoded[1].pointer, Pointer::Root);
        assert_eq!(decoded[1].label, Some(Label::Delete));
        assert_eq!(decoded[2].label, Some(Label::Ignore));
    }

    #[rstest]
    #[case::self_reference(&[("A", 0, "s"), ("B", 2, "s"), ("C", 0, "s")], 1, 2)]
    #[case::forward_reference(&[("A", 3, "s"), ("B", 0, "s"), ("C", 0, "s")], 0, 3)]
    fn test_invalid_pointer(
        #[case] input: &[(&str, i64, &str)],
        #[case] index: usize,
        #[case] pointer: i64,
    ) {
        let result = decode(&records(input));
        assert_eq!(result, Err(OutlineError::InvalidPointer { index, pointer }));
    }

    #[rstest]
    #[case::last_line_forward(&[("A", 0, "s"), ("B", 5, "s")], 1, 5)]
    #[case::last_line_self(&[("A", 0, "s"), ("B", 2, "s")], 1, 2)]
    #[case::single_line_self(&[("A", 1, "s")], 0, 1)]
    #[case::opener_forward(&[("A", 3, "d"), ("B", 0, "s"), ("C", 0, "s")], 0, 3)]
    fn test_unfollowed_pointers_are_still_validated(
        #[case] input: &[(&str, i64, &str)],
        #[case] index: usize,
        #[case] pointer: i64,
    ) {
        let result = decode(&records(input));
        assert_eq!(result, Err(OutlineError::InvalidPointer { index, pointer }));
    }
}
