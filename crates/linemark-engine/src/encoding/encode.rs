use std::cmp::Ordering;

use crate::models::{EncodeOptions, Label, Line, Pointer};

/// Derive pointers and structural labels from the indent view.
///
/// Walks adjacent pairs of participating lines keeping a stack of open
/// block openers. Only `SameLevel`/`IndentedBlock` are rewritten, except that a
/// line followed by a deeper one must become `IndentedBlock` whatever it was.
pub fn encode(lines: &[Line], options: &EncodeOptions) -> Vec<Line> {
    let mut out = lines.to_vec();
    let live: Vec<usize> = (0..out.len())
        .filter(|&i| options.participates(&out[i]))
        .collect();

    if let Some(&first) = live.first()
        && out[first].indent != 0
    {
        log::warn!(
            "first line at index {first} has indent {}, clamping to 0",
            out[first].indent
        );
        out[first].indent = 0;
    }

    let mut open: Vec<usize> = Vec::new();
    for pair in live.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let depth = out[prev].indent;
        if out[next].indent > depth + 1 {
            log::warn!(
                "indent jump from {depth} to {} at index {next}, clamping",
                out[next].indent
            );
            out[next].indent = depth + 1;
        }
        let next_depth = out[next].indent;
        let line = &mut out[prev];

        match next_depth.cmp(&depth) {
            Ordering::Equal => {
                line.pointer = Pointer::Unset;
                demote(line);
            }
            Ordering::Greater => {
                if let Some(label) = line.label
                    && !label.is_structural()
                {
                    log::debug!("index {prev} opens a block, replacing label {label}");
                }
                line.pointer = Pointer::Unset;
                line.label = Some(Label::IndentedBlock);
                open.push(prev);
            }
            Ordering::Less => {
                for _ in next_depth..depth {
                    open.pop();
                }
                line.pointer = open.last().map_or(Pointer::Root, |&i| Pointer::Line(i));
                demote(line);
            }
        }
    }

    if let Some(&last) = live.last() {
        out[last].pointer = Pointer::Unset;
        demote(&mut out[last]);
    }

    if live.len() < out.len() {
        settle_inert_lines(&mut out, &live);
    }

    out
}

/// A block opener with no deeper successor is just a sibling.
fn demote(line: &mut Line) {
    if line.is_block_opener() {
        line.label = Some(Label::SameLevel);
    }
}

/// Non-participating lines pass depth through unchanged when decoded, so they
/// take the depth of the next live line (or the last one, at the tail).
fn settle_inert_lines(out: &mut [Line], live: &[usize]) {
    let mut following = live.iter().peekable();
    let mut previous_depth = 0;

    for i in 0..out.len() {
        while following.next_if(|&&l| l < i).is_some() {}
        match following.peek() {
            Some(&&l) if l == i => {
                previous_depth = out[i].indent;
            }
            Some(&&l) => {
                out[i].indent = out[l].indent;
                out[i].pointer = Pointer::Unset;
            }
            None => {
                out[i].indent = previous_depth;
                out[i].pointer = Pointer::Unset;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode;
    use crate::models::ExcludedLines;
    use crate::tests::{from_indents, records};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pointers(lines: &[Line]) -> Vec<i64> {
        lines.iter().map(|l| l.pointer.to_wire()).collect()
    }

    fn labels(lines: &[Line]) -> String {
        lines.iter().map(Line::label_code).collect()
    }

    fn indents(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(|l| l.indent).collect()
    }

    fn in_tree() -> EncodeOptions {
        EncodeOptions {
            excluded: ExcludedLines::InTree,
            ..EncodeOptions::default()
        }
    }

    #[test]
    fn test_simple_block() {
        let out = encode(&from_indents(&[0, 1, 1, 0]), &EncodeOptions::default());
        assert_eq!(pointers(&out), vec![0, 0, -1, 0]);
        assert_eq!(labels(&out), "dsss");
    }

    #[test]
    fn test_close_to_enclosing_block() {
        let out = encode(&from_indents(&[0, 1, 2, 1, 0]), &EncodeOptions::default());
        assert_eq!(pointers(&out), vec![0, 0, 1, -1, 0]);
        assert_eq!(labels(&out), "ddsss");
    }

    #[test]
    fn test_close_several_levels() {
        let out = encode(&from_indents(&[0, 1, 2, 3, 1]), &EncodeOptions::default());
        assert_eq!(pointers(&out), vec![0, 0, 0, 1, 0]);
        assert_eq!(indents(&decode(&out).unwrap()), vec![0, 1, 2, 3, 1]);
    }

    #[test]
    fn test_childless_opener_is_demoted() {
        let lines = records(&[("A", 0, "d"), ("B", 0, "d"), ("C", 0, "s")]);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(labels(&out), "sss");
    }

    #[test]
    fn test_opener_followed_by_shallower_line_is_demoted() {
        let mut lines = from_indents(&[0, 1, 0]);
        lines[1].label = Some(Label::IndentedBlock);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(labels(&out), "dss");
        assert_eq!(pointers(&out), vec![0, -1, 0]);
    }

    #[test]
    fn test_caller_labels_survive() {
        let mut lines = from_indents(&[0, 0, 1, 1, 0]);
        lines[0].label = Some(Label::Continuous);
        lines[2].label = Some(Label::Address);
        lines[3].label = Some(Label::Block);
        lines[4].label = None;
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(labels(&out), "cdab");
        assert_eq!(pointers(&out), vec![0, 0, 0, -1, 0]);
    }

    #[test]
    fn test_deeper_successor_overrides_caller_label() {
        let mut lines = from_indents(&[0, 1]);
        lines[0].label = Some(Label::Continuous);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(out[0].label, Some(Label::IndentedBlock));
    }

    #[rstest]
    #[case(&[0, 3], &[0, 1])]
    #[case(&[2, 2], &[0, 1])]
    #[case(&[0, 1, 4, 0], &[0, 1, 2, 0])]
    fn test_jumps_are_clamped(#[case] input: &[usize], #[case] expected: &[usize]) {
        let out = encode(&from_indents(input), &EncodeOptions::default());
        assert_eq!(indents(&out), expected);
        assert_eq!(indents(&decode(&out).unwrap()), expected);
    }

    #[test]
    fn test_last_line_is_closed() {
        let mut lines = from_indents(&[0, 1]);
        lines[1].label = Some(Label::IndentedBlock);
        lines[1].pointer = Pointer::Root;
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(out[1].pointer, Pointer::Unset);
        assert_eq!(out[1].label, Some(Label::SameLevel));
    }

    #[test]
    fn test_inert_lines_are_skipped() {
        // A's only child is deleted: A is no longer a block
        let mut lines = from_indents(&[0, 1, 0]);
        lines[1].label = Some(Label::Delete);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(labels(&out), "sxs");
        assert_eq!(pointers(&out), vec![0, 0, 0]);
        assert_eq!(indents(&out), vec![0, 0, 0]);
    }

    #[test]
    fn test_inert_line_takes_next_live_depth() {
        let mut lines = from_indents(&[0, 1, 1, 2, 0]);
        lines[2].label = Some(Label::Ignore);
        let out = encode(&lines, &EncodeOptions::default());
        // B (index 1) now pairs with D (index 3), which is deeper
        assert_eq!(indents(&out), vec![0, 1, 2, 2, 0]);
        assert_eq!(labels(&out), "ddiss");
        assert_eq!(indents(&decode(&out).unwrap()), indents(&out));
    }

    #[test]
    fn test_trailing_inert_lines_keep_last_depth() {
        let mut lines = from_indents(&[0, 1, 0, 0]);
        lines[2].label = Some(Label::Delete);
        lines[3].label = Some(Label::Ignore);
        lines[3].pointer = Pointer::Root;
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(indents(&out), vec![0, 1, 1, 1]);
        assert_eq!(pointers(&out), vec![0, 0, 0, 0]);
        assert_eq!(indents(&decode(&out).unwrap()), indents(&out));
    }

    #[test]
    fn test_leading_inert_line_clamps_first_live_line() {
        let mut lines = from_indents(&[0, 1, 2]);
        lines[0].label = Some(Label::Delete);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(indents(&out), vec![0, 0, 1]);
        assert_eq!(indents(&decode(&out).unwrap()), vec![0, 0, 1]);
    }

    #[test]
    fn test_in_tree_excluded_lines_keep_structure() {
        let mut lines = from_indents(&[0, 1, 0]);
        lines[1].label = Some(Label::Delete);
        let out = encode(&lines, &in_tree());
        assert_eq!(labels(&out), "dxs");
        assert_eq!(pointers(&out), vec![0, -1, 0]);
        assert_eq!(indents(&out), vec![0, 1, 0]);
    }

    #[test]
    fn test_all_lines_inert() {
        let mut lines = from_indents(&[0, 1]);
        lines[0].label = Some(Label::Delete);
        lines[1].label = Some(Label::Delete);
        let out = encode(&lines, &EncodeOptions::default());
        assert_eq!(indents(&out), vec![0, 0]);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(encode(&[], &EncodeOptions::default()).is_empty());
    }

    #[rstest]
    #[case(&[0, 1, 1, 0])]
    #[case(&[0, 1, 2, 3, 2, 1, 0, 1])]
    #[case(&[0, 0, 0])]
    #[case(&[0, 1, 2, 2, 0, 1, 1, 2, 3, 0])]
    fn test_encode_is_idempotent(#[case] input: &[usize]) {
        for options in [EncodeOptions::default(), in_tree()] {
            let once = encode(&from_indents(input), &options);
            let twice = encode(&once, &options);
            assert_eq!(once, twice);
            assert_eq!(indents(&decode(&once).unwrap()), input);
        }
    }
}
