use std::ops::Range;

use crate::models::Line;

/// Lines whose pointer, label or indent differ after an edit, as contiguous runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub changed: Vec<Range<usize>>,
}

impl Patch {
    pub fn between(before: &[Line], after: &[Line]) -> Self {
        let mut changed: Vec<Range<usize>> = Vec::new();
        let len = before.len().max(after.len());

        for i in 0..len {
            if before.get(i) == after.get(i) {
                continue;
            }
            match changed.last_mut() {
                Some(run) if run.end == i => run.end = i + 1,
                _ => changed.push(i..i + 1),
            }
        }

        Self { changed }
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.changed.iter().map(|r| r.len()).sum()
    }
}
