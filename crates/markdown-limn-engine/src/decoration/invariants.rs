//! Runtime checks for decoration-set correctness, used by tests.

use super::types::DecorationSet;

/// Asserts the set invariants: spans in bounds, sorted starts, and no two
/// replace/point decorations sharing a character position.
pub fn check(set: &DecorationSet, doc_len: usize) {
    let mut prev_start = 0usize;
    let mut last_replace_end: Option<usize> = None;

    for d in set.iter() {
        assert!(
            d.span.start <= d.span.end && d.span.end <= doc_len,
            "decoration span out of bounds: {:?} (doc len: {})",
            d.span,
            doc_len
        );
        assert!(
            d.span.start >= prev_start,
            "decorations not sorted: {:?} after start {}",
            d.span,
            prev_start
        );
        prev_start = d.span.start;

        if d.is_replacing() {
            if let Some(end) = last_replace_end {
                assert!(
                    d.span.start >= end,
                    "replace/point decorations overlap: {:?} begins before {}",
                    d.span,
                    end
                );
            }
            last_replace_end = Some(last_replace_end.unwrap_or(0).max(d.span.end));
        }
    }
}
