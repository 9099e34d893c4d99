/// A byte range `[start, end)` into the document buffer.
///
/// Parsed nodes and decorations store spans rather than copied text, so
/// slicing the buffer with any span reproduces the exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `at`, used for point insertions and line anchors.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `offset` falls inside the span.
    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if the two spans share at least one byte position,
    /// treating a zero-width span as a position between characters.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
            || self.is_empty() && other.start <= self.start && self.start <= other.end
            || other.is_empty() && self.start <= other.start && other.start <= self.end
    }

    #[must_use]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(2, 5).len(), 3);
        assert!(Span::point(4).is_empty());
        assert_eq!(Span::new(5, 2).len(), 0);
    }

    #[test]
    fn contains_is_half_open() {
        let sp = Span::new(2, 5);
        assert!(sp.contains(2));
        assert!(sp.contains(4));
        assert!(!sp.contains(5));
    }

    #[test]
    fn intersects_overlapping() {
        assert!(Span::new(0, 4).intersects(Span::new(3, 8)));
        assert!(!Span::new(0, 4).intersects(Span::new(4, 8)));
    }

    #[test]
    fn intersects_zero_width() {
        assert!(Span::point(4).intersects(Span::new(0, 8)));
        assert!(Span::point(4).intersects(Span::new(4, 8)));
        assert!(!Span::point(9).intersects(Span::new(0, 8)));
    }
}
