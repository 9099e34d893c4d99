use crate::span::Span;
use crate::widgets::Widget;

/// Which side of its position a zero-width insertion binds to, so
/// insertions at the same offset order deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// One rendering instruction over a document span.
#[derive(Debug, Clone, PartialEq)]
pub enum DecorationKind {
    /// Hide the span's text, optionally materializing a widget in its place.
    /// `block` marks multi-line replacements, which only the block provider
    /// may emit.
    Replace { widget: Option<Widget>, block: bool },
    /// Apply a CSS class to the span without removing text.
    Mark { class: String },
    /// Apply a CSS class to the whole line containing the anchor point.
    Line { class: String },
    /// Insert a widget at a point without anchoring to text.
    Point { widget: Widget, side: Side },
}

/// An immutable decoration: a span plus a rendering instruction.
///
/// Compared by span plus kind-specific equality (widget equality for
/// replace/point kinds), so re-renders can skip untouched DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub span: Span,
    pub kind: DecorationKind,
}

impl Decoration {
    /// Hide `span` without substituting anything.
    pub fn hide(span: Span) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: None,
                block: false,
            },
        }
    }

    /// Replace `span` with `widget`.
    pub fn replace(span: Span, widget: Widget) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: Some(widget),
                block: false,
            },
        }
    }

    /// Replace a multi-line `span` with a block widget.
    pub fn block_replace(span: Span, widget: Widget) -> Self {
        Self {
            span,
            kind: DecorationKind::Replace {
                widget: Some(widget),
                block: true,
            },
        }
    }

    pub fn mark(span: Span, class: impl Into<String>) -> Self {
        Self {
            span,
            kind: DecorationKind::Mark {
                class: class.into(),
            },
        }
    }

    /// Line class anchored at `line_start`.
    pub fn line(line_start: usize, class: impl Into<String>) -> Self {
        Self {
            span: Span::point(line_start),
            kind: DecorationKind::Line {
                class: class.into(),
            },
        }
    }

    pub fn point(at: usize, widget: Widget, side: Side) -> Self {
        Self {
            span: Span::point(at),
            kind: DecorationKind::Point { widget, side },
        }
    }

    /// True for the kinds subject to the no-overlap invariant.
    pub fn is_replacing(&self) -> bool {
        matches!(
            self.kind,
            DecorationKind::Replace { .. } | DecorationKind::Point { .. }
        )
    }

    /// Stable ordering bias for equal start positions. Line and
    /// before-insertions sort ahead of replacements; after-insertions sort
    /// behind, so zero-width decorations nest deterministically.
    fn start_side(&self) -> i8 {
        match &self.kind {
            DecorationKind::Line { .. } => -3,
            DecorationKind::Point {
                side: Side::Before, ..
            } => -2,
            DecorationKind::Mark { .. } => -1,
            DecorationKind::Replace { .. } => 0,
            DecorationKind::Point {
                side: Side::After, ..
            } => 1,
        }
    }
}

/// A sorted, non-overlapping sequence of decorations.
///
/// Built from an arbitrary candidate list: candidates are sorted by
/// `(start, start_side)`, then replace/point decorations are filtered so a
/// candidate survives only when its start is at or after the end of the
/// previously kept replace/point decoration. Line and mark decorations are
/// exempt from the overlap rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    pub fn build(mut candidates: Vec<Decoration>) -> Self {
        candidates.sort_by_key(|d| (d.span.start, d.start_side()));

        let mut decorations = Vec::with_capacity(candidates.len());
        let mut last_replace_end: Option<usize> = None;
        for d in candidates {
            if d.is_replacing() {
                if last_replace_end.is_some_and(|end| d.span.start < end) {
                    continue;
                }
                last_replace_end = Some(
                    last_replace_end
                        .unwrap_or(0)
                        .max(d.span.end),
                );
            }
            decorations.push(d);
        }

        Self { decorations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations.iter()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}
