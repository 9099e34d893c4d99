use crate::span::Span;

/// A recognized inline construct with byte spans into the document.
///
/// All variants store spans rather than text, enabling lossless round-trip.
/// `full` always covers the construct including its delimiters; `inner` (or
/// the variant-specific sub-spans) covers the content between them, so the
/// decoration builder can hide markers and style content independently
/// without re-scanning text.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineNode {
    /// Plain text that isn't part of any special construct.
    Text(Span),
    /// Backtick code span; a raw zone, nothing is recognized inside.
    CodeSpan { full: Span, inner: Span },
    /// `**strong**` or `__strong__`.
    Strong { full: Span, inner: Span },
    /// `*emphasis*` or `_emphasis_`.
    Emphasis { full: Span, inner: Span },
    /// `~~struck~~`.
    Strikethrough { full: Span, inner: Span },
    /// `==highlighted==`.
    Highlight { full: Span, inner: Span },
    /// `[[target]]` or `[[target|alias]]`.
    WikiLink {
        full: Span,
        target: Span,
        alias: Option<Span>,
    },
    /// `![[target]]`, `inner` including any `|size` suffix.
    Embed { full: Span, inner: Span },
    /// `%%hidden%%`, elided entirely when rendered.
    Comment { full: Span },
    /// `$expr$`.
    InlineMath { full: Span, inner: Span },
    /// `[^id]`.
    FootnoteRef { full: Span, id: Span },
    /// Literal `[text](url)`.
    Link { full: Span, text: Span, url: Span },
    /// Literal `![alt](url)`.
    Image { full: Span, alt: Span, url: Span },
}

impl InlineNode {
    /// The full span of the construct including delimiters.
    pub fn full_span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::CodeSpan { full, .. }
            | InlineNode::Strong { full, .. }
            | InlineNode::Emphasis { full, .. }
            | InlineNode::Strikethrough { full, .. }
            | InlineNode::Highlight { full, .. }
            | InlineNode::WikiLink { full, .. }
            | InlineNode::Embed { full, .. }
            | InlineNode::Comment { full }
            | InlineNode::InlineMath { full, .. }
            | InlineNode::FootnoteRef { full, .. }
            | InlineNode::Link { full, .. }
            | InlineNode::Image { full, .. } => *full,
        }
    }

    /// Opening marker span for delimited variants (`full.start..inner.start`).
    pub fn open_marker(&self) -> Option<Span> {
        self.inner_span()
            .map(|inner| Span::new(self.full_span().start, inner.start))
    }

    /// Closing marker span for delimited variants (`inner.end..full.end`).
    pub fn close_marker(&self) -> Option<Span> {
        self.inner_span()
            .map(|inner| Span::new(inner.end, self.full_span().end))
    }

    fn inner_span(&self) -> Option<Span> {
        match self {
            InlineNode::CodeSpan { inner, .. }
            | InlineNode::Strong { inner, .. }
            | InlineNode::Emphasis { inner, .. }
            | InlineNode::Strikethrough { inner, .. }
            | InlineNode::Highlight { inner, .. } => Some(*inner),
            _ => None,
        }
    }
}
