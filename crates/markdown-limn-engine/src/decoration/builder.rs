//! The inline/single-line decoration pass.
//!
//! Walks the block tree for the visible viewport and emits the ordered,
//! non-overlapping decoration set: marker hides, style marks, line classes,
//! and widget replacements for everything that fits on one line. Multi-line
//! replacements (diagram/block-math fences) belong to the block provider.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use tree_sitter::Node;

use crate::editing::{CursorState, Document};
use crate::inline::{InlineNode, parse_inline};
use crate::settings::PreviewSettings;
use crate::span::Span;
use crate::widgets::Widget;

use super::callout::{parse_callout_header, strip_quote_markers};
use super::fence::Fence;
use super::types::{Decoration, DecorationSet, Side};

/// Closed set of block-tree node kinds the builder handles explicitly.
/// Everything else descends by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockConstruct {
    Heading,
    BlockQuote,
    FencedCode,
    ThematicBreak,
    ListItem,
    Inline,
}

impl BlockConstruct {
    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "atx_heading" => Some(Self::Heading),
            "block_quote" => Some(Self::BlockQuote),
            "fenced_code_block" => Some(Self::FencedCode),
            "thematic_break" => Some(Self::ThematicBreak),
            "list_item" => Some(Self::ListItem),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }
}

/// Whether the walk continues into a handled node's children.
enum Descend {
    Children,
    Skip,
}

/// A single node's decoration computation can fail without aborting the
/// pass; failures are logged and the node is skipped.
#[derive(Debug, thiserror::Error)]
pub enum DecorationError {
    #[error("{kind} node is missing its marker")]
    MissingMarker { kind: &'static str },
    #[error("node byte range {0:?} is out of document bounds")]
    OutOfBounds(Span),
}

/// Produce the inline/single-line decoration set for the visible viewport.
///
/// Rebuilt wholesale on every document, selection, or viewport change; the
/// cursor-on-line check is the reason selection changes qualify.
pub fn build_decorations(
    doc: &Document,
    viewport: Span,
    cursor: CursorState,
    settings: &PreviewSettings,
) -> DecorationSet {
    if !settings.enabled {
        return DecorationSet::default();
    }

    let mut out = Vec::new();
    if let Some(tree) = doc.tree() {
        walk(doc, tree.root_node(), viewport, cursor, settings, &mut out);
    }
    DecorationSet::build(out)
}

fn walk(
    doc: &Document,
    node: Node<'_>,
    viewport: Span,
    cursor: CursorState,
    settings: &PreviewSettings,
    out: &mut Vec<Decoration>,
) {
    let span = Span::from(node.byte_range());
    if !span.intersects(viewport) {
        return;
    }

    let descend = match BlockConstruct::from_kind(node.kind()) {
        Some(construct) => match handle(construct, doc, node, cursor, settings, out) {
            Ok(d) => d,
            Err(e) => {
                warn!("skipping {} node at {:?}: {e}", node.kind(), span);
                Descend::Skip
            }
        },
        None => Descend::Children,
    };

    if matches!(descend, Descend::Children) {
        let mut tree_cursor = node.walk();
        for child in node.children(&mut tree_cursor) {
            walk(doc, child, viewport, cursor, settings, out);
        }
    }
}

fn handle(
    construct: BlockConstruct,
    doc: &Document,
    node: Node<'_>,
    cursor: CursorState,
    settings: &PreviewSettings,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    let span = Span::from(node.byte_range());
    if span.end > doc.len() {
        return Err(DecorationError::OutOfBounds(span));
    }

    match construct {
        BlockConstruct::Heading => handle_heading(doc, span, cursor, out),
        BlockConstruct::BlockQuote => handle_blockquote(doc, node, span, cursor, out),
        BlockConstruct::FencedCode => handle_fenced_code(doc, span, cursor, settings, out),
        BlockConstruct::ThematicBreak => handle_thematic_break(doc, span, cursor, out),
        BlockConstruct::ListItem => handle_list_item(doc, node, cursor, out),
        BlockConstruct::Inline => {
            emit_inline(doc, span, cursor, out);
            Ok(Descend::Skip)
        }
    }
}

fn node_lines(doc: &Document, span: Span) -> (usize, usize) {
    let start = doc.line_of_offset(span.start);
    let end = doc.line_of_offset(span.end.saturating_sub(1).max(span.start));
    (start, end.max(start))
}

/// The reveal rule: no replacement for a construct whose line range
/// contains the cursor's line.
fn revealed(doc: &Document, span: Span, cursor: CursorState) -> bool {
    let (start, end) = node_lines(doc, span);
    start <= cursor.line && cursor.line <= end
}

fn byte_at(doc: &Document, offset: usize) -> Option<u8> {
    doc.byte_before(offset + 1)
}

fn handle_heading(
    doc: &Document,
    span: Span,
    cursor: CursorState,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    if revealed(doc, span, cursor) {
        return Ok(Descend::Skip);
    }

    let text = doc.slice_to_cow(span);
    let level = text.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return Err(DecorationError::MissingMarker { kind: "heading" });
    }
    let level = level.clamp(1, 6);

    let (start_line, _) = node_lines(doc, span);
    out.push(Decoration::line(
        doc.offset_of_line(start_line),
        format!("limn-header-{level}"),
    ));

    // Hide the `#` run plus one trailing space.
    let mut hide_end = span.start + level;
    if byte_at(doc, hide_end) == Some(b' ') {
        hide_end += 1;
    }
    out.push(Decoration::hide(Span::new(span.start, hide_end)));

    Ok(Descend::Children)
}

fn handle_blockquote(
    doc: &Document,
    node: Node<'_>,
    span: Span,
    cursor: CursorState,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    // Nested quotes are absorbed by the outermost handler, which hides the
    // whole `>` prefix run per line.
    if has_quote_ancestor(&node) {
        return Ok(Descend::Children);
    }
    if revealed(doc, span, cursor) {
        return Ok(Descend::Skip);
    }

    let (start_line, end_line) = node_lines(doc, span);
    let first = doc.line_span(start_line);
    let first_text = doc.slice_to_cow(first);
    let (depth, prefix_len) = strip_quote_markers(&first_text);
    if depth == 0 {
        return Err(DecorationError::MissingMarker { kind: "blockquote" });
    }

    let header = parse_callout_header(&first_text[prefix_len..]);
    let class = match &header {
        Some(h) => format!("limn-callout-{}", h.kind),
        None => "limn-blockquote".to_string(),
    };

    for line in start_line..=end_line {
        let lsp = doc.line_span(line);
        let ltext = doc.slice_to_cow(lsp);
        out.push(Decoration::line(lsp.start, class.clone()));

        let (line_depth, line_prefix) = strip_quote_markers(&ltext);
        if line_depth > 0 {
            out.push(Decoration::hide(Span::new(lsp.start, lsp.start + line_prefix)));
        }

        if line == start_line
            && let Some(h) = &header
        {
            out.push(Decoration::hide(Span::new(
                lsp.start + prefix_len + h.token_start,
                lsp.start + prefix_len + h.token_end,
            )));
        }
    }

    Ok(Descend::Children)
}

fn has_quote_ancestor(node: &Node<'_>) -> bool {
    let mut parent = node.parent();
    while let Some(p) = parent {
        if p.kind() == "block_quote" {
            return true;
        }
        parent = p.parent();
    }
    false
}

fn handle_fenced_code(
    doc: &Document,
    span: Span,
    cursor: CursorState,
    settings: &PreviewSettings,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    let text = doc.slice_to_cow(span);
    let lang = Fence::language(&text);

    // Ownership of diagram/math fences transfers to the block provider.
    if lang.as_deref().is_some_and(|l| settings.is_reserved_language(l)) {
        return Ok(Descend::Skip);
    }

    let (start_line, end_line) = node_lines(doc, span);
    let closed = Fence::is_closed(&text) && end_line > start_line;

    if let Some(lang) = lang
        && !revealed(doc, span, cursor)
    {
        out.push(Decoration::point(
            span.start,
            Widget::CodeHeader { lang },
            Side::Before,
        ));
    }

    for line in start_line..=end_line {
        let lsp = doc.line_span(line);
        out.push(Decoration::line(lsp.start, "limn-code-block"));

        // Fence lines carry an extra class the host compresses visually,
        // unless the cursor is on that exact fence line.
        let is_fence = line == start_line || (closed && line == end_line);
        if is_fence && cursor.line != line {
            out.push(Decoration::line(lsp.start, "limn-code-fence"));
        }
    }

    Ok(Descend::Skip)
}

fn handle_thematic_break(
    doc: &Document,
    span: Span,
    cursor: CursorState,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    if revealed(doc, span, cursor) {
        return Ok(Descend::Skip);
    }
    let (start_line, _) = node_lines(doc, span);
    out.push(Decoration::replace(doc.line_span(start_line), Widget::Rule));
    Ok(Descend::Skip)
}

fn handle_list_item(
    doc: &Document,
    node: Node<'_>,
    cursor: CursorState,
    out: &mut Vec<Decoration>,
) -> Result<Descend, DecorationError> {
    let mut tree_cursor = node.walk();
    for child in node.children(&mut tree_cursor) {
        let marker_span = Span::from(child.byte_range());
        match child.kind() {
            // Unordered bullets only; ordered markers are left untouched.
            "list_marker_minus" | "list_marker_star" | "list_marker_plus" => {
                if revealed(doc, marker_span, cursor) {
                    continue;
                }
                let mut end = marker_span.start + 1;
                if byte_at(doc, end) == Some(b' ') {
                    end += 1;
                }
                out.push(Decoration::replace(
                    Span::new(marker_span.start, end),
                    Widget::ListBullet,
                ));
            }
            "task_list_marker_checked" | "task_list_marker_unchecked" => {
                if revealed(doc, marker_span, cursor) {
                    continue;
                }
                let checked = child.kind() == "task_list_marker_checked";
                let mut end = marker_span.end;
                if byte_at(doc, end) == Some(b' ') {
                    end += 1;
                }
                out.push(Decoration::replace(
                    Span::new(marker_span.start, end),
                    Widget::TaskCheckbox { checked },
                ));
            }
            _ => {}
        }
    }
    Ok(Descend::Children)
}

fn emit_inline(doc: &Document, span: Span, cursor: CursorState, out: &mut Vec<Decoration>) {
    let text = doc.slice_to_cow(span);
    let before = doc.byte_before(span.start);

    for node in parse_inline(span.start, &text, before) {
        let full = node.full_span();
        if matches!(node, InlineNode::Text(_)) || revealed(doc, full, cursor) {
            continue;
        }

        match &node {
            InlineNode::CodeSpan { inner, .. } => {
                emit_delimited(&node, *inner, "limn-inline-code", out);
            }
            InlineNode::Strong { inner, .. } => emit_delimited(&node, *inner, "limn-strong", out),
            InlineNode::Emphasis { inner, .. } => emit_delimited(&node, *inner, "limn-em", out),
            InlineNode::Strikethrough { inner, .. } => {
                emit_delimited(&node, *inner, "limn-strikethrough", out);
            }
            InlineNode::Highlight { inner, .. } => {
                emit_delimited(&node, *inner, "limn-highlight", out);
            }
            InlineNode::WikiLink { target, alias, .. } => {
                let target = doc.slice_to_cow(*target).into_owned();
                let display = match alias {
                    Some(a) => doc.slice_to_cow(*a).into_owned(),
                    None => target.clone(),
                };
                out.push(Decoration::replace(
                    full,
                    Widget::InternalLink { target, display },
                ));
            }
            InlineNode::Embed { inner, .. } => {
                out.push(Decoration::replace(
                    full,
                    embed_widget(&doc.slice_to_cow(*inner)),
                ));
            }
            InlineNode::Comment { .. } => out.push(Decoration::hide(full)),
            InlineNode::InlineMath { inner, .. } => {
                out.push(Decoration::replace(
                    full,
                    Widget::MathInline {
                        source: doc.slice_to_cow(*inner).into_owned(),
                    },
                ));
            }
            InlineNode::FootnoteRef { id, .. } => {
                out.push(Decoration::replace(
                    full,
                    Widget::FootnoteRef {
                        id: doc.slice_to_cow(*id).into_owned(),
                    },
                ));
            }
            InlineNode::Link { .. } => {
                // Re-validate the literal shape; mismatch means no
                // replacement and the raw text stays visible.
                if let Some(w) = literal_link_widget(&doc.slice_to_cow(full)) {
                    out.push(Decoration::replace(full, w));
                }
            }
            InlineNode::Image { .. } => {
                if let Some(w) = literal_image_widget(&doc.slice_to_cow(full)) {
                    out.push(Decoration::replace(full, w));
                }
            }
            InlineNode::Text(_) => {}
        }
    }
}

/// Hide both markers of a delimited construct and mark its interior.
fn emit_delimited(node: &InlineNode, inner: Span, class: &str, out: &mut Vec<Decoration>) {
    if let (Some(open), Some(close)) = (node.open_marker(), node.close_marker()) {
        out.push(Decoration::hide(open));
        out.push(Decoration::mark(inner, class));
        out.push(Decoration::hide(close));
    }
}

const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".svg", ".webp"];

fn embed_size_regex() -> &'static Regex {
    static EMBED_SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
    EMBED_SIZE_REGEX
        .get_or_init(|| Regex::new(r"^(\d+)(?:x(\d+))?$").expect("Invalid embed size regex"))
}

/// Classify an embed's interior (`target` or `target|size`) into an image
/// or a generic placeholder. The `WxH` form is parsed but only the width is
/// applied; height is intentionally dropped.
fn embed_widget(inner: &str) -> Widget {
    let (target, size) = match inner.split_once('|') {
        Some((t, s)) => (t.trim(), Some(s.trim())),
        None => (inner.trim(), None),
    };

    let lower = target.to_ascii_lowercase();
    let is_image = IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));
    if !is_image {
        return Widget::EmbedPlaceholder {
            target: target.to_string(),
        };
    }

    let width = size
        .and_then(|s| embed_size_regex().captures(s))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    Widget::Image {
        src: target.to_string(),
        alt: target.to_string(),
        width,
    }
}

fn literal_link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX
        .get_or_init(|| Regex::new(r"^\[([^\[\]]*)\]\(([^()\s]*)\)$").expect("Invalid link regex"))
}

fn literal_image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX
        .get_or_init(|| Regex::new(r"^!\[([^\[\]]*)\]\(([^()\s]*)\)$").expect("Invalid image regex"))
}

fn literal_link_widget(literal: &str) -> Option<Widget> {
    let caps = literal_link_regex().captures(literal)?;
    Some(Widget::ExternalLink {
        text: caps.get(1)?.as_str().to_string(),
        href: caps.get(2)?.as_str().to_string(),
    })
}

fn literal_image_widget(literal: &str) -> Option<Widget> {
    let caps = literal_image_regex().captures(literal)?;
    Some(Widget::Image {
        alt: caps.get(1)?.as_str().to_string(),
        src: caps.get(2)?.as_str().to_string(),
        width: None,
    })
}
