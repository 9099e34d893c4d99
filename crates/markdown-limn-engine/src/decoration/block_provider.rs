//! The persistent multi-line decoration pass.
//!
//! Diagram and block-math fences replace several source lines with one
//! widget, which is expensive for the host to re-anchor. This provider
//! therefore keeps its last result and recomputes only when the document
//! version, the cursor's line, or the enabled flag actually changed.

use tree_sitter::Node;

use crate::editing::{CursorState, Document};
use crate::settings::PreviewSettings;
use crate::span::Span;
use crate::widgets::Widget;

use super::fence::Fence;
use super::types::{Decoration, DecorationSet};

/// Computes and caches block-level (multi-line) replacements.
#[derive(Debug, Default)]
pub struct BlockDecorationProvider {
    decorations: DecorationSet,
    key: Option<(u64, usize, bool)>,
}

impl BlockDecorationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the block decoration set for the current document state,
    /// recomputing only when the cache key changed.
    pub fn update(
        &mut self,
        doc: &Document,
        cursor: CursorState,
        settings: &PreviewSettings,
    ) -> &DecorationSet {
        let key = (doc.version(), cursor.line, settings.enabled);
        if self.key != Some(key) {
            self.decorations = compute(doc, cursor, settings);
            self.key = Some(key);
        }
        &self.decorations
    }

    /// Drops the cached result so the next `update` recomputes. Called when
    /// settings change, which the cache key does not cover.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

fn compute(doc: &Document, cursor: CursorState, settings: &PreviewSettings) -> DecorationSet {
    if !settings.enabled {
        return DecorationSet::default();
    }

    let mut out = Vec::new();
    if let Some(tree) = doc.tree() {
        collect_fences(doc, tree.root_node(), cursor, settings, &mut out);
    }
    DecorationSet::build(out)
}

fn collect_fences(
    doc: &Document,
    node: Node<'_>,
    cursor: CursorState,
    settings: &PreviewSettings,
    out: &mut Vec<Decoration>,
) {
    if node.kind() == "fenced_code_block" {
        if let Some(dec) = fence_decoration(doc, node, cursor, settings) {
            out.push(dec);
        }
        return;
    }
    let mut tree_cursor = node.walk();
    for child in node.children(&mut tree_cursor) {
        collect_fences(doc, child, cursor, settings, out);
    }
}

fn fence_decoration(
    doc: &Document,
    node: Node<'_>,
    cursor: CursorState,
    settings: &PreviewSettings,
) -> Option<Decoration> {
    let span = Span::from(node.byte_range());
    let text = doc.slice_to_cow(span);
    let lang = Fence::language(&text)?;
    if !settings.is_reserved_language(&lang) {
        return None;
    }

    // An unterminated fence swallows the rest of the document; replacing it
    // would hide text the author is still typing.
    if !Fence::is_closed(&text) {
        return None;
    }

    let start_line = doc.line_of_offset(span.start);
    let end_line = doc.line_of_offset(span.end.saturating_sub(1).max(span.start));
    if start_line <= cursor.line && cursor.line <= end_line {
        return None;
    }

    let source = doc
        .slice_to_cow(Fence::content_span(span.start, &text))
        .into_owned();
    let widget = if lang == settings.diagram_language {
        Widget::Diagram { source }
    } else {
        Widget::MathBlock { source }
    };

    // Replace up to the end of the closing fence line, keeping the block's
    // trailing newline in the document.
    let replaced = Span::new(span.start, doc.line_span(end_line).end.max(span.start));
    Some(Decoration::block_replace(replaced, widget))
}
