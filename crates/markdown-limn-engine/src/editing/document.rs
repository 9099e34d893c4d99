use std::borrow::Cow;

use tree_sitter::{InputEdit, Parser, Point, Tree};
use tree_sitter_md::LANGUAGE;
use xi_rope::Rope;

use crate::span::Span;

/// The current selection's head position, reduced to a line number.
///
/// This is all the decoration passes need for reveal decisions: a construct
/// whose line range contains `line` keeps its raw syntax visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub line: usize,
}

/// Document buffer with incremental Markdown parsing.
///
/// Holds the single source of truth (an xi-rope buffer), the current
/// Tree-sitter block tree, and the selection. The decoration passes only
/// read from it; writes go through [`Document::replace_range`], which keeps
/// the tree in sync by feeding the edit to `tree.edit()` before re-parsing.
pub struct Document {
    /// xi-rope buffer containing the entire document as UTF-8 text.
    buffer: Rope,
    /// Current selection as byte offsets; `end` is the head.
    selection: std::ops::Range<usize>,
    /// Version counter incremented on each edit (enables change detection).
    version: u64,
    /// Tree-sitter parser with the Markdown block grammar loaded.
    parser: Parser,
    /// Current parse tree (None only if the parser gave up).
    tree: Option<Tree>,
}

impl Document {
    /// Create a new document from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let buffer = Rope::from(text);
        let len = buffer.len();

        let mut parser = Parser::new();
        parser.set_language(&LANGUAGE.into())?;
        let tree = parser.parse(buffer.to_string(), None);

        Ok(Self {
            buffer,
            selection: len..len,
            version: 0,
            parser,
            tree,
        })
    }

    pub fn from_str(text: &str) -> anyhow::Result<Self> {
        Self::from_bytes(text.as_bytes())
    }

    /// Replace `span` with `text` as one atomic edit.
    ///
    /// This is the text-replacement contract interactive widgets dispatch
    /// through. The tree is edited **before** the buffer is mutated because
    /// Tree-sitter needs old-buffer coordinates to transform node positions,
    /// then re-parsed incrementally against the updated buffer.
    pub fn replace_range(&mut self, span: Span, text: &str) {
        let span = Span::new(span.start.min(self.len()), span.end.min(self.len()));

        if let Some(mut old_tree) = self.tree.take() {
            old_tree.edit(&self.input_edit(span, text));
            self.buffer.edit(span.to_range(), text);
            self.tree = self.parser.parse(self.buffer.to_string(), Some(&old_tree));
        } else {
            self.buffer.edit(span.to_range(), text);
            self.tree = self.parser.parse(self.buffer.to_string(), None);
        }

        self.selection = transform_offset(self.selection.start, span, text.len())
            ..transform_offset(self.selection.end, span, text.len());
        self.version += 1;
    }

    /// Build the Tree-sitter edit record for replacing `span` with `text`.
    ///
    /// Must be called before the buffer is mutated: all `old_*` coordinates
    /// refer to the pre-edit buffer.
    fn input_edit(&self, span: Span, text: &str) -> InputEdit {
        let start_position = self.point_at(span.start);
        let old_end_position = self.point_at(span.end);
        let new_end_byte = span.start + text.len();

        let new_end_position = match text.rfind('\n') {
            Some(last_nl) => Point {
                row: start_position.row + text.bytes().filter(|&b| b == b'\n').count(),
                column: text.len() - last_nl - 1,
            },
            None => Point {
                row: start_position.row,
                column: start_position.column + text.len(),
            },
        };

        InputEdit {
            start_byte: span.start,
            old_end_byte: span.end,
            new_end_byte,
            start_position,
            old_end_position,
            new_end_position,
        }
    }

    fn point_at(&self, offset: usize) -> Point {
        let row = self.buffer.line_of_offset(offset);
        Point {
            row,
            column: offset - self.buffer.offset_of_line(row),
        }
    }

    pub fn selection(&self) -> std::ops::Range<usize> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, selection: std::ops::Range<usize>) {
        let len = self.len();
        self.selection = selection.start.min(len)..selection.end.min(len);
    }

    /// The selection head reduced to a line number for reveal decisions.
    pub fn cursor_state(&self) -> CursorState {
        CursorState {
            line: self.line_of_offset(self.selection.end),
        }
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn slice_to_cow(&self, span: Span) -> Cow<'_, str> {
        self.buffer
            .slice_to_cow(span.start.min(self.len())..span.end.min(self.len()))
    }

    /// The byte immediately before `offset`, if any. Recognizers use this
    /// for left-context checks (e.g. `!` before `[[`).
    pub fn byte_before(&self, offset: usize) -> Option<u8> {
        if offset == 0 || offset > self.len() {
            return None;
        }
        self.slice_to_cow(Span::new(offset - 1, offset)).bytes().next()
    }

    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.buffer.line_of_offset(offset.min(self.len()))
    }

    pub fn offset_of_line(&self, line: usize) -> usize {
        self.buffer.offset_of_line(line.min(self.line_count()))
    }

    /// Total number of lines (a trailing newline opens a final empty line).
    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    /// Byte span of `line`, excluding its trailing newline.
    pub fn line_span(&self, line: usize) -> Span {
        let start = self.offset_of_line(line);
        let end = if line + 1 < self.line_count() {
            self.offset_of_line(line + 1)
        } else {
            self.len()
        };
        let text = self.slice_to_cow(Span::new(start, end));
        let trimmed = text.trim_end_matches(['\r', '\n']);
        Span::new(start, start + trimmed.len())
    }

    /// The whole document as a span, for viewport-unrestricted passes.
    pub fn full_span(&self) -> Span {
        Span::new(0, self.len())
    }
}

/// Map a pre-edit offset through a `span -> text` replacement.
fn transform_offset(offset: usize, span: Span, inserted: usize) -> usize {
    if offset <= span.start {
        offset
    } else if offset >= span.end {
        offset - span.len() + inserted
    } else {
        span.start + inserted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let doc = Document::from_bytes(b"# Hello\n\nworld\n").unwrap();
        assert_eq!(doc.text(), "# Hello\n\nworld\n");
        assert_eq!(doc.version(), 0);
        assert!(doc.tree().is_some());
    }

    #[test]
    fn replace_range_updates_buffer_and_version() {
        let mut doc = Document::from_str("- [ ] task\n").unwrap();
        doc.replace_range(Span::new(2, 5), "[x]");
        assert_eq!(doc.text(), "- [x] task\n");
        assert_eq!(doc.version(), 1);
    }

    #[test]
    fn replace_range_reparses_tree() {
        let mut doc = Document::from_str("plain text\n").unwrap();
        doc.replace_range(Span::new(0, 0), "# ");
        let tree = doc.tree().unwrap();
        let first = tree.root_node().child(0).unwrap();
        // The section wrapper or the heading itself, depending on grammar.
        let mut cursor = first.walk();
        let heading_present = first.kind() == "atx_heading"
            || first
                .children(&mut cursor)
                .any(|child| child.kind() == "atx_heading");
        assert!(heading_present, "expected heading after edit, got {}", first.kind());
    }

    #[test]
    fn selection_transforms_through_edit() {
        let mut doc = Document::from_str("abc def\n").unwrap();
        doc.set_selection(6..6);
        doc.replace_range(Span::new(0, 3), "x");
        assert_eq!(doc.selection(), 4..4);
    }

    #[test]
    fn cursor_state_is_line_of_head() {
        let mut doc = Document::from_str("one\ntwo\nthree\n").unwrap();
        doc.set_selection(5..5);
        assert_eq!(doc.cursor_state(), CursorState { line: 1 });
    }

    #[test]
    fn line_span_excludes_newline() {
        let doc = Document::from_str("one\ntwo\n").unwrap();
        assert_eq!(doc.line_span(0), Span::new(0, 3));
        assert_eq!(doc.line_span(1), Span::new(4, 7));
    }

    #[test]
    fn byte_before_at_start_is_none() {
        let doc = Document::from_str("ab").unwrap();
        assert_eq!(doc.byte_before(0), None);
        assert_eq!(doc.byte_before(1), Some(b'a'));
    }
}
