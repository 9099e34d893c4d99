//! Fenced-code-block text helpers shared by the inline builder and the
//! block decoration provider. All syntax knowledge for fences lives here.

use crate::span::Span;

pub struct Fence;

impl Fence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// True when a line (after indentation) opens or closes a fence.
    pub fn is_fence_line(line: &str) -> bool {
        let t = line.trim_start();
        t.starts_with(Self::BACKTICKS) || t.starts_with(Self::TILDES)
    }

    /// The language declared on the opening fence line of `text` (a whole
    /// fenced block), if any: the first whitespace-delimited token of the
    /// info string.
    pub fn language(text: &str) -> Option<String> {
        let first_line = text.lines().next()?;
        first_line
            .trim_start()
            .trim_start_matches('`')
            .trim_start_matches('~')
            .split_whitespace()
            .next()
            .map(str::to_string)
    }

    /// True when the block's last line is a closing fence (an unterminated
    /// block at end of document has none).
    pub fn is_closed(text: &str) -> bool {
        let trimmed = text.trim_end_matches(['\r', '\n']);
        match trimmed.rfind('\n') {
            Some(pos) => Self::is_fence_line(&trimmed[pos + 1..]),
            None => false,
        }
    }

    /// Span of the code between the fence lines, relative to `base` (the
    /// block's start offset). Excludes the opening line (with its info
    /// string) and the closing fence line.
    pub fn content_span(base: usize, text: &str) -> Span {
        let start = match text.find('\n') {
            Some(nl) => nl + 1,
            None => text.len(),
        };
        let trimmed = text.trim_end_matches(['\r', '\n']);
        let end = match trimmed.rfind('\n') {
            Some(pos) if Self::is_fence_line(&trimmed[pos + 1..]) => pos + 1,
            _ => text.len(),
        };
        Span::new(base + start, base + end.max(start))
    }
}
