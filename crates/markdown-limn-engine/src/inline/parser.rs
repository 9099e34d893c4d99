use crate::span::Span;

use super::{
    cursor::Cursor,
    kinds::{
        CodeSpan, Comment, Embed, Emphasis, FootnoteRef, Highlight, InlineMath, Link,
        Strikethrough, WikiLink,
    },
    types::InlineNode,
};

/// Scans inline content into a sequence of [`InlineNode`]s.
///
/// # Arguments
/// - `base`: byte offset in the document where `s` begins
/// - `s`: the text to scan (an `inline` block-tree leaf's content)
/// - `before`: the byte immediately preceding `s` in the document, for
///   left-context rules at the slice boundary
///
/// # Contract
/// Recognizers never consume characters they cannot confidently classify:
/// on no-match the cursor is restored and the character falls through to
/// plain text, which is the correct rendering for unterminated constructs.
///
/// Code spans are tried first and suppress all other recognizers inside
/// them; embeds are tried before wikilinks so `![[x]]` is never a wikilink.
pub fn parse_inline(base: usize, s: &str, before: Option<u8>) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s, base, before);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span::new(start, end)));
        }
    }

    // Precedence order: raw zones first, then the most-detailed bracket
    // forms before the ones they would otherwise shadow.
    const RECOGNIZERS: [fn(&mut Cursor<'_>) -> Option<InlineNode>; 11] = [
        try_parse_code_span,
        try_parse_embed,
        try_parse_image,
        try_parse_wikilink,
        try_parse_footnote_ref,
        try_parse_link,
        try_parse_highlight,
        try_parse_strikethrough,
        try_parse_emphasis,
        try_parse_comment,
        try_parse_inline_math,
    ];

    while !cur.eof() {
        if let Some(node) = RECOGNIZERS.iter().find_map(|r| r(&mut cur)) {
            flush_text(&mut out, text_start, node.full_span().start);
            text_start = node.full_span().end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// Advances until the remaining input starts with `pat`, without consuming
/// it. Returns false (cursor untouched by the caller's restore) on newline
/// or end of input.
fn scan_to(cur: &mut Cursor<'_>, pat: &[u8], stop_at_newline: bool) -> bool {
    while !cur.eof() {
        if cur.starts_with(pat) {
            return true;
        }
        if stop_at_newline && cur.peek() == Some(b'\n') {
            return false;
        }
        cur.bump();
    }
    false
}

fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    let mut run = 0usize;
    while cur.peek() == Some(CodeSpan::TICK) {
        cur.bump();
        run += 1;
    }
    if run > CodeSpan::MAX_RUN {
        *cur = saved;
        return None;
    }
    let delim = vec![CodeSpan::TICK; run];
    let inner_start = cur.pos();

    if !scan_to(cur, &delim, true) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(run);

    Some(InlineNode::CodeSpan {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_highlight(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(Highlight::MARK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Highlight::MARK.len());
    let inner_start = cur.pos();

    if !scan_to(cur, Highlight::MARK, true) || cur.pos() == inner_start {
        // Unterminated, or zero-length interior between the markers.
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(Highlight::MARK.len());

    Some(InlineNode::Highlight {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_strikethrough(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(Strikethrough::MARK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Strikethrough::MARK.len());
    let inner_start = cur.pos();

    if !scan_to(cur, Strikethrough::MARK, true) || cur.pos() == inner_start {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(Strikethrough::MARK.len());

    Some(InlineNode::Strikethrough {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let marker = cur.peek().filter(|&b| Emphasis::is_marker(b))?;
    let saved = cur.clone();
    let start = cur.pos();

    let strong = cur.starts_with(&[marker, marker]);
    let delim: &[u8] = if strong {
        &[marker, marker]
    } else {
        &[marker]
    };
    cur.bump_n(delim.len());
    let inner_start = cur.pos();

    // The interior must not begin with whitespace and must be non-empty.
    if cur
        .peek()
        .is_none_or(|b| b.is_ascii_whitespace() || b == marker)
    {
        *cur = saved;
        return None;
    }

    if !scan_to(cur, delim, true) || cur.pos() == inner_start {
        *cur = saved;
        return None;
    }
    // Closing delimiter must not follow whitespace.
    if cur.prev().is_some_and(|b| b.is_ascii_whitespace()) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(delim.len());

    let full = Span::new(start, cur.pos());
    let inner = Span::new(inner_start, inner_end);
    Some(if strong {
        InlineNode::Strong { full, inner }
    } else {
        InlineNode::Emphasis { full, inner }
    })
}

fn try_parse_wikilink(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }
    // `![[` is an embed; if the embed parse already failed this must not
    // resurrect the bracket pair as a link.
    if cur.prev() == Some(b'!') {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    while !cur.eof() {
        if cur.peek() == Some(WikiLink::ALIAS) || cur.starts_with(WikiLink::CLOSE) {
            break;
        }
        if cur.peek() == Some(b'\n') {
            *cur = saved;
            return None;
        }
        cur.bump();
    }
    let target_end = cur.pos();

    let mut alias = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        let alias_start = cur.pos();
        if !scan_to(cur, WikiLink::CLOSE, true) {
            *cur = saved;
            return None;
        }
        alias = Some(Span::new(alias_start, cur.pos()));
    }

    if !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(InlineNode::WikiLink {
        full: Span::new(start, cur.pos()),
        target: Span::new(target_start, target_end),
        alias,
    })
}

fn try_parse_embed(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(Embed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Embed::OPEN.len());
    let inner_start = cur.pos();

    if !scan_to(cur, Embed::CLOSE, true) {
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump_n(Embed::CLOSE.len());

    Some(InlineNode::Embed {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_comment(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(Comment::MARK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Comment::MARK.len());

    if !scan_to(cur, Comment::MARK, true) {
        *cur = saved;
        return None;
    }
    cur.bump_n(Comment::MARK.len());

    Some(InlineNode::Comment {
        full: Span::new(start, cur.pos()),
    })
}

fn try_parse_inline_math(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(InlineMath::DOLLAR) {
        return None;
    }
    // `$$` is reserved for block math; also refuse to open right after a
    // `$` so the tail of `$$` never opens a span of its own.
    if cur.starts_with(&[InlineMath::DOLLAR, InlineMath::DOLLAR])
        || cur.prev() == Some(InlineMath::DOLLAR)
    {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let inner_start = cur.pos();

    // Content must not start with a space (currency disambiguation) or `$`.
    if cur
        .peek()
        .is_none_or(|b| b == b' ' || b == InlineMath::DOLLAR)
    {
        *cur = saved;
        return None;
    }

    loop {
        let Some(b) = cur.peek() else {
            *cur = saved;
            return None;
        };
        if b == b'\n' {
            *cur = saved;
            return None;
        }
        if b == InlineMath::DOLLAR
            && cur
                .prev()
                .is_some_and(|p| p != InlineMath::ESCAPE && p != b' ')
        {
            break;
        }
        cur.bump();
    }
    let inner_end = cur.pos();
    cur.bump();

    Some(InlineNode::InlineMath {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

fn try_parse_footnote_ref(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.starts_with(FootnoteRef::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(FootnoteRef::OPEN.len());
    let id_start = cur.pos();

    while cur.peek().is_some_and(FootnoteRef::is_id_byte) {
        cur.bump();
    }
    let id_end = cur.pos();

    if id_end == id_start || cur.peek() != Some(FootnoteRef::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(InlineNode::FootnoteRef {
        full: Span::new(start, cur.pos()),
        id: Span::new(id_start, id_end),
    })
}

fn try_parse_link(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Link::BRACKET_OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let text_start = cur.pos();

    if !scan_to(cur, &[Link::BRACKET_CLOSE], true) {
        *cur = saved;
        return None;
    }
    let text_end = cur.pos();
    cur.bump();

    if cur.peek() != Some(Link::PAREN_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump();
    let url_start = cur.pos();

    if !scan_to(cur, &[Link::PAREN_CLOSE], true) {
        *cur = saved;
        return None;
    }
    let url_end = cur.pos();
    cur.bump();

    Some(InlineNode::Link {
        full: Span::new(start, cur.pos()),
        text: Span::new(text_start, text_end),
        url: Span::new(url_start, url_end),
    })
}

fn try_parse_image(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Link::IMAGE_SIGIL) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();

    let Some(InlineNode::Link { text, url, .. }) = try_parse_link(cur) else {
        *cur = saved;
        return None;
    };

    Some(InlineNode::Image {
        full: Span::new(start, cur.pos()),
        alt: text,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_only() {
        let nodes = parse_inline(0, "hello world", None);
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 11))]);
    }

    #[test]
    fn highlight_simple() {
        let nodes = parse_inline(0, "==hi==", None);
        assert_eq!(
            nodes,
            vec![InlineNode::Highlight {
                full: Span::new(0, 6),
                inner: Span::new(2, 4),
            }]
        );
    }

    #[test]
    fn unterminated_highlight_is_text() {
        let nodes = parse_inline(0, "==ab", None);
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 4))]);
    }

    #[test]
    fn empty_highlight_is_text() {
        let nodes = parse_inline(0, "====", None);
        assert!(nodes.iter().all(|n| matches!(n, InlineNode::Text(_))));
    }

    #[test]
    fn wikilink_with_alias() {
        let nodes = parse_inline(0, "[[Note A|alias]]", None);
        assert_eq!(
            nodes,
            vec![InlineNode::WikiLink {
                full: Span::new(0, 16),
                target: Span::new(2, 8),
                alias: Some(Span::new(9, 14)),
            }]
        );
    }

    #[test]
    fn wikilink_must_not_cross_newline() {
        let nodes = parse_inline(0, "[[a\nb]]", None);
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::WikiLink { .. }))
        );
    }

    #[test]
    fn embed_and_wikilink_do_not_swallow_each_other() {
        let nodes = parse_inline(0, "[[a]] text ![[b]]", None);
        let links: Vec<_> = nodes
            .iter()
            .filter(|n| !matches!(n, InlineNode::Text(_)))
            .collect();
        assert_eq!(links.len(), 2);
        assert!(matches!(
            links[0],
            InlineNode::WikiLink { full, .. } if *full == Span::new(0, 5)
        ));
        assert!(matches!(
            links[1],
            InlineNode::Embed { full, .. } if *full == Span::new(11, 17)
        ));
    }

    #[test]
    fn bracket_pair_preceded_by_bang_is_not_a_wikilink() {
        // The embed parse fails (unterminated), and the `[[` must not then
        // match as a wikilink.
        let nodes = parse_inline(0, "![[a]x", None);
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::WikiLink { .. }))
        );
    }

    #[test]
    fn before_context_blocks_wikilink() {
        let nodes = parse_inline(1, "[[a]]", Some(b'!'));
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::WikiLink { .. }))
        );
    }

    #[test]
    fn comment_parses() {
        let nodes = parse_inline(0, "a %%hidden%% b", None);
        assert!(nodes.contains(&InlineNode::Comment {
            full: Span::new(2, 12)
        }));
    }

    #[test]
    fn comment_does_not_cross_a_newline() {
        let nodes = parse_inline(0, "a %%first\nsecond%% b", None);
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::Comment { .. }))
        );
    }

    #[test]
    fn inline_math_simple() {
        let nodes = parse_inline(0, "$x+y$", None);
        assert_eq!(
            nodes,
            vec![InlineNode::InlineMath {
                full: Span::new(0, 5),
                inner: Span::new(1, 4),
            }]
        );
    }

    #[test]
    fn math_rejects_leading_space() {
        let nodes = parse_inline(0, "$ notmath$", None);
        assert_eq!(nodes, vec![InlineNode::Text(Span::new(0, 10))]);
    }

    #[test]
    fn math_rejects_double_dollar() {
        let nodes = parse_inline(0, "$$block$$", None);
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::InlineMath { .. }))
        );
    }

    #[test]
    fn currency_pair_is_not_math() {
        // Closing `$` is preceded by a space, so `$5 $10` stays text.
        let nodes = parse_inline(0, "$5 $10", None);
        assert!(
            nodes
                .iter()
                .all(|n| !matches!(n, InlineNode::InlineMath { .. }))
        );
    }

    #[test]
    fn escaped_dollar_does_not_close() {
        let nodes = parse_inline(0, r"$a\$b$", None);
        assert_eq!(
            nodes,
            vec![InlineNode::InlineMath {
                full: Span::new(0, 6),
                inner: Span::new(1, 5),
            }]
        );
    }

    #[test]
    fn footnote_ref_simple() {
        let nodes = parse_inline(0, "[^note-1]", None);
        assert_eq!(
            nodes,
            vec![InlineNode::FootnoteRef {
                full: Span::new(0, 9),
                id: Span::new(2, 8),
            }]
        );
    }

    #[test]
    fn footnote_ref_rejects_bad_id() {
        assert!(
            parse_inline(0, "[^]", None)
                .iter()
                .all(|n| matches!(n, InlineNode::Text(_)))
        );
        assert!(
            parse_inline(0, "[^a b]", None)
                .iter()
                .all(|n| !matches!(n, InlineNode::FootnoteRef { .. }))
        );
    }

    #[test]
    fn code_span_is_a_raw_zone() {
        let nodes = parse_inline(0, "`[[not a link]]`", None);
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], InlineNode::CodeSpan { .. }));
    }

    #[test]
    fn double_backtick_code_span() {
        let nodes = parse_inline(0, "``a`b``", None);
        assert_eq!(
            nodes,
            vec![InlineNode::CodeSpan {
                full: Span::new(0, 7),
                inner: Span::new(2, 5),
            }]
        );
    }

    #[test]
    fn strong_and_emphasis() {
        let nodes = parse_inline(0, "**bold** and *it*", None);
        assert!(nodes.contains(&InlineNode::Strong {
            full: Span::new(0, 8),
            inner: Span::new(2, 6),
        }));
        assert!(nodes.contains(&InlineNode::Emphasis {
            full: Span::new(13, 17),
            inner: Span::new(14, 16),
        }));
    }

    #[test]
    fn lone_asterisks_are_text() {
        let nodes = parse_inline(0, "a * b * c", None);
        assert!(nodes.iter().all(|n| matches!(n, InlineNode::Text(_))));
    }

    #[test]
    fn strikethrough_simple() {
        let nodes = parse_inline(0, "~~gone~~", None);
        assert_eq!(
            nodes,
            vec![InlineNode::Strikethrough {
                full: Span::new(0, 8),
                inner: Span::new(2, 6),
            }]
        );
    }

    #[test]
    fn literal_link_and_image() {
        let nodes = parse_inline(0, "[t](http://x) ![a](y.png)", None);
        assert!(nodes.contains(&InlineNode::Link {
            full: Span::new(0, 13),
            text: Span::new(1, 2),
            url: Span::new(4, 12),
        }));
        assert!(nodes.contains(&InlineNode::Image {
            full: Span::new(14, 25),
            alt: Span::new(16, 17),
            url: Span::new(19, 24),
        }));
    }

    #[test]
    fn malformed_link_stays_text() {
        let nodes = parse_inline(0, "[text] (url)", None);
        assert!(nodes.iter().all(|n| matches!(n, InlineNode::Text(_))));
    }

    #[test]
    fn base_offset_applies_to_all_spans() {
        let nodes = parse_inline(100, "==x==", None);
        assert_eq!(
            nodes[0].full_span(),
            Span::new(100, 105)
        );
    }
}
