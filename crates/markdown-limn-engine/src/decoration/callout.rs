//! Callout detection for blockquotes.
//!
//! A blockquote whose first line matches `> [!type]±  title` renders as a
//! callout: every line gets a type-derived line class and the `[!type]`
//! token (plus optional fold marker) is hidden on the title line.

use std::sync::OnceLock;

use regex::Regex;

/// A parsed callout header line.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutHeader {
    /// Resolved callout kind (aliases folded, lowercased).
    pub kind: String,
    /// `+` (default open) or `-` (default folded), if present.
    pub fold: Option<char>,
    /// Byte offset of `[` within the examined text.
    pub token_start: usize,
    /// Byte offset just past the fold marker (or `]` without one), plus one
    /// following space if present.
    pub token_end: usize,
}

fn callout_regex() -> &'static Regex {
    static CALLOUT_REGEX: OnceLock<Regex> = OnceLock::new();
    CALLOUT_REGEX
        .get_or_init(|| Regex::new(r"^\[!([A-Za-z]+)\]([+-])?( ?)").expect("Invalid callout regex"))
}

/// Parses a callout header from the remainder of a blockquote's first line
/// (the text after the `>` prefix). Offsets are relative to `remainder`.
pub fn parse_callout_header(remainder: &str) -> Option<CalloutHeader> {
    let caps = callout_regex().captures(remainder)?;
    let whole = caps.get(0).expect("regex group 0");
    let kind = resolve_callout_kind(caps.get(1).expect("callout type group").as_str());
    let fold = caps.get(2).and_then(|m| m.as_str().chars().next());

    Some(CalloutHeader {
        kind,
        fold,
        token_start: whole.start(),
        token_end: whole.end(),
    })
}

/// Strips leading `>` markers (each optionally followed by one space) from a
/// quote line. Up to three spaces of indentation may precede the first
/// marker. Returns the quote depth and the byte length of the prefix.
pub fn strip_quote_markers(line: &str) -> (u8, usize) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() && i < 3 && bytes[i] == b' ' {
        i += 1;
    }
    let mut depth = 0u8;
    while i < bytes.len() && bytes[i] == b'>' {
        depth += 1;
        i += 1;
        if i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
    }
    if depth == 0 { (0, 0) } else { (depth, i) }
}

/// Folds callout type aliases onto their canonical kind; unknown types keep
/// their lowercased name so host CSS can still target them.
pub fn resolve_callout_kind(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "summary" | "tldr" => "abstract",
        "hint" | "important" => "tip",
        "check" | "done" => "success",
        "help" | "faq" => "question",
        "caution" | "attention" => "warning",
        "fail" | "missing" => "failure",
        "error" => "danger",
        "cite" => "quote",
        other => other,
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("tldr", "abstract")]
    #[case("summary", "abstract")]
    #[case("abstract", "abstract")]
    #[case("hint", "tip")]
    #[case("important", "tip")]
    #[case("check", "success")]
    #[case("done", "success")]
    #[case("help", "question")]
    #[case("faq", "question")]
    #[case("caution", "warning")]
    #[case("attention", "warning")]
    #[case("fail", "failure")]
    #[case("missing", "failure")]
    #[case("error", "danger")]
    #[case("cite", "quote")]
    #[case("NOTE", "note")]
    #[case("custom", "custom")]
    fn alias_resolution(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(resolve_callout_kind(raw), expected);
    }

    #[test]
    fn parses_header_with_fold_and_title() {
        let h = parse_callout_header("[!tip]- Remember this").unwrap();
        assert_eq!(h.kind, "tip");
        assert_eq!(h.fold, Some('-'));
        assert_eq!(h.token_start, 0);
        // `[!tip]-` plus the following space.
        assert_eq!(h.token_end, 8);
    }

    #[test]
    fn parses_header_without_fold() {
        let h = parse_callout_header("[!warning] careful").unwrap();
        assert_eq!(h.kind, "warning");
        assert_eq!(h.fold, None);
        assert_eq!(h.token_end, 11);
    }

    #[rstest]
    #[case("> quoted", 1, 2)]
    #[case(">no space", 1, 1)]
    #[case("> > nested", 2, 4)]
    #[case(">>tight", 2, 2)]
    #[case("not a quote", 0, 0)]
    #[case(">", 1, 1)]
    #[case("  > indented", 1, 4)]
    #[case("   >deep", 1, 4)]
    #[case("    > code indent", 0, 0)]
    fn quote_marker_stripping(#[case] line: &str, #[case] depth: u8, #[case] len: usize) {
        assert_eq!(strip_quote_markers(line), (depth, len));
    }

    #[test]
    fn plain_quote_is_not_a_callout() {
        assert_eq!(parse_callout_header("just a quote"), None);
        assert_eq!(parse_callout_header("[!]"), None);
    }
}
