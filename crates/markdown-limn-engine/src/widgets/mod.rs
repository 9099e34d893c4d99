//! # Widget library
//!
//! Stateless, equality-comparable render descriptors for replaced spans.
//!
//! A [`Widget`] carries only the fields that affect rendering; the host view
//! compares widgets (`PartialEq`) to skip DOM rebuilds when nothing changed.
//! Materialization ([`Widget::to_html`]) is deterministic and side-effect
//! free: interactive behavior is expressed as `data-*` attributes that a
//! delegated handler in the host interprets (navigation for internal links,
//! `[ ]`↔`[x]` toggling for checkboxes via [`toggle_task_marker`] and
//! `Document::replace_range`, clipboard copy for the code-header button).
//!
//! Math and diagram widgets materialize a placeholder holding the escaped
//! raw source; the render service fills the mounted node in asynchronously
//! (see `render`).

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Estimated pixel height per source line, used for diagram/math layout
/// reservation so async content does not cause scroll jumps.
const ROW_HEIGHT_PX: u32 = 24;

/// A render descriptor for one replaced construct.
///
/// Immutable once constructed; equality is field-wise over render-affecting
/// fields (every retained field affects rendering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Task checkbox reflecting `x`/`X` checked state.
    TaskCheckbox { checked: bool },
    /// Bullet replacing a `-`/`*`/`+` list marker.
    ListBullet,
    /// Horizontal rule.
    Rule,
    /// Inline image, from `![alt](src)` or an image embed `![[file.png|W]]`.
    Image {
        src: String,
        alt: String,
        width: Option<u32>,
    },
    /// External link from literal `[text](url)`.
    ExternalLink { href: String, text: String },
    /// Internal link from `[[target]]` / `[[target|display]]`.
    InternalLink { target: String, display: String },
    /// Placeholder for a non-image embed `![[target]]`.
    EmbedPlaceholder { target: String },
    /// Footnote reference marker `[^id]`.
    FootnoteRef { id: String },
    /// Header placed before a fenced code block carrying its language label
    /// and a copy button.
    CodeHeader { lang: String },
    /// Inline math span, rendered asynchronously from `source`.
    MathInline { source: String },
    /// Block math, rendered asynchronously from `source`.
    MathBlock { source: String },
    /// Diagram block, rendered asynchronously from `source`.
    Diagram { source: String },
}

impl Widget {
    /// Deterministic DOM materialization.
    ///
    /// Async widgets (math, diagram) emit their pending placeholder; the
    /// render service swaps the contents in place once rendering completes.
    pub fn to_html(&self) -> String {
        match self {
            Widget::TaskCheckbox { checked } => format!(
                r#"<input type="checkbox" class="limn-task" data-task="{}"{}>"#,
                if *checked { "x" } else { " " },
                if *checked { " checked" } else { "" },
            ),
            Widget::ListBullet => r#"<span class="limn-bullet">&bull;</span>"#.to_string(),
            Widget::Rule => r#"<hr class="limn-hr">"#.to_string(),
            Widget::Image { src, alt, width } => {
                let mut attrs = format!(
                    r#" src="{}" alt="{}""#,
                    encode_double_quoted_attribute(src),
                    encode_double_quoted_attribute(alt),
                );
                if let Some(w) = width {
                    attrs.push_str(&format!(r#" width="{w}""#));
                }
                format!(r#"<img class="limn-image"{attrs}>"#)
            }
            Widget::ExternalLink { href, text } => format!(
                r#"<a class="limn-link-external" href="{}">{}</a>"#,
                encode_double_quoted_attribute(href),
                encode_text(text),
            ),
            Widget::InternalLink { target, display } => format!(
                r#"<a class="limn-link-internal" data-target="{}">{}</a>"#,
                encode_double_quoted_attribute(target),
                encode_text(display),
            ),
            Widget::EmbedPlaceholder { target } => format!(
                r#"<span class="limn-embed" data-target="{}">{}</span>"#,
                encode_double_quoted_attribute(target),
                encode_text(target),
            ),
            Widget::FootnoteRef { id } => format!(
                r#"<sup class="limn-footnote" data-footnote="{}">{}</sup>"#,
                encode_double_quoted_attribute(id),
                encode_text(id),
            ),
            Widget::CodeHeader { lang } => format!(
                concat!(
                    r#"<div class="limn-code-header">"#,
                    r#"<span class="limn-code-lang">{}</span>"#,
                    r#"<button class="limn-code-copy" data-action="copy">copy</button>"#,
                    r#"</div>"#,
                ),
                encode_text(lang),
            ),
            Widget::MathInline { source } => format!(
                r#"<span class="limn-math limn-pending">{}</span>"#,
                encode_text(source),
            ),
            Widget::MathBlock { source } => format!(
                r#"<div class="limn-math-block limn-pending"{}>{}</div>"#,
                height_attr(self.estimated_height()),
                encode_text(source),
            ),
            Widget::Diagram { source } => format!(
                r#"<div class="limn-diagram limn-pending"{}>{}</div>"#,
                height_attr(self.estimated_height()),
                encode_text(source),
            ),
        }
    }

    /// Layout-reservation hint for widgets whose contents arrive
    /// asynchronously. `None` for synchronously complete widgets.
    pub fn estimated_height(&self) -> Option<u32> {
        match self {
            Widget::MathBlock { source } | Widget::Diagram { source } => {
                let lines = source.lines().count().max(1) as u32;
                Some(lines * ROW_HEIGHT_PX)
            }
            _ => None,
        }
    }

    /// The raw source of async widgets, used as the render-cache key.
    pub fn render_source(&self) -> Option<&str> {
        match self {
            Widget::MathInline { source }
            | Widget::MathBlock { source }
            | Widget::Diagram { source } => Some(source),
            _ => None,
        }
    }
}

fn height_attr(height: Option<u32>) -> String {
    match height {
        Some(h) => format!(r#" style="min-height:{h}px""#),
        None => String::new(),
    }
}

/// Materialization of a failed async render: an explicit error element
/// keeping the raw source visible alongside the message.
pub fn render_failure_html(source: &str, message: &str) -> String {
    format!(
        concat!(
            r#"<div class="limn-render-error">"#,
            r#"<span class="limn-render-error-message">{}</span>"#,
            r#"<pre>{}</pre>"#,
            r#"</div>"#,
        ),
        encode_text(message),
        encode_text(source),
    )
}

/// Computes the replacement text for toggling a task marker.
///
/// `marker` is the literal marker text (`[ ]`, `[x]`, `[X]`); anything else
/// yields `None` and the host dispatches nothing.
pub fn toggle_task_marker(marker: &str) -> Option<&'static str> {
    match marker {
        "[ ]" => Some("[x]"),
        "[x]" | "[X]" => Some("[ ]"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_compares_render_fields() {
        let a = Widget::InternalLink {
            target: "Note A".into(),
            display: "alias".into(),
        };
        let b = Widget::InternalLink {
            target: "Note A".into(),
            display: "alias".into(),
        };
        let c = Widget::InternalLink {
            target: "Note A".into(),
            display: "other".into(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn checkbox_html_reflects_state() {
        assert_eq!(
            Widget::TaskCheckbox { checked: true }.to_html(),
            r#"<input type="checkbox" class="limn-task" data-task="x" checked>"#
        );
        assert_eq!(
            Widget::TaskCheckbox { checked: false }.to_html(),
            r#"<input type="checkbox" class="limn-task" data-task=" ">"#
        );
    }

    #[test]
    fn internal_link_carries_data_target() {
        let html = Widget::InternalLink {
            target: "Note \"A\"".into(),
            display: "x".into(),
        }
        .to_html();
        assert!(html.contains("data-target="));
        assert!(!html.contains("Note \"A\""), "attribute must be escaped");
    }

    #[test]
    fn image_width_is_emitted_but_no_height() {
        let html = Widget::Image {
            src: "a.png".into(),
            alt: "a".into(),
            width: Some(200),
        }
        .to_html();
        assert!(html.contains(r#"width="200""#));
        assert!(!html.contains("height"));
    }

    #[test]
    fn diagram_placeholder_escapes_source_and_reserves_height() {
        let w = Widget::Diagram {
            source: "a -> b\nb -> <c>".into(),
        };
        assert_eq!(w.estimated_height(), Some(48));
        let html = w.to_html();
        assert!(html.contains("min-height:48px"));
        assert!(html.contains("&lt;c&gt;"));
    }

    #[test]
    fn failure_element_keeps_the_raw_source() {
        let html = render_failure_html("a -> b", "parse error at line 1");
        assert!(html.contains("limn-render-error"));
        assert!(html.contains("a -&gt; b"));
        assert!(html.contains("parse error at line 1"));
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(toggle_task_marker("[ ]"), Some("[x]"));
        assert_eq!(toggle_task_marker("[x]"), Some("[ ]"));
        assert_eq!(toggle_task_marker("[X]"), Some("[ ]"));
        assert_eq!(toggle_task_marker("[?]"), None);
    }
}
