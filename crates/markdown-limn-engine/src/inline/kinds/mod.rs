//! # Inline kinds
//!
//! Inline-specific types that own their syntax delimiters. All delimiter
//! constants live here, not scattered in parser code; the parser refers to
//! these constants and never hardcodes `[[`, `==`, or `$`.

pub mod code_span;
pub mod comment;
pub mod emphasis;
pub mod footnote;
pub mod highlight;
pub mod link;
pub mod math;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use comment::Comment;
pub use emphasis::{Emphasis, Strikethrough};
pub use footnote::FootnoteRef;
pub use highlight::Highlight;
pub use link::Link;
pub use math::InlineMath;
pub use wikilink::{Embed, WikiLink};
