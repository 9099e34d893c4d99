//! # Inline recognizers
//!
//! Cursor-based inline scanning layered over the block tree.
//!
//! ## Architecture
//!
//! The block grammar (Tree-sitter Markdown) leaves `inline` nodes as opaque
//! text spans; this module scans them into [`InlineNode`]s. Recognizers are
//! pure `try_parse_*` functions: each either consumes a complete, confidently
//! classified construct or restores the cursor and reports no match, which
//! makes unterminated syntax (e.g. `==ab` with no closing `==`) fall back to
//! plain text.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum, spans only (lossless round-trip)
//! - **`kinds`**: per-construct delimiter constants (knowledge ownership)
//! - **`cursor`**: byte cursor with absolute position and left context
//! - **`parser`**: `parse_inline()` entry point with `try_parse_*` helpers
//!
//! ## Precedence
//!
//! Code spans are raw zones and are tried first: `` `[[not a link]]` ``
//! parses as one code span. Embeds (`![[`) are tried before wikilinks so
//! `![[b]]` never yields a wikilink with a stray `!`.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineNode;
