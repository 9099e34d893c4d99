//! # Editing substrate
//!
//! The document model the decoration passes read from:
//!
//! - The entire document lives in a single **`xi_rope::Rope`** buffer;
//!   saving writes rope bytes verbatim with no formatting drift.
//! - **Tree-sitter Markdown** (block grammar) parses the buffer
//!   incrementally: edits are fed via `tree.edit()` before re-parsing so only
//!   changed regions are re-examined.
//! - The selection head, reduced to a line number ([`CursorState`]), drives
//!   the reveal behavior of the decoration passes.
//!
//! Interactive widgets write back through [`Document::replace_range`], the
//! atomic text-replacement contract (e.g. toggling `[ ]` ↔ `[x]`).

pub mod document;

pub use document::{CursorState, Document};
