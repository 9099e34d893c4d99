//! # Decoration engine
//!
//! Turns the block tree plus cursor state into render instructions.
//!
//! Two independent passes feed two independently owned collections, merged
//! only by the host view (a hard constraint of the hosting editor framework:
//! a dynamically computed decoration source must not emit multi-line
//! replacements):
//!
//! - **`builder`**: inline/single-line decorations for the visible viewport,
//!   rebuilt wholesale on every document, selection, or viewport change.
//! - **`block_provider`**: persistent-state companion owning the multi-line
//!   replacements (diagram and block-math fences), recomputed on document or
//!   selection change only.
//!
//! Both honor the reveal rule: a construct whose line range contains the
//! cursor's line keeps its raw syntax for that pass.

pub mod block_provider;
pub mod builder;
pub mod callout;
pub mod fence;
pub mod invariants;
pub mod types;

pub use block_provider::BlockDecorationProvider;
pub use builder::build_decorations;
pub use types::{Decoration, DecorationKind, DecorationSet, Side};
