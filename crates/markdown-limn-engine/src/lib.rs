pub mod decoration;
pub mod editing;
pub mod inline;
pub mod preview;
pub mod render;
pub mod settings;
pub mod span;
pub mod widgets;

// Re-export key types for easier usage
pub use decoration::{
    BlockDecorationProvider, Decoration, DecorationKind, DecorationSet, Side, build_decorations,
};
pub use editing::{CursorState, Document};
pub use inline::{InlineNode, parse_inline};
pub use preview::LivePreview;
pub use render::{RenderError, RenderHandle, RenderService, RenderState, Renderer};
pub use settings::PreviewSettings;
pub use span::Span;
pub use widgets::{Widget, render_failure_html, toggle_task_marker};
