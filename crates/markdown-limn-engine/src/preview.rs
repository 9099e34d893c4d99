//! The engine facade the host editor drives.
//!
//! A `LivePreview` owns the settings, the persistent block decoration
//! provider, and one render service per expensive widget kind. The host
//! feeds it the document plus viewport/cursor state and asks for the two
//! decoration sets; it pumps `pump_renders` from its idle loop.

use crate::decoration::{BlockDecorationProvider, DecorationSet, build_decorations};
use crate::editing::Document;
use crate::render::{RenderHandle, RenderService, Renderer};
use crate::settings::PreviewSettings;
use crate::span::Span;

pub struct LivePreview {
    settings: PreviewSettings,
    blocks: BlockDecorationProvider,
    diagrams: RenderService,
    math: RenderService,
}

impl LivePreview {
    pub fn new(
        settings: PreviewSettings,
        diagram_renderer: Box<dyn Renderer>,
        math_renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            settings,
            blocks: BlockDecorationProvider::new(),
            diagrams: RenderService::new(diagram_renderer),
            math: RenderService::new(math_renderer),
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Replaces the settings and invalidates state derived from them.
    pub fn set_settings(&mut self, settings: PreviewSettings) {
        if self.settings != settings {
            self.settings = settings;
            self.blocks.invalidate();
        }
    }

    /// The per-event inline pass over the visible viewport.
    pub fn inline_decorations(&self, doc: &Document, viewport: Span) -> DecorationSet {
        build_decorations(doc, viewport, doc.cursor_state(), &self.settings)
    }

    /// The cached multi-line pass (diagram and block-math fences).
    pub fn block_decorations(&mut self, doc: &Document) -> &DecorationSet {
        self.blocks.update(doc, doc.cursor_state(), &self.settings)
    }

    pub fn request_diagram(&mut self, source: &str) -> RenderHandle {
        self.diagrams.request(source)
    }

    pub fn request_math(&mut self, source: &str) -> RenderHandle {
        self.math.request(source)
    }

    /// Processes at most one job per service. Returns `true` while render
    /// work remains, so the host keeps scheduling idle callbacks.
    pub fn pump_renders(&mut self) -> bool {
        let diagrams_busy = self.diagrams.pump();
        let math_busy = self.math.pump();
        diagrams_busy || math_busy
    }
}
