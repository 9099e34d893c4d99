use serde::{Deserialize, Serialize};

/// Live-preview configuration supplied by the host's settings layer.
///
/// Toggling `enabled` takes effect on the next decoration pass without a
/// reload; the engine keeps no decoration state across toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Master switch; when false both passes produce empty sets.
    pub enabled: bool,
    /// Fence info string reserved for diagram blocks.
    pub diagram_language: String,
    /// Fence info string reserved for block math.
    pub math_language: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            diagram_language: "mermaid".to_string(),
            math_language: "math".to_string(),
        }
    }
}

impl PreviewSettings {
    /// True when `lang` is one of the two reserved multi-line-widget
    /// languages owned by the block decoration provider.
    pub fn is_reserved_language(&self, lang: &str) -> bool {
        lang == self.diagram_language || lang == self.math_language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = PreviewSettings::default();
        assert!(s.enabled);
        assert!(s.is_reserved_language("mermaid"));
        assert!(s.is_reserved_language("math"));
        assert!(!s.is_reserved_language("rust"));
    }
}
