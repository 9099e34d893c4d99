use markdown_limn_engine::{
    Decoration, DecorationKind, Document, LivePreview, PreviewSettings, RenderError, RenderState,
    Renderer, Span, Widget, decoration,
};

const SAMPLE: &str = "\
# Notes

Check ==this== and [[Note A|alias]].

> [!tip]- Remember
> callouts fold

- [ ] open task
- [x] done task

```mermaid
a --> b
```

```rust
fn main() {}
```

last line
";

struct StubRenderer;

impl Renderer for StubRenderer {
    fn render(&mut self, source: &str) -> Result<String, RenderError> {
        if source.trim().is_empty() {
            Err(RenderError::InvalidSource("empty diagram".into()))
        } else {
            Ok(format!("<svg data-lines=\"{}\"/>", source.lines().count()))
        }
    }
}

fn preview() -> LivePreview {
    LivePreview::new(
        PreviewSettings::default(),
        Box::new(StubRenderer),
        Box::new(StubRenderer),
    )
}

fn sample_doc() -> Document {
    let mut doc = Document::from_str(SAMPLE).unwrap();
    // Cursor on the last line keeps every earlier construct decorated.
    doc.set_selection(SAMPLE.len() - 1..SAMPLE.len() - 1);
    doc
}

fn widget_of(dec: &Decoration) -> Option<&Widget> {
    match &dec.kind {
        DecorationKind::Replace { widget, .. } => widget.as_ref(),
        DecorationKind::Point { widget, .. } => Some(widget),
        _ => None,
    }
}

#[test]
fn both_passes_cover_the_sample_document() {
    let doc = sample_doc();
    let mut preview = preview();

    let inline = preview.inline_decorations(&doc, doc.full_span());
    decoration::invariants::check(&inline, doc.len());

    let widgets: Vec<&Widget> = inline.iter().filter_map(widget_of).collect();
    assert!(widgets.contains(&&Widget::TaskCheckbox { checked: false }));
    assert!(widgets.contains(&&Widget::TaskCheckbox { checked: true }));
    assert!(widgets.contains(&&Widget::InternalLink {
        target: "Note A".into(),
        display: "alias".into(),
    }));
    assert!(widgets.contains(&&Widget::CodeHeader {
        lang: "rust".into()
    }));

    let blocks = preview.block_decorations(&doc);
    decoration::invariants::check(blocks, doc.len());
    let block_widgets: Vec<&Widget> = blocks.iter().filter_map(widget_of).collect();
    assert_eq!(
        block_widgets,
        vec![&Widget::Diagram {
            source: "a --> b\n".into()
        }]
    );
}

#[test]
fn diagram_and_code_fences_never_overlap_across_passes() {
    let doc = sample_doc();
    let mut preview = preview();

    let inline = preview.inline_decorations(&doc, doc.full_span());
    let diagram_span = preview
        .block_decorations(&doc)
        .iter()
        .next()
        .expect("diagram block")
        .span;

    for dec in inline.iter() {
        assert!(
            !dec.span.intersects(diagram_span) || !dec.is_replacing(),
            "inline pass must not replace inside the diagram fence: {dec:?}"
        );
    }
}

#[test]
fn editing_the_revealed_line_keeps_other_lines_decorated() {
    let mut doc = sample_doc();
    let mut preview = preview();

    // Put the cursor on the highlight's line.
    let offset = SAMPLE.find("==this==").unwrap();
    doc.set_selection(offset..offset);
    let inline = preview.inline_decorations(&doc, doc.full_span());

    // Highlight markers stay raw, but the heading above still renders.
    assert!(
        !inline
            .iter()
            .any(|d| d.is_replacing() && d.span.contains(offset)),
        "construct under the cursor must stay raw"
    );
    assert!(inline.iter().any(
        |d| matches!(&d.kind, DecorationKind::Line { class } if class == "limn-header-1")
    ));
}

#[test]
fn incremental_edit_refreshes_decorations() {
    let mut doc = sample_doc();
    let mut preview = preview();

    let before = preview.inline_decorations(&doc, doc.full_span());
    let insert_at = SAMPLE.find("last line").unwrap();
    doc.replace_range(Span::point(insert_at), "==new== ");
    doc.set_selection(0..0);

    let after = preview.inline_decorations(&doc, doc.full_span());
    assert_ne!(before, after);
    decoration::invariants::check(&after, doc.len());
    assert!(after.iter().any(|d| matches!(
        &d.kind,
        DecorationKind::Mark { class } if class == "limn-highlight"
    ) && d.span.start == insert_at + 2));
}

#[test]
fn render_requests_flow_through_the_pump() {
    let doc = sample_doc();
    let mut preview = preview();

    let source = match widget_of(preview.block_decorations(&doc).iter().next().unwrap()) {
        Some(Widget::Diagram { source }) => source.clone(),
        other => panic!("expected diagram widget, got {other:?}"),
    };

    let handle = preview.request_diagram(&source);
    assert_eq!(handle.state(), RenderState::Pending);
    assert!(!preview.pump_renders());
    assert_eq!(
        handle.state(),
        RenderState::Rendered("<svg data-lines=\"1\"/>".into())
    );

    // Same source resolves straight from cache.
    let again = preview.request_diagram(&source);
    assert_eq!(again.state(), handle.state());
}

#[test]
fn failed_renders_surface_and_stick() {
    let mut preview = preview();
    let handle = preview.request_math("   \n");
    preview.pump_renders();
    assert_eq!(
        handle.state(),
        RenderState::Failed("invalid source: empty diagram".into())
    );
    let again = preview.request_math("   \n");
    assert_eq!(again.state(), handle.state());
}

#[test]
fn detached_widget_is_never_resolved() {
    let mut preview = preview();
    let handle = preview.request_diagram("a --> b\n");
    handle.detach();
    while preview.pump_renders() {}
    assert_eq!(handle.state(), RenderState::Pending);
}

#[test]
fn disabling_the_preview_empties_both_passes() {
    let doc = sample_doc();
    let mut preview = preview();
    assert!(!preview.inline_decorations(&doc, doc.full_span()).is_empty());

    preview.set_settings(PreviewSettings {
        enabled: false,
        ..PreviewSettings::default()
    });
    assert!(preview.inline_decorations(&doc, doc.full_span()).is_empty());
    assert!(preview.block_decorations(&doc).is_empty());

    preview.set_settings(PreviewSettings::default());
    assert!(!preview.inline_decorations(&doc, doc.full_span()).is_empty());
    assert!(!preview.block_decorations(&doc).is_empty());
}

#[test]
fn custom_reserved_languages_are_honored() {
    let text = "```plantuml\nA -> B\n```\n\nend\n";
    let mut doc = Document::from_str(text).unwrap();
    doc.set_selection(text.len() - 1..text.len() - 1);

    let mut preview = LivePreview::new(
        PreviewSettings {
            diagram_language: "plantuml".into(),
            ..PreviewSettings::default()
        },
        Box::new(StubRenderer),
        Box::new(StubRenderer),
    );

    let blocks = preview.block_decorations(&doc);
    assert_eq!(
        blocks.iter().filter_map(widget_of).collect::<Vec<_>>(),
        vec![&Widget::Diagram {
            source: "A -> B\n".into()
        }]
    );
}
