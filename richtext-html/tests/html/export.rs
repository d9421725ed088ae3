//! Export tests for HTML format (content stream → HTML)
//!
//! These tests build content streams by hand and check the exact markup written.

use richtext_html::formats::html::{XHTML_FOOTER, XHTML_HEADER};
use richtext_html::{
    serialize_to_html, write, Anchor, ContentEvent, Event, Image, Justify, Modifier, ParType,
    TagRegistry,
};

fn text(s: &str) -> ContentEvent {
    Event::Text(s.to_string())
}

fn fragment(events: Vec<ContentEvent>, registry: &TagRegistry) -> String {
    serialize_to_html(events, registry, true).expect("stream to serialize")
}

// ============================================================================
// TEXT AND INLINE STYLES
// ============================================================================

#[test]
fn test_text_escaping() {
    let registry = TagRegistry::new();
    let html = fragment(vec![text("a  b\tc <d> & e\n")], &registry);
    assert_eq!(html, "a &nbsp;b&#09;c &lt;d&gt; &amp; e<br/>\n");
}

#[test]
fn test_overlapping_spans_are_split() {
    let registry = TagRegistry::new();
    let bold = registry.modifier(Modifier::Bold);
    let italic = registry.modifier(Modifier::Italic);
    let events = vec![
        Event::Begin(bold.clone()),
        text("a"),
        Event::Begin(italic.clone()),
        text("b"),
        Event::End(bold),
        text("c"),
        Event::End(italic),
    ];
    assert_eq!(fragment(events, &registry), "<b>a<i>b</i></b><i>c</i>");
}

#[test]
fn test_font_spans_nest_in_begin_order() {
    let registry = TagRegistry::new();
    let size = registry.size(12);
    let family = registry.family("Courier New");
    let events = vec![
        Event::Begin(size.clone()),
        Event::Begin(family.clone()),
        text("x"),
        Event::End(family),
        Event::End(size),
    ];
    assert_eq!(
        fragment(events, &registry),
        "<span style=\"font-size: 12pt\"><span style=\"font-family: Courier New\">x</span></span>"
    );
}

#[test]
fn test_colors_and_justification() {
    let registry = TagRegistry::new();
    let fill = registry.justify(Justify::Fill);
    let fg = registry.fg_color("#A0b1C2");
    let bg = registry.bg_color("#000000");
    let events = vec![
        Event::Begin(fill.clone()),
        Event::Begin(fg.clone()),
        text("x"),
        Event::End(fg),
        Event::Begin(bg.clone()),
        text("y"),
        Event::End(bg),
        Event::End(fill),
    ];
    assert_eq!(
        fragment(events, &registry),
        "<div style=\"text-align: justify\"><span style=\"color: #A0b1C2\">x</span>\
         <span style=\"background-color: #000000\">y</span></div>"
    );
}

#[test]
fn test_empty_spans_are_dropped() {
    let registry = TagRegistry::new();
    let underline = registry.modifier(Modifier::Underline);
    let events = vec![
        Event::Begin(underline.clone()),
        Event::End(underline),
        text("plain"),
    ];
    assert_eq!(fragment(events, &registry), "plain");
}

// ============================================================================
// ANCHORS
// ============================================================================

#[test]
fn test_horizontal_rule_takes_the_surrounding_newlines() {
    let registry = TagRegistry::new();
    let events = vec![
        text("above\n"),
        Event::Anchor(Anchor::HorizontalRule),
        text("\nbelow"),
    ];
    assert_eq!(fragment(events, &registry), "above<hr/>below");
}

#[test]
fn test_image_attributes() {
    let registry = TagRegistry::new();
    let events = vec![
        Event::Anchor(Anchor::Image(Image::new("photo.png"))),
        Event::Anchor(Anchor::Image(
            Image::new("wide.png").with_size(Some(300), None),
        )),
        Event::Anchor(Anchor::Image(
            Image::new("box.png").with_size(Some(10), Some(20)),
        )),
    ];
    assert_eq!(
        fragment(events, &registry),
        "<img src=\"photo.png\" /><img src=\"wide.png\" width=\"300\" />\
         <img src=\"box.png\" width=\"10\" height=\"20\" />"
    );
}

// ============================================================================
// LISTS
// ============================================================================

#[test]
fn test_bullet_item() {
    let registry = TagRegistry::new();
    let item = registry.indent(1, ParType::Bullet);
    let events = vec![Event::Begin(item.clone()), text("item one\n"), Event::End(item)];
    assert_eq!(
        fragment(events, &registry),
        "<ol><li style=\"list-style-type: disc\">item one</li>\n</ol>\n"
    );
}

#[test]
fn test_bullet_glyph_is_not_written() {
    let registry = TagRegistry::new();
    let item = registry.indent(1, ParType::Bullet);
    let bullet = registry.bullet();
    let events = vec![
        Event::Begin(item.clone()),
        Event::Begin(bullet.clone()),
        text("\u{2022} "),
        Event::End(bullet),
        text("item one\n"),
        Event::End(item),
    ];
    assert_eq!(
        fragment(events, &registry),
        "<ol><li style=\"list-style-type: disc\">item one</li>\n</ol>\n"
    );
}

#[test]
fn test_nested_lists() {
    let registry = TagRegistry::new();
    let one = registry.indent(1, ParType::None);
    let two = registry.indent(2, ParType::Bullet);
    let events = vec![
        text("x\n"),
        Event::Begin(one.clone()),
        text("a\n"),
        Event::End(one),
        Event::Begin(two.clone()),
        text("b\n"),
        Event::End(two),
        text("y"),
    ];
    assert_eq!(
        fragment(events, &registry),
        "x<ol><li style=\"list-style-type: none\">a</li>\n\
         <li style=\"list-style-type: none\"><ol><li style=\"list-style-type: disc\">b</li>\n\
         </ol>\n</li>\n</ol>\ny"
    );
}

// ============================================================================
// DOCUMENTS
// ============================================================================

#[test]
fn test_document_header_and_footer() {
    let registry = TagRegistry::new();
    let bold = registry.modifier(Modifier::Bold);
    let events = vec![Event::Begin(bold.clone()), text("hi"), Event::End(bold)];
    let html = serialize_to_html(events, &registry, false).expect("stream to serialize");
    assert_eq!(html, format!("{XHTML_HEADER}<b>hi</b>{XHTML_FOOTER}"));
}

#[test]
fn test_write_to_sink() {
    let registry = TagRegistry::new();
    let mut out = Vec::new();
    write(vec![text("to a sink")], &registry, true, &mut out).expect("stream to write");
    assert_eq!(String::from_utf8(out).unwrap(), "to a sink");
}

#[test]
fn test_empty_stream() {
    let registry = TagRegistry::new();
    assert_eq!(fragment(Vec::new(), &registry), "");
    assert_eq!(
        serialize_to_html(Vec::new(), &registry, false).unwrap(),
        format!("{XHTML_HEADER}{XHTML_FOOTER}")
    );
}
