//! Import tests for HTML format (HTML → content stream)
//!
//! Inputs are hand-written HTML, including the kind of markup pasted from other
//! applications. Results are compared as one line per event.

use super::describe;
use insta::assert_snapshot;
use proptest::prelude::*;
use richtext_html::formats::html::style::expand_color;
use richtext_html::formats::html::XHTML_HEADER;
use richtext_html::{read_with_registry, ContentEvent, Event, TagRegistry};

fn read_fragment(html: &str, registry: &TagRegistry) -> Vec<ContentEvent> {
    read_with_registry(html.as_bytes(), registry, true, false).expect("html to read")
}

fn read_document(html: &str, registry: &TagRegistry) -> Vec<ContentEvent> {
    read_with_registry(html.as_bytes(), registry, false, false).expect("html to read")
}

// ============================================================================
// DOCUMENTS AND TEXT
// ============================================================================

#[test]
fn test_only_body_content_is_read() {
    let registry = TagRegistry::new();
    let html = format!("{XHTML_HEADER}<b>bold</b> text</body></html>");
    let events = read_document(&html, &registry);
    assert_snapshot!(describe(&events), @r#"
    <bold>
    "bold"
    </bold>
    " text"
    "#);
}

#[test]
fn test_head_is_skipped() {
    let registry = TagRegistry::new();
    let html = "<html><head><title>Notes</title><style>b { color: red }</style></head>\n\
                <body><!-- saved by an editor -->kept</body></html>";
    let events = read_document(html, &registry);
    assert_eq!(events, vec![Event::Text("kept".to_string())]);
}

#[test]
fn test_pasted_paragraphs_become_newlines() {
    let registry = TagRegistry::new();
    let events = read_fragment("<p>one</p><p>two</p>", &registry);
    assert_snapshot!(describe(&events), @r#""\none\n\ntwo\n""#);
}

#[test]
fn test_entities_and_character_references() {
    let registry = TagRegistry::new();
    let events = read_fragment("fish &amp; chips&nbsp;&lt;3&gt;&#09;&copy;&#65;", &registry);
    assert_eq!(events, vec![Event::Text("fish & chips <3>\t".to_string())]);
}

// ============================================================================
// STYLES
// ============================================================================

#[test]
fn test_span_and_div_styles() {
    let registry = TagRegistry::new();
    let html = "<span style=\"font-size: 14pt; color: #f00\">big</span>\
                <div style=\"text-align: justify\">wide</div>\
                <span style=\"font-family: Times; background-color: #00ff00\">old</span>";
    let events = read_fragment(html, &registry);
    assert_snapshot!(describe(&events), @r#"
    <size 14>
    <fg_color #ff0000>
    "big"
    </fg_color #ff0000>
    </size 14>
    <fill>
    "wide"
    </fill>
    <family Times>
    <bg_color #00ff00>
    "old"
    </bg_color #00ff00>
    </family Times>
    "#);
}

#[test]
fn test_unknown_declarations_are_ignored() {
    let registry = TagRegistry::new();
    let events = read_fragment("<span style=\"margin: 0; font-weight: bold\">x</span>", &registry);
    assert_eq!(events, vec![Event::Text("x".to_string())]);
}

#[test]
fn test_unknown_alignment_is_a_parse_error() {
    let registry = TagRegistry::new();
    let html = "<b>kept</b><div style=\"text-align: middle\">lost</div>";
    let err = read_with_registry(html.as_bytes(), &registry, true, false).unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("middle"));
}

// ============================================================================
// ANCHORS
// ============================================================================

#[test]
fn test_images_and_rules() {
    let registry = TagRegistry::new();
    let html = "<img src=\"pic.png\" width=\"40\" height=\"tall\">before<hr>after\
                <img src=\"a&amp;b.png\" height=\"12\"/>";
    let events = read_fragment(html, &registry);
    assert_snapshot!(describe(&events), @r#"
    img pic.png (Some(40), None)
    "before\n"
    hr
    "\nafter"
    img a&b.png (None, Some(12))
    "#);
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_unknown_tags_keep_sibling_structure() {
    let registry = TagRegistry::new();
    let html = "<b>a<font face=\"x\">b</font>c</b>d<i>e<font>f</i>g";
    let events = read_fragment(html, &registry);
    assert_snapshot!(describe(&events), @r#"
    <bold>
    "abc"
    </bold>
    "d"
    <italic>
    "ef"
    </italic>
    "g"
    "#);
}

#[test]
fn test_stray_end_tags_are_ignored() {
    let registry = TagRegistry::new();
    let events = read_fragment("a</i>b</span>c", &registry);
    assert_eq!(events, vec![Event::Text("abc".to_string())]);
}

#[test]
fn test_bullet_item_is_read_with_its_glyph() {
    let registry = TagRegistry::new();
    let html = "<ol><li style=\"list-style-type: disc\">item one</li>\n</ol>\n";
    let events = read_fragment(html, &registry);
    assert_snapshot!(describe(&events), @r#"
    <indent 1 bullet>
    <bullet>
    "• "
    </bullet>
    "item one\n"
    </indent 1 bullet>
    "#);
}

#[test]
fn test_unordered_lists_and_items_without_style() {
    let registry = TagRegistry::new();
    let html = "intro<ul><li>first</li><li>second</li></ul>outro";
    let events = read_fragment(html, &registry);
    assert_snapshot!(describe(&events), @r#"
    "intro\n"
    <indent 1 none>
    "first\n"
    </indent 1 none>
    <indent 1 none>
    "second\n"
    </indent 1 none>
    "outro"
    "#);
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[test]
fn test_unterminated_tag_is_an_error() {
    let registry = TagRegistry::new();
    let html = "<b>kept</b>\n<img src=\"a.png\"";
    let err = read_with_registry(html.as_bytes(), &registry, true, false).unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("unterminated"));
}

#[test]
fn test_tolerant_mode_keeps_what_was_read() {
    let registry = TagRegistry::new();
    let html = "<b>kept</b><img src=\"a.png\"";
    let events = read_with_registry(html.as_bytes(), &registry, true, true).unwrap();
    assert_snapshot!(describe(&events), @r#"
    <bold>
    "kept"
    </bold>
    "#);
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_short_colors_expand(color in "#[0-9a-fA-F]{3}") {
        let expanded = expand_color(&color).expect("short color to expand");
        let digits: Vec<char> = color.chars().skip(1).collect();
        let expected = format!(
            "#{0}{0}{1}{1}{2}{2}",
            digits[0], digits[1], digits[2]
        );
        prop_assert_eq!(expanded, expected);
    }

    #[test]
    fn prop_whitespace_collapses_to_one_space(
        first in "[a-z0-9]{1,8}",
        gap in "[ \n]{1,6}",
        second in "[a-z0-9]{1,8}",
    ) {
        let registry = TagRegistry::new();
        let events = read_fragment(&format!("{first}{gap}{second}"), &registry);
        prop_assert_eq!(events, vec![Event::Text(format!("{first} {second}"))]);
    }

    #[test]
    fn prop_whitespace_after_break_is_stripped(
        first in "[a-z0-9]{1,8}",
        gap in "\n[ \n]{0,6}",
        second in "[a-z0-9]{1,8}",
    ) {
        let registry = TagRegistry::new();
        let events = read_fragment(&format!("{first}<br/>{gap}{second}"), &registry);
        prop_assert_eq!(events, vec![Event::Text(format!("{first}\n{second}"))]);
    }
}
