//! Tests for the format agnostic stream transforms.

use proptest::prelude::*;
use richtext_html::common::flat_to_nested::events_to_dom;
use richtext_html::common::indent::{nest_indent_tags, unnest_indent_tags};
use richtext_html::common::nested_to_flat::dom_to_events;
use richtext_html::common::normalize::normalize_tags;
use richtext_html::common::paragraphs::find_paragraphs;
use richtext_html::{ContentEvent, Event, Modifier, ParType, TagRegistry};

fn text(s: &str) -> ContentEvent {
    Event::Text(s.to_string())
}

/// Whether every end closes the innermost open begin.
fn balanced(events: &[ContentEvent]) -> bool {
    let mut open = Vec::new();
    for event in events {
        match event {
            Event::Begin(tag) => open.push(tag),
            Event::End(tag) => {
                if open.pop() != Some(tag) {
                    return false;
                }
            }
            _ => {}
        }
    }
    open.is_empty()
}

#[test]
fn test_write_pipeline_output_builds_a_tree() {
    let registry = TagRegistry::new();
    let bold = registry.modifier(Modifier::Bold);
    let one = registry.indent(1, ParType::Bullet);
    let two = registry.indent(2, ParType::None);
    let events = vec![
        Event::Begin(bold.clone()),
        text("intro "),
        Event::Begin(one.clone()),
        text("first\n"),
        Event::End(bold),
        Event::End(one),
        Event::Begin(two.clone()),
        text("second\n"),
        Event::End(two),
    ];

    let stream: Vec<_> =
        normalize_tags(nest_indent_tags(find_paragraphs(events, &registry), &registry)).collect();
    assert!(balanced(&stream));

    let dom = events_to_dom(stream.clone()).expect("normalized stream to nest");
    let flat: Vec<ContentEvent> = dom_to_events(&dom)
        .into_iter()
        .map(|event| event.map_tag(|tag| tag.tag().cloned().expect("only tags in the tree")))
        .collect();
    assert_eq!(flat, stream);
}

#[test]
fn test_unnest_restores_flat_indents() {
    use richtext_html::ir::nodes::ElementTag;

    let registry = TagRegistry::new();
    let events = vec![
        Event::Begin(ElementTag::List),
        Event::Begin(ElementTag::ListItem(ParType::None)),
        Event::Text("a\n".to_string()),
        Event::End(ElementTag::ListItem(ParType::None)),
        Event::Begin(ElementTag::ListItem(ParType::None)),
        Event::Begin(ElementTag::List),
        Event::Begin(ElementTag::ListItem(ParType::None)),
        Event::Text("b\n".to_string()),
        Event::End(ElementTag::ListItem(ParType::None)),
        Event::End(ElementTag::List),
        Event::End(ElementTag::ListItem(ParType::None)),
        Event::End(ElementTag::List),
    ];
    let flat: Vec<_> = unnest_indent_tags(events, &registry).collect();

    let one = registry.indent(1, ParType::None);
    let two = registry.indent(2, ParType::None);
    assert_eq!(
        flat,
        vec![
            Event::Begin(one.clone()),
            text("a\n"),
            Event::End(one.clone()),
            Event::Begin(one.clone()),
            Event::End(one.clone()),
            Event::Begin(two.clone()),
            text("b\n"),
            Event::End(two),
            Event::Begin(one.clone()),
            Event::End(one),
        ]
    );
}

#[test]
fn test_normalize_is_stable() {
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

    let once: Vec<_> = normalize_tags(events).collect();
    let twice: Vec<_> = normalize_tags(once.clone()).collect();
    assert!(balanced(&once));
    assert_eq!(once, twice);
}

fn flat_indents(levels: &[(u32, ParType)], registry: &TagRegistry) -> Vec<ContentEvent> {
    let mut events = Vec::new();
    for (i, &(level, par_type)) in levels.iter().enumerate() {
        let line = Event::Text(format!("line {i}\n"));
        if level == 0 {
            events.push(line);
        } else {
            let tag = registry.indent(level, par_type);
            events.push(Event::Begin(tag.clone()));
            events.push(line);
            events.push(Event::End(tag));
        }
    }
    events
}

proptest! {
    #[test]
    fn prop_nesting_is_depth_balanced(
        levels in prop::collection::vec(
            (0u32..5, prop_oneof![Just(ParType::None), Just(ParType::Bullet)]),
            0..12,
        )
    ) {
        let registry = TagRegistry::new();
        let events = flat_indents(&levels, &registry);
        let nested: Vec<_> = nest_indent_tags(events, &registry).collect();

        let mut depth = 0u32;
        let mut line_levels = Vec::new();
        for event in &nested {
            match event {
                Event::Begin(tag) => {
                    let (level, _) = tag.indent().expect("only indents in the stream");
                    prop_assert_eq!(level, depth + 1);
                    depth += 1;
                }
                Event::End(tag) => {
                    let (level, _) = tag.indent().expect("only indents in the stream");
                    prop_assert_eq!(level, depth);
                    depth -= 1;
                }
                Event::Text(_) => line_levels.push(depth),
                Event::Anchor(_) => {}
            }
        }
        prop_assert_eq!(depth, 0);
        let expected: Vec<u32> = levels.iter().map(|(level, _)| *level).collect();
        prop_assert_eq!(line_levels, expected);
    }
}
