//! Converts a document tree into a flat event stream.
//!
//! # The High-Level Concept
//!
//! Traversing the tree in pre-order lets us emit a sequence of begin/content/end
//! events that can later be reassembled into the original tree. Each element produces
//! its own `Begin`/`End` pair and recurses into its children in between, so the flat
//! stream preserves the nesting.
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - Create an empty event vector
//!    - Begin walking from the children of the synthetic root
//!
//! 2. **Entering Elements:**
//!    - Emit `Begin(tag)`
//!    - Recurse into child nodes
//!    - Emit `End(tag)` once children are processed
//!
//! 3. **Handling Leaves:**
//!    - Text and anchors become a single event in place; empty text is skipped
//!
//! This mirrors the reverse process performed in `flat_to_nested`.

use crate::ir::events::Event;
use crate::ir::nodes::{Dom, ElementTag, NodeId, NodeKind};

/// Converts a [`Dom`] to a flat vector of events.
pub fn dom_to_events(dom: &Dom) -> Vec<Event<ElementTag>> {
    let mut events = Vec::new();
    for &child in dom.children(dom.root()) {
        walk_node(dom, child, &mut events);
    }
    events
}

fn walk_node(dom: &Dom, node: NodeId, events: &mut Vec<Event<ElementTag>>) {
    match dom.kind(node) {
        NodeKind::Root => {
            for &child in dom.children(node) {
                walk_node(dom, child, events);
            }
        }
        NodeKind::Text(text) => {
            if !text.is_empty() {
                events.push(Event::Text(text.clone()));
            }
        }
        NodeKind::Anchor(anchor) => events.push(Event::Anchor(anchor.clone())),
        NodeKind::Element(tag) => {
            events.push(Event::Begin(tag.clone()));
            for &child in dom.children(node) {
                walk_node(dom, child, events);
            }
            events.push(Event::End(tag.clone()));
        }
    }
}
