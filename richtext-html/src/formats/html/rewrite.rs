//! Structural rewrites of the document tree around HTML conversion.
//!
//! Before writing, [`prepare_dom_write`] turns the tree built from the normalized
//! content stream into the shape HTML lists need:
//!
//! 1. Paragraphs become list items inside indents and disappear elsewhere. An indent
//!    nested in another indent is wrapped in a list item, since a nested `<ol>` has
//!    to sit inside an `<li>`.
//! 2. One pre-order walk that remembers the last leaf visited cleans up newlines the
//!    markup already implies: the one before an `<hr/>` or an `<ol>`, the one after an
//!    `<hr/>`, and the last one of each list item. Bullet spans are dropped (the reader
//!    recreates the glyph) and elements left empty are pruned.
//!
//! After reading, [`process_dom_read`] puts back the newlines the lists implied.

use crate::ir::nodes::{Anchor, Dom, ElementTag, NodeId, NodeKind};
use crate::ir::tags::{ParType, TagKind};

/// Rewrite a tree built from a normalized content stream for HTML emission.
pub fn prepare_dom_write(dom: &mut Dom) {
    let root = dom.root();
    for child in dom.children(root).to_vec() {
        promote_paragraphs(dom, child, false);
    }

    let mut last_leaf = None;
    for child in dom.children(root).to_vec() {
        cleanup(dom, child, &mut last_leaf);
    }
}

fn promote_paragraphs(dom: &mut Dom, node: NodeId, mut within_indent: bool) {
    let Some(tag) = dom.tag(node).cloned() else {
        return;
    };
    let Some(parent) = dom.parent(node) else {
        return;
    };

    match tag.kind() {
        TagKind::Paragraph(par_type) => {
            let children = dom.children(node).to_vec();
            if within_indent {
                let item = dom.create(NodeKind::Element(ElementTag::ListItem(*par_type)));
                dom.move_children(node, item);
                dom.replace_child(parent, node, item);
            } else {
                for &child in &children {
                    dom.insert_before(parent, node, child);
                }
                dom.remove(node);
            }
            for child in children {
                promote_paragraphs(dom, child, within_indent);
            }
            return;
        }
        TagKind::Indent { .. } => {
            if within_indent {
                let item = dom.create(NodeKind::Element(ElementTag::ListItem(ParType::None)));
                dom.replace_child(parent, node, item);
                dom.append_child(item, node);
            }
            within_indent = true;
        }
        _ => {}
    }

    for child in dom.children(node).to_vec() {
        promote_paragraphs(dom, child, within_indent);
    }
}

fn is_horizontal_rule(dom: &Dom, node: Option<NodeId>) -> bool {
    node.is_some_and(|id| matches!(dom.kind(id), NodeKind::Anchor(Anchor::HorizontalRule)))
}

fn strip_trailing_newline(dom: &mut Dom, node: Option<NodeId>) {
    if let Some(text) = node.and_then(|id| dom.text_mut(id)) {
        if text.ends_with('\n') {
            text.pop();
        }
    }
}

/// The rightmost leaf under a list item, unless a nested indent is in the way.
fn rightmost_leaf(dom: &Dom, item: NodeId) -> Option<NodeId> {
    let mut child = dom.last_child(item);
    while let Some(id) = child {
        if dom.is_leaf(id) {
            break;
        }
        if dom.tag(id).is_some_and(|tag| tag.is_indent()) {
            return None;
        }
        child = dom.last_child(id);
    }
    child
}

fn cleanup(dom: &mut Dom, node: NodeId, last_leaf: &mut Option<NodeId>) {
    let element = dom.element(node).cloned();

    if let Some(ElementTag::Tag(tag)) = &element {
        if matches!(tag.kind(), TagKind::Bullet) {
            dom.remove(node);
            return;
        }
        if tag.is_indent() {
            strip_trailing_newline(dom, *last_leaf);
        }
    }
    if is_horizontal_rule(dom, Some(node)) {
        strip_trailing_newline(dom, *last_leaf);
    }
    if let Some(ElementTag::ListItem(_)) = &element {
        let leaf = rightmost_leaf(dom, node);
        strip_trailing_newline(dom, leaf);
    }

    if dom.is_leaf(node) {
        if is_horizontal_rule(dom, *last_leaf) {
            if let Some(text) = dom.text_mut(node) {
                if text.starts_with('\n') {
                    text.remove(0);
                }
            }
        }
        // empty elements are not leaves of the text
        if element.is_none() {
            *last_leaf = Some(node);
        }
    } else {
        for child in dom.children(node).to_vec() {
            cleanup(dom, child, last_leaf);
        }
    }

    if element.is_some() && dom.is_leaf(node) {
        dom.remove(node);
    }
}

/// Restore the newlines implied by list markup in a tree read from HTML.
///
/// A list with a previous sibling starts on a new line, and every list item ends with
/// one unless it ends with a nested list, which supplies its own.
pub fn process_dom_read(dom: &mut Dom) {
    let root = dom.root();
    for child in dom.children(root).to_vec() {
        restore_newlines(dom, child);
    }
}

fn restore_newlines(dom: &mut Dom, node: NodeId) {
    match dom.element(node) {
        Some(ElementTag::List) => {
            if let (Some(parent), Some(prev)) = (dom.parent(node), dom.prev_sibling(node)) {
                match dom.text_mut(prev) {
                    Some(text) => text.push('\n'),
                    None => {
                        let newline = dom.create(NodeKind::Text("\n".to_string()));
                        dom.insert_before(parent, node, newline);
                    }
                }
            }
        }
        Some(ElementTag::ListItem(_)) => {
            let ends_with_list = dom
                .last_child(node)
                .is_some_and(|last| matches!(dom.element(last), Some(ElementTag::List)));
            if !ends_with_list {
                dom.append_text(node, "\n");
            }
        }
        _ => {}
    }

    for child in dom.children(node).to_vec() {
        restore_newlines(dom, child);
    }
}
