//! Core data structures for the document tree.
//!
//! The tree is an arena: nodes live in one `Vec` owned by [`Dom`] and refer to each
//! other by [`NodeId`]. Each node keeps an ordered list of children and a parent
//! index used for traversal and detaching, never for ownership. Detached nodes stay
//! in the arena but are unreachable from the root, so a `Dom` is meant to be built,
//! rewritten and dropped within one conversion.

use crate::ir::tags::{ParType, Tag};

/// An embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    filename: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl Image {
    pub fn new(filename: impl Into<String>) -> Self {
        Image {
            filename: filename.into(),
            width: None,
            height: None,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Requested display size; `None` means natural size in that dimension.
    pub fn size(&self) -> (Option<u32>, Option<u32>) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: Option<u32>, height: Option<u32>) {
        self.width = width;
        self.height = height;
    }

    /// Scale to the given dimensions. Either may be omitted, in which case that
    /// dimension follows the image's natural aspect ratio when displayed.
    pub fn scale(&mut self, width: Option<u32>, height: Option<u32>) {
        self.set_size(width, height);
    }

    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.scale(width, height);
        self
    }
}

/// An embedded object occupying one position in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Image(Image),
    HorizontalRule,
}

/// What an element node stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementTag {
    /// A style or structure tag of the content stream
    Tag(Tag),
    /// An HTML list container (`ol`/`ul`) read from input
    List,
    /// An HTML list item of the given item type
    ListItem(ParType),
}

impl ElementTag {
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            ElementTag::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            ElementTag::Tag(tag) => tag.name(),
            ElementTag::List => "ol".to_string(),
            ElementTag::ListItem(par_type) => format!("li {}", par_type.name()),
        }
    }
}

impl From<Tag> for ElementTag {
    fn from(tag: Tag) -> Self {
        ElementTag::Tag(tag)
    }
}

/// Index of a node in its [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A universal representation of a document node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The synthetic container at the top of every tree
    Root,
    Text(String),
    Anchor(Anchor),
    Element(ElementTag),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document tree.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<NodeData>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Dom {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// The element tag of `id`, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementTag> {
        match self.kind(id) {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// The tag of `id`, if it is an element carrying a content-stream tag.
    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).and_then(ElementTag::tag)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match self.kind_mut(id) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// Detach `id` from its parent. Its own children stay attached to it.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `child` into `parent` right before `reference`, or at the end if
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, reference: NodeId, child: NodeId) {
        self.remove(child);
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Put `new` where `old` is in `parent`'s children and detach `old`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        self.insert_before(parent, old, new);
        self.remove(old);
    }

    /// Move all children of `from` to the end of `to`, keeping their order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        while let Some(child) = self.first_child(from) {
            self.append_child(to, child);
        }
    }

    /// Append `text` to `parent`, merging it into a trailing text node if there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.last_child(parent) {
            if let Some(existing) = self.text_mut(last) {
                existing.push_str(text);
                return;
            }
        }
        let node = self.create(NodeKind::Text(text.to_string()));
        self.append_child(parent, node);
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: ElementTag) -> NodeId {
        let node = self.create(NodeKind::Element(tag));
        self.append_child(parent, node);
        node
    }

    pub fn append_anchor(&mut self, parent: NodeId, anchor: Anchor) -> NodeId {
        let node = self.create(NodeKind::Anchor(anchor));
        self.append_child(parent, node);
        node
    }

    /// Nodes reachable from the root, in document order (root excluded).
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root()).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}
