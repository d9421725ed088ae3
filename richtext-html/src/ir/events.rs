//! Defines the flat event stream representation of a document.

use crate::ir::nodes::{Anchor, ElementTag};
use crate::ir::tags::Tag;

/// Represents a single event in the document stream.
///
/// The stream is the linear (un-nested) form of a document: text and anchors are
/// leaves, `Begin`/`End` bracket the spans a tag applies to. The tag parameter is
/// [`Tag`] for the content stream exchanged with callers and [`ElementTag`] for the
/// stream read off the HTML tree before list structure is un-nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T = Tag> {
    Text(String),
    Anchor(Anchor),
    Begin(T),
    End(T),
}

/// The canonical content stream event.
pub type ContentEvent = Event<Tag>;

impl<T> Event<T> {
    /// Text and anchors are content; begin/end events are markup.
    pub fn is_content(&self) -> bool {
        matches!(self, Event::Text(_) | Event::Anchor(_))
    }

    pub fn map_tag<U>(self, f: impl FnOnce(T) -> U) -> Event<U> {
        match self {
            Event::Text(text) => Event::Text(text),
            Event::Anchor(anchor) => Event::Anchor(anchor),
            Event::Begin(tag) => Event::Begin(f(tag)),
            Event::End(tag) => Event::End(f(tag)),
        }
    }
}

impl From<Event<Tag>> for Event<ElementTag> {
    fn from(event: Event<Tag>) -> Self {
        event.map_tag(ElementTag::Tag)
    }
}

/// Concatenates the text of a stream, ignoring markup and anchors.
pub fn plain_text<'a, T: 'a>(events: impl IntoIterator<Item = &'a Event<T>>) -> String {
    events
        .into_iter()
        .filter_map(|event| match event {
            Event::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
