//! Wraps each paragraph of a content stream in a pair of paragraph tags.
//!
//! A paragraph is a maximal run of text terminated by a newline. Text is split at
//! every newline; the newline stays with the paragraph it ends. A trailing piece
//! without a newline stays open until the next text or anchor, or until the stream
//! ends. Anchors outside of an open paragraph open one.
//!
//! Begin/end events are held back and released just before the next text or anchor
//! (or after the last paragraph closes at the end of the stream). This places the
//! close of a paragraph before the close of the tags that were applied around its
//! text, which is what later lets indents nest around whole paragraphs.
//!
//! The kind of each paragraph follows the item type of the most recently seen indent
//! begin, so paragraphs inside bullet indents become bullet paragraphs.

use crate::ir::events::{ContentEvent, Event};
use crate::ir::tags::{ParType, Tag};
use crate::registry::TagRegistry;
use std::collections::VecDeque;

/// Iterator adapter produced by [`find_paragraphs`].
pub struct FindParagraphs<'r, I> {
    input: I,
    registry: &'r TagRegistry,
    out: VecDeque<ContentEvent>,
    others: Vec<ContentEvent>,
    open: Option<Tag>,
    par_type: ParType,
    finished: bool,
}

/// Wrap the paragraphs of `events` in paragraph tags from `registry`.
pub fn find_paragraphs<I>(events: I, registry: &TagRegistry) -> FindParagraphs<'_, I::IntoIter>
where
    I: IntoIterator<Item = ContentEvent>,
{
    FindParagraphs {
        input: events.into_iter(),
        registry,
        out: VecDeque::new(),
        others: Vec::new(),
        open: None,
        par_type: ParType::None,
        finished: false,
    }
}

impl<I: Iterator<Item = ContentEvent>> FindParagraphs<'_, I> {
    fn flush_others(&mut self) {
        self.out.extend(self.others.drain(..));
    }

    fn begin_paragraph(&mut self) {
        if self.open.is_none() {
            let tag = self.registry.paragraph(self.par_type);
            self.out.push_back(Event::Begin(tag.clone()));
            self.open = Some(tag);
        }
    }

    fn end_paragraph(&mut self) {
        if let Some(tag) = self.open.take() {
            self.out.push_back(Event::End(tag));
        }
    }

    fn process(&mut self, event: ContentEvent) {
        match event {
            Event::Text(text) => {
                if text.is_empty() {
                    return;
                }
                self.flush_others();

                let mut start = 0;
                for (i, c) in text.char_indices() {
                    self.begin_paragraph();
                    if c == '\n' {
                        self.out.push_back(Event::Text(text[start..=i].to_string()));
                        self.end_paragraph();
                        start = i + 1;
                    }
                }
                if start < text.len() {
                    self.begin_paragraph();
                    self.out.push_back(Event::Text(text[start..].to_string()));
                }
            }
            Event::Anchor(anchor) => {
                self.flush_others();
                self.begin_paragraph();
                self.out.push_back(Event::Anchor(anchor));
            }
            other => {
                if let Event::Begin(tag) = &other {
                    if let Some((_, par_type)) = tag.indent() {
                        self.par_type = par_type;
                    }
                }
                self.others.push(other);
            }
        }
    }
}

impl<I: Iterator<Item = ContentEvent>> Iterator for FindParagraphs<'_, I> {
    type Item = ContentEvent;

    fn next(&mut self) -> Option<ContentEvent> {
        loop {
            if let Some(event) = self.out.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }
            match self.input.next() {
                Some(event) => self.process(event),
                None => {
                    self.finished = true;
                    self.end_paragraph();
                    self.flush_others();
                }
            }
        }
    }
}
