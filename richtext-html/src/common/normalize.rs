//! Normalizes begin/end events so that tags nest like a stack.
//!
//! The content stream does not require spans to nest: bold may start inside one
//! paragraph and end in the next. HTML does. This pass rewrites the stream into the
//! minimal properly nested form with the same formatting at every character.
//!
//! # The Algorithm
//!
//! Begin and end events only update the set of *requested* spans. Just before each
//! text or anchor the requested spans are laid out in their target order:
//!
//! - stable tags (indents and paragraphs) first, in the order they began
//! - every other tag after them, in the order it began
//!
//! and compared against the spans currently *emitted*. Emitted spans past the common
//! prefix are closed innermost first, then the missing ones are opened. So a span is
//! only split when something outside it had to close, and spans that open and close
//! without content in between vanish.
//!
//! Each begin starts a distinct span. The exception is an indent span that is closed
//! and re-opened with the same tag: the re-open merges with the emitted span, which
//! removes the spurious close/re-open pairs the indent passes produce. Paragraph spans
//! never merge, each one becomes its own list item.

use crate::ir::events::{ContentEvent, Event};
use crate::ir::tags::Tag;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Span {
    id: u64,
    tag: Tag,
}

impl Span {
    fn same_span(&self, other: &Span) -> bool {
        self.id == other.id || (self.tag.is_indent() && self.tag == other.tag)
    }
}

/// Iterator adapter produced by [`normalize_tags`].
pub struct NormalizeTags<I> {
    input: I,
    out: VecDeque<ContentEvent>,
    requested: Vec<Span>,
    emitted: Vec<Span>,
    next_id: u64,
    finished: bool,
}

/// Normalize `events` into properly nested, minimal form.
pub fn normalize_tags<I>(events: I) -> NormalizeTags<I::IntoIter>
where
    I: IntoIterator<Item = ContentEvent>,
{
    NormalizeTags {
        input: events.into_iter(),
        out: VecDeque::new(),
        requested: Vec::new(),
        emitted: Vec::new(),
        next_id: 0,
        finished: false,
    }
}

impl<I> NormalizeTags<I> {
    fn target(&self) -> Vec<Span> {
        let stable = self.requested.iter().filter(|s| s.tag.is_stable());
        let other = self.requested.iter().filter(|s| !s.tag.is_stable());
        stable.chain(other).cloned().collect()
    }

    fn sync(&mut self) {
        let target = self.target();

        let mut common = 0;
        while common < self.emitted.len()
            && common < target.len()
            && self.emitted[common].same_span(&target[common])
        {
            // an emitted span merged with a re-open now stands for the new span
            self.emitted[common].id = target[common].id;
            common += 1;
        }

        while self.emitted.len() > common {
            if let Some(span) = self.emitted.pop() {
                self.out.push_back(Event::End(span.tag));
            }
        }
        for span in &target[common..] {
            self.out.push_back(Event::Begin(span.tag.clone()));
            self.emitted.push(span.clone());
        }
    }

    fn close_all(&mut self) {
        while let Some(span) = self.emitted.pop() {
            self.out.push_back(Event::End(span.tag));
        }
    }

    fn process(&mut self, event: ContentEvent) {
        match event {
            Event::Begin(tag) => {
                self.requested.push(Span {
                    id: self.next_id,
                    tag,
                });
                self.next_id += 1;
            }
            Event::End(tag) => match self.requested.iter().rposition(|s| s.tag == tag) {
                Some(index) => {
                    self.requested.remove(index);
                }
                None => log::warn!("dropping end of '{tag}' which was never opened"),
            },
            content => {
                self.sync();
                self.out.push_back(content);
            }
        }
    }
}

impl<I: Iterator<Item = ContentEvent>> Iterator for NormalizeTags<I> {
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
                    self.close_all();
                }
            }
        }
    }
}
