//! Conversion between flat indent tags and nested lists.
//!
//! In the content stream every indented paragraph carries one indent tag holding its
//! level, so consecutive paragraphs at levels 1, 2, 1 are three sibling spans. HTML
//! lists nest instead: a level 2 list lives inside the level 1 list.
//!
//! # Nesting (write path)
//!
//! [`nest_indent_tags`] keeps the current depth `d`. A `Begin(Indent(n))` opens
//! levels `d+1..=n`. An `End(Indent(n))` is deferred, because only the next event
//! tells what to do:
//!
//! - text or an anchor: the indented block is over, close down to 0
//! - `Begin(Indent(m))` with `m < d`: close down to `m` and keep going
//! - anything else: keep waiting
//!
//! Remaining levels are closed at the end of the stream. The synthesized tags are the
//! registry's `indent <level> none` tags; item types travel on the paragraphs.
//!
//! # Un-nesting (read path)
//!
//! [`unnest_indent_tags`] walks the stream read off the HTML tree. List containers
//! only change the depth. Each list item becomes an `indent <depth> <type>` span,
//! interrupting the enclosing item's span while it is open and resuming it after.
//! Bullet items also get a bullet glyph span, which is display-only and dropped again
//! by the writer.

use crate::ir::events::{ContentEvent, Event};
use crate::ir::nodes::ElementTag;
use crate::ir::tags::{ParType, Tag};
use crate::registry::TagRegistry;
use std::collections::VecDeque;

/// The glyph a bullet item starts with.
pub const BULLET_STR: &str = "\u{2022} ";

/// Iterator adapter produced by [`nest_indent_tags`].
pub struct NestIndents<'r, I> {
    input: I,
    registry: &'r TagRegistry,
    out: VecDeque<ContentEvent>,
    indent: u32,
    closing: bool,
    finished: bool,
}

/// Convert indent tags so that they nest like HTML lists.
pub fn nest_indent_tags<I>(events: I, registry: &TagRegistry) -> NestIndents<'_, I::IntoIter>
where
    I: IntoIterator<Item = ContentEvent>,
{
    NestIndents {
        input: events.into_iter(),
        registry,
        out: VecDeque::new(),
        indent: 0,
        closing: false,
        finished: false,
    }
}

impl<I> NestIndents<'_, I> {
    fn close_to(&mut self, level: u32) {
        while self.indent > level {
            self.out
                .push_back(Event::End(self.registry.indent(self.indent, ParType::None)));
            self.indent -= 1;
        }
    }

    fn process(&mut self, event: ContentEvent) {
        if self.closing {
            match &event {
                Event::Text(_) | Event::Anchor(_) => {
                    self.close_to(0);
                    self.closing = false;
                }
                Event::Begin(tag) => {
                    if let Some((level, _)) = tag.indent() {
                        self.close_to(level);
                        self.closing = false;
                    }
                }
                Event::End(_) => {}
            }
        }

        match event {
            Event::Begin(tag) if tag.is_indent() => {
                let (level, _) = tag.indent().unwrap_or((0, ParType::None));
                debug_assert!(
                    level >= self.indent,
                    "indent {level} opened below open depth {}",
                    self.indent
                );
                while self.indent < level {
                    self.indent += 1;
                    self.out
                        .push_back(Event::Begin(self.registry.indent(self.indent, ParType::None)));
                }
            }
            Event::End(tag) if tag.is_indent() => {
                self.closing = true;
            }
            other => self.out.push_back(other),
        }
    }
}

impl<I: Iterator<Item = ContentEvent>> Iterator for NestIndents<'_, I> {
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
                    self.close_to(0);
                }
            }
        }
    }
}

/// Iterator adapter produced by [`unnest_indent_tags`].
pub struct UnnestIndents<'r, I> {
    input: I,
    registry: &'r TagRegistry,
    out: VecDeque<ContentEvent>,
    indent: u32,
    items: Vec<Tag>,
}

/// Convert list structure read from HTML back into flat indent tags.
pub fn unnest_indent_tags<I>(events: I, registry: &TagRegistry) -> UnnestIndents<'_, I::IntoIter>
where
    I: IntoIterator<Item = Event<ElementTag>>,
{
    UnnestIndents {
        input: events.into_iter(),
        registry,
        out: VecDeque::new(),
        indent: 0,
        items: Vec::new(),
    }
}

impl<I> UnnestIndents<'_, I> {
    fn process(&mut self, event: Event<ElementTag>) {
        match event {
            Event::Begin(ElementTag::List) => self.indent += 1,
            Event::End(ElementTag::List) => self.indent = self.indent.saturating_sub(1),
            Event::Begin(ElementTag::ListItem(par_type)) => {
                // interrupt the enclosing item
                if let Some(open) = self.items.last() {
                    self.out.push_back(Event::End(open.clone()));
                }

                let tag = self.registry.indent(self.indent.max(1), par_type);
                self.out.push_back(Event::Begin(tag.clone()));
                self.items.push(tag);

                if par_type == ParType::Bullet {
                    let bullet = self.registry.bullet();
                    self.out.push_back(Event::Begin(bullet.clone()));
                    self.out.push_back(Event::Text(BULLET_STR.to_string()));
                    self.out.push_back(Event::End(bullet));
                }
            }
            Event::End(ElementTag::ListItem(_)) => {
                if let Some(tag) = self.items.pop() {
                    self.out.push_back(Event::End(tag));
                    // resume the enclosing item
                    if let Some(open) = self.items.last() {
                        self.out.push_back(Event::Begin(open.clone()));
                    }
                }
            }
            Event::Begin(ElementTag::Tag(tag)) => self.out.push_back(Event::Begin(tag)),
            Event::End(ElementTag::Tag(tag)) => self.out.push_back(Event::End(tag)),
            Event::Text(text) => self.out.push_back(Event::Text(text)),
            Event::Anchor(anchor) => self.out.push_back(Event::Anchor(anchor)),
        }
    }
}

impl<I: Iterator<Item = Event<ElementTag>>> Iterator for UnnestIndents<'_, I> {
    type Item = ContentEvent;

    fn next(&mut self) -> Option<ContentEvent> {
        loop {
            if let Some(event) = self.out.pop_front() {
                return Some(event);
            }
            let event = self.input.next()?;
            self.process(event);
        }
    }
}
