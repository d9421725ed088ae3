//! HTML parsing (HTML → content stream import)
//!
//! Pipeline: HTML text → tokens → reader state machine → raw tree → read fixups →
//! flat events → indent un-nesting → content stream
//!
//! The reader keeps a stack of open HTML tags, each with the insertion point that was
//! current when it opened. Recognized tags create elements and move the insertion
//! point into them; closing a tag pops back to where it opened. Unknown tags are only
//! tracked on the stack, so their content lands in the enclosing element and their
//! close tags still balance.
//!
//! Character data is outside the document until `<body>` opens, unless reading a
//! fragment (`partial`).

use crate::common::indent::unnest_indent_tags;
use crate::common::nested_to_flat::dom_to_events;
use crate::error::FormatError;
use crate::formats::html::rewrite::process_dom_read;
use crate::formats::html::style::{parse_list_style, parse_style};
use crate::formats::html::tokenizer::{char_ref_value, Token, Tokenizer};
use crate::ir::events::ContentEvent;
use crate::ir::nodes::{Anchor, Dom, ElementTag, Image, NodeId};
use crate::ir::tags::Modifier;
use crate::registry::TagRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;

static COLLAPSE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\n ]+").expect("valid regex for collapsing whitespace"));
static LEADING_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new("^\n[\n ]*").expect("valid regex for leading newlines"));

fn html_modifier(name: &str) -> Option<Modifier> {
    match name {
        "b" => Some(Modifier::Bold),
        "i" => Some(Modifier::Italic),
        "u" => Some(Modifier::Underline),
        "nobr" => Some(Modifier::NoWrap),
        _ => None,
    }
}

/// Incremental HTML reader building a raw document tree.
pub struct HtmlReader<'r> {
    registry: &'r TagRegistry,
    tokenizer: Tokenizer,
    dom: Dom,
    ptr: NodeId,
    stack: Vec<(String, NodeId)>,
    within_body: bool,
    partial: bool,
    newline: bool,
}

impl<'r> HtmlReader<'r> {
    pub fn new(registry: &'r TagRegistry, partial: bool) -> Self {
        let dom = Dom::new();
        let ptr = dom.root();
        HtmlReader {
            registry,
            tokenizer: Tokenizer::new(),
            dom,
            ptr,
            stack: Vec::new(),
            within_body: false,
            partial,
            newline: false,
        }
    }

    /// Feed the next chunk of HTML.
    pub fn feed(&mut self, chunk: &str) -> Result<(), FormatError> {
        for token in self.tokenizer.feed(chunk) {
            self.handle(token)?;
        }
        Ok(())
    }

    /// Signal the end of input.
    pub fn finish(&mut self) -> Result<(), FormatError> {
        for token in self.tokenizer.finish()? {
            self.handle(token)?;
        }
        Ok(())
    }

    /// The tree read so far.
    pub fn into_dom(self) -> Dom {
        self.dom
    }

    fn in_document(&self) -> bool {
        self.partial || self.within_body
    }

    fn handle(&mut self, token: Token) -> Result<(), FormatError> {
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                self.start_tag(&name, &attrs)?;
                if self_closing {
                    self.end_tag(&name);
                }
            }
            Token::EndTag(name) => self.end_tag(&name),
            Token::Text(data) => self.data(&data),
            Token::EntityRef(name) => self.entity_ref(&name),
            Token::CharRef(name) => self.char_ref(&name),
        }
        Ok(())
    }

    fn descend(&mut self, tag: ElementTag) {
        self.ptr = self.dom.append_element(self.ptr, tag);
    }

    fn append_text(&mut self, text: &str) {
        self.dom.append_text(self.ptr, text);
    }

    fn start_tag(&mut self, name: &str, attrs: &[(String, String)]) -> Result<(), FormatError> {
        self.newline = false;
        self.stack.push((name.to_string(), self.ptr));

        let style = attrs
            .iter()
            .find(|(key, _)| key == "style")
            .map(|(_, value)| value.as_str());

        match name {
            "html" => {}
            "body" => self.within_body = true,
            "span" | "div" => {
                if let Some(style) = style {
                    for tag in parse_style(style, self.registry)? {
                        self.descend(tag.into());
                    }
                }
            }
            // not produced by the writer, but pasted HTML uses it
            "p" => self.append_text("\n"),
            "br" => {
                self.append_text("\n");
                self.newline = true;
            }
            "hr" => {
                self.append_text("\n");
                self.dom.append_anchor(self.ptr, Anchor::HorizontalRule);
                self.append_text("\n");
            }
            "img" => {
                let image = parse_image(attrs);
                self.dom.append_anchor(self.ptr, Anchor::Image(image));
            }
            "ul" | "ol" => self.descend(ElementTag::List),
            "li" => {
                let par_type = style.map(parse_list_style).unwrap_or_default();
                self.descend(ElementTag::ListItem(par_type));
            }
            other => match html_modifier(other) {
                Some(modifier) => self.descend(self.registry.modifier(modifier).into()),
                None => log::trace!("ignoring <{other}>"),
            },
        }
        Ok(())
    }

    fn end_tag(&mut self, name: &str) {
        if !self.partial && (name == "html" || name == "body" || !self.within_body) {
            return;
        }

        if name != "br" {
            self.newline = false;
        }
        match name {
            "ul" | "ol" | "li" => self.newline = true,
            "p" => self.append_text("\n"),
            _ => {}
        }

        match self.stack.iter().rposition(|(open, _)| open == name) {
            Some(index) => {
                self.ptr = self.stack[index].1;
                self.stack.truncate(index);
            }
            None => log::trace!("ignoring </{name}> which is not open"),
        }
    }

    fn data(&mut self, data: &str) {
        if !self.in_document() {
            return;
        }
        let data = if self.newline {
            self.newline = false;
            LEADING_NEWLINES.replace(data, "")
        } else {
            data.into()
        };
        let data = COLLAPSE_WHITESPACE.replace_all(&data, " ");
        self.append_text(&data);
    }

    fn entity_ref(&mut self, name: &str) {
        if !self.in_document() {
            return;
        }
        let text = match name {
            "amp" => "&",
            "gt" => ">",
            "lt" => "<",
            "nbsp" => " ",
            other => {
                log::trace!("ignoring entity &{other};");
                ""
            }
        };
        self.append_text(text);
    }

    fn char_ref(&mut self, name: &str) {
        if !self.in_document() {
            return;
        }
        if char_ref_value(name) == Some(9) {
            self.append_text("\t");
        } else {
            log::trace!("ignoring character reference &#{name};");
        }
    }
}

/// Build an image anchor from `img` attributes. Sizes that are not numbers are ignored.
fn parse_image(attrs: &[(String, String)]) -> Image {
    let mut image = Image::default();
    let (mut width, mut height) = (None, None);

    for (key, value) in attrs {
        match key.as_str() {
            "src" => image.set_filename(value.as_str()),
            "width" => width = value.trim().parse().ok(),
            "height" => height = value.trim().parse().ok(),
            _ => {}
        }
    }

    image.scale(width, height);
    image
}

fn feed_lines<R: BufRead>(input: &mut R, reader: &mut HtmlReader<'_>) -> Result<(), FormatError> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        reader.feed(&line)?;
    }
    reader.finish()
}

/// Read HTML into a content stream using the given tag registry.
///
/// With `ignore_errors`, a parse or I/O error stops reading but the part read so far is
/// still converted and returned.
pub fn read_with_registry<R: BufRead>(
    mut input: R,
    registry: &TagRegistry,
    partial: bool,
    ignore_errors: bool,
) -> Result<Vec<ContentEvent>, FormatError> {
    let mut reader = HtmlReader::new(registry, partial);

    if let Err(err) = feed_lines(&mut input, &mut reader) {
        if !ignore_errors {
            return Err(err);
        }
        log::warn!("ignoring error while reading HTML: {err}");
    }

    let mut dom = reader.into_dom();
    process_dom_read(&mut dom);

    let events = dom_to_events(&dom);
    log::debug!("read {} tree events from HTML", events.len());
    Ok(unnest_indent_tags(events, registry).collect())
}

/// Read HTML into a content stream using the global tag registry.
pub fn read<R: BufRead>(
    input: R,
    partial: bool,
    ignore_errors: bool,
) -> Result<Vec<ContentEvent>, FormatError> {
    read_with_registry(input, TagRegistry::global(), partial, ignore_errors)
}

/// Read an HTML string into a content stream using the global tag registry.
pub fn read_str(
    input: &str,
    partial: bool,
    ignore_errors: bool,
) -> Result<Vec<ContentEvent>, FormatError> {
    read(input.as_bytes(), partial, ignore_errors)
}
