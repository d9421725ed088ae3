//! HTML serialization (content stream → XHTML export)
//!
//! Pipeline: content stream → paragraph wrapping → indent nesting → tag normalization →
//! tree → write rewrites → XHTML string
//!
//! Emission is a depth-first walk. Each element maps to a fixed open/close pair:
//!
//! | Tag                  | HTML                                           |
//! |----------------------|------------------------------------------------|
//! | bold/italic/...      | `<b>` `<i>` `<u>` `<nobr>`                     |
//! | `size N`             | `<span style="font-size: Npt">`                |
//! | `family F`           | `<span style="font-family: F">`                |
//! | `fg_color C`         | `<span style="color: C">`                      |
//! | `bg_color C`         | `<span style="background-color: C">`           |
//! | justification        | `<div style="text-align: V">` (fill → justify) |
//! | indent               | `<ol>` … `</ol>` + newline                     |
//! | list item            | `<li style="list-style-type: disc\|none">` … `</li>` + newline |
//!
//! Paragraph and bullet tags never reach emission after the rewrites; meeting one means
//! the tree was not prepared and is reported as a serialization error.

use crate::common::flat_to_nested::events_to_dom;
use crate::common::indent::nest_indent_tags;
use crate::common::normalize::normalize_tags;
use crate::common::paragraphs::find_paragraphs;
use crate::error::FormatError;
use crate::formats::html::rewrite::prepare_dom_write;
use crate::ir::events::ContentEvent;
use crate::ir::nodes::{Anchor, Dom, ElementTag, NodeId, NodeKind};
use crate::ir::tags::{Justify, Modifier, ParType, Tag, TagKind};
use crate::registry::TagRegistry;
use std::io::Write;

pub const XHTML_HEADER: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<body>";
pub const XHTML_FOOTER: &str = "</body></html>";

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace('\t', "&#09;")
        .replace("  ", " &nbsp;")
        .replace('\n', "<br/>\n")
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn modifier_html(tag: &Tag) -> Option<&'static str> {
    match tag.kind() {
        TagKind::Modifier(modifier) => Some(match modifier {
            Modifier::Bold => "b",
            Modifier::Italic => "i",
            Modifier::Underline => "u",
            Modifier::NoWrap => "nobr",
        }),
        _ => None,
    }
}

struct HtmlWriter<W> {
    out: W,
}

impl<W: Write> HtmlWriter<W> {
    fn write_dom(&mut self, dom: &Dom, node: NodeId) -> Result<(), FormatError> {
        for &child in dom.children(node) {
            match dom.kind(child) {
                NodeKind::Text(text) => self.out.write_all(escape_text(text).as_bytes())?,
                NodeKind::Anchor(anchor) => self.write_anchor(anchor)?,
                NodeKind::Element(tag) => {
                    self.write_begin(tag)?;
                    self.write_dom(dom, child)?;
                    self.write_end(tag)?;
                }
                NodeKind::Root => {
                    return Err(FormatError::SerializationError(
                        "document root found inside the tree".to_string(),
                    ))
                }
            }
        }
        Ok(())
    }

    fn write_anchor(&mut self, anchor: &Anchor) -> Result<(), FormatError> {
        match anchor {
            Anchor::Image(image) => {
                let mut size = String::new();
                let (width, height) = image.size();
                if let Some(width) = width {
                    size.push_str(&format!(" width=\"{width}\""));
                }
                if let Some(height) = height {
                    size.push_str(&format!(" height=\"{height}\""));
                }
                write!(
                    self.out,
                    "<img src=\"{}\"{size} />",
                    escape_attribute(image.filename())
                )?;
            }
            Anchor::HorizontalRule => self.out.write_all(b"<hr/>")?,
        }
        Ok(())
    }

    fn write_begin(&mut self, element: &ElementTag) -> Result<(), FormatError> {
        let tag = match element {
            ElementTag::Tag(tag) => tag,
            ElementTag::ListItem(par_type) => {
                let style = match par_type {
                    ParType::Bullet => "disc",
                    ParType::None => "none",
                };
                write!(self.out, "<li style=\"list-style-type: {style}\">")?;
                return Ok(());
            }
            ElementTag::List => return Err(unknown_tag(element)),
        };

        if let Some(html) = modifier_html(tag) {
            write!(self.out, "<{html}>")?;
            return Ok(());
        }
        match tag.kind() {
            TagKind::Size(size) => write!(self.out, "<span style=\"font-size: {size}pt\">")?,
            TagKind::Justify(justify) => {
                let align = match justify {
                    Justify::Fill => "justify",
                    other => other.name(),
                };
                write!(self.out, "<div style=\"text-align: {align}\">")?
            }
            TagKind::Family(family) => write!(
                self.out,
                "<span style=\"font-family: {}\">",
                escape_attribute(family)
            )?,
            TagKind::FgColor(color) => write!(self.out, "<span style=\"color: {color}\">")?,
            TagKind::BgColor(color) => {
                write!(self.out, "<span style=\"background-color: {color}\">")?
            }
            TagKind::Indent { .. } => self.out.write_all(b"<ol>")?,
            _ => return Err(unknown_tag(element)),
        }
        Ok(())
    }

    fn write_end(&mut self, element: &ElementTag) -> Result<(), FormatError> {
        let tag = match element {
            ElementTag::Tag(tag) => tag,
            ElementTag::ListItem(_) => {
                self.out.write_all(b"</li>\n")?;
                return Ok(());
            }
            ElementTag::List => return Err(unknown_tag(element)),
        };

        if let Some(html) = modifier_html(tag) {
            write!(self.out, "</{html}>")?;
            return Ok(());
        }
        match tag.kind() {
            TagKind::Justify(_) => self.out.write_all(b"</div>")?,
            TagKind::Indent { .. } => self.out.write_all(b"</ol>\n")?,
            TagKind::Size(_) | TagKind::Family(_) | TagKind::FgColor(_) | TagKind::BgColor(_) => {
                self.out.write_all(b"</span>")?
            }
            _ => return Err(unknown_tag(element)),
        }
        Ok(())
    }
}

fn unknown_tag(element: &ElementTag) -> FormatError {
    FormatError::SerializationError(format!("unknown tag '{}'", element.name()))
}

/// Build the tree the writer emits: the normalized stream with the write rewrites applied.
pub fn build_write_dom<I>(events: I, registry: &TagRegistry) -> Result<Dom, FormatError>
where
    I: IntoIterator<Item = ContentEvent>,
{
    let stream = normalize_tags(nest_indent_tags(find_paragraphs(events, registry), registry));
    let mut dom = events_to_dom(stream)?;
    prepare_dom_write(&mut dom);
    log::debug!("prepared {} tree nodes for HTML", dom.descendants().len());
    Ok(dom)
}

/// Write a content stream as XHTML to `out`.
///
/// Without `partial` the output is a complete document wrapped in [`XHTML_HEADER`] and
/// [`XHTML_FOOTER`].
pub fn write<I, W>(events: I, registry: &TagRegistry, partial: bool, out: W) -> Result<(), FormatError>
where
    I: IntoIterator<Item = ContentEvent>,
    W: Write,
{
    let dom = build_write_dom(events, registry)?;
    let mut writer = HtmlWriter { out };

    if !partial {
        writer.out.write_all(XHTML_HEADER.as_bytes())?;
    }
    writer.write_dom(&dom, dom.root())?;
    if !partial {
        writer.out.write_all(XHTML_FOOTER.as_bytes())?;
    }
    writer.out.flush()?;
    Ok(())
}

/// Serialize a content stream to an XHTML string.
pub fn serialize_to_html<I>(
    events: I,
    registry: &TagRegistry,
    partial: bool,
) -> Result<String, FormatError>
where
    I: IntoIterator<Item = ContentEvent>,
{
    let mut out = Vec::new();
    write(events, registry, partial, &mut out)?;
    String::from_utf8(out).map_err(|e| FormatError::SerializationError(e.to_string()))
}
