//! HTML format implementation
//!
//! This module implements bidirectional conversion between the content stream and
//! XHTML.
//!
//! # Element Mapping Table
//!
//! | Content stream          | HTML written                                   | HTML read                              |
//! |-------------------------|------------------------------------------------|----------------------------------------|
//! | text                    | escaped text, newline → `<br/>`                | character data, whitespace collapsed   |
//! | bold/italic/underline/nowrap | `<b>` `<i>` `<u>` `<nobr>`                | same                                   |
//! | size/family/colors      | `<span style="...">`                           | `span`/`div` style declarations        |
//! | justification           | `<div style="text-align: ...">`                | same, `justify` → fill                 |
//! | indent levels           | nested `<ol>`/`<li>`                           | `ol`/`ul`/`li`                         |
//! | bullet paragraphs       | `<li style="list-style-type: disc">`           | same, plus a bullet glyph span         |
//! | horizontal rule         | `<hr/>`                                        | `hr`                                   |
//! | image                   | `<img src=".." width=".." height=".." />`      | `img`                                  |
//! | -                       | -                                              | `<p>` and `</p>` read as newlines      |
//!
//! # Lossy Conversions
//!
//! The following conversions may lose information on round-trip:
//! - Spaces at the start of a line after `<br/>` are dropped on read
//! - Runs of spaces and newlines in character data collapse to one space
//! - Bullet glyphs are not written; the reader recreates them for bullet items
//! - Empty spans disappear
//!
//! # Architecture Notes
//!
//! Both directions go through the shared stream transforms and the document tree in
//! `crate::common`. The HTML specific parts are the tokenizer, the reader state
//! machine, the tree rewrites and the emitter.

pub mod parser;
pub mod rewrite;
pub mod serializer;
pub mod style;
pub mod tokenizer;

pub use parser::{read, read_str, read_with_registry, HtmlReader};
pub use serializer::{serialize_to_html, write, XHTML_FOOTER, XHTML_HEADER};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::events::ContentEvent;
use crate::registry::TagRegistry;

/// Options for reading and writing HTML
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Treat input as a fragment and write output without the document header and footer
    pub partial: bool,
    /// Return what was read before a parse error instead of the error
    pub ignore_errors: bool,
}

impl HtmlOptions {
    pub fn new(partial: bool, ignore_errors: bool) -> Self {
        Self {
            partial,
            ignore_errors,
        }
    }

    pub fn partial() -> Self {
        Self::new(true, false)
    }
}

/// Format implementation for HTML
pub struct HtmlFormat<'r> {
    options: HtmlOptions,
    registry: &'r TagRegistry,
}

impl Default for HtmlFormat<'static> {
    fn default() -> Self {
        Self::new(HtmlOptions::default())
    }
}

impl HtmlFormat<'static> {
    /// Create a new HTML format using the global tag registry
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            registry: TagRegistry::global(),
        }
    }
}

impl<'r> HtmlFormat<'r> {
    /// Use `registry` instead of the global tag registry
    pub fn with_registry(self, registry: &TagRegistry) -> HtmlFormat<'_> {
        HtmlFormat {
            options: self.options,
            registry,
        }
    }

    pub fn options(&self) -> HtmlOptions {
        self.options
    }

    pub fn registry(&self) -> &'r TagRegistry {
        self.registry
    }
}

impl Format for HtmlFormat<'_> {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "XHTML 1.0 Transitional rich text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<ContentEvent>, FormatError> {
        read_with_registry(
            source.as_bytes(),
            self.registry(),
            self.options.partial,
            self.options.ignore_errors,
        )
    }

    fn serialize(&self, events: &[ContentEvent]) -> Result<String, FormatError> {
        serialize_to_html(events.to_vec(), self.registry(), self.options.partial)
    }
}
