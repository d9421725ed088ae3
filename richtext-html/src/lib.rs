//! Rich text ↔ XHTML conversion
//!
//!     This crate converts between a rich-text content stream (styled text, embedded
//!     images and rules, per-paragraph indent levels) and XHTML.
//!
//!     TLDR: For callers:
//!         - The content stream is a flat sequence of events: text, anchors, and begin/end of tags.
//!         - Tags are interned through a TagRegistry; use the global one unless you need isolation.
//!         - read()/read_str() turn HTML into a stream, write()/serialize_to_html() go the other way.
//!         - HtmlFormat wraps both behind the Format trait, configured by HtmlOptions.
//!
//! Architecture
//!
//!     The content stream does not nest: a bold span may cross paragraphs, and each indented
//!     paragraph carries one flat indent tag for its level. HTML nests: spans must close in
//!     order, and a level 2 list lives inside the level 1 list. All the work is moving between
//!     these two shapes, and it is split into format agnostic stream transforms (./common) over
//!     the IR (./ir), plus the HTML specific reader and writer (./formats/html).
//!
//!     This is a pure lib. No code should suppose a shell environment, be it to std print, env
//!     vars etc. Logging goes through the `log` facade and the library never installs a logger.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # TagRegistry, tag interning
//!     ├── formats
//!     │   └── html
//!     │       ├── tokenizer.rs    # Incremental HTML tokenizer
//!     │       ├── style.rs        # Inline style declarations
//!     │       ├── parser.rs       # Reader state machine and read pipeline
//!     │       ├── rewrite.rs      # Tree rewrites around reading and writing
//!     │       ├── serializer.rs   # Write pipeline and emission
//!     │       └── mod.rs
//!     ├── lib.rs
//!     ├── ir                      # Tags, events and the document tree
//!     └── common                  # Stream transforms, tree building and flattening
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common
//!     └── html
//!         ├── import.rs
//!         ├── export.rs
//!         └── roundtrip.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     Writing: paragraph wrapping (./common/paragraphs.rs) → indent nesting
//!     (./common/indent.rs) → tag normalization (./common/normalize.rs) → tree
//!     (./common/flat_to_nested.rs) → list rewrites → emission.
//!
//!     Reading: tokens → reader state machine → tree → implied newlines → flat events
//!     (./common/nested_to_flat.rs) → indent un-nesting.
//!
//!     Read and write are not symmetric: `<p>` is read as a newline but
//!     never written, and bullet glyphs are recreated on read but never written.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod ir;

pub use error::FormatError;
pub use format::Format;
pub use formats::html::{read, read_str, read_with_registry, serialize_to_html, write};
pub use formats::{HtmlFormat, HtmlOptions};
pub use ir::events::{ContentEvent, Event};
pub use ir::nodes::{Anchor, Image};
pub use ir::tags::{Justify, Modifier, ParType, Tag, TagKind};
pub use registry::TagRegistry;
