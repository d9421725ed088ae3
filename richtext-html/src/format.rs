//! Format trait definition
//!
//! This module defines the Format trait that serialization formats implement. It gives
//! callers one interface for turning text into a content stream and back.

use crate::error::FormatError;
use crate::ir::events::ContentEvent;

/// Trait for content stream formats
///
/// Implementors provide conversion between a string representation and the content
/// stream. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct PlainText;
///
/// impl Format for PlainText {
///     fn name(&self) -> &str {
///         "text"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Vec<ContentEvent>, FormatError> {
///         Ok(vec![Event::Text(source.to_string())])
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → content stream)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (content stream → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a content stream
    fn parse(&self, _source: &str) -> Result<Vec<ContentEvent>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a content stream into source text
    fn serialize(&self, _events: &[ContentEvent]) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
