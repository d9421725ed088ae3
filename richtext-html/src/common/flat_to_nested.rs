//! Converts a flat event stream into a document tree.
//!
//! # The High-Level Concept
//!
//! The core challenge is to reconstruct a tree structure from a linear sequence of events.
//! The algorithm uses a stack to keep track of the current nesting level. The stack acts as
//! a memory of "open" elements. When we encounter a `Begin` event we create an element
//! under the current container and push it, making it the new current container. When we
//! see its matching `End` event, we pop it off, returning to the parent.
//!
//! The stream must already nest like a stack; the write pipeline guarantees this by
//! running tag normalization first (see `common::normalize`).
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - Create an empty `Dom` (only the synthetic root)
//!    - Push the root onto the stack as the current container
//!
//! 2. **Processing `Begin` Events:**
//!    - Create an element node for the tag
//!    - Append it to the current container (top of stack)
//!    - Push it onto the stack
//!
//! 3. **Processing Content Events:**
//!    - Text is appended to the current container, merged into a trailing text node
//!    - Anchors become leaf nodes
//!    - The stack is not modified (content is a leaf)
//!
//! 4. **Processing `End` Events:**
//!    - Pop the element off the stack
//!    - Validate that the popped element matches the `End` event
//!
//! 5. **Completion:**
//!    - The stack must contain only the root

use crate::error::FormatError;
use crate::ir::events::Event;
use crate::ir::nodes::{Dom, ElementTag, NodeId, NodeKind};
use thiserror::Error;

/// Error type for flat-to-nested conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// An `End` event arrived with no open element
    #[error("Unexpected end event: {0}")]
    UnexpectedEnd(String),
    /// Mismatched begin/end events
    #[error("Mismatched events: expected {expected}, found {found}")]
    MismatchedEvents { expected: String, found: String },
    /// Stack not empty at end (unclosed elements)
    #[error("Unclosed elements: {0} nodes remain on stack")]
    UnclosedElements(usize),
}

impl From<ConversionError> for FormatError {
    fn from(err: ConversionError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

/// Materializes a properly nested event stream into a [`Dom`].
pub fn events_to_dom<T, I>(events: I) -> Result<Dom, ConversionError>
where
    T: Into<ElementTag>,
    I: IntoIterator<Item = Event<T>>,
{
    let mut dom = Dom::new();
    let mut stack: Vec<NodeId> = vec![dom.root()];

    for event in events {
        // the root is never popped, so the stack always has a top
        let current = stack[stack.len() - 1];
        match event {
            Event::Text(text) => dom.append_text(current, &text),
            Event::Anchor(anchor) => {
                dom.append_anchor(current, anchor);
            }
            Event::Begin(tag) => {
                let element = dom.append_element(current, tag.into());
                stack.push(element);
            }
            Event::End(tag) => {
                let tag: ElementTag = tag.into();
                if stack.len() == 1 {
                    return Err(ConversionError::UnexpectedEnd(tag.name()));
                }
                let open = stack.pop().unwrap_or(current);
                match dom.kind(open) {
                    NodeKind::Element(expected) if *expected == tag => {}
                    NodeKind::Element(expected) => {
                        return Err(ConversionError::MismatchedEvents {
                            expected: expected.name(),
                            found: tag.name(),
                        })
                    }
                    _ => return Err(ConversionError::UnexpectedEnd(tag.name())),
                }
            }
        }
    }

    if stack.len() > 1 {
        return Err(ConversionError::UnclosedElements(stack.len() - 1));
    }

    Ok(dom)
}
