//! Intermediate Representation (IR) for rich-text documents.
//!
//! This module defines the tag vocabulary, the flat content stream and the
//! tree the stream is materialized into while converting to and from HTML.

pub mod events;
pub mod nodes;
pub mod tags;
