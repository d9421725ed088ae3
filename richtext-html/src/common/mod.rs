//! Contains logic for mapping between different document representations.
//!
//! The stream transforms (`paragraphs`, `indent`, `normalize`) are lazy iterator
//! adapters over the content stream. `flat_to_nested` and `nested_to_flat` move
//! between a properly nested stream and the document tree.

pub mod flat_to_nested;
pub mod indent;
pub mod nested_to_flat;
pub mod normalize;
pub mod paragraphs;
