//! Format implementations
//!
//! This module contains the format implementations that convert between the content
//! stream and text representations.

pub mod html;

pub use html::{HtmlFormat, HtmlOptions};
