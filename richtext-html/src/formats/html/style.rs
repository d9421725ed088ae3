//! Parsing of inline `style` attributes.
//!
//! Only the declarations the writer produces are recognized:
//!
//! | Declaration                  | Tag                         |
//! |------------------------------|-----------------------------|
//! | `font-size: 12pt`            | `size 12`                   |
//! | `font-family: Serif`         | `family Serif`              |
//! | `text-align: center`         | `center` (`justify` → `fill`) |
//! | `color: #f00`                | `fg_color #ff0000`          |
//! | `background-color: #00ff00`  | `bg_color #00ff00`          |
//!
//! Anything else is noise from external HTML and is skipped.

use crate::error::FormatError;
use crate::ir::tags::{is_color, Justify, ParType, Tag};
use crate::registry::TagRegistry;

/// Split a style attribute into trimmed `(property, value)` pairs.
/// Declarations without a colon are dropped.
pub fn declarations(style: &str) -> impl Iterator<Item = (String, &str)> {
    style.split(';').filter_map(|statement| {
        let statement = statement.trim();
        if statement.is_empty() {
            return None;
        }
        match statement.split_once(':') {
            Some((property, value)) => Some((property.trim().to_ascii_lowercase(), value.trim())),
            None => {
                log::trace!("ignoring style declaration '{statement}'");
                None
            }
        }
    })
}

/// Expand a CSS hex color to the canonical `#rrggbb` form.
///
/// `#rgb` doubles each digit. Any other form, including named colors, yields `None`.
pub fn expand_color(color: &str) -> Option<String> {
    let color = color.trim();
    let expanded = match color.len() {
        4 if color.starts_with('#') => {
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for c in color[1..].chars() {
                expanded.push(c);
                expanded.push(c);
            }
            expanded
        }
        _ => color.to_string(),
    };
    is_color(&expanded).then_some(expanded)
}

fn justify(value: &str) -> Result<Justify, FormatError> {
    match value {
        "justify" => Ok(Justify::Fill),
        other => Justify::from_name(other)
            .ok_or_else(|| FormatError::ParseError(format!("unknown justification '{other}'"))),
    }
}

/// Parse the tags of a `span` or `div` style, outermost first.
pub fn parse_style(style: &str, registry: &TagRegistry) -> Result<Vec<Tag>, FormatError> {
    let mut tags = Vec::new();

    for (property, value) in declarations(style) {
        let tag = match property.as_str() {
            "font-size" => {
                let digits: String = value.chars().filter(char::is_ascii_digit).collect();
                digits.parse().ok().map(|size| registry.size(size))
            }
            "font-family" if !value.is_empty() => Some(registry.family(value)),
            "text-align" => Some(registry.justify(justify(value)?)),
            "color" => expand_color(value).map(|color| registry.fg_color(&color)),
            "background-color" => expand_color(value).map(|color| registry.bg_color(&color)),
            _ => None,
        };

        match tag {
            Some(tag) => tags.push(tag),
            None => log::trace!("ignoring style declaration '{property}: {value}'"),
        }
    }

    Ok(tags)
}

/// The item type of a list item style: `list-style-type: disc` is a bullet item.
pub fn parse_list_style(style: &str) -> ParType {
    let bullet = declarations(style)
        .any(|(property, value)| property == "list-style-type" && value == "disc");
    if bullet {
        ParType::Bullet
    } else {
        ParType::None
    }
}
