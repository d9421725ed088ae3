//! The vocabulary of style and structure tags.
//!
//! A [`Tag`] is a cheap handle to an interned [`TagKind`]. Tags are created through a
//! [`TagRegistry`](crate::registry::TagRegistry) so that every kind/parameter
//! combination exists once per registry, but they always compare by value.
//!
//! Every kind has a canonical name which parses back to the same kind:
//!
//! | Kind        | Name                          |
//! |-------------|-------------------------------|
//! | Modifier    | `bold`, `italic`, `underline`, `nowrap` |
//! | Family      | `family <name>`               |
//! | Size        | `size <points>`               |
//! | Justify     | `left`, `center`, `right`, `fill` |
//! | FgColor     | `fg_color #rrggbb`            |
//! | BgColor     | `bg_color #rrggbb`            |
//! | Indent      | `indent <level> <partype>`    |
//! | Bullet      | `bullet`                      |
//! | Paragraph   | `p <partype>`                 |
//!
//! where `<partype>` is `none` or `bullet`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Simple font modifications that take no parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Bold,
    Italic,
    Underline,
    NoWrap,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [
        Modifier::Bold,
        Modifier::Italic,
        Modifier::Underline,
        Modifier::NoWrap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Modifier::Bold => "bold",
            Modifier::Italic => "italic",
            Modifier::Underline => "underline",
            Modifier::NoWrap => "nowrap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Paragraph justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Justify {
    Left,
    Center,
    Right,
    Fill,
}

impl Justify {
    pub const ALL: [Justify; 4] = [Justify::Left, Justify::Center, Justify::Right, Justify::Fill];

    pub fn name(self) -> &'static str {
        match self {
            Justify::Left => "left",
            Justify::Center => "center",
            Justify::Right => "right",
            Justify::Fill => "fill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.name() == name)
    }
}

/// The item type of an indented paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParType {
    #[default]
    None,
    Bullet,
}

impl ParType {
    pub fn name(self) -> &'static str {
        match self {
            ParType::None => "none",
            ParType::Bullet => "bullet",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(ParType::None),
            "bullet" => Some(ParType::Bullet),
            _ => None,
        }
    }
}

/// Every kind of tag the content stream can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    Modifier(Modifier),
    Family(String),
    /// Font size in points
    Size(u32),
    Justify(Justify),
    /// Foreground color as `#rrggbb`
    FgColor(String),
    /// Background color as `#rrggbb`
    BgColor(String),
    /// One level of list nesting. `level` is at least 1.
    Indent { level: u32, par_type: ParType },
    /// Marks the display-only bullet glyph of a list item
    Bullet,
    /// A newline-terminated paragraph, only used while writing
    Paragraph(ParType),
}

impl TagKind {
    /// The canonical name of this tag.
    pub fn name(&self) -> String {
        match self {
            TagKind::Modifier(m) => m.name().to_string(),
            TagKind::Family(family) => format!("family {family}"),
            TagKind::Size(size) => format!("size {size}"),
            TagKind::Justify(j) => j.name().to_string(),
            TagKind::FgColor(color) => format!("fg_color {color}"),
            TagKind::BgColor(color) => format!("bg_color {color}"),
            TagKind::Indent { level, par_type } => {
                format!("indent {level} {}", par_type.name())
            }
            TagKind::Bullet => "bullet".to_string(),
            TagKind::Paragraph(par_type) => format!("p {}", par_type.name()),
        }
    }

    /// Parses a canonical tag name.
    pub fn parse(name: &str) -> Option<TagKind> {
        if let Some(m) = Modifier::from_name(name) {
            return Some(TagKind::Modifier(m));
        }
        if let Some(j) = Justify::from_name(name) {
            return Some(TagKind::Justify(j));
        }
        if name == "bullet" {
            return Some(TagKind::Bullet);
        }

        let (head, rest) = name.split_once(' ')?;
        match head {
            "family" if !rest.is_empty() => Some(TagKind::Family(rest.to_string())),
            "size" => rest.parse().ok().map(TagKind::Size),
            "fg_color" if is_color(rest) => Some(TagKind::FgColor(rest.to_string())),
            "bg_color" if is_color(rest) => Some(TagKind::BgColor(rest.to_string())),
            "p" => ParType::from_name(rest).map(TagKind::Paragraph),
            "indent" => {
                let (level, par_type) = rest.split_once(' ')?;
                let level: u32 = level.parse().ok()?;
                if level == 0 {
                    return None;
                }
                Some(TagKind::Indent {
                    level,
                    par_type: ParType::from_name(par_type)?,
                })
            }
            _ => None,
        }
    }
}

/// Whether `color` is a canonical `#rrggbb` color.
pub fn is_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// An interned tag.
#[derive(Clone)]
pub struct Tag(Arc<TagKind>);

impl Tag {
    pub(crate) fn new(kind: TagKind) -> Self {
        Tag(Arc::new(kind))
    }

    pub fn kind(&self) -> &TagKind {
        &self.0
    }

    pub fn name(&self) -> String {
        self.0.name()
    }

    /// Stable tags may be merged and hoisted by normalization without changing meaning.
    pub fn is_stable(&self) -> bool {
        matches!(*self.0, TagKind::Indent { .. } | TagKind::Paragraph(_))
    }

    /// Level and item type, for indent tags.
    pub fn indent(&self) -> Option<(u32, ParType)> {
        match *self.0 {
            TagKind::Indent { level, par_type } => Some((level, par_type)),
            _ => None,
        }
    }

    pub fn is_indent(&self) -> bool {
        self.indent().is_some()
    }

    /// Whether both handles point at the same interned instance.
    pub fn same_instance(&self, other: &Tag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other) || self.0 == other.0
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
