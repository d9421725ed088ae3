//! Tag registry for tag lookup and interning
//!
//! Every tag the converter produces goes through a [`TagRegistry`], which hands out
//! one shared [`Tag`] instance per kind/parameter combination. Lookups take a
//! shared lock; only the creation of a tag that does not exist yet serializes.
//!
//! # Examples
//!
//! ```ignore
//! let registry = TagRegistry::new();
//! let a = registry.indent(2, ParType::Bullet);
//! let b = registry.lookup("indent 2 bullet").unwrap();
//! assert!(a.same_instance(&b));
//! ```

use crate::ir::tags::{Justify, Modifier, ParType, Tag, TagKind};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

static GLOBAL: Lazy<TagRegistry> = Lazy::new(TagRegistry::new);

/// Registry of interned tags
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: RwLock<HashMap<TagKind, Tag>>,
}

impl TagRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        TagRegistry {
            tags: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static TagRegistry {
        &GLOBAL
    }

    /// Return the interned tag for `kind`, creating it if needed.
    pub fn intern(&self, kind: TagKind) -> Tag {
        {
            let tags = self.tags.read().unwrap_or_else(|e| e.into_inner());
            if let Some(tag) = tags.get(&kind) {
                return tag.clone();
            }
        }

        let mut tags = self.tags.write().unwrap_or_else(|e| e.into_inner());
        // another thread may have created it between the two locks
        tags.entry(kind.clone())
            .or_insert_with(|| Tag::new(kind))
            .clone()
    }

    /// Resolve a canonical tag name (see [`crate::ir::tags`]).
    pub fn lookup(&self, name: &str) -> Option<Tag> {
        TagKind::parse(name).map(|kind| self.intern(kind))
    }

    /// Number of distinct tags created so far
    pub fn len(&self) -> usize {
        self.tags.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn modifier(&self, modifier: Modifier) -> Tag {
        self.intern(TagKind::Modifier(modifier))
    }

    pub fn family(&self, family: &str) -> Tag {
        self.intern(TagKind::Family(family.to_string()))
    }

    pub fn size(&self, points: u32) -> Tag {
        self.intern(TagKind::Size(points))
    }

    pub fn justify(&self, justify: Justify) -> Tag {
        self.intern(TagKind::Justify(justify))
    }

    pub fn fg_color(&self, color: &str) -> Tag {
        self.intern(TagKind::FgColor(color.to_string()))
    }

    pub fn bg_color(&self, color: &str) -> Tag {
        self.intern(TagKind::BgColor(color.to_string()))
    }

    /// Indent tag for `level`, which must be at least 1.
    pub fn indent(&self, level: u32, par_type: ParType) -> Tag {
        debug_assert!(level >= 1, "indent level 0 is never materialized");
        self.intern(TagKind::Indent { level, par_type })
    }

    pub fn bullet(&self) -> Tag {
        self.intern(TagKind::Bullet)
    }

    pub fn paragraph(&self, par_type: ParType) -> Tag {
        self.intern(TagKind::Paragraph(par_type))
    }
}
