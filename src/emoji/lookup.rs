//! Lookup providers: where the scanner asks "is this an emoji?".
//!
//! [`EmojiTable`] answers from the static data. [`Overrides`] layers a small
//! caller-supplied set of entries on top of a table, including entries that
//! build arbitrary elements instead of the standard annotation.

use std::collections::HashMap;
use std::fmt;

use super::table::{
    Emoji, EmojiTable, longest_prefix, optional_selector_form, validate_shortcode,
};
use crate::dom::{Attribute, Dom, NodeId, html_name};
use crate::error::Result;

/// Builds a replacement element for matched text (including colons for
/// shortcode matches). The returned node must be detached.
pub type CustomFn = dyn Fn(&mut Dom, &str) -> Result<NodeId> + Send + Sync;

/// What a match is replaced with.
#[derive(Clone, Copy)]
pub enum Replacement<'a> {
    /// The standard annotation element for a table record.
    Emoji(&'a Emoji),
    /// A caller-built element.
    Custom {
        shortcode: &'a str,
        build: &'a CustomFn,
    },
}

impl Replacement<'_> {
    /// Build the replacement node for `matched` text.
    pub fn build(&self, dom: &mut Dom, matched: &str) -> Result<NodeId> {
        match self {
            Replacement::Emoji(emoji) => Ok(annotation(dom, emoji)),
            Replacement::Custom { build, .. } => build(dom, matched),
        }
    }

    /// Shortcode the replacement is registered under.
    pub fn shortcode(&self) -> &str {
        match self {
            Replacement::Emoji(emoji) => emoji.shortcode(),
            Replacement::Custom { shortcode, .. } => shortcode,
        }
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Emoji(emoji) => f.debug_tuple("Emoji").field(emoji).finish(),
            Replacement::Custom { shortcode, .. } => f
                .debug_struct("Custom")
                .field("shortcode", shortcode)
                .finish_non_exhaustive(),
        }
    }
}

/// Build `<abbr class="emoji" title="{title}">{glyph}</abbr>`, detached.
pub fn annotation(dom: &mut Dom, emoji: &Emoji) -> NodeId {
    let abbr = dom.create_element(
        html_name("abbr"),
        vec![
            Attribute::new("class", "emoji"),
            Attribute::new("title", emoji.title()),
        ],
    );
    let glyph = dom.create_text(emoji.glyph());
    dom.append(abbr, glyph);
    abbr
}

/// Source of emoji matches for the scanner.
pub trait Lookup {
    /// Resolve a shortcode given without its colons.
    fn by_shortcode(&self, shortcode: &str) -> Option<Replacement<'_>>;

    /// Longest glyph sequence starting at byte offset `pos` of `text`,
    /// with its length in bytes.
    fn by_glyph(&self, text: &str, pos: usize) -> Option<(Replacement<'_>, usize)>;
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn by_shortcode(&self, shortcode: &str) -> Option<Replacement<'_>> {
        (**self).by_shortcode(shortcode)
    }

    fn by_glyph(&self, text: &str, pos: usize) -> Option<(Replacement<'_>, usize)> {
        (**self).by_glyph(text, pos)
    }
}

impl Lookup for EmojiTable {
    fn by_shortcode(&self, shortcode: &str) -> Option<Replacement<'_>> {
        self.get(shortcode).map(Replacement::Emoji)
    }

    fn by_glyph(&self, text: &str, pos: usize) -> Option<(Replacement<'_>, usize)> {
        self.longest_glyph_at(text, pos)
            .map(|(emoji, len)| (Replacement::Emoji(emoji), len))
    }
}

enum Override {
    Emoji(Emoji),
    Custom(Box<CustomFn>),
}

/// Caller entries consulted before a fallback table.
///
/// With no entries this behaves exactly like the table it wraps.
///
/// ```
/// use emojify::{Attribute, EmojiTable, Overrides, html_name};
///
/// let overrides = Overrides::new(EmojiTable::bundled()).with_custom("wtf", |dom, _| {
///     Ok(dom.create_element(html_name("img"), vec![Attribute::new("src", "/wtf.gif")]))
/// });
/// assert_eq!(overrides.len(), 1);
/// ```
pub struct Overrides<'t> {
    table: &'t EmojiTable,
    entries: HashMap<String, Override>,
    /// Glyphs of every plain-record entry, with and without an optional
    /// presentation selector, to its shortcode.
    glyphs: HashMap<String, String>,
    max_glyph_chars: usize,
}

impl<'t> Overrides<'t> {
    pub fn new(table: &'t EmojiTable) -> Self {
        Self {
            table,
            entries: HashMap::new(),
            glyphs: HashMap::new(),
            max_glyph_chars: 0,
        }
    }

    /// Register a plain record under its shortcode. It is matched both by
    /// shortcode and by glyph, ahead of the table.
    ///
    /// Shortcodes the table would reject (empty, or containing `:` or
    /// whitespace) are skipped with a warning, as is an empty glyph.
    pub fn with_emoji(mut self, emoji: Emoji) -> Self {
        let shortcode = emoji.shortcode().to_string();
        if !Self::accepts(&shortcode) {
            return self;
        }
        if emoji.glyph().is_empty() {
            log::warn!("ignoring override :{shortcode}: with an empty glyph");
            return self;
        }
        self.forget_glyphs(&shortcode);
        let glyphs = std::iter::once(emoji.glyph()).chain(optional_selector_form(emoji.glyph()));
        for glyph in glyphs {
            self.max_glyph_chars = self.max_glyph_chars.max(glyph.chars().count());
            self.glyphs.insert(glyph.to_string(), shortcode.clone());
        }
        self.entries.insert(shortcode, Override::Emoji(emoji));
        self
    }

    /// Register a custom element builder for a shortcode (without colons).
    ///
    /// Shortcodes the table would reject are skipped with a warning.
    pub fn with_custom<F>(mut self, shortcode: impl Into<String>, build: F) -> Self
    where
        F: Fn(&mut Dom, &str) -> Result<NodeId> + Send + Sync + 'static,
    {
        let shortcode = shortcode.into();
        if !Self::accepts(&shortcode) {
            return self;
        }
        self.forget_glyphs(&shortcode);
        self.entries
            .insert(shortcode, Override::Custom(Box::new(build)));
        self
    }

    fn accepts(shortcode: &str) -> bool {
        match validate_shortcode(shortcode) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("ignoring override: {e}");
                false
            }
        }
    }

    fn forget_glyphs(&mut self, shortcode: &str) {
        self.glyphs.retain(|_, owner| owner.as_str() != shortcode);
    }

    /// The fallback table.
    pub fn table(&self) -> &'t EmojiTable {
        self.table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry<'a>(&'a self, shortcode: &'a str) -> Option<Replacement<'a>> {
        self.entries.get(shortcode).map(|entry| match entry {
            Override::Emoji(emoji) => Replacement::Emoji(emoji),
            Override::Custom(build) => Replacement::Custom {
                shortcode,
                build: build.as_ref(),
            },
        })
    }
}

impl Lookup for Overrides<'_> {
    fn by_shortcode(&self, shortcode: &str) -> Option<Replacement<'_>> {
        match self.entries.get_key_value(shortcode) {
            Some((key, _)) => self.entry(key),
            None => self.table.by_shortcode(shortcode),
        }
    }

    fn by_glyph(&self, text: &str, pos: usize) -> Option<(Replacement<'_>, usize)> {
        let own = if self.glyphs.is_empty() {
            None
        } else {
            text.get(pos..).and_then(|rest| {
                longest_prefix(rest, self.max_glyph_chars, |candidate| {
                    self.glyphs.get(candidate).and_then(|key| self.entry(key))
                })
            })
        };
        let fallback = self.table.by_glyph(text, pos);

        match (own, fallback) {
            (Some(own), Some(fallback)) if fallback.1 > own.1 => Some(fallback),
            (Some(own), _) => Some(own),
            (None, fallback) => fallback,
        }
    }
}
