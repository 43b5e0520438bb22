//! The static emoji table: shortcode and glyph indexes over emoji records.
//!
//! Data is read from gemoji-style JSON, one object per emoji:
//!
//! ```json
//! [{ "emoji": "🏇", "description": "horse racing", "aliases": ["horse_racing"] }]
//! ```
//!
//! The first alias is the canonical shortcode; every alias resolves to the
//! same record. Entries flagged `"skin_tones": true` also match their five
//! Fitzpatrick modifier sequences, each as a record of its own.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Emoji presentation selector.
const VS16: char = '\u{FE0F}';

const ZWJ: char = '\u{200D}';

/// Fitzpatrick modifiers with their CLDR names.
const SKIN_TONES: [(char, &str); 5] = [
    ('\u{1F3FB}', "light skin tone"),
    ('\u{1F3FC}', "medium-light skin tone"),
    ('\u{1F3FD}', "medium skin tone"),
    ('\u{1F3FE}', "medium-dark skin tone"),
    ('\u{1F3FF}', "dark skin tone"),
];

static BUNDLED: LazyLock<EmojiTable> = LazyLock::new(|| {
    EmojiTable::from_json(include_str!("../../data/emoji.json"))
        .expect("bundled emoji table is valid")
});

/// One emoji: canonical shortcode, glyph sequence and human-readable title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Emoji {
    shortcode: String,
    glyph: String,
    title: String,
}

impl Emoji {
    pub fn new(
        shortcode: impl Into<String>,
        glyph: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            shortcode: shortcode.into(),
            glyph: glyph.into(),
            title: title.into(),
        }
    }

    /// Canonical shortcode, without colons.
    pub fn shortcode(&self) -> &str {
        &self.shortcode
    }

    /// The glyph sequence as text.
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Deserialize)]
struct RawEntry {
    emoji: String,
    description: String,
    aliases: Vec<String>,
    #[serde(default)]
    skin_tones: bool,
}

/// Where a glyph key points.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Primary(usize),
    SkinTone(usize),
}

/// Immutable emoji table indexed by shortcode and by glyph sequence.
#[derive(Debug, Default)]
pub struct EmojiTable {
    emojis: Vec<Emoji>,
    /// Skin tone variants, reachable by glyph only.
    skin_tones: Vec<Emoji>,
    shortcodes: HashMap<String, usize>,
    glyphs: HashMap<String, Slot>,
    /// First character of every indexed glyph, for a cheap reject.
    leading: HashSet<char>,
    max_glyph_chars: usize,
}

impl EmojiTable {
    /// The table shipped with the crate, parsed on first use.
    pub fn bundled() -> &'static EmojiTable {
        &BUNDLED
    }

    /// Build a table from gemoji-style JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RawEntry> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for entry in entries {
            let Some(canonical) = entry.aliases.first() else {
                return Err(Error::InvalidEntry(format!(
                    "{:?} has no aliases",
                    entry.emoji
                )));
            };
            let emoji = Emoji::new(canonical.clone(), entry.emoji, entry.description);
            let idx = table.insert(emoji, &entry.aliases)?;
            if entry.skin_tones {
                table.add_skin_tones(idx);
            }
        }
        log::debug!(
            "loaded emoji table: {} emojis, {} shortcodes, {} skin tone variants",
            table.emojis.len(),
            table.shortcodes.len(),
            table.skin_tones.len()
        );
        Ok(table)
    }

    /// Build a table from records, each reachable only by its canonical shortcode.
    pub fn from_emojis(emojis: impl IntoIterator<Item = Emoji>) -> Result<Self> {
        let mut table = Self::default();
        for emoji in emojis {
            let aliases = [emoji.shortcode.clone()];
            table.insert(emoji, &aliases)?;
        }
        Ok(table)
    }

    fn insert(&mut self, emoji: Emoji, aliases: &[String]) -> Result<usize> {
        if emoji.glyph.is_empty() {
            return Err(Error::InvalidEntry(format!(
                ":{}: has an empty glyph",
                emoji.shortcode
            )));
        }
        if matches!(
            self.glyphs.get(&emoji.glyph),
            Some(&Slot::Primary(i)) if self.emojis[i].glyph == emoji.glyph
        ) {
            return Err(Error::InvalidEntry(format!(
                "glyph {:?} listed twice",
                emoji.glyph
            )));
        }

        let idx = self.emojis.len();
        for alias in aliases {
            validate_shortcode(alias)?;
            if self.shortcodes.insert(alias.clone(), idx).is_some() {
                return Err(Error::InvalidEntry(format!(":{alias}: listed twice")));
            }
        }

        self.note_glyph_shape(&emoji.glyph);
        self.glyphs.insert(emoji.glyph.clone(), Slot::Primary(idx));
        if let Some(bare) = optional_selector_form(&emoji.glyph) {
            self.note_glyph_shape(bare);
            self.glyphs
                .entry(bare.to_string())
                .or_insert(Slot::Primary(idx));
        }

        self.emojis.push(emoji);
        Ok(idx)
    }

    /// Index the five modifier sequences of `emojis[idx]`. The modifier
    /// replaces any presentation selector and goes before the first joiner.
    fn add_skin_tones(&mut self, idx: usize) {
        let base = &self.emojis[idx];
        let bare: String = base.glyph.chars().filter(|&c| c != VS16).collect();
        let variants: Vec<Emoji> = SKIN_TONES
            .iter()
            .map(|&(tone, name)| {
                let glyph = match bare.find(ZWJ) {
                    Some(at) => format!("{}{tone}{}", &bare[..at], &bare[at..]),
                    None => format!("{bare}{tone}"),
                };
                Emoji::new(base.shortcode.clone(), glyph, format!("{}: {name}", base.title))
            })
            .collect();

        for variant in variants {
            self.note_glyph_shape(&variant.glyph);
            self.glyphs
                .entry(variant.glyph.clone())
                .or_insert(Slot::SkinTone(self.skin_tones.len()));
            self.skin_tones.push(variant);
        }
    }

    fn note_glyph_shape(&mut self, glyph: &str) {
        if let Some(first) = glyph.chars().next() {
            self.leading.insert(first);
        }
        self.max_glyph_chars = self.max_glyph_chars.max(glyph.chars().count());
    }

    /// Look up an emoji by shortcode or alias (without colons).
    pub fn get(&self, shortcode: &str) -> Option<&Emoji> {
        self.shortcodes.get(shortcode).map(|&idx| &self.emojis[idx])
    }

    /// Look up an emoji by its exact glyph sequence, skin tone variants
    /// included.
    pub fn get_by_glyph(&self, glyph: &str) -> Option<&Emoji> {
        self.glyphs.get(glyph).map(|slot| match *slot {
            Slot::Primary(idx) => &self.emojis[idx],
            Slot::SkinTone(idx) => &self.skin_tones[idx],
        })
    }

    /// Longest glyph sequence starting at byte offset `pos` of `text`.
    ///
    /// Returns the emoji and the matched length in bytes.
    pub fn longest_glyph_at(&self, text: &str, pos: usize) -> Option<(&Emoji, usize)> {
        let rest = text.get(pos..)?;
        let first = rest.chars().next()?;
        if !self.leading.contains(&first) {
            return None;
        }
        longest_prefix(rest, self.max_glyph_chars, |candidate| {
            self.get_by_glyph(candidate)
        })
    }

    /// Number of distinct emojis, not counting skin tone variants.
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Iterate over emojis in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Emoji> {
        self.emojis.iter()
    }
}

/// Reject shortcodes that no `:…:` candidate could or should match.
pub(crate) fn validate_shortcode(shortcode: &str) -> Result<()> {
    if shortcode.is_empty()
        || shortcode.contains(':')
        || shortcode.chars().any(char::is_whitespace)
    {
        return Err(Error::InvalidEntry(format!(
            "unusable shortcode {shortcode:?}"
        )));
    }
    Ok(())
}

/// `glyph` without its trailing presentation selector, when the selector is
/// optional in running text. Latin-1 bases such as © are plain characters
/// without it.
pub(crate) fn optional_selector_form(glyph: &str) -> Option<&str> {
    glyph
        .strip_suffix(VS16)
        .filter(|bare| !bare.is_empty() && bare.chars().all(|c| c > '\u{FF}'))
}

/// Probe prefixes of `rest` from longest (`max_chars` characters) to
/// shortest, returning the first hit and its length in bytes.
pub(crate) fn longest_prefix<T>(
    rest: &str,
    max_chars: usize,
    mut probe: impl FnMut(&str) -> Option<T>,
) -> Option<(T, usize)> {
    let ends: Vec<usize> = rest
        .char_indices()
        .take(max_chars)
        .map(|(i, c)| i + c.len_utf8())
        .collect();
    ends.into_iter()
        .rev()
        .find_map(|end| probe(&rest[..end]).map(|hit| (hit, end)))
}
