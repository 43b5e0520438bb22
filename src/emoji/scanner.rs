//! Single-pass scanner for shortcodes and glyph sequences in one text node.

use std::ops::Range;

use memchr::memchr;

use super::lookup::{Lookup, Replacement};

/// Which notation a span was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// `:shortcode:`, colons included in the span.
    Shortcode,
    /// A raw glyph sequence.
    Glyph,
}

/// A matched region of the scanned text, in byte offsets.
#[derive(Debug, Clone)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub range: Range<usize>,
    pub replacement: Replacement<'a>,
}

/// Find every emoji reference in `text`, in order and without overlap.
///
/// A colon opens a shortcode candidate running to the next colon. If the
/// candidate is unknown, that next colon opens the following candidate, so in
/// `:po:popcor:corn:n:` only `:corn:` matches and the other colons stay
/// literal. Everywhere else the lookup's longest glyph match is taken.
pub fn scan<'a, L: Lookup + ?Sized>(text: &str, lookup: &'a L) -> Vec<Span<'a>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        if bytes[pos] == b':' {
            if let Some(close) = memchr(b':', &bytes[pos + 1..]).map(|off| pos + 1 + off)
                && let Some(replacement) = lookup.by_shortcode(&text[pos + 1..close])
            {
                spans.push(Span {
                    kind: SpanKind::Shortcode,
                    range: pos..close + 1,
                    replacement,
                });
                pos = close + 1;
                continue;
            }
            // Literal colon. A closing colon, if any, is reached next and
            // retried as an opener.
            pos += 1;
            continue;
        }

        if let Some((replacement, len)) = lookup.by_glyph(text, pos)
            && len > 0
        {
            spans.push(Span {
                kind: SpanKind::Glyph,
                range: pos..pos + len,
                replacement,
            });
            pos += len;
            continue;
        }

        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::table::{Emoji, EmojiTable};

    fn matched<'t>(text: &'t str, spans: &[Span<'_>]) -> Vec<&'t str> {
        spans.iter().map(|s| &text[s.range.clone()]).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(scan("", EmojiTable::bundled()).is_empty());
    }

    #[test]
    fn test_plain_text() {
        assert!(scan("Hello, world!", EmojiTable::bundled()).is_empty());
    }

    #[test]
    fn test_shortcode() {
        let text = ":horse_racing:";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Shortcode);
        assert_eq!(spans[0].range, 0..text.len());
        assert_eq!(spans[0].replacement.shortcode(), "horse_racing");
    }

    #[test]
    fn test_glyph() {
        let text = "To the 🍿 thread!";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SpanKind::Glyph);
        assert_eq!(matched(text, &spans), ["🍿"]);
    }

    #[test]
    fn test_nearest_valid_pair() {
        let text = ":po:popcor:corn:n:";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(matched(text, &spans), [":corn:"]);
        assert_eq!(spans[0].range, 10..16);
    }

    #[test]
    fn test_failed_closer_reopens() {
        // ":not:" fails, and its closing colon opens ":smile:".
        let text = "a:not:smile:b";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(matched(text, &spans), [":smile:"]);
    }

    #[test]
    fn test_dangling_colons_stay_literal() {
        for text in [":", "::", "time: 10:30", "a:b", ":horse_racing"] {
            assert!(scan(text, EmojiTable::bundled()).is_empty(), "{text:?}");
        }
    }

    #[test]
    fn test_adjacent_shortcodes() {
        let text = ":mag::exclamation:";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(matched(text, &spans), [":mag:", ":exclamation:"]);
    }

    #[test]
    fn test_glyph_inside_failed_candidate() {
        let text = ":see 🏇 here:";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(matched(text, &spans), ["🏇"]);

        let text = "ab:c 🍿 d:fire:";
        let spans = scan(text, EmojiTable::bundled());
        assert_eq!(matched(text, &spans), ["🍿", ":fire:"]);
    }

    #[test]
    fn test_mixed_notations_in_order() {
        let text = "🍿:musical_note:x🏇";
        let spans = scan(text, EmojiTable::bundled());
        let kinds: Vec<_> = spans.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SpanKind::Glyph, SpanKind::Shortcode, SpanKind::Glyph]
        );
        assert_eq!(matched(text, &spans), ["🍿", ":musical_note:", "🏇"]);
    }

    #[test]
    fn test_longest_glyph_sequence() {
        let text = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} and \u{1F468}";
        let spans = scan(text, EmojiTable::bundled());
        let codes: Vec<_> = spans.iter().map(|s| s.replacement.shortcode()).collect();
        assert_eq!(codes, ["family_man_woman_girl", "man"]);
    }

    #[test]
    fn test_custom_table() {
        let table = EmojiTable::from_emojis([Emoji::new("a", "\u{263A}", "smiling face")]).unwrap();
        let text = ":a:\u{263A}:b:";
        let spans = scan(text, &table);
        assert_eq!(matched(text, &spans), [":a:", "\u{263A}"]);
    }
}
