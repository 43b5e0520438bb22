//! End-to-end rewriting tests over parsed HTML fragments.
//!
//! Every case runs through the bundled table, an override set with one custom
//! entry, and an empty override set, and is then rewritten a second time to
//! check that the output is stable.

use emojify::{
    Attribute, Dom, EmojiTable, Lookup, NodeId, Overrides, Replacement, Result, Rewriter,
    html_name, parse_fragment,
};
use proptest::prelude::*;

struct Case {
    name: &'static str,
    input: &'static str,
    output: &'static str,
}

const CASES: &[Case] = &[
    Case {
        name: "empty",
        input: "",
        output: "",
    },
    Case {
        name: "plain text",
        input: "Hello, world!",
        output: "Hello, world!",
    },
    Case {
        name: "comment",
        input: ":<!-- skip -->horse_racing:",
        output: ":<!-- skip -->horse_racing:",
    },
    Case {
        name: "colons",
        input: ":horse_racing:",
        output: r#"<abbr class="emoji" title="horse racing">🏇</abbr>"#,
    },
    Case {
        name: "unicode",
        input: "🏇",
        output: r#"<abbr class="emoji" title="horse racing">🏇</abbr>"#,
    },
    Case {
        name: "mixed",
        input: "<em>To the 🍿 thread!</em> :musical_note:",
        output: concat!(
            r#"<em>To the <abbr class="emoji" title="popcorn">🍿</abbr> thread!</em> "#,
            r#"<abbr class="emoji" title="musical note">🎵</abbr>"#,
        ),
    },
    Case {
        name: "garbage",
        input: ":po:popcor:corn:n:",
        output: r#":po:popcor<abbr class="emoji" title="ear of corn">🌽</abbr>n:"#,
    },
    Case {
        name: "code",
        input: "<code>:tangerine:</code>",
        output: "<code>:tangerine:</code>",
    },
    Case {
        name: "attribute",
        input: r#"<a href=":book:">:book:</a>"#,
        output: r#"<a href=":book:"><abbr class="emoji" title="open book">📖</abbr></a>"#,
    },
    Case {
        name: "nested",
        input: concat!(
            r#"<p><a href="https://www.google.com/"><img src="https://www.google.com/favicon.ico" alt="Google"/></a>"#,
            " :mag: Look it up:exclamation:</p>",
        ),
        output: concat!(
            r#"<p><a href="https://www.google.com/"><img src="https://www.google.com/favicon.ico" alt="Google"></a> "#,
            r#"<abbr class="emoji" title="left-pointing magnifying glass">🔍</abbr> Look it up"#,
            "<abbr class=\"emoji\" title=\"exclamation mark\">\u{2757}\u{FE0F}</abbr></p>",
        ),
    },
    Case {
        name: "element before",
        input: "<p><br/>:horse:</p>",
        output: r#"<p><br><abbr class="emoji" title="horse face">🐴</abbr></p>"#,
    },
    Case {
        name: "script",
        input: "<script>var s=':fire:';</script>",
        output: "<script>var s=':fire:';</script>",
    },
    Case {
        name: "skin tone",
        input: "ok 👍🏽 then",
        output: r#"ok <abbr class="emoji" title="thumbs up: medium skin tone">👍🏽</abbr> then"#,
    },
    Case {
        name: "already converted",
        input: r#"<abbr class="emoji" title="fire">:fire:</abbr>"#,
        output: r#"<abbr class="emoji" title="fire">:fire:</abbr>"#,
    },
];

fn wtf(dom: &mut Dom, _matched: &str) -> Result<NodeId> {
    Ok(dom.create_element(
        html_name("img"),
        vec![
            Attribute::new("src", "/emoji/wtf.png"),
            Attribute::new("alt", "wtf"),
        ],
    ))
}

fn test_overrides() -> Overrides<'static> {
    Overrides::new(EmojiTable::bundled()).with_custom("wtf", wtf)
}

fn check_cases<L: Lookup>(label: &str, rewriter: &Rewriter<L>) {
    for case in CASES {
        let (mut dom, nodes) = parse_fragment(case.input);

        let nodes = rewriter.replace(&mut dom, &nodes).unwrap();
        let output = dom.serialize_nodes(&nodes).unwrap();
        assert_eq!(
            output, case.output,
            "[{label}] {}: input {:?}",
            case.name, case.input
        );

        let nodes = rewriter.replace(&mut dom, &nodes).unwrap();
        let again = dom.serialize_nodes(&nodes).unwrap();
        assert_eq!(again, case.output, "[{label}] {}: second pass", case.name);
    }
}

#[test]
fn test_replace_global() {
    check_cases("global", &Rewriter::new(EmojiTable::bundled()));

    for case in CASES {
        assert_eq!(emojify::replace_html(case.input).unwrap(), case.output);
    }
}

#[test]
fn test_replace_config() {
    let overrides = test_overrides();
    check_cases("config", &Rewriter::new(&overrides));
}

#[test]
fn test_replace_empty_config() {
    check_cases(
        "empty config",
        &Rewriter::new(Overrides::new(EmojiTable::bundled())),
    );
}

#[test]
fn test_replace_config_specific() {
    let overrides = test_overrides();
    let mut dom = Dom::new();
    let text = dom.create_text(":wtf:");

    let nodes = Rewriter::new(&overrides)
        .replace(&mut dom, &[text])
        .unwrap();

    assert_eq!(nodes.len(), 1);
    assert!(dom.is_element(nodes[0]));
    assert_eq!(dom.element_name(nodes[0]).unwrap().as_ref(), "img");

    // Without the override the shortcode is unknown.
    let mut dom = Dom::new();
    let text = dom.create_text(":wtf:");
    let nodes = emojify::replace(&mut dom, &[text]).unwrap();
    assert_eq!(nodes, vec![text]);
}

#[test]
fn test_override_shadows_table_entry() {
    let overrides = Overrides::new(EmojiTable::bundled()).with_custom("fire", wtf);
    let html = Rewriter::new(&overrides)
        .replace_html("<p>:fire: 🔥</p>")
        .unwrap();
    assert_eq!(
        html,
        r#"<p><img src="/emoji/wtf.png" alt="wtf"> <abbr class="emoji" title="fire">🔥</abbr></p>"#
    );
}

#[test]
fn test_unusable_override_keys_never_match() {
    let overrides = Overrides::new(EmojiTable::bundled())
        .with_custom("", wtf)
        .with_emoji(emojify::Emoji::new("a b", "\u{1F99C}", "parrot"));
    let rewriter = Rewriter::new(&overrides);

    assert_eq!(
        rewriter.replace_html("std::vec and a :: b").unwrap(),
        "std::vec and a :: b"
    );
    assert_eq!(rewriter.replace_html("x:a b:y").unwrap(), "x:a b:y");
}

#[test]
fn test_single_node_input() {
    let (mut dom, nodes) = parse_fragment("<ul><li>:+1:</li><li>👎</li></ul>");
    assert_eq!(nodes.len(), 1);
    let ul = nodes[0];

    let out = emojify::replace(&mut dom, &[ul]).unwrap();
    assert_eq!(out, vec![ul]);
    assert_eq!(
        dom.serialize_node(ul).unwrap(),
        concat!(
            r#"<ul><li><abbr class="emoji" title="thumbs up">👍</abbr></li>"#,
            r#"<li><abbr class="emoji" title="thumbs down">👎</abbr></li></ul>"#,
        )
    );
}

#[test]
fn test_bytes_input() {
    let html = emojify::replace_html_bytes(b"<p>caf\xE9 :coffee:</p>").unwrap();
    assert_eq!(
        html,
        r#"<p>café <abbr class="emoji" title="hot beverage">☕</abbr></p>"#
    );
}

// ============================================================================
// Properties
// ============================================================================

/// Wraps the bundled table but rebuilds every match as `<x-emoji>` holding the
/// matched source text, so excising the wrapper tags restores the input.
struct Echo;

fn echo(dom: &mut Dom, matched: &str) -> Result<NodeId> {
    let el = dom.create_element(html_name("x-emoji"), vec![]);
    let text = dom.create_text(matched);
    dom.append(el, text);
    Ok(el)
}

impl Lookup for Echo {
    fn by_shortcode(&self, shortcode: &str) -> Option<Replacement<'_>> {
        EmojiTable::bundled()
            .get(shortcode)
            .map(|emoji| Replacement::Custom {
                shortcode: emoji.shortcode(),
                build: &echo,
            })
    }

    fn by_glyph(&self, text: &str, pos: usize) -> Option<(Replacement<'_>, usize)> {
        EmojiTable::bundled()
            .longest_glyph_at(text, pos)
            .map(|(emoji, len)| {
                (
                    Replacement::Custom {
                        shortcode: emoji.shortcode(),
                        build: &echo,
                    },
                    len,
                )
            })
    }
}

fn fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            ":", "horse", "corn", "po", "fire", "_racing", " ", "x", "🏇", "🍿", "\u{2757}",
            "\u{1F468}", "\u{200D}", "<em>", "</em>", "<code>", "</code>", "<!--c-->",
            r#"<a title=":fire:">"#, "</a>", "&amp;", "<script>", "</script>", "<style>",
            "</style>", "<textarea>", "</textarea>", "\u{1F44D}", "\u{1F3FD}",
        ]),
        0..24,
    )
    .prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn prop_replace_is_idempotent(input in fragment()) {
        let once = emojify::replace_html(&input).unwrap();
        let twice = emojify::replace_html(&once).unwrap();
        prop_assert_eq!(&twice, &once);

        let (mut dom, nodes) = parse_fragment(&input);
        let nodes = emojify::replace(&mut dom, &nodes).unwrap();
        let first = dom.serialize_nodes(&nodes).unwrap();
        let nodes = emojify::replace(&mut dom, &nodes).unwrap();
        prop_assert_eq!(dom.serialize_nodes(&nodes).unwrap(), first);
    }

    #[test]
    fn prop_empty_overrides_match_table(input in fragment()) {
        let table = Rewriter::new(EmojiTable::bundled()).replace_html(&input).unwrap();
        let overrides = Rewriter::new(Overrides::new(EmojiTable::bundled()))
            .replace_html(&input)
            .unwrap();
        prop_assert_eq!(overrides, table);
    }

    #[test]
    fn prop_structure_is_preserved(input in fragment()) {
        let (dom, nodes) = parse_fragment(&input);
        let original = dom.serialize_nodes(&nodes).unwrap();

        let rewritten = Rewriter::new(Echo).replace_html(&input).unwrap();
        let excised = rewritten.replace("<x-emoji>", "").replace("</x-emoji>", "");
        prop_assert_eq!(excised, original);
    }

    #[test]
    fn prop_sibling_count_never_shrinks(input in fragment()) {
        let (mut dom, nodes) = parse_fragment(&input);
        let out = emojify::replace(&mut dom, &nodes).unwrap();
        prop_assert!(out.len() >= nodes.len());
    }

    #[test]
    fn prop_text_without_colons_or_emoji_is_untouched(input in "[a-zA-Z0-9 .,!?_-]{0,40}") {
        prop_assert_eq!(emojify::replace_html(&input).unwrap(), input);
    }
}
