//! # emojify
//!
//! Rewrites emoji references in parsed HTML into annotated inline elements.
//!
//! Two notations are recognized in text content: colon shortcodes such as
//! `:horse_racing:` and raw glyph sequences such as `🏇`. Each match becomes
//!
//! ```html
//! <abbr class="emoji" title="horse racing">🏇</abbr>
//! ```
//!
//! Tags, attributes and comments are never modified, `<code>` and raw-text
//! elements such as `<script>` are left alone, and running the pass over its
//! own output changes nothing.
//!
//! ## Quick Start
//!
//! ```
//! let html = emojify::replace_html("<em>To the 🍿 thread!</em> :musical_note:").unwrap();
//! assert_eq!(
//!     html,
//!     concat!(
//!         r#"<em>To the <abbr class="emoji" title="popcorn">🍿</abbr> thread!</em> "#,
//!         r#"<abbr class="emoji" title="musical note">🎵</abbr>"#,
//!     )
//! );
//! ```
//!
//! ## Working with Trees
//!
//! The pass operates on sibling lists inside a [`Dom`]. Elements keep their
//! [`NodeId`]; text nodes with matches are split.
//!
//! ```
//! use emojify::{Attribute, EmojiTable, Overrides, Rewriter, html_name, parse_fragment};
//!
//! let (mut dom, nodes) = parse_fragment("<p>:wtf: :fire:</p>");
//!
//! let overrides = Overrides::new(EmojiTable::bundled()).with_custom("wtf", |dom, _| {
//!     Ok(dom.create_element(html_name("img"), vec![Attribute::new("src", "/wtf.gif")]))
//! });
//! let nodes = Rewriter::new(&overrides).replace(&mut dom, &nodes).unwrap();
//!
//! assert_eq!(
//!     dom.serialize_nodes(&nodes).unwrap(),
//!     r#"<p><img src="/wtf.gif"> <abbr class="emoji" title="fire">🔥</abbr></p>"#
//! );
//! ```

pub mod dom;
pub mod emoji;
pub mod error;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dom::{Attribute, Dom, NodeData, NodeId, html_name, parse_fragment};
pub use emoji::{
    CustomFn, Emoji, EmojiTable, Lookup, Overrides, Replacement, Rewriter, Span, SpanKind,
    annotation, scan,
};
pub use error::{Error, Result};

/// Rewrite a sibling list with the bundled emoji table.
///
/// See [`Rewriter::replace`].
pub fn replace(dom: &mut Dom, nodes: &[NodeId]) -> Result<Vec<NodeId>> {
    Rewriter::new(EmojiTable::bundled()).replace(dom, nodes)
}

/// Parse an HTML fragment, rewrite it with the bundled table and serialize it.
pub fn replace_html(html: &str) -> Result<String> {
    Rewriter::new(EmojiTable::bundled()).replace_html(html)
}

/// Like [`replace_html`], for raw bytes of unknown encoding.
pub fn replace_html_bytes(bytes: &[u8]) -> Result<String> {
    Rewriter::new(EmojiTable::bundled()).replace_html_bytes(bytes)
}
