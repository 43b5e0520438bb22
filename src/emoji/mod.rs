//! Emoji shortcode and glyph rewriting.
//!
//! - [`table`]: the static emoji data
//! - [`lookup`]: providers answering shortcode and glyph queries
//! - [`scanner`]: finds matches in one text node
//! - [`rewriter`]: splices matches into the tree

pub mod lookup;
pub mod rewriter;
pub mod scanner;
pub mod table;

pub use lookup::{CustomFn, Lookup, Overrides, Replacement, annotation};
pub use rewriter::Rewriter;
pub use scanner::{Span, SpanKind, scan};
pub use table::{Emoji, EmojiTable};
