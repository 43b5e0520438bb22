//! Tree rewriter: splices scanner matches into replacement elements.
//!
//! Walks a sibling list, descending into elements, and replaces each text
//! node containing matches with the sequence
//! `[gap text] replacement [gap text] replacement ... [tail text]`,
//! empty gaps omitted. Comments, `code` elements, raw-text elements such as
//! `script`, elements this pass already produced and any caller-declared
//! opaque tags are left alone, which makes the pass idempotent.

use super::lookup::Lookup;
use super::scanner::scan;
use crate::dom::{Dom, NodeData, NodeId, parse_fragment};
use crate::error::Result;
use crate::util::{decode_text, extract_meta_charset};

/// Tags never descended into, besides the pass's own `abbr.emoji` output.
///
/// Past `code`, these are the elements whose text the HTML serializer writes
/// verbatim or the parser reads back as text: markup spliced into them would
/// not survive a round trip.
const SKIP_TAGS: &[&str] = &[
    "code", "script", "style", "textarea", "title", "xmp", "iframe", "noembed",
    "noframes", "noscript", "plaintext",
];

/// What to do with one node of a sibling list.
enum Action {
    Keep,
    Descend,
    Scan,
}

/// Emoji rewriter over a [`Lookup`].
///
/// ```
/// use emojify::{EmojiTable, Rewriter};
///
/// let rewriter = Rewriter::new(EmojiTable::bundled());
/// let html = rewriter.replace_html("<p>:popcorn:</p>").unwrap();
/// assert_eq!(html, r#"<p><abbr class="emoji" title="popcorn">🍿</abbr></p>"#);
/// ```
pub struct Rewriter<L> {
    lookup: L,
    opaque: Vec<String>,
}

impl<L: Lookup> Rewriter<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            opaque: Vec::new(),
        }
    }

    /// Also leave elements with this tag name, and everything inside them, alone.
    pub fn with_opaque_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        if !self.opaque.contains(&tag) {
            self.opaque.push(tag);
        }
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Rewrite a sibling list and return the new list.
    ///
    /// Elements keep their ids; their children are rewritten in place. Text
    /// nodes without matches are returned as is. The result is never shorter
    /// than `nodes`. Errors only come from custom replacement builders.
    pub fn replace(&self, dom: &mut Dom, nodes: &[NodeId]) -> Result<Vec<NodeId>> {
        let mut out = Vec::with_capacity(nodes.len());
        for &id in nodes {
            match self.action(dom, id) {
                Action::Keep => out.push(id),
                Action::Descend => {
                    self.replace_children(dom, id)?;
                    out.push(id);
                }
                Action::Scan => self.splice_text(dom, id, &mut out)?,
            }
        }
        Ok(out)
    }

    /// Parse an HTML fragment, rewrite it and serialize the result.
    pub fn replace_html(&self, html: &str) -> Result<String> {
        let (mut dom, nodes) = parse_fragment(html);
        let nodes = self.replace(&mut dom, &nodes)?;
        dom.serialize_nodes(&nodes)
    }

    /// Like [`Rewriter::replace_html`], for raw bytes of unknown encoding.
    ///
    /// UTF-8 is tried first, then any `<meta charset>` declaration, then
    /// Windows-1252.
    pub fn replace_html_bytes(&self, bytes: &[u8]) -> Result<String> {
        let html = decode_text(bytes, extract_meta_charset(bytes));
        self.replace_html(&html)
    }

    fn action(&self, dom: &Dom, id: NodeId) -> Action {
        let Some(node) = dom.get(id) else {
            return Action::Keep;
        };
        match &node.data {
            NodeData::Text(_) => Action::Scan,
            NodeData::Document => Action::Descend,
            NodeData::Element { name, classes, .. } => {
                let tag = name.local.as_ref();
                let own_output = tag == "abbr" && classes.iter().any(|c| c == "emoji");
                if own_output
                    || SKIP_TAGS.contains(&tag)
                    || self.opaque.iter().any(|t| t == tag)
                {
                    Action::Keep
                } else {
                    Action::Descend
                }
            }
            NodeData::Comment(_)
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => Action::Keep,
        }
    }

    fn replace_children(&self, dom: &mut Dom, parent: NodeId) -> Result<()> {
        let children: Vec<_> = dom.children(parent).collect();
        let replaced = self.replace(dom, &children)?;
        if replaced != children {
            dom.set_children(parent, &replaced);
        }
        Ok(())
    }

    fn splice_text(&self, dom: &mut Dom, id: NodeId, out: &mut Vec<NodeId>) -> Result<()> {
        let Some(text) = dom.text_content(id) else {
            out.push(id);
            return Ok(());
        };
        let spans = scan(text, &self.lookup);
        if spans.is_empty() {
            out.push(id);
            return Ok(());
        }
        let text = text.to_string();

        let before = out.len();
        let mut cursor = 0;
        for span in &spans {
            if span.range.start > cursor {
                out.push(dom.create_text(&text[cursor..span.range.start]));
            }
            let matched = &text[span.range.clone()];
            log::trace!(
                "{:?} match {matched:?} -> :{}:",
                span.kind,
                span.replacement.shortcode()
            );
            out.push(span.replacement.build(dom, matched)?);
            cursor = span.range.end;
        }
        if cursor < text.len() {
            out.push(dom.create_text(&text[cursor..]));
        }

        log::debug!(
            "text node {:?} split into {} nodes ({} matches)",
            id,
            out.len() - before,
            spans.len()
        );
        Ok(())
    }
}
