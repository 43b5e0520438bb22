//! HTML tree support: an arena DOM, the html5ever sink that builds it, and
//! its serializer.
//!
//! The emoji pass operates on sibling lists of [`NodeId`]s inside a [`Dom`].
//! [`parse_fragment`] produces such a list from markup and
//! [`Dom::serialize_nodes`] turns one back into markup.

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Dom, Node, NodeData, NodeId, html_name};
pub use serialize::SerializableNode;
pub use tree_sink::{DomSink, NodeHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;

/// Parse a complete HTML document.
pub fn parse_document_html(html: &str) -> Dom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    parse_document(DomSink::new(), opts)
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse a fragment of HTML as body content.
///
/// Returns the DOM together with the fragment's top-level nodes, which are
/// the children of the synthesized `<body>`.
pub fn parse_fragment(html: &str) -> (Dom, Vec<NodeId>) {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let dom = parse_document_html(&wrapped);

    let nodes = dom
        .find_by_tag("body")
        .map(|body| dom.children(body).collect())
        .unwrap_or_default();
    (dom, nodes)
}
