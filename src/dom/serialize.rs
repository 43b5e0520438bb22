//! html5ever serialization for [`Dom`] nodes.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{Dom, NodeData, NodeId};
use crate::error::Result;

/// A node borrowed from a [`Dom`], serializable by html5ever.
pub struct SerializableNode<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a Dom, id: NodeId) -> Self {
        Self { dom, id }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self.dom, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.dom.children(self.id) {
                    write_node(self.dom, child, serializer)?;
                }
                Ok(())
            }
        }
    }
}

fn write_node<S: Serializer>(dom: &Dom, id: NodeId, serializer: &mut S) -> io::Result<()> {
    let Some(node) = dom.get(id) else {
        return Ok(());
    };

    match &node.data {
        NodeData::Element { name, attrs, .. } => {
            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            for child in dom.children(id) {
                write_node(dom, child, serializer)?;
            }
            serializer.end_elem(name.clone())
        }
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, serializer)?;
            }
            Ok(())
        }
        NodeData::Text(text) => serializer.write_text(text),
        NodeData::Comment(text) => serializer.write_comment(text),
        NodeData::Doctype { name, .. } => serializer.write_doctype(name),
        NodeData::ProcessingInstruction { target, data } => {
            serializer.write_processing_instruction(target, data)
        }
    }
}

impl Dom {
    /// Serialize a single node, including the node itself, to HTML.
    pub fn serialize_node(&self, id: NodeId) -> Result<String> {
        self.serialize_nodes(&[id])
    }

    /// Serialize a sibling list to HTML, concatenated in order.
    pub fn serialize_nodes(&self, nodes: &[NodeId]) -> Result<String> {
        let mut bytes = Vec::new();
        for &id in nodes {
            let opts = SerializeOpts {
                traversal_scope: TraversalScope::IncludeNode,
                ..Default::default()
            };
            serialize(&mut bytes, &SerializableNode::new(self, id), opts)?;
        }
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attribute, html_name, parse_fragment};

    #[test]
    fn test_serialize_built_element() {
        let mut dom = Dom::new();
        let abbr = dom.create_element(
            html_name("abbr"),
            vec![
                Attribute::new("class", "emoji"),
                Attribute::new("title", "horse racing"),
            ],
        );
        let glyph = dom.create_text("🏇");
        dom.append(abbr, glyph);

        assert_eq!(
            dom.serialize_node(abbr).unwrap(),
            r#"<abbr class="emoji" title="horse racing">🏇</abbr>"#
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let mut dom = Dom::new();
        let a = dom.create_element(html_name("a"), vec![Attribute::new("title", "\"x\" & y")]);
        let text = dom.create_text("1 < 2 & 3");
        dom.append(a, text);

        assert_eq!(
            dom.serialize_node(a).unwrap(),
            r#"<a title="&quot;x&quot; &amp; y">1 &lt; 2 &amp; 3</a>"#
        );
    }

    #[test]
    fn test_fragment_round_trip() {
        let input = r#"<p><a href=":book:">link</a><!-- note --> tail</p>"#;
        let (dom, nodes) = parse_fragment(input);
        assert_eq!(dom.serialize_nodes(&nodes).unwrap(), input);
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let (dom, nodes) = parse_fragment("<p><br/>x</p>");
        assert_eq!(dom.serialize_nodes(&nodes).unwrap(), "<p><br>x</p>");
    }
}
