//! Build a [`Document`] / [`Element`] tree from XML text.

use super::{Document, Element, Node};
use anyhow::{Context, Result};
use roxmltree::NodeType;

const XML_PREFIX: &str = "xml";

impl Document {
    /// Parse XML text, keeping the declaration, top-level comments and the
    /// full content of the root element.
    pub fn parse(text: &str) -> Result<Document> {
        let doc = roxmltree::Document::parse(text).context("Failed to parse XML")?;
        let root_node = doc.root_element();

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut after_root = false;
        for child in doc.root().children() {
            if child == root_node {
                after_root = true;
            } else if let Some(comment) = child.is_comment().then(|| child.text()).flatten() {
                let target = if after_root { &mut epilog } else { &mut prolog };
                target.push(Node::Comment(comment.to_string()));
            }
        }

        Ok(Document {
            declaration: declaration(text),
            prolog,
            root: element_from_node(root_node),
            epilog,
        })
    }
}

impl Element {
    /// Parse XML text and return its root element.
    pub fn parse(text: &str) -> Result<Element> {
        Ok(Document::parse(text)?.root)
    }
}

/// The literal `<?xml …?>` declaration at the start of `text`, if any.
fn declaration(text: &str) -> Option<String> {
    let start = text.trim_start_matches('\u{feff}');
    if !start.starts_with("<?xml") || !start[5..].starts_with(char::is_whitespace) {
        return None;
    }
    start.find("?>").map(|end| start[..end + 2].to_string())
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}:{}", p, local),
        _ => local.to_string(),
    }
}

/// Convert a roxmltree element node into an owned [`Element`].
///
/// Prefixes are recovered from the in-scope namespaces; declarations that are
/// new on this element (not inherited from the parent) become `xmlns`
/// attributes placed before the regular ones.
pub fn element_from_node(node: roxmltree::Node) -> Element {
    let tag = node.tag_name();
    let prefix = tag.namespace().and_then(|uri| node.lookup_prefix(uri));
    let mut element = Element::new(qualified(prefix, tag.name()));

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some(XML_PREFIX) || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        element.set_attribute(key, ns.uri());
    }

    for attr in node.attributes() {
        let prefix = attr.namespace().and_then(|uri| {
            if uri == "http://www.w3.org/XML/1998/namespace" {
                Some(XML_PREFIX)
            } else {
                node.lookup_prefix(uri)
            }
        });
        element.set_attribute(qualified(prefix, attr.name()), attr.value());
    }

    for child in node.children() {
        match child.node_type() {
            NodeType::Element => element.children.push(Node::Element(element_from_node(child))),
            NodeType::Text => {
                let text = child.text().unwrap_or("");
                match element.children.last_mut() {
                    // adjacent text and CDATA sections arrive as separate nodes
                    Some(Node::Text(prev)) => prev.push_str(text),
                    _ => element.children.push(Node::Text(text.to_string())),
                }
            }
            NodeType::Comment => {
                element
                    .children
                    .push(Node::Comment(child.text().unwrap_or("").to_string()));
            }
            NodeType::Root | NodeType::PI => {}
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes_in_order() -> Result<()> {
        let e = Element::parse(r#"<module version="4" type="PLUGIN_MODULE"/>"#)?;
        assert_eq!(e.name, "module");
        let keys: Vec<&str> = e.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["version", "type"]);
        Ok(())
    }

    #[test]
    fn keeps_text_comments_and_order() -> Result<()> {
        let e = Element::parse("<a>x <!-- note --><b>hi &amp; bye</b> y</a>")?;
        assert_eq!(
            e.children,
            vec![
                Node::Text("x ".into()),
                Node::Comment(" note ".into()),
                Node::Element(Element {
                    name: "b".into(),
                    children: vec![Node::Text("hi & bye".into())],
                    ..Element::default()
                }),
                Node::Text(" y".into()),
            ]
        );
        assert_eq!(e.text(), "x  y");
        Ok(())
    }

    #[test]
    fn keeps_prefixes_and_declarations() -> Result<()> {
        let e = Element::parse(
            r#"<m xmlns:x="urn:x" a="1"><x:c x:extra="2"/><d xmlns="urn:d" xml:lang="en"/></m>"#,
        )?;
        let keys: Vec<&str> = e.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["xmlns:x", "a"]);
        let c = e.child("x:c").expect("prefixed child");
        assert_eq!(c.attribute("x:extra"), Some("2"));
        assert!(c.attribute("xmlns:x").is_none());
        let d = e.child("d").expect("default-namespace child");
        assert_eq!(d.attribute("xmlns"), Some("urn:d"));
        assert_eq!(d.attribute("xml:lang"), Some("en"));
        Ok(())
    }

    #[test]
    fn document_keeps_declaration_and_prolog() -> Result<()> {
        let doc = Document::parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- top -->\n<a/>\n")?;
        assert_eq!(doc.declaration.as_deref(), Some("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(doc.prolog, vec![Node::Comment(" top ".into())]);
        assert!(Document::parse("<a/>")?.declaration.is_none());
        Ok(())
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(Element::parse("<a><b></a>").is_err());
    }
}
