//! Generate XML text from a [`Document`] / [`Element`] tree.
//!
//! Content that carries its own text nodes (everything read by the parser)
//! is written back verbatim, so whitespace, comments and mixed text stay
//! where they were. Element-only content built in code is laid out with
//! 2-space indentation. Childless elements use the ` />` form.

use super::{Document, Element, Node};

/// Generate a full XML document. Documents without a declaration get the
/// UTF-8 one.
pub fn generate_document(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(
        doc.declaration
            .as_deref()
            .unwrap_or("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"),
    );
    out.push('\n');
    for node in &doc.prolog {
        write_node(&mut out, node, 0);
        out.push('\n');
    }
    write_element(&mut out, &doc.root, 0);
    out.push('\n');
    for node in &doc.epilog {
        write_node(&mut out, node, 0);
        out.push('\n');
    }
    out
}

/// Generate the XML text for a single element subtree.
pub fn generate_element(element: &Element) -> String {
    let mut out = String::with_capacity(256);
    write_element(&mut out, element, 0);
    out.push('\n');
    out
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Like [`xml_escape`] but also encodes quotes and line breaks so values
/// survive attribute normalization.
fn xml_escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_node(out: &mut String, node: &Node, level: usize) {
    match node {
        Node::Element(e) => write_element(out, e, level),
        Node::Text(t) => out.push_str(&xml_escape(t)),
        Node::Comment(c) => out.push_str(&format!("<!--{}-->", c)),
    }
}

/// Write `element` without leading indentation or trailing newline.
fn write_element(out: &mut String, element: &Element, level: usize) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {}=\"{}\"", name, xml_escape_attr(value)));
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');

    let verbatim = element.children.iter().any(|n| matches!(n, Node::Text(_)));
    if verbatim {
        for child in &element.children {
            write_node(out, child, level + 1);
        }
    } else {
        for child in &element.children {
            out.push('\n');
            indent(out, level + 1);
            write_node(out, child, level + 1);
        }
        out.push('\n');
        indent(out, level);
    }
    out.push_str(&format!("</{}>", element.name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_closing_and_nested() {
        let e = Element::new("module")
            .with_attribute("type", "PLUGIN_MODULE")
            .with_child(Element::component("DevKit.ModuleBuildProperties"));
        assert_eq!(
            e.to_xml_string(),
            "<module type=\"PLUGIN_MODULE\">\n  <component name=\"DevKit.ModuleBuildProperties\" />\n</module>\n"
        );
    }

    #[test]
    fn escapes_attribute_values() {
        let e = Element::new("a").with_attribute("v", "x<\"y\"&\n");
        assert_eq!(e.to_xml_string(), "<a v=\"x&lt;&quot;y&quot;&amp;&#10;\" />\n");
    }

    #[test]
    fn document_has_declaration() {
        let doc = generate_document(&Document::new(Element::new("root")));
        assert_eq!(doc, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root />\n");
    }

    #[test]
    fn parsed_content_is_written_verbatim() -> anyhow::Result<()> {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- head -->\n<module xmlns:x=\"urn:x\" version=\"4\">\n  <!-- keep -->\n  <component name=\"T\" x:extra=\"1\">a <b /> c &amp; d</component>\n</module>\n";
        let doc = Document::parse(text)?;
        assert_eq!(generate_document(&doc), text);
        Ok(())
    }
}
