//! Owned, mutable XML element tree.
//!
//! [`Element`] is the attributed node that property serializers read from and
//! write to. Besides plain attributes it exposes two addressing conventions
//! used by project files:
//!
//! - **fields** – `<option name="…" value="…"/>` children ([`Element::field`])
//! - **components** – `<component name="…">` children ([`Element::find_component`])
//!
//! Parsed documents keep qualified names, namespace declarations, comments
//! and text in document order, so a parse → edit → write cycle only changes
//! what was edited.
//!
//! Sub-modules:
//!
//! - [`parse`] – Build a [`Document`] / [`Element`] from XML text (roxmltree)
//! - [`write`] – Generate XML text from a [`Document`] / [`Element`]

pub mod parse;
pub mod write;

pub use write::generate_document;

use crate::names::{
    COMPONENT_NAME_ATTRIBUTE, COMPONENT_TAG, OPTION_NAME_ATTRIBUTE, OPTION_TAG,
    OPTION_VALUE_ATTRIBUTE,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed XML document: optional declaration, top-level comments and the
/// root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The literal `<?xml …?>` declaration, if the source had one.
    pub declaration: Option<String>,
    /// Comments before the root element.
    #[serde(default)]
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments after the root element.
    #[serde(default)]
    pub epilog: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            declaration: None,
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    pub fn to_xml_string(&self) -> String {
        generate_document(self)
    }
}

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    /// Character data, including whitespace between elements.
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

/// A single XML element with ordered attributes and child nodes.
///
/// `name` and attribute keys are qualified names (`x:extra`); namespace
/// declarations are kept as `xmlns…` attributes. `attributes` preserves
/// insertion order so documents are regenerated with their attributes in the
/// original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Create an empty `<component name="…"/>` element.
    pub fn component(name: &str) -> Self {
        Element::new(COMPONENT_TAG).with_attribute(COMPONENT_NAME_ATTRIBUTE, name)
    }

    // ── attributes ──────────────────────────────────────────────────────────

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute. An existing attribute keeps its position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    // ── children ────────────────────────────────────────────────────────────

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First child element with the given tag name.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|c| c.name == tag)
    }

    /// Index in `children` of the first child element named `tag`.
    pub fn child_index(&self, tag: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.name == tag))
    }

    /// Concatenated character data of this element's direct text nodes.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Append a child element and return its index in `children`.
    ///
    /// In formatted content the element goes before the trailing whitespace
    /// and gets the same indentation as its siblings.
    pub fn append_child(&mut self, child: Element) -> usize {
        let trailing = match self.children.last() {
            Some(Node::Text(t)) if t.trim().is_empty() => Some(t.clone()),
            _ => None,
        };
        let Some(trailing) = trailing else {
            self.children.push(Node::Element(child));
            return self.children.len() - 1;
        };
        let indent = self
            .children
            .windows(2)
            .find_map(|w| match (&w[0], &w[1]) {
                (Node::Text(t), Node::Element(_)) if t.trim().is_empty() => Some(t.clone()),
                _ => None,
            })
            .unwrap_or_else(|| format!("{}  ", trailing));
        let at = self.children.len() - 1;
        self.children.insert(at, Node::Text(indent));
        self.children.insert(at + 1, Node::Element(child));
        at + 1
    }

    /// Depth-first search (self included) for the first element with `tag`.
    pub fn descendant(&self, tag: &str) -> Option<&Element> {
        if self.name == tag {
            return Some(self);
        }
        self.elements().find_map(|c| c.descendant(tag))
    }

    /// Child indices leading from `self` to the first element (self included,
    /// depth-first) matching `pred`.
    pub fn find_path<F: Fn(&Element) -> bool>(&self, pred: &F) -> Option<Vec<usize>> {
        if pred(self) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, n)| {
            n.as_element()?.find_path(pred).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    pub fn descendant_path(&self, tag: &str) -> Option<Vec<usize>> {
        self.find_path(&|e: &Element| e.name == tag)
    }

    /// Follow child indices from `self`; `None` if an index is out of range or
    /// not an element.
    pub fn at_path(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |e, &i| e.children.get(i)?.as_element())
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        path.iter()
            .try_fold(self, |e, &i| e.children.get_mut(i)?.as_element_mut())
    }

    // ── fields ──────────────────────────────────────────────────────────────

    fn is_field(&self, field_name: &str) -> bool {
        self.name == OPTION_TAG && self.attribute(OPTION_NAME_ATTRIBUTE) == Some(field_name)
    }

    /// Read the `value` of the first `<option name="field_name">` child.
    pub fn field(&self, field_name: &str) -> Option<&str> {
        self.elements()
            .find(|c| c.is_field(field_name))
            .and_then(|c| c.attribute(OPTION_VALUE_ATTRIBUTE))
    }

    /// Write a field.
    ///
    /// `Some` updates the first matching `<option>` in place (or appends one)
    /// and drops any duplicates; `None` removes every matching `<option>`.
    /// Removed options take their leading whitespace with them.
    pub fn set_field(&mut self, field_name: &str, value: Option<&str>) {
        let mut kept: Vec<Node> = Vec::with_capacity(self.children.len());
        let mut written = false;
        for mut node in std::mem::take(&mut self.children) {
            if let Some(e) = node.as_element_mut() {
                if e.is_field(field_name) {
                    match value {
                        Some(v) if !written => {
                            e.set_attribute(OPTION_VALUE_ATTRIBUTE, v);
                            written = true;
                        }
                        _ => {
                            if kept.last().is_some_and(Node::is_blank_text) {
                                kept.pop();
                            }
                            continue;
                        }
                    }
                }
            }
            kept.push(node);
        }
        self.children = kept;
        if let (Some(v), false) = (value, written) {
            self.append_child(
                Element::new(OPTION_TAG)
                    .with_attribute(OPTION_NAME_ATTRIBUTE, field_name)
                    .with_attribute(OPTION_VALUE_ATTRIBUTE, v),
            );
        }
    }

    // ── components ──────────────────────────────────────────────────────────

    fn is_component(&self, component_name: &str) -> bool {
        self.name == COMPONENT_TAG
            && self.attribute(COMPONENT_NAME_ATTRIBUTE) == Some(component_name)
    }

    /// Direct `<component name="component_name">` child of this element.
    pub fn find_component(&self, component_name: &str) -> Option<&Element> {
        self.elements().find(|c| c.is_component(component_name))
    }

    pub fn find_component_mut(&mut self, component_name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|c| c.is_component(component_name))
    }

    // ── text ────────────────────────────────────────────────────────────────

    /// Serialize this element (without XML declaration).
    pub fn to_xml_string(&self) -> String {
        write::generate_element(self)
    }
}

/// Component lookup that tolerates an absent root.
pub fn find_component<'a>(root: Option<&'a Element>, component_name: &str) -> Option<&'a Element> {
    root.and_then(|r| r.find_component(component_name))
}
