//! Document tree and element construction.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

/// Vector-graphics namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Markup namespace used for foreign content.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Element has no id attribute")]
    MissingId,
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Inconsistent document: {0}")]
    Inconsistent(String),
}

/// An attribute value in a construction spec.
///
/// Hosts pass positions as numbers and everything else as strings; both end
/// up as string attributes on the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Render the value the way it is stored on an element.
    pub fn to_attr_string(&self) -> String {
        match self {
            AttrValue::Number(n) => format_number(*n),
            AttrValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

/// A child entry in a construction spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecChild {
    Text(String),
    Element(ElementSpec),
}

/// Declarative description of a namespaced element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Namespace URI of the element.
    pub namespace: String,
    /// Tag name.
    pub element: String,
    /// Attributes, in name order.
    #[serde(default)]
    pub attr: BTreeMap<String, AttrValue>,
    /// Nested elements and text nodes.
    #[serde(default)]
    pub children: Vec<SpecChild>,
}

impl ElementSpec {
    /// Create a spec with no attributes or children.
    pub fn new(namespace: &str, element: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            element: element.to_string(),
            attr: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attr.insert(name.to_string(), value.into());
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(SpecChild::Element(child));
        self
    }

    /// Add a text child.
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(SpecChild::Text(text.to_string()));
        self
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A namespaced element with string attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub namespace: String,
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(namespace: &str, tag: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Build an element tree from a construction spec.
    pub fn from_spec(spec: &ElementSpec) -> Self {
        let mut element = Self::new(&spec.namespace, &spec.element);
        for (name, value) in &spec.attr {
            element.attributes.insert(name.clone(), value.to_attr_string());
        }
        element.children = spec
            .children
            .iter()
            .map(|child| match child {
                SpecChild::Text(text) => Node::Text(text.clone()),
                SpecChild::Element(spec) => Node::Element(Element::from_spec(spec)),
            })
            .collect();
        element
    }

    /// The element's `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    /// Read an attribute as a number. Missing or unparsable values yield `None`.
    pub fn number_attr(&self, name: &str) -> Option<f64> {
        self.attr(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Write a numeric attribute.
    pub fn set_number_attr(&mut self, name: &str, value: f64) {
        self.set_attr(name, format_number(value));
    }

    /// Check for a class token, ignoring ASCII case.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| {
                classes
                    .split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(class))
            })
            .unwrap_or(false)
    }

    /// Iterate over direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Find the first descendant (depth-first, document order) with the given
    /// tag and class token.
    ///
    /// Tag and class are compared without regard to ASCII case: hosts are
    /// known to report foreign-content tags upper-cased.
    pub fn find_by_class(&self, tag: &str, class: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.tag.eq_ignore_ascii_case(tag) && child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.find_by_class(tag, class) {
                return Some(found);
            }
        }
        None
    }

    /// Serialize the children of this element as markup.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            write_node(child, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => escape_into(text, false, out),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');
    if el.children.is_empty() && VOID_TAGS.contains(&el.tag.to_ascii_lowercase().as_str()) {
        return;
    }
    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Format a number for storage in an attribute.
/// Integral values are written without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A vector document holding top-level elements keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: String,
    /// Top-level elements, keyed by their `id` attribute.
    elements: HashMap<String, Element>,
    /// Paint order of elements (back to front).
    z_order: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            elements: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add an element on top of the paint order. Returns its id.
    pub fn add(&mut self, element: Element) -> Result<String, DocumentError> {
        let id = element.id().ok_or(DocumentError::MissingId)?.to_string();
        if self.elements.contains_key(&id) {
            return Err(DocumentError::DuplicateId(id));
        }
        self.z_order.push(id.clone());
        self.elements.insert(id.clone(), element);
        Ok(id)
    }

    /// Remove an element from the document.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.z_order.retain(|element_id| element_id != id);
        self.elements.remove(id)
    }

    /// Get an element by id.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Get a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Element ids in paint order (back to front).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.z_order.iter().map(String::as_str)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Serialization(e.to_string()))
    }

    /// Deserialize a document from JSON.
    ///
    /// Every element must be keyed by its own `id` attribute and the paint
    /// order must list each key exactly once.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_str(json).map_err(|e| DocumentError::Serialization(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<(), DocumentError> {
        for (key, element) in &self.elements {
            if element.id() != Some(key.as_str()) {
                return Err(DocumentError::Inconsistent(format!(
                    "element {} has id attribute {:?}",
                    key,
                    element.id()
                )));
            }
        }
        let mut seen = HashSet::new();
        for id in &self.z_order {
            if !self.elements.contains_key(id) {
                return Err(DocumentError::Inconsistent(format!("paint order lists unknown element {}", id)));
            }
            if !seen.insert(id.as_str()) {
                return Err(DocumentError::Inconsistent(format!("paint order lists {} twice", id)));
            }
        }
        if seen.len() != self.elements.len() {
            return Err(DocumentError::Inconsistent("paint order is missing elements".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let spec = ElementSpec::new(SVG_NS, "foreignObject")
            .with_attr("id", "svg_1")
            .with_attr("x", 10.0)
            .with_child(
                ElementSpec::new(XHTML_NS, "DIV")
                    .with_attr("class", "outer HtmlBox-Editor")
                    .with_child(ElementSpec::new(XHTML_NS, "p").with_text("a < b & c")),
            );
        Element::from_spec(&spec)
    }

    #[test]
    fn test_from_spec_stringifies_numbers() {
        let el = sample();
        assert_eq!(el.attr("x"), Some("10"));
        assert_eq!(el.number_attr("x"), Some(10.0));
        assert_eq!(el.id(), Some("svg_1"));
    }

    #[test]
    fn test_number_attr_rejects_garbage() {
        let mut el = Element::new(SVG_NS, "rect");
        el.set_attr("width", "wide");
        assert_eq!(el.number_attr("width"), None);
        assert_eq!(el.number_attr("height"), None);

        el.set_number_attr("width", -12.5);
        assert_eq!(el.attr("width"), Some("-12.5"));
    }

    #[test]
    fn test_find_by_class_ignores_case() {
        let el = sample();
        let found = el.find_by_class("div", "htmlbox-editor");
        assert!(found.is_some());
        assert_eq!(found.map(|e| e.tag.as_str()), Some("DIV"));
        assert!(el.find_by_class("span", "htmlbox-editor").is_none());
        assert!(el.find_by_class("div", "htmlbox").is_none());
    }

    #[test]
    fn test_find_by_class_skips_self() {
        let mut el = Element::new(XHTML_NS, "div");
        el.set_attr("class", "htmlbox-editor");
        assert!(el.find_by_class("div", "htmlbox-editor").is_none());
    }

    #[test]
    fn test_inner_html_escapes() {
        let el = sample();
        let region = el.find_by_class("div", "htmlbox-editor").unwrap();
        assert_eq!(region.inner_html(), "<p>a &lt; b &amp; c</p>");

        let mut br = Element::new(XHTML_NS, "br");
        br.set_attr("data-x", "\"q\"");
        let mut wrapper = Element::new(XHTML_NS, "div");
        wrapper.children.push(Node::Element(br));
        assert_eq!(wrapper.inner_html(), "<br data-x=\"&quot;q&quot;\">");
    }

    #[test]
    fn test_document_add_remove() {
        let mut doc = Document::new();
        let id = doc.add(sample()).unwrap();
        assert_eq!(id, "svg_1");
        assert_eq!(doc.len(), 1);

        assert!(matches!(doc.add(sample()), Err(DocumentError::DuplicateId(_))));
        assert!(matches!(
            doc.add(Element::new(SVG_NS, "rect")),
            Err(DocumentError::MissingId)
        ));

        assert!(doc.remove("svg_1").is_some());
        assert!(doc.is_empty());
        assert_eq!(doc.ids().count(), 0);
    }

    #[test]
    fn test_document_json_roundtrip() {
        let mut doc = Document::new();
        doc.add(sample()).unwrap();
        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.get("svg_1"), doc.get("svg_1"));
    }

    fn saved_json(key: &str, id: &str, z_order: &[&str]) -> String {
        let mut el = sample();
        el.set_attr("id", id);
        let mut elements = serde_json::Map::new();
        elements.insert(key.to_string(), serde_json::to_value(&el).unwrap());
        serde_json::json!({
            "id": "doc",
            "elements": elements,
            "z_order": z_order,
        })
        .to_string()
    }

    #[test]
    fn test_from_json_accepts_consistent_document() {
        let doc = Document::from_json(&saved_json("svg_4", "svg_4", &["svg_4"])).unwrap();
        assert_eq!(doc.ids().collect::<Vec<_>>(), vec!["svg_4"]);
    }

    #[test]
    fn test_from_json_rejects_key_id_mismatch() {
        let result = Document::from_json(&saved_json("svg_4", "svg_9", &["svg_4"]));
        assert!(matches!(result, Err(DocumentError::Inconsistent(_))));
    }

    #[test]
    fn test_from_json_rejects_bad_paint_order() {
        for z_order in [&["svg_4", "ghost"][..], &[][..], &["svg_4", "svg_4"][..]] {
            let result = Document::from_json(&saved_json("svg_4", "svg_4", z_order));
            assert!(matches!(result, Err(DocumentError::Inconsistent(_))), "{:?}", z_order);
        }
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "namespace": "http://www.w3.org/2000/svg",
            "element": "foreignObject",
            "attr": { "x": 5, "id": "svg_9" },
            "children": ["hello"]
        }"#;
        let spec: ElementSpec = serde_json::from_str(json).unwrap();
        let el = Element::from_spec(&spec);
        assert_eq!(el.attr("x"), Some("5"));
        assert_eq!(el.children, vec![Node::Text("hello".to_string())]);
    }
}
