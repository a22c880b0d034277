//! Owned markup document tree.
//!
//! Input documents are parsed exactly once (by a `MarkupParser` adapter) into
//! this structure and then shared by validation, the definition model and
//! every template invocation that uses them.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A parsed input document together with the logical name it was loaded as.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    name: String,
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(name: impl Into<String>, root: XmlElement) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Logical name, e.g. `log.xml`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

/// One element: local name, attributes and ordered mixed content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: BTreeMap<String, String>,
    nodes: Vec<XmlNode>,
}

/// Mixed content node.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.nodes.push(XmlNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.nodes.push(XmlNode::Element(child));
    }

    /// Append character data, merging with a preceding text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(XmlNode::Text(previous)) => previous.push_str(&text),
            _ => self.nodes.push(XmlNode::Text(text)),
        }
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn nodes(&self) -> &[XmlNode] {
        &self.nodes
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct children with the given local name, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |e| e.name == name)
    }

    /// Concatenated character data of the direct text children.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// `true` if any direct text child contains non-whitespace characters.
    pub fn has_significant_text(&self) -> bool {
        self.nodes.iter().any(|n| match n {
            XmlNode::Text(t) => !t.trim().is_empty(),
            XmlNode::Element(_) => false,
        })
    }
}

// Templates see elements as `{ name, attrs, children, nodes, text }`:
// `children` holds only elements, `nodes` keeps the mixed content in order.
impl Serialize for XmlElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children: Vec<&XmlElement> = self.child_elements().collect();
        let mut state = serializer.serialize_struct("XmlElement", 6)?;
        state.serialize_field("kind", "element")?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("attrs", &self.attributes)?;
        state.serialize_field("children", &children)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("text", &self.text())?;
        state.end()
    }
}

impl Serialize for XmlNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Element(element) => element.serialize(serializer),
            Self::Text(value) => {
                let mut state = serializer.serialize_struct("XmlText", 2)?;
                state.serialize_field("kind", "text")?;
                state.serialize_field("value", value)?;
                state.end()
            }
        }
    }
}
