//! Markup element model
//!
//! An [`Element`] is one node of the server-sent declarative UI tree: a tag
//! name, an ordered set of attributes with unique keys, optional text content,
//! and ordered child elements.
//!
//! Elements are immutable snapshots. Two snapshots of "the same" element are
//! compared by content (`PartialEq`), never by reference.
//!
//! # Example
//!
//! ```rust
//! use lvn_core::Element;
//!
//! let list = Element::new("list")
//!     .with_attr("phx-delete", "remove")
//!     .with_attr("phx-value-id", "x")
//!     .child(Element::new("text").with_text("Row 1"))
//!     .child(Element::new("text").with_text("Row 2"));
//!
//! assert_eq!(list.attr_if_present("phx-delete"), Some("remove"));
//! assert_eq!(list.children().len(), 2);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute prefix for the value bag sent along with events
pub const PHX_VALUE_PREFIX: &str = "phx-value-";

/// Reserved attribute names
pub mod attrs {
    /// Stable identifier (required on forms)
    pub const ID: &str = "id";
    /// Form change event name
    pub const PHX_CHANGE: &str = "phx-change";
    /// Form submit event name
    pub const PHX_SUBMIT: &str = "phx-submit";
    /// List delete event name
    pub const PHX_DELETE: &str = "phx-delete";
    /// List style selector
    pub const STYLE: &str = "style";
    /// Synthesized delete index (never author-set)
    pub const INDEX: &str = "index";
    /// JSON-encoded modifier list
    pub const MODIFIERS: &str = "modifiers";
    /// Form field name
    pub const NAME: &str = "name";
    /// Form field value
    pub const VALUE: &str = "value";
}

/// A node in the server-sent markup tree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    #[serde(default)]
    attributes: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag and no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set a string attribute, replacing any existing value for the key
    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_attr_value(name, Value::String(value.into()))
    }

    /// Set an attribute to a structured value (nested keyed bag, number, ...)
    pub fn with_attr_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The element's tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All attributes in declaration order
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Raw attribute value
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether the attribute is declared at all
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// String attribute value, if present and a string
    pub fn attr_if_present(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attr_if_present(attrs::ID)
    }

    /// Text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child elements in order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first iterator over all descendants (excluding self)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Collect every `phx-value-<key>` attribute into an ordered bag keyed by `<key>`
    pub fn build_phx_value_payload(&self) -> serde_json::Map<String, Value> {
        self.attributes
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(PHX_VALUE_PREFIX)
                    .filter(|key| !key.is_empty())
                    .map(|key| (key.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Depth-first pre-order iterator over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
