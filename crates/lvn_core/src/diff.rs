//! Structural comparison of element snapshots
//!
//! Elements carry no object identity: an inbound snapshot is "the same"
//! element as the previous one when its content matches. This module provides
//! subtree hashes for quick equality checks and a category-level diff that
//! tells a component what an update touched.
//!
//! # Example
//!
//! ```rust
//! use lvn_core::diff::diff;
//! use lvn_core::Element;
//!
//! let old = Element::new("form").with_attr("id", "f1").with_attr("phx-change", "a");
//! let new = Element::new("form").with_attr("id", "f1").with_attr("phx-change", "b");
//!
//! let result = diff(&old, &new);
//! assert!(result.changes.attributes);
//! assert!(!result.changes.children);
//! assert_eq!(result.changed_attributes, vec!["phx-change".to_string()]);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::element::Element;

/// Content hash of an element subtree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHash(pub u64);

impl ElementHash {
    /// Hash of the entire subtree
    pub fn compute_tree(element: &Element) -> Self {
        let mut hasher = DefaultHasher::new();
        hash_tree(element, &mut hasher);
        ElementHash(hasher.finish())
    }
}

fn hash_props(element: &Element, hasher: &mut impl Hasher) {
    element.tag().hash(hasher);
    for (name, value) in element.attributes() {
        name.hash(hasher);
        // serde_json::Value has no Hash impl; its canonical text is stable
        value.to_string().hash(hasher);
    }
    element.text().hash(hasher);
}

fn hash_tree(element: &Element, hasher: &mut impl Hasher) {
    hash_props(element, hasher);
    element.children().len().hash(hasher);
    for child in element.children() {
        hash_tree(child, hasher);
    }
}

/// Categories of change between two snapshots
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeCategory {
    /// Tag changed; the snapshots describe different kinds of node
    pub tag: bool,
    /// An attribute was added, removed or changed
    pub attributes: bool,
    /// Text content changed
    pub text: bool,
    /// Any descendant changed, or children were added/removed
    pub children: bool,
}

/// Result of comparing two snapshots
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDiff {
    pub changes: ChangeCategory,
    /// Attribute names whose presence or value differs, in old-then-new order
    pub changed_attributes: Vec<String>,
}

/// Compare two snapshots of the same element
pub fn diff(old: &Element, new: &Element) -> ElementDiff {
    let mut changed_attributes = Vec::new();
    for (name, value) in old.attributes() {
        if new.attribute(name) != Some(value) {
            changed_attributes.push(name.clone());
        }
    }
    for name in new.attributes().keys() {
        if !old.has_attr(name) {
            changed_attributes.push(name.clone());
        }
    }

    let changes = ChangeCategory {
        tag: old.tag() != new.tag(),
        attributes: !changed_attributes.is_empty(),
        text: old.text() != new.text(),
        children: old.children() != new.children(),
    };

    ElementDiff {
        changes,
        changed_attributes,
    }
}
