//! Rendered view tree
//!
//! A [`View`] is the observable stand-in for a native view: what kind of view
//! it is, the effects wrapped around it (outermost last), its children, and
//! the gesture capabilities it offers. Hosts translate this tree into toolkit
//! calls; tests inspect it directly.
//!
//! # Example
//!
//! ```rust
//! use lvn_layout::{Effect, View};
//!
//! let view = View::text(Some("Hello"))
//!     .with_effect(Effect::Brightness { amount: 0.2 });
//!
//! assert_eq!(view.effect_names(), vec!["brightness"]);
//! assert!(!view.supports_delete());
//! ```

use std::rc::Rc;

use lvn_core::attribute_enum;
use lvn_core::Value;
use smallvec::SmallVec;

use crate::font::Font;
use crate::geometry::EdgeInsets;

attribute_enum! {
    /// Native list presentation
    pub enum ListStyle {
        Plain => "plain",
        Grouped => "grouped",
        InsetGrouped => "inset-grouped",
    }
}

/// Callback invoked with the row indices a delete gesture selected
pub type DeleteHandler = Rc<dyn Fn(&[usize])>;

/// An effect a modifier wrapped around a view
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Brightness { amount: f64 },
    Font(Font),
    Padding(EdgeInsets),
    ListRowInsets(EdgeInsets),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Brightness { .. } => "brightness",
            Effect::Font(_) => "font",
            Effect::Padding(_) => "padding",
            Effect::ListRowInsets(_) => "list_row_insets",
        }
    }
}

/// What a view is
#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    /// Static text
    Text { content: Option<String> },
    /// A list; each child is a row
    List { style: ListStyle },
    /// A live form bound to the model with this id
    Form { id: String },
    /// An input field showing the form model's current value
    Field { name: String, value: Value },
    /// Any other element, rendered as a plain container
    Container { tag: String },
    /// Placeholder for a subtree that failed to render
    Error { message: String },
}

/// A node of the rendered view tree
#[derive(Clone)]
pub struct View {
    kind: ViewKind,
    effects: SmallVec<[Effect; 4]>,
    children: Vec<View>,
    on_delete: Option<DeleteHandler>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            effects: SmallVec::new(),
            children: Vec::new(),
            on_delete: None,
        }
    }

    pub fn text(content: Option<&str>) -> Self {
        Self::new(ViewKind::Text {
            content: content.map(str::to_string),
        })
    }

    pub fn container(tag: impl Into<String>) -> Self {
        Self::new(ViewKind::Container { tag: tag.into() })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ViewKind::Error {
            message: message.into(),
        })
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_children(mut self, children: Vec<View>) -> Self {
        self.children = children;
        self
    }

    pub fn child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    /// Wrap the view in one more effect
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Offer a delete gesture on this view's rows
    pub fn with_delete_handler(mut self, handler: DeleteHandler) -> Self {
        self.on_delete = Some(handler);
        self
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    /// Effects in application order, innermost first
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(Effect::name).collect()
    }

    pub fn children(&self) -> &[View] {
        &self.children
    }

    /// First view in this subtree (self included, pre-order) matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&View) -> bool) -> Option<&View> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// The form view bound to `id`, if rendered in this subtree
    pub fn find_form(&self, id: &str) -> Option<&View> {
        self.find(&|view| matches!(&view.kind, ViewKind::Form { id: form } if form == id))
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Whether the delete gesture is available at all
    pub fn supports_delete(&self) -> bool {
        self.on_delete.is_some()
    }

    /// Perform a delete gesture over `indices`
    ///
    /// Returns `false` without doing anything when the view offers no delete
    /// gesture.
    pub fn delete_rows(&self, indices: &[usize]) -> bool {
        match &self.on_delete {
            Some(handler) => {
                handler(indices);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind)
            .field("effects", &self.effects)
            .field("children", &self.children)
            .field("supports_delete", &self.supports_delete())
            .finish()
    }
}
