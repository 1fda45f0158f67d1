//! Live list
//!
//! Renders an element's children as the rows of a native list, and offers a
//! delete gesture when the element declares `phx-delete`.
//!
//! # Delete payload
//!
//! ```json
//! { "type": "click", "event": "<phx-delete>", "value": { ...phx-value-*, "index": 2 } }
//! ```
//!
//! A gesture that selects several rows reports only the first selected index.
//! The server receives one event per gesture regardless of how many rows it
//! covered.

use std::rc::Rc;

use lvn_core::decode::AttributeEnum;
use lvn_core::{attrs, ConfigurationError, Element, EventPayload, LiveContext, Value};
use lvn_layout::{DeleteHandler, ListStyle, View, ViewKind};
use tracing::debug;

/// Component state for one `<list>` element
#[derive(Clone, Debug)]
pub struct LiveList {
    style: ListStyle,
    delete_event: Option<String>,
    value_payload: serde_json::Map<String, Value>,
}

impl LiveList {
    /// Validate the element and capture what the list needs from it
    ///
    /// An unknown `style` is rejected rather than rendered as plain.
    pub fn new(element: &Element) -> Result<Self, ConfigurationError> {
        Ok(Self {
            style: list_style(element)?,
            delete_event: element.attr_if_present(attrs::PHX_DELETE).map(str::to_string),
            value_payload: element.build_phx_value_payload(),
        })
    }

    pub fn style(&self) -> ListStyle {
        self.style
    }

    pub fn delete_event(&self) -> Option<&str> {
        self.delete_event.as_deref()
    }

    pub fn supports_delete(&self) -> bool {
        self.delete_event.is_some()
    }

    /// Payload for a delete gesture over `indices`
    ///
    /// `None` when the list offers no delete gesture or nothing was selected.
    pub fn delete_payload(&self, indices: &[usize]) -> Option<EventPayload> {
        let event = self.delete_event.as_ref()?;
        // only the first selected row is reported
        let index = *indices.first()?;
        if indices.len() > 1 {
            debug!(
                "list delete '{}': {} rows selected, reporting index {}",
                event,
                indices.len(),
                index
            );
        }
        Some(
            EventPayload::click(event.clone())
                .with_value(self.value_payload.clone())
                .with_entry(attrs::INDEX, index),
        )
    }

    /// Dispatch a delete gesture; returns whether an event was sent
    pub fn delete(&self, indices: &[usize], ctx: &LiveContext) -> bool {
        match self.delete_payload(indices) {
            Some(payload) => {
                ctx.dispatch_event(payload);
                true
            }
            None => false,
        }
    }

    /// Handler to attach to the rendered view, if deletion is offered at all
    pub fn delete_handler(&self, ctx: &LiveContext) -> Option<DeleteHandler> {
        if !self.supports_delete() {
            return None;
        }
        let list = self.clone();
        let ctx = ctx.clone();
        Some(Rc::new(move |indices: &[usize]| {
            list.delete(indices, &ctx);
        }))
    }

    /// The list view over already-rendered rows
    pub fn render(&self, rows: Vec<View>, ctx: &LiveContext) -> View {
        let view = View::new(ViewKind::List { style: self.style }).with_children(rows);
        match self.delete_handler(ctx) {
            Some(handler) => view.with_delete_handler(handler),
            None => view,
        }
    }
}

fn list_style(element: &Element) -> Result<ListStyle, ConfigurationError> {
    match element.attribute(attrs::STYLE) {
        None => Ok(ListStyle::Plain),
        Some(Value::String(raw)) => {
            ListStyle::from_attr(raw).ok_or_else(|| ConfigurationError::InvalidListStyle {
                value: raw.clone(),
            })
        }
        Some(other) => Err(ConfigurationError::InvalidListStyle {
            value: other.to_string(),
        }),
    }
}
