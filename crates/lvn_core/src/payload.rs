//! Event payloads sent over the live channel
//!
//! Wire shape:
//!
//! ```json
//! { "type": "click", "event": "remove", "value": { "id": "x", "index": 2 } }
//! ```
//!
//! A payload is built fresh for every dispatch and handed off by value; nothing
//! retains it after [`Coordinator::push_event`](crate::Coordinator::push_event).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Channel message kind used for user-generated events
pub const EVENT: &str = "event";

/// Payload `type` for click-like gestures (including list deletion)
pub const CLICK: &str = "click";

/// Payload `type` for form change/submit events
pub const FORM: &str = "form";

/// A single user-generated event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub event: String,
    pub value: Map<String, Value>,
}

impl EventPayload {
    pub fn new(kind: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            event: event.into(),
            value: Map::new(),
        }
    }

    /// A `click` payload
    pub fn click(event: impl Into<String>) -> Self {
        Self::new(CLICK, event)
    }

    /// A `form` payload
    pub fn form(event: impl Into<String>) -> Self {
        Self::new(FORM, event)
    }

    /// Replace the value bag
    pub fn with_value(mut self, value: Map<String, Value>) -> Self {
        self.value = value;
        self
    }

    /// Insert a single entry into the value bag
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.value.insert(key.into(), value.into());
        self
    }

    /// The wire representation: `{type, event, value}` in that order
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(self.kind.clone()));
        map.insert("event".into(), Value::String(self.event.clone()));
        map.insert("value".into(), Value::Object(self.value.clone()));
        Value::Object(map)
    }
}
