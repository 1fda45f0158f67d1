//! Live form model
//!
//! A [`FormModel`] is the per-form mutable state kept in sync with inbound
//! element snapshots (server truth) and outbound user edits. It is created the
//! first time a form with a given id is looked up, and lives in the
//! [`LiveViewModel`](crate::registry::LiveViewModel) registry for as long as
//! the registry keeps it.
//!
//! # Reconciliation
//!
//! Server values and local edits are tracked separately. When a new snapshot
//! arrives, each pending local edit is resolved field by field:
//!
//! - the snapshot carries the edited value: the edit is synced and dropped
//! - the snapshot changed the field since the last sync: the server wins and
//!   the edit is dropped
//! - the snapshot left the field untouched: the edit survives
//!
//! With no local edits this is plain last-write-wins on the snapshot.

use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::coordinator::Coordinator;
use crate::element::{attrs, Element};
use crate::payload::{EventPayload, EVENT};
use crate::registry::ModelHandle;

/// State for one live form, keyed by the form element's id
#[derive(Clone)]
pub struct FormModel {
    id: String,
    /// Non-owning; the session owns the coordinator
    coordinator: Option<Weak<dyn Coordinator>>,
    change_event: Option<String>,
    /// Field values from the latest element snapshot
    server_values: IndexMap<String, Value>,
    /// User edits not yet reflected by a snapshot
    local_edits: IndexMap<String, Value>,
}

impl FormModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinator: None,
            change_event: None,
            server_values: IndexMap::new(),
            local_edits: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // =========================================================================
    // Binding
    // =========================================================================

    /// Attach the coordinator events are dispatched through
    pub fn bind(&mut self, coordinator: &Rc<dyn Coordinator>) {
        self.coordinator = Some(Rc::downgrade(coordinator));
    }

    /// Whether a live coordinator is attached
    pub fn is_bound(&self) -> bool {
        self.coordinator
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    pub fn set_change_event(&mut self, event: Option<String>) {
        self.change_event = event;
    }

    pub fn change_event(&self) -> Option<&str> {
        self.change_event.as_deref()
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Absorb the field values of a new element snapshot
    pub fn update_from_element(&mut self, element: &Element) {
        let incoming = collect_fields(element);

        let edits = std::mem::take(&mut self.local_edits);
        for (name, local) in edits {
            let previous = self.server_values.get(&name);
            let next = incoming.get(&name);

            if next == Some(&local) {
                continue;
            }
            if next != previous {
                debug!(
                    "form '{}': server changed '{}', discarding local edit",
                    self.id, name
                );
                continue;
            }
            self.local_edits.insert(name, local);
        }

        self.server_values = incoming;
    }

    /// Current value of a field, local edit first
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.local_edits
            .get(name)
            .or_else(|| self.server_values.get(name))
    }

    /// All current field values, in server field order followed by local-only fields
    pub fn values(&self) -> Map<String, Value> {
        let mut values: Map<String, Value> = self
            .server_values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (name, value) in &self.local_edits {
            values.insert(name.clone(), value.clone());
        }
        values
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.local_edits.is_empty()
    }

    /// Record a user edit
    ///
    /// Returns the change event payload when one was declared. Hand it to
    /// [`FormModel::dispatch`] once the model is no longer borrowed.
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<EventPayload> {
        self.local_edits.insert(name.into(), value.into());
        let event = self.change_event.clone()?;
        Some(EventPayload::form(event).with_value(self.values()))
    }

    /// Submit event payload carrying every current field value
    pub fn submit_payload(&self, event: &str) -> EventPayload {
        EventPayload::form(event).with_value(self.values())
    }

    /// The model as it would be after absorbing `element`, leaving this one untouched
    pub fn preview(&self, element: &Element) -> FormModel {
        let mut next = self.clone();
        next.update_from_element(element);
        next
    }

    /// The bound coordinator, while it is alive
    pub fn coordinator(&self) -> Option<Rc<dyn Coordinator>> {
        self.coordinator.as_ref().and_then(Weak::upgrade)
    }

    /// Push `payload` through the model's coordinator
    ///
    /// The model is not borrowed while the coordinator runs, so the
    /// coordinator may read it back. Returns whether the event was sent.
    pub fn dispatch(model: &ModelHandle<FormModel>, payload: EventPayload) -> bool {
        let coordinator = model.borrow().coordinator();
        match coordinator {
            Some(coordinator) => {
                coordinator.push_event(EVENT, payload);
                true
            }
            None => {
                warn!(
                    "form '{}': no live coordinator, dropping '{}'",
                    model.borrow().id,
                    payload.event
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for FormModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormModel")
            .field("id", &self.id)
            .field("bound", &self.is_bound())
            .field("change_event", &self.change_event)
            .field("server_values", &self.server_values)
            .field("local_edits", &self.local_edits)
            .finish()
    }
}

/// Field values declared by a form's descendants: `name` → `value` (or `""`)
pub fn collect_fields(element: &Element) -> IndexMap<String, Value> {
    element
        .descendants()
        .filter_map(|el| {
            let name = el.attr_if_present(attrs::NAME)?;
            let value = el
                .attribute(attrs::VALUE)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            Some((name.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::RecordingCoordinator;
    use serde_json::json;
    use std::cell::RefCell;

    fn snapshot(email: &str, name: &str) -> Element {
        Element::new("form")
            .with_attr("id", "f1")
            .child(
                Element::new("text-field")
                    .with_attr("name", "email")
                    .with_attr("value", email),
            )
            .child(
                Element::new("text-field")
                    .with_attr("name", "name")
                    .with_attr("value", name),
            )
    }

    #[test]
    fn test_collect_fields() {
        let el = snapshot("a@b.c", "Ann").child(Element::new("toggle").with_attr("name", "remember"));
        let fields = collect_fields(&el);
        assert_eq!(fields["email"], json!("a@b.c"));
        assert_eq!(fields["remember"], json!(""));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_last_snapshot_wins() {
        let mut model = FormModel::new("f1");
        model.update_from_element(&snapshot("a", "Ann"));
        model.update_from_element(&snapshot("b", "Bob"));

        assert_eq!(model.value("email"), Some(&json!("b")));
        assert_eq!(model.value("name"), Some(&json!("Bob")));
    }

    #[test]
    fn test_local_edit_survives_untouched_field() {
        let mut model = FormModel::new("f1");
        model.update_from_element(&snapshot("a", "Ann"));
        model.set_value("email", "typed");

        // server only changed `name`
        model.update_from_element(&snapshot("a", "Bob"));
        assert_eq!(model.value("email"), Some(&json!("typed")));
        assert_eq!(model.value("name"), Some(&json!("Bob")));
        assert!(model.has_pending_edits());
    }

    #[test]
    fn test_server_change_overrides_local_edit() {
        let mut model = FormModel::new("f1");
        model.update_from_element(&snapshot("a", "Ann"));
        model.set_value("email", "typed");

        model.update_from_element(&snapshot("server", "Ann"));
        assert_eq!(model.value("email"), Some(&json!("server")));
        assert!(!model.has_pending_edits());
    }

    #[test]
    fn test_echoed_edit_is_synced() {
        let mut model = FormModel::new("f1");
        model.update_from_element(&snapshot("a", "Ann"));
        model.set_value("email", "typed");

        model.update_from_element(&snapshot("typed", "Ann"));
        assert!(!model.has_pending_edits());
        assert_eq!(model.value("email"), Some(&json!("typed")));
    }

    fn bound(coordinator: &Rc<dyn Coordinator>) -> ModelHandle<FormModel> {
        let mut model = FormModel::new("f1");
        model.bind(coordinator);
        model.set_change_event(Some("validate".into()));
        model.update_from_element(&snapshot("a", "Ann"));
        Rc::new(RefCell::new(model))
    }

    #[test]
    fn test_change_event_dispatch() {
        let recorder = Rc::new(RecordingCoordinator::new());
        let coordinator: Rc<dyn Coordinator> = recorder.clone();
        let model = bound(&coordinator);

        let payload = model.borrow_mut().set_value("email", "b").unwrap();
        assert!(FormModel::dispatch(&model, payload));

        let events = recorder.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "event");
        assert_eq!(
            events[0].1.to_value(),
            json!({ "type": "form", "event": "validate", "value": { "email": "b", "name": "Ann" } })
        );
    }

    #[test]
    fn test_no_change_event_no_dispatch() {
        let recorder = Rc::new(RecordingCoordinator::new());
        let coordinator: Rc<dyn Coordinator> = recorder.clone();

        let mut model = FormModel::new("f1");
        model.bind(&coordinator);
        assert!(model.set_value("email", "b").is_none());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_coordinator_can_read_model_during_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<ModelHandle<FormModel>>>> = Rc::new(RefCell::new(None));

        let coordinator: Rc<dyn Coordinator> = {
            let seen = seen.clone();
            let slot = slot.clone();
            Rc::new(move |_: &str, _: EventPayload| {
                if let Some(model) = slot.borrow().as_ref() {
                    seen.borrow_mut().push(model.borrow().value("email").cloned());
                }
            })
        };
        let model = bound(&coordinator);
        *slot.borrow_mut() = Some(model.clone());

        let payload = model.borrow_mut().set_value("email", "b").unwrap();
        assert!(FormModel::dispatch(&model, payload));
        let payload = model.borrow().submit_payload("save");
        assert!(FormModel::dispatch(&model, payload));

        assert_eq!(*seen.borrow(), vec![Some(json!("b")), Some(json!("b"))]);
    }

    #[test]
    fn test_preview_leaves_model_untouched() {
        let mut model = FormModel::new("f1");
        model.update_from_element(&snapshot("a", "Ann"));
        model.set_value("email", "typed");

        let next = model.preview(&snapshot("a", "Bob"));
        assert_eq!(next.value("name"), Some(&json!("Bob")));
        assert_eq!(next.value("email"), Some(&json!("typed")));
        assert_eq!(model.value("name"), Some(&json!("Ann")));
    }

    #[test]
    fn test_dropped_coordinator() {
        let model = Rc::new(RefCell::new(FormModel::new("f1")));
        {
            let coordinator: Rc<dyn Coordinator> = Rc::new(RecordingCoordinator::new());
            model.borrow_mut().bind(&coordinator);
            assert!(model.borrow().is_bound());
        }
        assert!(!model.borrow().is_bound());
        let payload = model.borrow().submit_payload("save");
        assert!(!FormModel::dispatch(&model, payload));
    }
}
