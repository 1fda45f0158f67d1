//! Live form
//!
//! A [`LiveForm`] wraps a `<form>` element and the [`FormModel`] registered
//! under its id. Each mounted instance moves through two phases:
//!
//! ```text
//! Uninitialized --mount--> Bound --update--> Bound
//! ```
//!
//! Mounting binds the model to the coordinator, captures `phx-change` and
//! seeds the model from the element. Every later snapshot is pushed into the
//! model, which reconciles it against pending local edits.
//!
//! [`FormSet`] tracks the forms of one rendered tree across passes, mounting
//! new ids, updating known ones and unmounting the ones that disappeared.
//! A pass only stages that work; it is applied by
//! [`end_pass`](FormSet::end_pass) and dropped by
//! [`abort_pass`](FormSet::abort_pass).

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use lvn_core::live::FormModel;
use lvn_core::{
    attrs, diff, ConfigurationError, Element, ElementHash, LiveContext, ModelHandle, Value,
};
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

/// Lifecycle phase of a mounted form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Uninitialized,
    Bound,
}

/// Component state for one `<form>` element
#[derive(Debug)]
pub struct LiveForm {
    id: String,
    element: Element,
    hash: ElementHash,
    phase: FormPhase,
    model: Option<ModelHandle<FormModel>>,
}

impl LiveForm {
    /// A form needs an id to be found in the model registry
    pub fn new(element: &Element) -> Result<Self, ConfigurationError> {
        let id = identify(element)?;
        Ok(Self {
            id: id.to_string(),
            element: element.clone(),
            hash: ElementHash::compute_tree(element),
            phase: FormPhase::Uninitialized,
            model: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The latest snapshot this form has seen
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The bound model; `None` until mounted
    pub fn model(&self) -> Option<&ModelHandle<FormModel>> {
        self.model.as_ref()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// First appearance: bind, capture the change event, seed from the element
    pub fn mount(&mut self, ctx: &LiveContext) {
        if self.phase == FormPhase::Bound {
            trace!("form '{}' already mounted", self.id);
            return;
        }

        let model = ctx.get_form(&self.id);
        {
            let mut model = model.borrow_mut();
            model.bind(ctx.coordinator());
            model.set_change_event(self.element.attr_if_present(attrs::PHX_CHANGE).map(str::to_string));
            model.update_from_element(&self.element);
        }

        debug!("form '{}' mounted", self.id);
        self.model = Some(model);
        self.phase = FormPhase::Bound;
    }

    /// A new snapshot of this form's element arrived
    pub fn update(&mut self, element: &Element) {
        let hash = ElementHash::compute_tree(element);
        if hash == self.hash {
            trace!("form '{}' unchanged", self.id);
            return;
        }
        let changes = diff(&self.element, element);
        if changes.changed_attributes.iter().any(|a| a == attrs::PHX_CHANGE) {
            debug!(
                "form '{}': phx-change changed after mount, keeping the captured event",
                self.id
            );
        }

        self.element = element.clone();
        self.hash = hash;
        // before mount the snapshot is only kept; mount seeds from it
        if let (FormPhase::Bound, Some(model)) = (self.phase, &self.model) {
            debug!("form '{}' updated: {:?}", self.id, changes.changes);
            model.borrow_mut().update_from_element(element);
        }
    }

    /// Drop the model reference; the registry decides whether it lives on
    pub fn unmount(&mut self) {
        debug!("form '{}' unmounted", self.id);
        self.model = None;
        self.phase = FormPhase::Uninitialized;
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Record a user edit; dispatches the change event if one was captured
    pub fn edit(&self, name: &str, value: impl Into<Value>) -> bool {
        match &self.model {
            Some(model) => {
                let payload = model.borrow_mut().set_value(name, value);
                payload.is_some_and(|payload| FormModel::dispatch(model, payload))
            }
            None => {
                warn!("form '{}': edit of '{}' before mount", self.id, name);
                false
            }
        }
    }

    /// Dispatch `phx-submit` with the current field values
    pub fn submit(&self) -> bool {
        let Some(event) = self.element.attr_if_present(attrs::PHX_SUBMIT) else {
            debug!("form '{}' declares no phx-submit", self.id);
            return false;
        };
        match &self.model {
            Some(model) => {
                let payload = model.borrow().submit_payload(event);
                FormModel::dispatch(model, payload)
            }
            None => {
                warn!("form '{}': submit before mount", self.id);
                false
            }
        }
    }

    /// Current value of a field
    pub fn value(&self, name: &str) -> Option<Value> {
        self.model.as_ref()?.borrow().value(name).cloned()
    }
}

/// The form id, or the error for a form without one
pub fn identify(element: &Element) -> Result<&str, ConfigurationError> {
    element
        .id()
        .ok_or_else(|| ConfigurationError::MissingIdentifier {
            tag: element.tag().to_string(),
        })
}

// =============================================================================
// FormSet
// =============================================================================

/// Lifecycle work staged during a pass
#[derive(Debug)]
enum Pending {
    Mount(LiveForm),
    Update(Element),
}

/// Mounted forms of one rendered tree, keyed by id
#[derive(Debug, Default)]
pub struct FormSet {
    mounted: IndexMap<String, LiveForm>,
    pending: IndexMap<String, Pending>,
    seen: FxHashSet<String>,
}

impl FormSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render pass
    pub fn begin_pass(&mut self) {
        self.seen.clear();
        self.pending.clear();
    }

    /// A form element was reached during the current pass
    ///
    /// Stages a mount the first time its id is seen and an update afterwards.
    /// Returns a detached preview of the model with the snapshot absorbed, for
    /// the view to read; neither the registry nor any mounted form changes
    /// until [`end_pass`](Self::end_pass).
    pub fn visit(
        &mut self,
        element: &Element,
        ctx: &LiveContext,
    ) -> Result<ModelHandle<FormModel>, ConfigurationError> {
        let id = identify(element)?;
        if !self.seen.insert(id.to_string()) {
            warn!("form id '{}' appears more than once; the forms share one model", id);
        }

        match self.pending.get_mut(id) {
            Some(Pending::Mount(form)) => form.update(element),
            Some(Pending::Update(snapshot)) => *snapshot = element.clone(),
            None if self.mounted.contains_key(id) => {
                self.pending
                    .insert(id.to_string(), Pending::Update(element.clone()));
            }
            None => {
                let form = LiveForm::new(element)?;
                self.pending.insert(id.to_string(), Pending::Mount(form));
            }
        }

        let preview = match ctx.models().try_get_form(id) {
            Some(model) => {
                let current = model.borrow();
                current.preview(element)
            }
            None => FormModel::new(id).preview(element),
        };
        Ok(Rc::new(RefCell::new(preview)))
    }

    /// Finish a successful render pass
    ///
    /// Applies the staged mounts and updates in visiting order, then unmounts
    /// every form that was not visited. With `evict`, the unmounted forms'
    /// models are removed from the registry as well. Returns the unmounted ids.
    pub fn end_pass(&mut self, ctx: &LiveContext, evict: bool) -> Vec<String> {
        for (id, work) in std::mem::take(&mut self.pending) {
            match work {
                Pending::Mount(mut form) => {
                    form.mount(ctx);
                    self.mounted.insert(id, form);
                }
                Pending::Update(element) => {
                    if let Some(form) = self.mounted.get_mut(&id) {
                        form.update(&element);
                    }
                }
            }
        }

        let gone: Vec<String> = self
            .mounted
            .keys()
            .filter(|id| !self.seen.contains(*id))
            .cloned()
            .collect();

        for id in &gone {
            if let Some(mut form) = self.mounted.shift_remove(id) {
                form.unmount();
            }
            if evict {
                debug!("evicting model for form '{}'", id);
                ctx.models().remove_form(id);
            }
        }
        self.seen.clear();
        gone
    }

    /// Abandon a failed render pass; nothing it staged is applied
    pub fn abort_pass(&mut self) {
        if !self.pending.is_empty() {
            debug!("discarding {} staged form changes", self.pending.len());
        }
        self.pending.clear();
        self.seen.clear();
    }

    pub fn get(&self, id: &str) -> Option<&LiveForm> {
        self.mounted.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.mounted.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvn_core::{LiveViewModel, RecordingCoordinator};
    use serde_json::json;
    use std::rc::Rc;

    fn context() -> (Rc<RecordingCoordinator>, LiveContext) {
        let recorder = Rc::new(RecordingCoordinator::new());
        let ctx = LiveContext::new(recorder.clone(), Rc::new(LiveViewModel::new()));
        (recorder, ctx)
    }

    fn form(email: &str) -> Element {
        Element::new("form")
            .with_attr("id", "f1")
            .with_attr("phx-change", "validate")
            .with_attr("phx-submit", "save")
            .child(
                Element::new("text-field")
                    .with_attr("name", "email")
                    .with_attr("value", email),
            )
    }

    #[test]
    fn test_id_is_required() {
        assert!(LiveForm::new(&Element::new("form").with_attr("id", "f1")).is_ok());
        assert_eq!(
            LiveForm::new(&Element::new("form")).unwrap_err(),
            ConfigurationError::MissingIdentifier { tag: "form".into() }
        );
    }

    #[test]
    fn test_mount_binds_and_seeds() {
        let (_, ctx) = context();
        let mut live = LiveForm::new(&form("a")).unwrap();
        assert_eq!(live.phase(), FormPhase::Uninitialized);
        assert!(live.model().is_none());

        live.mount(&ctx);
        assert_eq!(live.phase(), FormPhase::Bound);

        let model = ctx.get_form("f1");
        assert!(model.borrow().is_bound());
        assert_eq!(model.borrow().change_event(), Some("validate"));
        assert_eq!(live.value("email"), Some(json!("a")));
    }

    #[test]
    fn test_successive_updates_last_write_wins() {
        let (_, ctx) = context();
        let mut live = LiveForm::new(&form("a")).unwrap();
        live.mount(&ctx);

        live.update(&form("b"));
        live.update(&form("c"));
        assert_eq!(live.value("email"), Some(json!("c")));
    }

    #[test]
    fn test_change_event_captured_once() {
        let (recorder, ctx) = context();
        let mut live = LiveForm::new(&form("a")).unwrap();
        live.mount(&ctx);

        live.update(&form("a").with_attr("phx-change", "other"));
        assert!(live.edit("email", "typed"));
        assert_eq!(recorder.drain()[0].1.event, "validate");
    }

    #[test]
    fn test_edit_and_submit() {
        let (recorder, ctx) = context();
        let mut live = LiveForm::new(&form("a")).unwrap();
        live.mount(&ctx);

        assert!(live.edit("email", "b@c.d"));
        assert!(live.submit());

        let events = recorder.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1].1.to_value(),
            json!({ "type": "form", "event": "save", "value": { "email": "b@c.d" } })
        );
    }

    #[test]
    fn test_interaction_before_mount() {
        let live = LiveForm::new(&form("a")).unwrap();
        assert!(!live.edit("email", "x"));
        assert!(!live.submit());
    }

    #[test]
    fn test_form_set_lifecycle() {
        let (_, ctx) = context();
        let mut forms = FormSet::new();

        forms.begin_pass();
        forms.visit(&form("a"), &ctx).unwrap();
        assert!(forms.end_pass(&ctx, false).is_empty());
        assert_eq!(forms.get("f1").map(LiveForm::phase), Some(FormPhase::Bound));

        forms.begin_pass();
        let preview = forms.visit(&form("b"), &ctx).unwrap();
        assert_eq!(preview.borrow().value("email"), Some(&json!("b")));
        assert_eq!(ctx.get_form("f1").borrow().value("email"), Some(&json!("a")));
        forms.end_pass(&ctx, false);
        assert_eq!(ctx.get_form("f1").borrow().value("email"), Some(&json!("b")));

        forms.begin_pass();
        assert_eq!(forms.end_pass(&ctx, false), vec!["f1".to_string()]);
        assert!(forms.is_empty());
        // kept in the registry without eviction
        assert!(ctx.models().try_get_form("f1").is_some());
    }

    #[test]
    fn test_form_set_eviction() {
        let (_, ctx) = context();
        let mut forms = FormSet::new();

        forms.begin_pass();
        forms.visit(&form("a"), &ctx).unwrap();
        forms.end_pass(&ctx, true);

        forms.begin_pass();
        forms.end_pass(&ctx, true);
        assert!(ctx.models().try_get_form("f1").is_none());
    }

    #[test]
    fn test_aborted_pass_changes_nothing() {
        let (recorder, ctx) = context();
        let mut forms = FormSet::new();

        forms.begin_pass();
        forms.visit(&form("a"), &ctx).unwrap();
        forms.end_pass(&ctx, false);

        forms.begin_pass();
        forms.visit(&form("b"), &ctx).unwrap();
        forms
            .visit(&Element::new("form").with_attr("id", "f2"), &ctx)
            .unwrap();
        forms.abort_pass();

        assert_eq!(forms.ids().collect::<Vec<_>>(), vec!["f1"]);
        assert_eq!(forms.get("f1").unwrap().value("email"), Some(json!("a")));
        assert!(ctx.models().try_get_form("f2").is_none());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_edit_lets_coordinator_read_model() {
        let models = Rc::new(LiveViewModel::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let coordinator: Rc<dyn lvn_core::Coordinator> = {
            let models = models.clone();
            let seen = seen.clone();
            Rc::new(move |_: &str, _: lvn_core::EventPayload| {
                let model = models.get_form("f1");
                seen.borrow_mut().push(model.borrow().value("email").cloned());
            })
        };
        let ctx = LiveContext::new(coordinator, models);
        let mut live = LiveForm::new(&form("a")).unwrap();
        live.mount(&ctx);

        assert!(live.edit("email", "b"));
        assert!(live.submit());
        assert_eq!(*seen.borrow(), vec![Some(json!("b")), Some(json!("b"))]);
    }
}
