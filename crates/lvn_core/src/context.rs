//! Live context
//!
//! The context is threaded explicitly through component construction. It
//! exposes only what components need: model lookup, event dispatch, the
//! enclosing form (if any), and the error policy for failing subtrees.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::coordinator::Coordinator;
use crate::live::FormModel;
use crate::payload::{EventPayload, EVENT};
use crate::registry::{LiveViewModel, ModelHandle};

/// What to do when a subtree fails to decode or violates a component contract
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Propagate the error and abort rendering
    #[default]
    FailFast,
    /// Replace the failing subtree with an error placeholder and keep rendering
    DegradeSubtree,
}

/// Explicit context passed to every element-bound component
#[derive(Clone)]
pub struct LiveContext {
    coordinator: Rc<dyn Coordinator>,
    models: Rc<LiveViewModel>,
    form_model: Option<ModelHandle<FormModel>>,
    error_policy: ErrorPolicy,
}

impl LiveContext {
    pub fn new(coordinator: Rc<dyn Coordinator>, models: Rc<LiveViewModel>) -> Self {
        Self {
            coordinator,
            models,
            form_model: None,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Child context for the descendants of a form
    pub fn with_form_model(&self, model: ModelHandle<FormModel>) -> Self {
        Self {
            form_model: Some(model),
            ..self.clone()
        }
    }

    pub fn coordinator(&self) -> &Rc<dyn Coordinator> {
        &self.coordinator
    }

    pub fn models(&self) -> &Rc<LiveViewModel> {
        &self.models
    }

    /// Get-or-create the form model for `id`
    pub fn get_form(&self, id: &str) -> Rc<RefCell<FormModel>> {
        self.models.get_form(id)
    }

    /// The enclosing form's model, if rendering inside a form
    pub fn form_model(&self) -> Option<&ModelHandle<FormModel>> {
        self.form_model.as_ref()
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Fire-and-forget dispatch over the live channel
    pub fn dispatch_event(&self, payload: EventPayload) {
        tracing::debug!("dispatch {} '{}'", payload.kind, payload.event);
        self.coordinator.push_event(EVENT, payload);
    }
}

impl std::fmt::Debug for LiveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveContext")
            .field("forms", &self.models.forms().len())
            .field("in_form", &self.form_model.is_some())
            .field("error_policy", &self.error_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::RecordingCoordinator;

    #[test]
    fn test_dispatch_goes_through_coordinator() {
        let recorder = Rc::new(RecordingCoordinator::new());
        let ctx = LiveContext::new(recorder.clone(), Rc::new(LiveViewModel::new()));

        ctx.dispatch_event(EventPayload::click("remove").with_entry("index", 0));
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EVENT);
        assert_eq!(events[0].1.event, "remove");
    }

    #[test]
    fn test_form_child_context_shares_models() {
        let ctx = LiveContext::new(
            Rc::new(RecordingCoordinator::new()),
            Rc::new(LiveViewModel::new()),
        );
        assert!(ctx.form_model().is_none());

        let model = ctx.get_form("f1");
        let child = ctx.with_form_model(model.clone());
        assert!(Rc::ptr_eq(child.form_model().unwrap(), &model));
        assert!(Rc::ptr_eq(child.models(), ctx.models()));
    }

    #[test]
    fn test_error_policy_serde() {
        let policy: ErrorPolicy = serde_json::from_str("\"degrade-subtree\"").unwrap();
        assert_eq!(policy, ErrorPolicy::DegradeSubtree);
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::FailFast);
    }
}
