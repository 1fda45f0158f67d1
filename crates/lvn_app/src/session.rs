//! Live session
//!
//! A [`LiveSession`] owns everything that outlives a single snapshot: the
//! coordinator, the model registry and the mounted forms. Each call to
//! [`render`](LiveSession::render) is one pass over a new snapshot of the
//! whole tree.
//!
//! # Example
//!
//! ```rust
//! use lvn_app::{LiveSession, SessionConfig};
//! use lvn_core::RecordingCoordinator;
//! use std::rc::Rc;
//!
//! let events = Rc::new(RecordingCoordinator::new());
//! let mut session = LiveSession::new(SessionConfig::default(), events.clone());
//!
//! let view = session
//!     .render_markup(r#"<list phx-delete="remove" phx-value-id="x"><text>a</text></list>"#)
//!     .unwrap();
//!
//! view.delete_rows(&[0]);
//! assert_eq!(events.len(), 1);
//! ```

use std::rc::Rc;

use lvn_core::live::FormModel;
use lvn_core::{markup, Coordinator, Element, LiveContext, LiveViewModel, ModelHandle};
use lvn_layout::View;
use lvn_widgets::{FormSet, LiveForm, ViewBuilder};
use tracing::{debug, error};

use crate::config::SessionConfig;
use crate::error::Result;

/// Rendering state for one live view
pub struct LiveSession {
    config: SessionConfig,
    coordinator: Rc<dyn Coordinator>,
    models: Rc<LiveViewModel>,
    forms: FormSet,
    passes: u64,
}

impl LiveSession {
    pub fn new(config: SessionConfig, coordinator: Rc<dyn Coordinator>) -> Self {
        Self {
            config,
            coordinator,
            models: Rc::new(LiveViewModel::new()),
            forms: FormSet::new(),
            passes: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Context handed to components during a pass
    pub fn context(&self) -> LiveContext {
        LiveContext::new(self.coordinator.clone(), self.models.clone())
            .with_error_policy(self.config.error_policy)
    }

    /// Render a snapshot of the whole tree
    ///
    /// Forms seen for the first time are mounted, known forms receive the
    /// new snapshot, and forms missing from it are unmounted. A failed pass
    /// leaves the mounted forms and their models as they were.
    pub fn render(&mut self, root: &Element) -> Result<View> {
        let ctx = self.context();
        self.passes += 1;

        self.forms.begin_pass();
        let view = match ViewBuilder::new(&mut self.forms).build(root, &ctx) {
            Ok(view) => view,
            Err(err) => {
                error!("render pass {} failed: {}", self.passes, err);
                self.forms.abort_pass();
                return Err(err.into());
            }
        };

        let unmounted = self
            .forms
            .end_pass(&ctx, self.config.evict_unmounted_models);
        debug!(
            "render pass {}: {} forms mounted, {} unmounted",
            self.passes,
            self.forms.len(),
            unmounted.len()
        );
        Ok(view)
    }

    /// Parse server markup and render it
    pub fn render_markup(&mut self, text: &str) -> Result<View> {
        let root = markup::parse(text)?;
        self.render(&root)
    }

    /// A mounted form, to drive edits and submits
    pub fn form(&self, id: &str) -> Option<&LiveForm> {
        self.forms.get(id)
    }

    /// Get-or-create the model for a form id
    pub fn form_model(&self, id: &str) -> ModelHandle<FormModel> {
        self.models.get_form(id)
    }

    pub fn models(&self) -> &Rc<LiveViewModel> {
        &self.models
    }

    /// Number of completed or attempted render passes
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

impl std::fmt::Debug for LiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSession")
            .field("config", &self.config)
            .field("forms", &self.forms)
            .field("passes", &self.passes)
            .finish()
    }
}
