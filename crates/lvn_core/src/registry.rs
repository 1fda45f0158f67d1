//! Live model registry
//!
//! Keyed get-or-create storage for per-element models. Exactly one model
//! exists per element id; every lookup for that id returns the same shared
//! instance until it is removed.
//!
//! # Example
//!
//! ```rust
//! use lvn_core::registry::LiveViewModel;
//! use std::rc::Rc;
//!
//! let models = LiveViewModel::new();
//! let a = models.get_form("signup");
//! let b = models.get_form("signup");
//! assert!(Rc::ptr_eq(&a, &b));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::live::FormModel;

/// Shared handle to a model
pub type ModelHandle<T> = Rc<RefCell<T>>;

/// Models of one type, keyed by element id
pub struct ModelRegistry<T> {
    models: RefCell<FxHashMap<String, ModelHandle<T>>>,
    factory: Box<dyn Fn(&str) -> T>,
}

impl<T> ModelRegistry<T> {
    /// Create a registry that builds missing models with `factory(id)`
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> T + 'static,
    {
        Self {
            models: RefCell::new(FxHashMap::default()),
            factory: Box::new(factory),
        }
    }

    /// Get the model for `id`, creating it if needed
    pub fn get(&self, id: &str) -> ModelHandle<T> {
        if let Some(model) = self.models.borrow().get(id) {
            return model.clone();
        }

        tracing::debug!("creating live model for '{}'", id);
        let model = Rc::new(RefCell::new((self.factory)(id)));
        self.models
            .borrow_mut()
            .insert(id.to_string(), model.clone());
        model
    }

    /// Get the model if it exists, without creating
    pub fn try_get(&self, id: &str) -> Option<ModelHandle<T>> {
        self.models.borrow().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<ModelHandle<T>> {
        self.models.borrow_mut().remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.models.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.borrow().is_empty()
    }
}

/// All live models of a rendered view, keyed by element id
pub struct LiveViewModel {
    forms: ModelRegistry<FormModel>,
}

impl LiveViewModel {
    pub fn new() -> Self {
        Self {
            forms: ModelRegistry::with_factory(|id: &str| FormModel::new(id)),
        }
    }

    /// Get-or-create the form model for a form element id
    pub fn get_form(&self, id: &str) -> ModelHandle<FormModel> {
        self.forms.get(id)
    }

    pub fn try_get_form(&self, id: &str) -> Option<ModelHandle<FormModel>> {
        self.forms.try_get(id)
    }

    pub fn remove_form(&self, id: &str) -> Option<ModelHandle<FormModel>> {
        self.forms.remove(id)
    }

    pub fn forms(&self) -> &ModelRegistry<FormModel> {
        &self.forms
    }
}

impl Default for LiveViewModel {
    fn default() -> Self {
        Self::new()
    }
}
