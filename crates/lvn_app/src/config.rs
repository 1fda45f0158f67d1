//! Session configuration
//!
//! Read from a TOML file or built in code:
//!
//! ```toml
//! error_policy = "degrade-subtree"
//! evict_unmounted_models = true
//! log_filter = "lvn_widgets=debug,info"
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use lvn_core::ErrorPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for a [`LiveSession`](crate::LiveSession)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// What happens when a subtree fails to render
    pub error_policy: ErrorPolicy,
    /// Remove a form's model from the registry when the form unmounts
    pub evict_unmounted_models: bool,
    /// `EnvFilter` directive used by [`init_tracing`](crate::init_tracing)
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SessionConfig {
    /// Fail on the first malformed subtree and keep models across unmounts.
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::FailFast,
            evict_unmounted_models: false,
            log_filter: "info".to_string(),
        }
    }

    /// Keep rendering around malformed subtrees and drop models of unmounted forms.
    pub fn lenient() -> Self {
        Self {
            error_policy: ErrorPolicy::DegradeSubtree,
            evict_unmounted_models: true,
            log_filter: "warn".to_string(),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_eviction(mut self, evict: bool) -> Self {
        self.evict_unmounted_models = evict;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse from TOML text; missing keys take their defaults
    pub fn from_toml(text: &str) -> crate::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string(self).map_err(|err| crate::LiveError::Config(err.to_string()))
    }
}
