//! LiveView Native Widgets
//!
//! Element-bound components and the builder that turns an element tree into
//! a rendered view tree:
//!
//! - [`LiveList`]: native list with an optional delete gesture
//! - [`LiveForm`]: form bound to a live model, with its mount lifecycle
//! - [`ViewBuilder`]: tag dispatch, modifier application and error policy

pub mod builder;
pub mod form;
pub mod list;

pub use builder::{build, ViewBuilder};
pub use form::{FormPhase, FormSet, LiveForm};
pub use list::LiveList;
