//! LiveView Native Application
//!
//! Ties the workspace together for a host:
//!
//! - [`LiveSession`]: renders successive snapshots and keeps form lifecycles
//! - [`SessionConfig`]: error policy, model eviction and log filter
//! - [`init_tracing`]: one-call subscriber setup
//!
//! # Example
//!
//! ```rust
//! use lvn_app::{init_tracing, LiveSession, SessionConfig};
//! use lvn_core::RecordingCoordinator;
//! use std::rc::Rc;
//!
//! let config = SessionConfig::lenient();
//! init_tracing(&config);
//!
//! let mut session = LiveSession::new(config, Rc::new(RecordingCoordinator::new()));
//! let view = session.render_markup(r#"<list style="sidebar"/>"#).unwrap();
//! assert!(matches!(view.kind(), lvn_layout::ViewKind::Error { .. }));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use config::SessionConfig;
pub use error::{LiveError, Result};
pub use logging::init_tracing;
pub use session::LiveSession;

// Re-export the component crates for hosts that only depend on lvn_app
pub use lvn_core;
pub use lvn_layout;
pub use lvn_widgets;
