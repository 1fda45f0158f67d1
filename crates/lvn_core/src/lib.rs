//! LiveView Native Core
//!
//! This crate provides the foundational pieces for binding server-pushed
//! markup to native behavior:
//!
//! - **Elements**: Immutable snapshots of markup nodes and their attributes
//! - **Markup**: A small parser for the server's template language
//! - **Decoding**: Typed, schema-driven attribute decoding with precise errors
//! - **Live Models**: Per-form state shared between snapshots and user edits
//! - **Event Dispatch**: Fire-and-forget payloads over the live channel
//!
//! # Example
//!
//! ```rust
//! use lvn_core::{markup, LiveContext, LiveViewModel, RecordingCoordinator, EventPayload};
//! use std::rc::Rc;
//!
//! let element = markup::parse(r#"<list phx-delete="remove" phx-value-id="x"/>"#).unwrap();
//! assert_eq!(element.attr_if_present("phx-delete"), Some("remove"));
//!
//! let recorder = Rc::new(RecordingCoordinator::new());
//! let ctx = LiveContext::new(recorder.clone(), Rc::new(LiveViewModel::new()));
//!
//! let payload = EventPayload::click("remove")
//!     .with_value(element.build_phx_value_payload())
//!     .with_entry("index", 2);
//! ctx.dispatch_event(payload);
//! assert_eq!(recorder.len(), 1);
//! ```

pub mod context;
pub mod coordinator;
pub mod decode;
pub mod diff;
pub mod element;
pub mod error;
pub mod live;
pub mod markup;
pub mod payload;
pub mod registry;

pub use serde_json::Value;

pub use context::{ErrorPolicy, LiveContext};
pub use coordinator::{Coordinator, RecordingCoordinator};
pub use decode::{AttributeDecoder, AttributeEnum, Decode, Encode, ValueDecoder};
pub use diff::{diff, ChangeCategory, ElementDiff, ElementHash};
pub use element::{attrs, Element, PHX_VALUE_PREFIX};
pub use error::{
    ConfigurationError, DecodeError, DecodeErrorKind, DecodeResult, ParseError, RenderError,
    RenderResult,
};
pub use live::FormModel;
pub use payload::EventPayload;
pub use registry::{LiveViewModel, ModelHandle, ModelRegistry};
