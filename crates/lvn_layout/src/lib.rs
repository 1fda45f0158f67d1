//! LiveView Native Layout
//!
//! The rendered view tree and the modifiers that wrap it:
//!
//! - **Views**: [`View`] nodes standing in for native views, with their effects
//!   and gesture capabilities
//! - **Modifiers**: [`Modifier`] implementations for brightness, font, padding
//!   and list row insets
//! - **Modifier stacks**: ordered, fully decoded `modifiers` attributes
//!
//! # Example
//!
//! ```rust
//! use lvn_core::Element;
//! use lvn_layout::{ModifierStack, View};
//!
//! let el = Element::new("text")
//!     .with_attr("modifiers", r#"[{"type": "brightness", "amount": 0.3}]"#);
//!
//! let stack = ModifierStack::decode_attribute(&el).unwrap();
//! let view = stack.apply(View::text(Some("Hello")));
//! assert_eq!(view.effect_names(), vec!["brightness"]);
//! ```

pub mod font;
pub mod geometry;
pub mod modifier;
pub mod modifiers;
pub mod view;

pub use font::{Design, Font, FontSize, TextStyle, Weight};
pub use geometry::EdgeInsets;
pub use modifier::{Modifier, ModifierKind, ModifierSpec, ModifierStack};
pub use modifiers::{Brightness, FontModifier, ListRowInsets, Padding};
pub use view::{DeleteHandler, Effect, ListStyle, View, ViewKind};
