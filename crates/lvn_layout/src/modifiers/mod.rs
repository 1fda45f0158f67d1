//! Built-in modifiers
//!
//! One file per modifier; each owns its params shape and its application rule.

mod brightness;
mod font;
mod list_row_insets;
mod padding;

pub use brightness::Brightness;
pub use font::FontModifier;
pub use list_row_insets::ListRowInsets;
pub use padding::Padding;
