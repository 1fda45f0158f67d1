//! Padding
//!
//! The entry itself is the inset bag:
//! `{ "type": "padding", "top": 8, "leading": 16, "bottom": 8, "trailing": 16 }`

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::Value;

use crate::geometry::EdgeInsets;
use crate::modifier::Modifier;
use crate::view::{Effect, View};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    pub insets: EdgeInsets,
}

impl Padding {
    pub fn new(insets: EdgeInsets) -> Self {
        Self { insets }
    }
}

impl Modifier for Padding {
    fn name(&self) -> &'static str {
        "padding"
    }

    fn apply(&self, view: View) -> View {
        view.with_effect(Effect::Padding(self.insets))
    }
}

impl Decode for Padding {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self::new(decoder.decode()?))
    }
}

impl Encode for Padding {
    fn encode(&self) -> Value {
        self.insets.encode()
    }
}
