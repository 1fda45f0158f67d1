//! List row insets
//!
//! Same payload shape as padding; the insets apply to the row a view sits in
//! when it is a direct child of a list.

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::Value;

use crate::geometry::EdgeInsets;
use crate::modifier::Modifier;
use crate::view::{Effect, View};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListRowInsets {
    pub insets: EdgeInsets,
}

impl ListRowInsets {
    pub fn new(insets: EdgeInsets) -> Self {
        Self { insets }
    }
}

impl Modifier for ListRowInsets {
    fn name(&self) -> &'static str {
        "list_row_insets"
    }

    fn apply(&self, view: View) -> View {
        view.with_effect(Effect::ListRowInsets(self.insets))
    }
}

impl Decode for ListRowInsets {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self::new(decoder.decode()?))
    }
}

impl Encode for ListRowInsets {
    fn encode(&self) -> Value {
        self.insets.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ignores_type_key() {
        let v = json!({ "type": "list_row_insets", "top": 0, "leading": 20, "bottom": 0, "trailing": 20 });
        let modifier: ListRowInsets = ValueDecoder::new(&v, "", "text").decode().unwrap();
        assert_eq!(modifier.insets, EdgeInsets::horizontal(20.0));
        assert_eq!(modifier.apply(View::text(None)).effect_names(), vec!["list_row_insets"]);
    }
}
