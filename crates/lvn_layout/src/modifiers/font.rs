//! Font
//!
//! `{ "type": "font", "font": { "type": "system", "style": "headline" } }`
//!
//! Sets the font for the view and its descendants. See [`Font`] for the
//! descriptor shapes.

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::Value;
use serde_json::Map;

use crate::font::Font;
use crate::modifier::Modifier;
use crate::view::{Effect, View};

#[derive(Clone, Debug, PartialEq)]
pub struct FontModifier {
    pub font: Font,
}

impl FontModifier {
    pub fn new(font: Font) -> Self {
        Self { font }
    }
}

impl Modifier for FontModifier {
    fn name(&self) -> &'static str {
        "font"
    }

    fn apply(&self, view: View) -> View {
        view.with_effect(Effect::Font(self.font.clone()))
    }
}

impl Decode for FontModifier {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self::new(decoder.decode_field("font")?))
    }
}

impl Encode for FontModifier {
    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("font".into(), self.font.encode());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{Design, TextStyle};
    use serde_json::json;

    #[test]
    fn test_decode_nested_font() {
        let v = json!({ "font": { "type": "system", "style": "large_title", "design": "serif" } });
        let modifier: FontModifier = ValueDecoder::new(&v, "", "text").decode().unwrap();
        assert_eq!(
            modifier.font,
            Font::system(TextStyle::LargeTitle).design(Design::Serif)
        );
    }

    #[test]
    fn test_font_error_path() {
        let v = json!({ "font": { "type": "system", "style": "giant" } });
        let err = ValueDecoder::new(&v, "modifiers[2]", "text")
            .decode::<FontModifier>()
            .unwrap_err();
        assert_eq!(err.field, "modifiers[2].font.style");
    }
}
