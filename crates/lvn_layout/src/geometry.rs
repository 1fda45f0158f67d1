//! Geometry params

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::Value;
use serde_json::Map;

/// Insets from each edge, in points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub leading: f64,
    pub bottom: f64,
    pub trailing: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn new(top: f64, leading: f64, bottom: f64, trailing: f64) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Same inset on every edge
    pub const fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Leading and trailing insets
    pub const fn horizontal(value: f64) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    /// Top and bottom insets
    pub const fn vertical(value: f64) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }
}

impl Decode for EdgeInsets {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self {
            top: decoder.decode_field("top")?,
            leading: decoder.decode_field("leading")?,
            bottom: decoder.decode_field("bottom")?,
            trailing: decoder.decode_field("trailing")?,
        })
    }
}

impl Encode for EdgeInsets {
    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("top".into(), self.top.encode());
        map.insert("leading".into(), self.leading.encode());
        map.insert("bottom".into(), self.bottom.encode());
        map.insert("trailing".into(), self.trailing.encode());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvn_core::DecodeErrorKind;
    use serde_json::json;

    #[test]
    fn test_decode_all_edges() {
        let v = json!({ "top": 1, "leading": "2", "bottom": 3.5, "trailing": 4 });
        let insets: EdgeInsets = ValueDecoder::new(&v, "", "text").decode().unwrap();
        assert_eq!(insets, EdgeInsets::new(1.0, 2.0, 3.5, 4.0));
    }

    #[test]
    fn test_every_edge_is_required() {
        let v = json!({ "top": 1, "leading": 2, "bottom": 3 });
        let err = ValueDecoder::new(&v, "modifiers[0]", "text")
            .decode::<EdgeInsets>()
            .unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert_eq!(err.field, "modifiers[0].trailing");
    }

    #[test]
    fn test_encode_decodes_back() {
        let insets = EdgeInsets::horizontal(16.0);
        let encoded = insets.encode();
        let decoded: EdgeInsets = ValueDecoder::new(&encoded, "", "text").decode().unwrap();
        assert_eq!(decoded, insets);
    }
}
