//! Brightness
//!
//! `{ "type": "brightness", "amount": 0.5 }`
//!
//! `amount` is expected in `[0, 1]` (0 is no effect, 1 is full white) but is
//! not validated; out-of-range values reach the toolkit unchanged.

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::Value;
use serde_json::Map;

use crate::modifier::Modifier;
use crate::view::{Effect, View};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brightness {
    pub amount: f64,
}

impl Brightness {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl Modifier for Brightness {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn apply(&self, view: View) -> View {
        view.with_effect(Effect::Brightness {
            amount: self.amount,
        })
    }
}

impl Decode for Brightness {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self::new(decoder.decode_field("amount")?))
    }
}

impl Encode for Brightness {
    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("amount".into(), self.amount.encode());
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvn_core::DecodeErrorKind;
    use serde_json::json;

    #[test]
    fn test_out_of_range_amount_is_forwarded() {
        let v = json!({ "amount": 1.5 });
        let brightness: Brightness = ValueDecoder::new(&v, "", "circle").decode().unwrap();
        let view = brightness.apply(View::container("circle"));
        assert_eq!(view.effects(), &[Effect::Brightness { amount: 1.5 }]);
    }

    #[test]
    fn test_amount_is_required() {
        let v = json!({});
        let err = ValueDecoder::new(&v, "modifiers[0]", "circle")
            .decode::<Brightness>()
            .unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert_eq!(err.field, "modifiers[0].amount");
    }

    #[test]
    fn test_amount_type_mismatch() {
        let v = json!({ "amount": "bright" });
        let err = ValueDecoder::new(&v, "", "circle")
            .decode::<Brightness>()
            .unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::TypeMismatch { expected: "number", .. }));
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        for raw in ["NaN", "inf"] {
            let v = json!({ "amount": raw });
            let err = ValueDecoder::new(&v, "modifiers[0]", "circle")
                .decode::<Brightness>()
                .unwrap_err();
            assert_eq!(err.field, "modifiers[0].amount");
            assert!(matches!(err.kind, DecodeErrorKind::TypeMismatch { expected: "number", .. }));
        }
    }
}
