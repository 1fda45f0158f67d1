//! Attribute decoding
//!
//! Every params type owns an explicit schema: a [`Decode`] impl that walks a
//! [`ValueDecoder`] and returns either the decoded value or a [`DecodeError`].
//! There is no defaulting here; optional fields are spelled out with
//! [`ValueDecoder::decode_optional`] by the params type that allows them.
//!
//! Decoding is a pure function of the element snapshot, so decoding the same
//! element twice always yields equal params.
//!
//! # Example
//!
//! ```rust
//! use lvn_core::decode::{AttributeDecoder, Decode, DecodeResult, ValueDecoder};
//! use lvn_core::Element;
//!
//! #[derive(Debug, PartialEq)]
//! struct Opacity(f64);
//!
//! impl Decode for Opacity {
//!     fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
//!         Ok(Opacity(decoder.f64()?))
//!     }
//! }
//!
//! let el = Element::new("rect").with_attr("opacity", "0.25");
//! let opacity: Opacity = AttributeDecoder::new(&el).decode_attr("opacity").unwrap();
//! assert_eq!(opacity, Opacity(0.25));
//! ```

use serde_json::Value;

use crate::element::Element;
pub use crate::error::{DecodeError, DecodeErrorKind, DecodeResult};

/// Decode a typed value from a position in an attribute payload
pub trait Decode: Sized {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self>;
}

/// Inverse of [`Decode`] for params types that can be written back to markup
pub trait Encode {
    fn encode(&self) -> Value;
}

/// A closed set of string values, e.g. `"plain" | "grouped"`
///
/// Implement with [`attribute_enum!`](crate::attribute_enum).
pub trait AttributeEnum: Sized + Copy {
    /// Every accepted string, in declaration order
    const VALUES: &'static [&'static str];

    fn from_attr(value: &str) -> Option<Self>;

    fn as_attr(&self) -> &'static str;
}

/// Declare a fieldless enum backed by fixed attribute strings.
///
/// Generates [`AttributeEnum`], [`Decode`] and [`Encode`] impls.
///
/// ```rust
/// lvn_core::attribute_enum! {
///     /// Horizontal alignment
///     pub enum Alignment {
///         Leading => "leading",
///         Center => "center",
///         Trailing => "trailing",
///     }
/// }
///
/// use lvn_core::decode::AttributeEnum;
/// assert_eq!(Alignment::from_attr("center"), Some(Alignment::Center));
/// assert_eq!(Alignment::Trailing.as_attr(), "trailing");
/// ```
#[macro_export]
macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::decode::AttributeEnum for $name {
            const VALUES: &'static [&'static str] = &[$($value),+];

            fn from_attr(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn as_attr(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value ),+
                }
            }
        }

        impl $crate::decode::Decode for $name {
            fn decode(
                decoder: &$crate::decode::ValueDecoder<'_>,
            ) -> $crate::error::DecodeResult<Self> {
                decoder.enumeration()
            }
        }

        impl $crate::decode::Encode for $name {
            fn encode(&self) -> $crate::Value {
                $crate::Value::String(
                    <Self as $crate::decode::AttributeEnum>::as_attr(self).to_string(),
                )
            }
        }
    };
}

/// Short type name of a JSON value for diagnostics
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// ValueDecoder
// =============================================================================

/// Cursor over a value inside an attribute payload
///
/// Carries the dotted field path and the element tag so failures point at the
/// exact offending field.
#[derive(Clone, Debug)]
pub struct ValueDecoder<'a> {
    value: &'a Value,
    path: String,
    element: &'a str,
}

impl<'a> ValueDecoder<'a> {
    pub fn new(value: &'a Value, path: impl Into<String>, element: &'a str) -> Self {
        Self {
            value,
            path: path.into(),
            element,
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn element(&self) -> &'a str {
        self.element
    }

    /// Build an error located at this cursor
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.path.clone(), self.element)
    }

    fn mismatch(&self, expected: &'static str) -> DecodeError {
        self.error(DecodeErrorKind::TypeMismatch {
            expected,
            found: value_kind(self.value),
        })
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Descend into a required key of a keyed bag
    pub fn field(&self, key: &str) -> DecodeResult<ValueDecoder<'a>> {
        self.optional_field(key)?.ok_or_else(|| self.missing(key))
    }

    /// A `MissingField` error for `key` under this cursor
    pub fn missing(&self, key: &str) -> DecodeError {
        DecodeError::missing(self.child_path(key), self.element)
    }

    /// Descend into an optional key; `null` counts as absent
    pub fn optional_field(&self, key: &str) -> DecodeResult<Option<ValueDecoder<'a>>> {
        let object = self.value.as_object().ok_or_else(|| self.mismatch("object"))?;
        Ok(object
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| ValueDecoder::new(v, self.child_path(key), self.element)))
    }

    /// Whether a keyed bag declares the key (non-null)
    pub fn contains(&self, key: &str) -> bool {
        self.value
            .as_object()
            .and_then(|o| o.get(key))
            .is_some_and(|v| !v.is_null())
    }

    /// Cursors over every item of an array, in order
    pub fn items(&self) -> DecodeResult<Vec<ValueDecoder<'a>>> {
        let items = self.value.as_array().ok_or_else(|| self.mismatch("array"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, v)| ValueDecoder::new(v, format!("{}[{}]", self.path, i), self.element))
            .collect())
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    /// Finite floating point; numeric strings are accepted since markup
    /// attributes are text. `NaN` and infinities are rejected.
    pub fn f64(&self) -> DecodeResult<f64> {
        let n = match self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|n| n.is_finite()).ok_or_else(|| self.mismatch("number"))
    }

    pub fn string(&self) -> DecodeResult<&'a str> {
        self.value.as_str().ok_or_else(|| self.mismatch("string"))
    }

    /// Boolean; `"true"` / `"false"` strings are accepted
    pub fn bool(&self) -> DecodeResult<bool> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s == "true" => Ok(true),
            Value::String(s) if s == "false" => Ok(false),
            _ => Err(self.mismatch("bool")),
        }
    }

    /// One of an enumerated set of strings
    pub fn enumeration<E: AttributeEnum>(&self) -> DecodeResult<E> {
        let raw = self.string()?;
        E::from_attr(raw).ok_or_else(|| {
            self.error(DecodeErrorKind::InvalidEnumValue {
                value: raw.to_string(),
                expected: E::VALUES,
            })
        })
    }

    // =========================================================================
    // Typed
    // =========================================================================

    pub fn decode<T: Decode>(&self) -> DecodeResult<T> {
        T::decode(self)
    }

    pub fn decode_field<T: Decode>(&self, key: &str) -> DecodeResult<T> {
        self.field(key)?.decode()
    }

    pub fn decode_optional<T: Decode>(&self, key: &str) -> DecodeResult<Option<T>> {
        self.optional_field(key)?.map(|d| d.decode()).transpose()
    }
}

impl Decode for f64 {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        decoder.f64()
    }
}

impl Decode for String {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        decoder.string().map(str::to_string)
    }
}

impl Decode for bool {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        decoder.bool()
    }
}

impl Encode for f64 {
    fn encode(&self) -> Value {
        Value::from(*self)
    }
}

impl Encode for String {
    fn encode(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Encode for bool {
    fn encode(&self) -> Value {
        Value::Bool(*self)
    }
}

// =============================================================================
// AttributeDecoder
// =============================================================================

/// Decoder over an element's top-level attributes
#[derive(Clone, Copy, Debug)]
pub struct AttributeDecoder<'a> {
    element: &'a Element,
}

impl<'a> AttributeDecoder<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Cursor over an attribute, if declared
    pub fn optional(&self, name: &str) -> Option<ValueDecoder<'a>> {
        self.element
            .attribute(name)
            .map(|v| ValueDecoder::new(v, name, self.element.tag()))
    }

    /// Cursor over a required attribute
    pub fn required(&self, name: &str) -> DecodeResult<ValueDecoder<'a>> {
        self.optional(name)
            .ok_or_else(|| DecodeError::missing(name, self.element.tag()))
    }

    pub fn decode_attr<T: Decode>(&self, name: &str) -> DecodeResult<T> {
        self.required(name)?.decode()
    }

    pub fn decode_optional_attr<T: Decode>(&self, name: &str) -> DecodeResult<Option<T>> {
        self.optional(name).map(|d| d.decode()).transpose()
    }

    /// Parse an attribute whose text carries a JSON document
    ///
    /// Structured values already present on the element are returned as-is.
    pub fn json(&self, name: &str) -> DecodeResult<Option<Value>> {
        match self.element.attribute(name) {
            None => Ok(None),
            Some(Value::String(raw)) => serde_json::from_str(raw).map(Some).map_err(|err| {
                tracing::debug!("attribute '{}' is not valid JSON: {}", name, err);
                DecodeError::new(
                    DecodeErrorKind::TypeMismatch {
                        expected: "JSON",
                        found: "string",
                    },
                    name,
                    self.element.tag(),
                )
            }),
            Some(other) => Ok(Some(other.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::attribute_enum! {
        enum Weight {
            Light => "light",
            Bold => "bold",
        }
    }

    #[test]
    fn test_f64_accepts_numbers_and_numeric_strings() {
        let n = json!(0.5);
        let s = json!(" 2.25 ");
        assert_eq!(ValueDecoder::new(&n, "amount", "circle").f64(), Ok(0.5));
        assert_eq!(ValueDecoder::new(&s, "amount", "circle").f64(), Ok(2.25));
    }

    #[test]
    fn test_f64_rejects_non_finite_strings() {
        for raw in ["NaN", "inf", "-infinity"] {
            let v = json!(raw);
            assert_eq!(
                ValueDecoder::new(&v, "amount", "circle").f64().unwrap_err().kind,
                DecodeErrorKind::TypeMismatch {
                    expected: "number",
                    found: "string"
                },
                "{raw}"
            );
        }
    }

    #[test]
    fn test_type_mismatch_reports_path_and_kinds() {
        let v = json!({ "font": { "size": "large" } });
        let root = ValueDecoder::new(&v, "modifiers[0]", "text");
        let err = root.field("font").unwrap().decode_field::<f64>("size").unwrap_err();

        assert_eq!(err.field, "modifiers[0].font.size");
        assert_eq!(err.element, "text");
        assert_eq!(
            err.kind,
            DecodeErrorKind::TypeMismatch {
                expected: "number",
                found: "string"
            }
        );
    }

    #[test]
    fn test_missing_field() {
        let v = json!({ "top": 1 });
        let err = ValueDecoder::new(&v, "", "text").field("leading").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert_eq!(err.field, "leading");
    }

    #[test]
    fn test_null_is_absent() {
        let v = json!({ "weight": null });
        let d = ValueDecoder::new(&v, "", "text");
        assert!(!d.contains("weight"));
        assert_eq!(d.decode_optional::<Weight>("weight"), Ok(None));
    }

    #[test]
    fn test_invalid_enum_value() {
        let v = json!("heavy");
        let err = ValueDecoder::new(&v, "weight", "text")
            .decode::<Weight>()
            .unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::InvalidEnumValue {
                value: "heavy".into(),
                expected: &["light", "bold"],
            }
        );
    }

    #[test]
    fn test_attribute_decoder_required_and_optional() {
        let el = Element::new("circle").with_attr("amount", "0.75");
        let attrs = AttributeDecoder::new(&el);

        assert_eq!(attrs.decode_attr::<f64>("amount"), Ok(0.75));
        assert_eq!(attrs.decode_optional_attr::<f64>("radius"), Ok(None));

        let err = attrs.decode_attr::<f64>("radius").unwrap_err();
        assert_eq!(err, DecodeError::missing("radius", "circle"));
    }

    #[test]
    fn test_json_attribute() {
        let el = Element::new("text")
            .with_attr("modifiers", r#"[{"type":"brightness","amount":0.5}]"#)
            .with_attr("broken", "[{");
        let attrs = AttributeDecoder::new(&el);

        let parsed = attrs.json("modifiers").unwrap().unwrap();
        assert_eq!(parsed[0]["amount"], json!(0.5));
        assert_eq!(attrs.json("absent"), Ok(None));
        assert!(matches!(
            attrs.json("broken").unwrap_err().kind,
            DecodeErrorKind::TypeMismatch { expected: "JSON", .. }
        ));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let el = Element::new("circle").with_attr("amount", "0.3");
        let attrs = AttributeDecoder::new(&el);
        assert_eq!(
            attrs.decode_attr::<f64>("amount"),
            attrs.decode_attr::<f64>("amount")
        );
    }
}
