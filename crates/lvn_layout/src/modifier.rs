//! Modifiers and modifier stacks
//!
//! A [`Modifier`] wraps a view with exactly one effect. Modifiers never fail:
//! every possible error was reported while decoding their params.
//!
//! Elements declare modifiers in a `modifiers` attribute holding a JSON array:
//!
//! ```json
//! [
//!   { "type": "padding", "top": 8, "leading": 16, "bottom": 8, "trailing": 16 },
//!   { "type": "brightness", "amount": 0.25 }
//! ]
//! ```
//!
//! A [`ModifierStack`] decodes the whole array up front and applies the
//! entries left to right, so `view_n = m_n(...m_1(view_0))`.

use lvn_core::decode::{AttributeDecoder, Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::{attribute_enum, attrs, Element, Value};
use serde_json::Map;
use smallvec::SmallVec;

use crate::modifiers::{Brightness, FontModifier, ListRowInsets, Padding};
use crate::view::View;

/// A transformation that wraps a view with one effect
pub trait Modifier {
    /// Stable name, matching the `type` key in markup
    fn name(&self) -> &'static str;

    fn apply(&self, view: View) -> View;
}

attribute_enum! {
    /// Every modifier type understood in a `modifiers` attribute
    pub enum ModifierKind {
        Brightness => "brightness",
        Font => "font",
        Padding => "padding",
        ListRowInsets => "list_row_insets",
    }
}

/// A decoded modifier entry
#[derive(Clone, Debug, PartialEq)]
pub enum ModifierSpec {
    Brightness(Brightness),
    Font(FontModifier),
    Padding(Padding),
    ListRowInsets(ListRowInsets),
}

impl ModifierSpec {
    pub fn kind(&self) -> ModifierKind {
        match self {
            ModifierSpec::Brightness(_) => ModifierKind::Brightness,
            ModifierSpec::Font(_) => ModifierKind::Font,
            ModifierSpec::Padding(_) => ModifierKind::Padding,
            ModifierSpec::ListRowInsets(_) => ModifierKind::ListRowInsets,
        }
    }

    fn modifier(&self) -> &dyn Modifier {
        match self {
            ModifierSpec::Brightness(m) => m,
            ModifierSpec::Font(m) => m,
            ModifierSpec::Padding(m) => m,
            ModifierSpec::ListRowInsets(m) => m,
        }
    }
}

impl Modifier for ModifierSpec {
    fn name(&self) -> &'static str {
        self.modifier().name()
    }

    fn apply(&self, view: View) -> View {
        self.modifier().apply(view)
    }
}

impl Decode for ModifierSpec {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        Ok(match decoder.decode_field::<ModifierKind>("type")? {
            ModifierKind::Brightness => ModifierSpec::Brightness(decoder.decode()?),
            ModifierKind::Font => ModifierSpec::Font(decoder.decode()?),
            ModifierKind::Padding => ModifierSpec::Padding(decoder.decode()?),
            ModifierKind::ListRowInsets => ModifierSpec::ListRowInsets(decoder.decode()?),
        })
    }
}

impl Encode for ModifierSpec {
    fn encode(&self) -> Value {
        let params = match self {
            ModifierSpec::Brightness(m) => m.encode(),
            ModifierSpec::Font(m) => m.encode(),
            ModifierSpec::Padding(m) => m.encode(),
            ModifierSpec::ListRowInsets(m) => m.encode(),
        };

        let mut map = Map::new();
        map.insert("type".into(), self.kind().encode());
        if let Value::Object(params) = params {
            map.extend(params);
        }
        Value::Object(map)
    }
}

// =============================================================================
// ModifierStack
// =============================================================================

/// Ordered modifiers declared on one element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierStack {
    specs: SmallVec<[ModifierSpec; 4]>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the element's `modifiers` attribute
    ///
    /// Every entry is decoded before the stack is returned; the first failure
    /// aborts the whole element. An element without the attribute has an
    /// empty stack.
    pub fn decode_attribute(element: &Element) -> DecodeResult<Self> {
        let Some(value) = AttributeDecoder::new(element).json(attrs::MODIFIERS)? else {
            return Ok(Self::new());
        };
        let decoder = ValueDecoder::new(&value, attrs::MODIFIERS, element.tag());
        decoder.decode()
    }

    pub fn push(mut self, spec: ModifierSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn specs(&self) -> &[ModifierSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Apply every modifier in declaration order
    pub fn apply(&self, view: View) -> View {
        self.specs.iter().fold(view, |view, spec| {
            tracing::trace!("apply modifier {}", spec.name());
            spec.apply(view)
        })
    }
}

impl Decode for ModifierStack {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        let specs = decoder
            .items()?
            .iter()
            .map(ModifierSpec::decode)
            .collect::<DecodeResult<_>>()?;
        Ok(Self { specs })
    }
}

impl Encode for ModifierStack {
    fn encode(&self) -> Value {
        Value::Array(self.specs.iter().map(Encode::encode).collect())
    }
}
