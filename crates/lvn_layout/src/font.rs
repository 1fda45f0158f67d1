//! Font descriptors
//!
//! A [`Font`] is either a system font (sized by a semantic text style or a
//! fixed point size, with optional design and weight) or a named custom font.
//!
//! ```json
//! { "type": "system", "style": "large_title", "design": "serif" }
//! { "type": "system", "size": 17, "weight": "semibold" }
//! { "type": "custom", "name": "Menlo", "size": 12 }
//! ```
//!
//! Resolving a descriptor to actual font data is left to the host toolkit.

use lvn_core::decode::{Decode, DecodeResult, Encode, ValueDecoder};
use lvn_core::{attribute_enum, DecodeErrorKind, Value};
use serde_json::Map;

attribute_enum! {
    /// Semantic text styles, scaled by the platform's dynamic type setting
    pub enum TextStyle {
        LargeTitle => "large_title",
        Title => "title",
        Title2 => "title2",
        Title3 => "title3",
        Headline => "headline",
        Subheadline => "subheadline",
        Body => "body",
        Callout => "callout",
        Footnote => "footnote",
        Caption => "caption",
        Caption2 => "caption2",
    }
}

attribute_enum! {
    /// System font design variants
    pub enum Design {
        Default => "default",
        Serif => "serif",
        Rounded => "rounded",
        Monospaced => "monospaced",
    }
}

attribute_enum! {
    /// Font weights, lightest first
    pub enum Weight {
        UltraLight => "ultra_light",
        Thin => "thin",
        Light => "light",
        Regular => "regular",
        Medium => "medium",
        Semibold => "semibold",
        Bold => "bold",
        Heavy => "heavy",
        Black => "black",
    }
}

attribute_enum! {
    enum FontKind {
        System => "system",
        Custom => "custom",
    }
}

/// How a system font is sized
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FontSize {
    /// Semantic style; the platform picks the point size
    Style(TextStyle),
    /// Fixed point size
    Points(f64),
}

/// A font descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum Font {
    System {
        size: FontSize,
        design: Option<Design>,
        weight: Option<Weight>,
    },
    Custom {
        name: String,
        size: f64,
    },
}

impl Font {
    /// System font for a semantic text style
    pub fn system(style: TextStyle) -> Self {
        Font::System {
            size: FontSize::Style(style),
            design: None,
            weight: None,
        }
    }

    /// System font at a fixed point size
    pub fn system_size(points: f64) -> Self {
        Font::System {
            size: FontSize::Points(points),
            design: None,
            weight: None,
        }
    }

    pub fn custom(name: impl Into<String>, size: f64) -> Self {
        Font::Custom {
            name: name.into(),
            size,
        }
    }

    /// Set the design of a system font; custom fonts are unchanged
    pub fn design(mut self, value: Design) -> Self {
        if let Font::System { design, .. } = &mut self {
            *design = Some(value);
        }
        self
    }

    /// Set the weight of a system font; custom fonts are unchanged
    pub fn weight(mut self, value: Weight) -> Self {
        if let Font::System { weight, .. } = &mut self {
            *weight = Some(value);
        }
        self
    }
}

impl Decode for Font {
    fn decode(decoder: &ValueDecoder<'_>) -> DecodeResult<Self> {
        match decoder.decode_field::<FontKind>("type")? {
            FontKind::System => {
                let style = decoder.decode_optional::<TextStyle>("style")?;
                let points = decoder.decode_optional::<f64>("size")?;
                let size = match (style, points) {
                    (Some(style), None) => FontSize::Style(style),
                    (None, Some(points)) => FontSize::Points(points),
                    (None, None) => return Err(decoder.missing("style")),
                    (Some(_), Some(_)) => {
                        return Err(decoder.error(DecodeErrorKind::TypeMismatch {
                            expected: "either style or size",
                            found: "both",
                        }))
                    }
                };
                Ok(Font::System {
                    size,
                    design: decoder.decode_optional("design")?,
                    weight: decoder.decode_optional("weight")?,
                })
            }
            FontKind::Custom => Ok(Font::Custom {
                name: decoder.decode_field("name")?,
                size: decoder.decode_field("size")?,
            }),
        }
    }
}

impl Encode for Font {
    fn encode(&self) -> Value {
        let mut map = Map::new();
        match self {
            Font::System {
                size,
                design,
                weight,
            } => {
                map.insert("type".into(), FontKind::System.encode());
                match size {
                    FontSize::Style(style) => map.insert("style".into(), style.encode()),
                    FontSize::Points(points) => map.insert("size".into(), points.encode()),
                };
                if let Some(design) = design {
                    map.insert("design".into(), design.encode());
                }
                if let Some(weight) = weight {
                    map.insert("weight".into(), weight.encode());
                }
            }
            Font::Custom { name, size } => {
                map.insert("type".into(), FontKind::Custom.encode());
                map.insert("name".into(), name.encode());
                map.insert("size".into(), size.encode());
            }
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(v: &Value) -> DecodeResult<Font> {
        ValueDecoder::new(v, "font", "text").decode()
    }

    #[test]
    fn test_system_style_with_options() {
        let v = json!({ "type": "system", "style": "large_title", "design": "serif" });
        assert_eq!(
            decode(&v).unwrap(),
            Font::system(TextStyle::LargeTitle).design(Design::Serif)
        );
    }

    #[test]
    fn test_system_fixed_size() {
        let v = json!({ "type": "system", "size": "17", "weight": "semibold" });
        assert_eq!(
            decode(&v).unwrap(),
            Font::system_size(17.0).weight(Weight::Semibold)
        );
    }

    #[test]
    fn test_custom_font_requires_name_and_size() {
        let v = json!({ "type": "custom", "name": "Menlo" });
        let err = decode(&v).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert_eq!(err.field, "font.size");

        let v = json!({ "type": "custom", "name": "Menlo", "size": 12 });
        assert_eq!(decode(&v).unwrap(), Font::custom("Menlo", 12.0));
    }

    #[test]
    fn test_system_font_needs_exactly_one_sizing() {
        let neither = json!({ "type": "system" });
        let err = decode(&neither).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MissingField);
        assert_eq!(err.field, "font.style");

        let both = json!({ "type": "system", "style": "body", "size": 12 });
        assert!(matches!(
            decode(&both).unwrap_err().kind,
            DecodeErrorKind::TypeMismatch { found: "both", .. }
        ));
    }

    #[test]
    fn test_unknown_style_and_kind() {
        let v = json!({ "type": "system", "style": "huge" });
        let err = decode(&v).unwrap_err();
        assert_eq!(err.field, "font.style");
        assert!(matches!(err.kind, DecodeErrorKind::InvalidEnumValue { .. }));

        let v = json!({ "type": "bitmap", "size": 12 });
        assert_eq!(decode(&v).unwrap_err().field, "font.type");
    }

    #[test]
    fn test_encode_decodes_back() {
        for font in [
            Font::system(TextStyle::Caption2).weight(Weight::Black),
            Font::system_size(11.5).design(Design::Monospaced),
            Font::custom("Avenir", 20.0),
        ] {
            assert_eq!(decode(&font.encode()).unwrap(), font);
        }
    }
}
