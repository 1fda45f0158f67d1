//! Error types for lvn_core

use thiserror::Error;

pub use crate::markup::ParseError;

/// Why a decode failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A required attribute or key is absent
    MissingField,
    /// The value exists but cannot be coerced to the expected type
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The value is a string outside the enumerated set
    InvalidEnumValue {
        value: String,
        expected: &'static [&'static str],
    },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField => write!(f, "missing required field"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Self::InvalidEnumValue { value, expected } => {
                write!(f, "invalid value '{}' (expected one of: {})", value, expected.join(", "))
            }
        }
    }
}

/// Failure to decode typed params from an element's attributes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("<{element}> {field}: {kind}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    /// Dotted path of the offending field, e.g. `modifiers[0].font.style`
    pub field: String,
    /// Tag of the element being decoded
    pub element: String,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, field: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            element: element.into(),
        }
    }

    pub fn missing(field: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::MissingField, field, element)
    }
}

/// Markup that is well-formed but violates a component contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `style` attribute on a list outside the supported set
    #[error("Invalid list style '{value}'")]
    InvalidListStyle { value: String },

    /// A component that needs a stable identity was given no `id`
    #[error("<{tag}> must have an id")]
    MissingIdentifier { tag: String },
}

/// Errors that halt rendering of a subtree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Result type for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Result type for rendering operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;
