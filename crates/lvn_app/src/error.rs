//! Error types for lvn_app

use lvn_core::{ParseError, RenderError};
use thiserror::Error;

/// Errors that can occur in a live session
#[derive(Error, Debug)]
pub enum LiveError {
    /// A subtree failed to decode or violated a component contract
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Server markup is not well-formed
    #[error("Markup parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// Session configuration could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for LiveError {
    fn from(err: toml::de::Error) -> Self {
        LiveError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for LiveError {
    fn from(err: anyhow::Error) -> Self {
        LiveError::Config(format!("{:#}", err))
    }
}

/// Result type for lvn_app operations
pub type Result<T> = std::result::Result<T, LiveError>;
