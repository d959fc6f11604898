//! Error types for Voxdeck.

use thiserror::Error;

/// Library-level error type for Voxdeck operations.
#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    /// The provider answered, but not with a schema-conformant script.
    #[error("{0}")]
    GenerationFormat(String),

    #[error("Audio synthesis failed: {0}")]
    Synthesis(String),

    #[error("Audio playback failed: {0}")]
    Playback(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Gemini API error: {0}")]
    Provider(String),

    #[error("Operation already in progress: {0}")]
    Busy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Voxdeck operations.
pub type Result<T> = std::result::Result<T, VoxError>;
