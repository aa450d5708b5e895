//! Error types for conversion

use thiserror::Error;

/// Errors returned to the caller of a conversion
///
/// Image failures are not among them: the embedder recovers from those
/// locally and writes a fallback paragraph instead.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The block selector could not be parsed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration file could not be read
    #[error("Cannot read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for `HtwConfig`
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// Document model or packaging error
    #[error("Document error: {0}")]
    Document(#[from] htw_ooxml::OoxmlError),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
