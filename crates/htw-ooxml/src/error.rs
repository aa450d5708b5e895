//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while building, packaging or reading a DOCX file
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Picture bytes rejected by the embedding primitive
    #[error("Invalid picture: {0}")]
    InvalidPicture(String),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
