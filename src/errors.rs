//! Error types for the resumedrop client
//!
//! Validation failures are their own variants so the upload flow can
//! block submission locally, before any request is built.

use thiserror::Error;

/// Main error type for the resumedrop client
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required form field was left empty
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Mobile number failed the 10-digit pattern check
    #[error("Mobile number must be exactly 10 digits")]
    InvalidMobileNumber,

    /// File extension outside the accepted set
    #[error("Invalid file type '{extension}': only PDF, DOC, or DOCX files are accepted")]
    UnsupportedFileType { extension: String },

    /// File exceeds the upload size limit
    #[error("File too large: {size} bytes exceeds the maximum of {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// Selected file does not exist or is not a regular file
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Backend API errors (non-success envelope or status)
    #[error("API error: {0}")]
    ApiError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic errors with context
    #[error("Client error: {0}")]
    Generic(String),
}

impl ClientError {
    /// True for failures caught locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::MissingField { .. }
                | ClientError::InvalidMobileNumber
                | ClientError::UnsupportedFileType { .. }
                | ClientError::FileTooLarge { .. }
                | ClientError::FileNotFound { .. }
        )
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Convert anyhow errors to ClientError
impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        ClientError::Generic(err.to_string())
    }
}
