//! Client-side validation for resume uploads
//!
//! Every check here runs locally on the draft form. A draft that fails
//! validation never reaches the network layer.

use crate::errors::{ClientError, Result};
use std::fs;
use std::path::PathBuf;

/// Maximum accepted resume size in bytes (5 MB)
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// File extensions accepted for upload
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Map an accepted extension to its MIME type
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Check a mobile number against the 10-digit pattern
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.chars().all(|c| c.is_ascii_digit())
}

/// Draft state of the upload form
///
/// Kept as entered by the user; fields are trimmed during validation
/// so stray whitespace never satisfies a required-field check.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub name: String,
    pub mobile_number: String,
    pub file_path: String,
}

/// An upload draft that has passed every client-side check
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub name: String,
    pub mobile_number: String,
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub size: u64,
}

impl UploadForm {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field has been filled in yet
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.mobile_number.trim().is_empty()
            && self.file_path.trim().is_empty()
    }

    /// Reset the draft to its empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Run every client-side check on the draft
    ///
    /// Order: required fields, mobile pattern, file existence, file
    /// type, file size. The first failure is returned and nothing is
    /// sent anywhere.
    pub fn validate(&self) -> Result<ValidatedUpload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::MissingField { field: "Name" });
        }

        let mobile = self.mobile_number.trim();
        if mobile.is_empty() {
            return Err(ClientError::MissingField {
                field: "Mobile number",
            });
        }
        if !is_valid_mobile(mobile) {
            return Err(ClientError::InvalidMobileNumber);
        }

        let path_str = self.file_path.trim();
        if path_str.is_empty() {
            return Err(ClientError::MissingField {
                field: "Resume file",
            });
        }

        let path = PathBuf::from(path_str);
        let metadata = fs::metadata(&path).map_err(|_| ClientError::FileNotFound {
            path: path_str.to_string(),
        })?;
        if !metadata.is_file() {
            return Err(ClientError::FileNotFound {
                path: path_str.to_string(),
            });
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type =
            mime_for_extension(&extension).ok_or_else(|| ClientError::UnsupportedFileType {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension.clone()
                },
            })?;

        let size = metadata.len();
        if size > MAX_RESUME_BYTES {
            return Err(ClientError::FileTooLarge {
                size,
                max: MAX_RESUME_BYTES,
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ClientError::FileNotFound {
                path: path_str.to_string(),
            })?;

        Ok(ValidatedUpload {
            name: name.to_string(),
            mobile_number: mobile.to_string(),
            path,
            file_name,
            mime_type,
            size,
        })
    }
}
