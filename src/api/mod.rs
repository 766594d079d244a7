//! Backend API module
//!
//! This module covers the wire contract of the resume service:
//! - Fetching previously submitted entries
//! - Uploading a new submission (multipart)
//! - Downloading a stored resume file

pub mod client;
pub mod types;

// Re-export key types for convenience
pub use client::ApiClient;
pub use types::{format_size, format_timestamp_ist, Submission, SubmissionsResponse, UploadResponse};
