//! ResumeDrop - Resume Collection Client
//!
//! A terminal client for a resume collection service: validate and
//! submit resumes over multipart HTTP, then browse, download, or open
//! what the server has collected.

pub mod api;
pub mod cli;
pub mod doctor;
pub mod errors;
pub mod flows;
pub mod repl;
pub mod upload;

// Re-export commonly used types
pub use api::{ApiClient, Submission};
pub use errors::{ClientError, Result};
