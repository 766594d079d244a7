//! Shared upload and listing flows for CLI and shell modes
//!
//! This module extracts the request/render cycle from main.rs, making
//! it reusable across the one-shot subcommands and the interactive
//! shell. Every flow renders its own outcome; callers only need the
//! returned value for session bookkeeping and exit codes.

use crate::api::client::UPLOAD_FAILED_RETRY;
use crate::api::{format_size, ApiClient, Submission};
use crate::errors::ClientError;
use crate::repl::DisplayManager;
use crate::upload::UploadForm;
use std::path::Path;
use std::time::Instant;

/// Result of one listing fetch
pub enum ListOutcome {
    Loaded(Vec<Submission>),
    Failed(String),
}

/// Result of one upload attempt
pub enum UploadOutcome {
    /// The request was sent; success mirrors the server's answer
    Completed {
        name: String,
        file_name: String,
        success: bool,
        error: Option<String>,
        duration_ms: u64,
    },
    /// Client-side validation rejected the form before any request
    Blocked,
}

/// Fetch the submission listing without rendering it
///
/// For commands that only need to pick a submission by number.
pub async fn fetch_listing(
    client: &ApiClient,
    display: &mut DisplayManager,
    verbose: bool,
) -> ListOutcome {
    let _pb = display.start_fetch();

    match client.fetch_submissions().await {
        Ok(submissions) => {
            display.finish_current();
            ListOutcome::Loaded(submissions)
        }
        Err(e) => {
            let message = fetch_error_message(&e);
            display.finish_with_error(&message);
            display.show_debug(&e.to_string(), verbose);
            ListOutcome::Failed(message)
        }
    }
}

/// Fetch the submission listing and render it
pub async fn run_list(
    client: &ApiClient,
    display: &mut DisplayManager,
    verbose: bool,
) -> ListOutcome {
    match fetch_listing(client, display, verbose).await {
        ListOutcome::Loaded(submissions) => {
            display.render_submissions(&submissions);
            ListOutcome::Loaded(submissions)
        }
        failed => failed,
    }
}

/// Validate the form and, if it passes, send the multipart upload
///
/// Validation failures are shown as warnings and block the request
/// entirely. A failed request surfaces the server's error message
/// when it sent one, and a generic fallback otherwise.
pub async fn run_upload(
    client: &ApiClient,
    form: &UploadForm,
    display: &mut DisplayManager,
    verbose: bool,
) -> UploadOutcome {
    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(e) => {
            display.show_warning(&e.to_string());
            return UploadOutcome::Blocked;
        }
    };

    display.show_file_selected(&validated.file_name, &format_size(validated.size));

    let start_time = Instant::now();
    let _pb = display.start_upload(&validated.file_name);

    match client.upload(&validated).await {
        Ok(()) => {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            display.finish_with_success("Resume uploaded successfully!", duration_ms);
            UploadOutcome::Completed {
                name: validated.name,
                file_name: validated.file_name,
                success: true,
                error: None,
                duration_ms,
            }
        }
        Err(e) => {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            let message = upload_error_message(&e);
            display.finish_with_error(&message);
            display.show_debug(&e.to_string(), verbose);
            UploadOutcome::Completed {
                name: validated.name,
                file_name: validated.file_name,
                success: false,
                error: Some(message),
                duration_ms,
            }
        }
    }
}

/// Save one submission's resume into `download_dir`
pub async fn run_download(
    client: &ApiClient,
    submission: &Submission,
    download_dir: &Path,
    display: &mut DisplayManager,
) -> bool {
    let start_time = Instant::now();
    let _pb = display.start_download(&submission.resume_filename);

    match client
        .download_file(&submission.resume_url, &submission.resume_filename, download_dir)
        .await
    {
        Ok(target) => {
            let duration_ms = start_time.elapsed().as_millis() as u64;
            let size = std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
            display.finish_with_success(
                &format!(
                    "Saved {} ({}) to {}",
                    submission.resume_filename,
                    format_size(size),
                    target.display()
                ),
                duration_ms,
            );
            true
        }
        Err(e) => {
            display.finish_with_error(&e.to_string());
            false
        }
    }
}

/// Open one submission's resume in the system browser
pub fn run_view(client: &ApiClient, submission: &Submission, display: &DisplayManager) -> bool {
    let url = client.resolve_url(&submission.resume_url);

    match open::that(&url) {
        Ok(()) => {
            display.show_success(&format!(
                "Opening {} in your browser...",
                submission.resume_filename
            ));
            true
        }
        Err(e) => {
            display.show_error(&format!("Could not open {}: {}", url, e));
            false
        }
    }
}

/// Message shown for a failed fetch
///
/// The server's own rejection text passes through untouched; anything
/// below the HTTP layer collapses to the generic notice.
fn fetch_error_message(error: &ClientError) -> String {
    match error {
        ClientError::ApiError(message) => message.clone(),
        _ => "Error fetching submissions".to_string(),
    }
}

/// Message shown for a failed upload
fn upload_error_message(error: &ClientError) -> String {
    match error {
        ClientError::ApiError(message) => message.clone(),
        _ => UPLOAD_FAILED_RETRY.to_string(),
    }
}
