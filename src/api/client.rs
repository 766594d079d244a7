//! HTTP client for the resume service
//!
//! Wraps the two-endpoint backend contract:
//! - GET /api/submissions for the listing view
//! - POST /api/upload (multipart) for new submissions
//! plus a streamed download of stored resume files.

use crate::api::types::{Submission, SubmissionsResponse, UploadResponse};
use crate::errors::{ClientError, Result};
use crate::upload::ValidatedUpload;
use futures_util::StreamExt;
use reqwest::multipart;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Default backend endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Request timeout (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Envelope failure message for the listing endpoint
pub const FETCH_FAILED: &str = "Failed to fetch submissions";

/// Fallback when the upload envelope reports failure without a reason
pub const UPLOAD_FAILED: &str = "Upload failed!";

/// Fallback when the upload request itself fails
pub const UPLOAD_FAILED_RETRY: &str = "Upload failed! Please try again.";

/// HTTP client for the resume service API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the default endpoint and timeout
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Create a client with custom configuration
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all submissions
    ///
    /// Calls GET /api/submissions. An unreachable server or a non-2xx
    /// status is a transport-level failure; a well-formed envelope with
    /// `success: false` is reported as an API failure.
    pub async fn fetch_submissions(&self) -> Result<Vec<Submission>> {
        let url = format!("{}/api/submissions", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::ApiError(format!(
                "Error fetching submissions (HTTP {})",
                response.status()
            )));
        }

        let envelope: SubmissionsResponse = response.json().await?;

        if !envelope.success {
            return Err(ClientError::ApiError(FETCH_FAILED.to_string()));
        }

        Ok(envelope.data)
    }

    /// Upload a validated submission
    ///
    /// Calls POST /api/upload with multipart fields `name`,
    /// `mobile_number` and `resume`. The caller runs validation first;
    /// this method never sees an unchecked draft.
    ///
    /// On failure the server-provided error string is surfaced when one
    /// exists, otherwise a generic fallback.
    pub async fn upload(&self, validated: &ValidatedUpload) -> Result<()> {
        let url = format!("{}/api/upload", self.base_url);

        let bytes = fs::read(&validated.path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name(validated.file_name.clone())
            .mime_str(validated.mime_type)?;

        let form = multipart::Form::new()
            .text("name", validated.name.clone())
            .text("mobile_number", validated.mobile_number.clone())
            .part("resume", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            // Surface the server's error string when the body carries one
            let message = match response.json::<UploadResponse>().await {
                Ok(body) => body.error.unwrap_or_else(|| UPLOAD_FAILED_RETRY.to_string()),
                Err(_) => UPLOAD_FAILED_RETRY.to_string(),
            };
            return Err(ClientError::ApiError(message));
        }

        let envelope: UploadResponse = response.json().await?;

        if !envelope.success {
            return Err(ClientError::ApiError(
                envelope.error.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
            ));
        }

        Ok(())
    }

    /// Download a stored resume into the given directory
    ///
    /// Streams the response body to `dir/<sanitized filename>`. The
    /// filename is reduced to its final component so a hostile value
    /// cannot escape the download directory.
    pub async fn download_file(
        &self,
        url: &str,
        filename: &str,
        dir: &Path,
    ) -> Result<PathBuf> {
        let target = dir.join(sanitize_filename(filename));

        let response = self.client.get(self.resolve_url(url)).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::ApiError(format!(
                "Download failed (HTTP {})",
                response.status()
            )));
        }

        fs::create_dir_all(dir).await?;
        let mut file = fs::File::create(&target).await?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(target)
    }

    /// Check if the backend is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/submissions", self.base_url);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }

    /// Resolve a possibly relative resume URL against the base URL
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

/// Strip path components from a server-provided filename
fn sanitize_filename(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty() && n != "." && n != "..")
        .unwrap_or_else(|| "resume".to_string())
}
