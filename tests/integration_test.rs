//! Integration tests for the ResumeDrop client
//!
//! Tests the upload and listing flow end to end without requiring the
//! resume server running.

use resumedrop::api::{SubmissionsResponse, UploadResponse};
use resumedrop::flows::{self, ListOutcome, UploadOutcome};
use resumedrop::repl::DisplayManager;
use resumedrop::upload::{UploadForm, MAX_RESUME_BYTES};
use resumedrop::{ApiClient, ClientError, Submission};
use std::io::Write;
use std::time::Duration;
use tempfile::TempDir;

fn quiet_display() -> DisplayManager {
    let mut display = DisplayManager::new();
    display.set_progress(false);
    display
}

fn unreachable_client() -> ApiClient {
    ApiClient::with_config("http://127.0.0.1:9", Duration::from_secs(1)).unwrap()
}

fn write_resume(dir: &TempDir, name: &str, bytes: usize) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&vec![0u8; bytes]).unwrap();
    path.display().to_string()
}

// Client Construction Tests

#[test]
fn test_client_construction() {
    let client = ApiClient::new();
    assert!(client.is_ok());
    assert_eq!(client.unwrap().base_url(), "http://127.0.0.1:5000");
}

#[test]
fn test_client_trims_trailing_slash() {
    let client = ApiClient::with_config("http://localhost:8080/", Duration::from_secs(5)).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[test]
fn test_resolve_url() {
    let client = ApiClient::with_config("http://localhost:8080", Duration::from_secs(5)).unwrap();

    assert_eq!(
        client.resolve_url("/uploads/resume.pdf"),
        "http://localhost:8080/uploads/resume.pdf"
    );
    assert_eq!(
        client.resolve_url("https://cdn.example.com/resume.pdf"),
        "https://cdn.example.com/resume.pdf"
    );
}

// Validation Tests
//
// Every rejection here happens before a request is built, so no
// server is involved.

#[test]
fn test_empty_form_rejected() {
    let form = UploadForm::new();
    let err = form.validate().unwrap_err();

    assert!(matches!(err, ClientError::MissingField { field: "Name" }));
    assert!(err.is_validation());
}

#[test]
fn test_mobile_number_must_be_ten_digits() {
    let temp_dir = TempDir::new().unwrap();
    let mut form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "12345".to_string(),
        file_path: write_resume(&temp_dir, "resume.pdf", 100),
    };

    assert!(matches!(
        form.validate().unwrap_err(),
        ClientError::InvalidMobileNumber
    ));

    form.mobile_number = "98765432a0".to_string();
    assert!(matches!(
        form.validate().unwrap_err(),
        ClientError::InvalidMobileNumber
    ));

    form.mobile_number = "9876543210".to_string();
    assert!(form.validate().is_ok());
}

#[test]
fn test_unsupported_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        file_path: write_resume(&temp_dir, "resume.txt", 100),
    };

    match form.validate().unwrap_err() {
        ClientError::UnsupportedFileType { extension } => assert_eq!(extension, "txt"),
        other => panic!("Expected UnsupportedFileType, got {:?}", other),
    }
}

#[test]
fn test_file_at_size_limit_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        file_path: write_resume(&temp_dir, "resume.pdf", MAX_RESUME_BYTES as usize),
    };

    // Exactly 5 MB is allowed; the limit is strict-greater
    let validated = form.validate().unwrap();
    assert_eq!(validated.size, MAX_RESUME_BYTES);
    assert_eq!(validated.mime_type, "application/pdf");
}

#[test]
fn test_file_over_size_limit_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        file_path: write_resume(&temp_dir, "resume.pdf", MAX_RESUME_BYTES as usize + 1),
    };

    match form.validate().unwrap_err() {
        ClientError::FileTooLarge { size, max } => {
            assert_eq!(size, MAX_RESUME_BYTES + 1);
            assert_eq!(max, MAX_RESUME_BYTES);
        }
        other => panic!("Expected FileTooLarge, got {:?}", other),
    }
}

#[test]
fn test_validated_upload_carries_trimmed_fields() {
    let temp_dir = TempDir::new().unwrap();
    let form = UploadForm {
        name: "  Asha Rao  ".to_string(),
        mobile_number: " 9876543210 ".to_string(),
        file_path: write_resume(&temp_dir, "resume.docx", 100),
    };

    let validated = form.validate().unwrap();
    assert_eq!(validated.name, "Asha Rao");
    assert_eq!(validated.mobile_number, "9876543210");
    assert_eq!(validated.file_name, "resume.docx");
    assert_eq!(
        validated.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
}

// Wire Format Tests

#[test]
fn test_submissions_envelope_decoding() {
    let body = r#"{
        "success": true,
        "data": [
            {
                "name": "Asha Rao",
                "mobile_number": "9876543210",
                "resume_filename": "resume.pdf",
                "resume_url": "/uploads/resume.pdf",
                "created_at": "2024-01-15T10:30:00Z"
            }
        ]
    }"#;

    let envelope: SubmissionsResponse = serde_json::from_str(body).unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.data[0].name, "Asha Rao");
    assert_eq!(envelope.data[0].resume_url, "/uploads/resume.pdf");
}

#[test]
fn test_submissions_envelope_missing_data_defaults_empty() {
    let envelope: SubmissionsResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
    assert!(!envelope.success);
    assert!(envelope.data.is_empty());
}

#[test]
fn test_upload_envelope_decoding() {
    let rejected: UploadResponse =
        serde_json::from_str(r#"{"success": false, "error": "File size exceeds 5MB limit"}"#)
            .unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.error.as_deref(), Some("File size exceeds 5MB limit"));

    let accepted: UploadResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
    assert!(accepted.success);
    assert!(accepted.error.is_none());
}

// Timestamp Rendering Tests

#[test]
fn test_created_at_rendered_in_ist() {
    let submission = Submission {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        resume_filename: "resume.pdf".to_string(),
        resume_url: "/uploads/resume.pdf".to_string(),
        created_at: "2024-01-15T10:30:00Z".to_string(),
    };

    // 10:30 UTC shifted by 5h30m
    assert_eq!(submission.formatted_created_at(), "15 January 2024, 4:00 PM IST");
}

#[test]
fn test_unparsable_created_at_renders_invalid() {
    let submission = Submission {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        resume_filename: "resume.pdf".to_string(),
        resume_url: "/uploads/resume.pdf".to_string(),
        created_at: "yesterday".to_string(),
    };

    assert_eq!(submission.formatted_created_at(), "Invalid date");
}

// Flow Tests
//
// Against an unreachable server the flows must fall back to the
// generic notices instead of surfacing transport detail.

#[tokio::test]
async fn test_list_flow_reports_generic_fetch_error() {
    let client = unreachable_client();
    let mut display = quiet_display();

    match flows::run_list(&client, &mut display, false).await {
        ListOutcome::Failed(message) => assert_eq!(message, "Error fetching submissions"),
        ListOutcome::Loaded(_) => panic!("unreachable server cannot return data"),
    }
}

#[tokio::test]
async fn test_upload_flow_blocked_without_network() {
    let client = unreachable_client();
    let mut display = quiet_display();

    let form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "123".to_string(),
        file_path: String::new(),
    };

    match flows::run_upload(&client, &form, &mut display, false).await {
        UploadOutcome::Blocked => {}
        UploadOutcome::Completed { .. } => panic!("invalid form must not be submitted"),
    }
}

#[tokio::test]
async fn test_upload_flow_reports_retry_message() {
    let temp_dir = TempDir::new().unwrap();
    let client = unreachable_client();
    let mut display = quiet_display();

    let form = UploadForm {
        name: "Asha Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        file_path: write_resume(&temp_dir, "resume.pdf", 100),
    };

    match flows::run_upload(&client, &form, &mut display, false).await {
        UploadOutcome::Completed { success, error, .. } => {
            assert!(!success);
            assert_eq!(error.as_deref(), Some("Upload failed! Please try again."));
        }
        UploadOutcome::Blocked => panic!("valid form should reach the request stage"),
    }
}

// Live Server Tests

#[tokio::test]
#[ignore] // Requires resume server running on 127.0.0.1:5000
async fn test_live_fetch_submissions() {
    let client = ApiClient::new().unwrap();
    let submissions = client.fetch_submissions().await.unwrap();

    for submission in &submissions {
        assert!(!submission.resume_filename.is_empty());
    }
}

#[tokio::test]
#[ignore] // Requires resume server running on 127.0.0.1:5000
async fn test_live_upload() {
    let temp_dir = TempDir::new().unwrap();
    let client = ApiClient::new().unwrap();

    let form = UploadForm {
        name: "Integration Test".to_string(),
        mobile_number: "9876543210".to_string(),
        file_path: write_resume(&temp_dir, "resume.pdf", 1024),
    };

    let validated = form.validate().unwrap();
    client.upload(&validated).await.unwrap();
}
