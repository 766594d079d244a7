//! Type definitions for the resume service API
//!
//! This module defines the wire envelopes returned by the backend and
//! the display formatting applied to them (file sizes, timestamps).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed display shift applied to stored UTC timestamps (+5:30).
/// This is a plain offset addition, not a timezone-aware conversion.
const IST_OFFSET_MINUTES: i64 = 330;

/// One stored resume submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Applicant name
    pub name: String,

    /// Applicant mobile number (10 digits, pattern-hinted only)
    pub mobile_number: String,

    /// Original filename of the uploaded resume
    pub resume_filename: String,

    /// URL the stored file can be fetched from
    pub resume_url: String,

    /// ISO-8601 creation timestamp, kept raw so a malformed value
    /// degrades at render time instead of failing deserialization
    pub created_at: String,
}

/// Response from the GET /api/submissions endpoint
#[derive(Debug, Deserialize)]
pub struct SubmissionsResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Vec<Submission>,
}

/// Response from the POST /api/upload endpoint
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,
}

impl Submission {
    /// Creation timestamp rendered for display
    pub fn formatted_created_at(&self) -> String {
        format_timestamp_ist(&self.created_at)
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.resume_filename)
    }
}

/// Format bytes into human-readable size
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base: f64 = 1024.0;
    let exponent = (bytes as f64).log(base).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);

    let size = bytes as f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

/// Parse a stored timestamp string as UTC
///
/// The backend emits ISO-8601, sometimes without an offset; naive values
/// are taken as UTC. Returns None for anything unparsable.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Render a stored timestamp as a long date in IST
///
/// Applies the fixed +5:30 shift, then formats as day, full month,
/// year and 12-hour time. Unparsable input renders "Invalid date".
pub fn format_timestamp_ist(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(utc) => {
            let shifted = utc + Duration::minutes(IST_OFFSET_MINUTES);
            format!("{} IST", shifted.format("%-d %B %Y, %-I:%M %p"))
        }
        None => "Invalid date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(5242880), "5.00 MB");
    }

    #[test]
    fn test_timestamp_shifts_by_five_thirty() {
        assert_eq!(
            format_timestamp_ist("2024-01-15T10:30:00Z"),
            "15 January 2024, 4:00 PM IST"
        );
    }

    #[test]
    fn test_timestamp_rolls_over_midnight() {
        assert_eq!(
            format_timestamp_ist("2024-01-15T20:00:00Z"),
            "16 January 2024, 1:30 AM IST"
        );
    }

    #[test]
    fn test_timestamp_naive_taken_as_utc() {
        // No offset suffix, microsecond precision
        assert_eq!(
            format_timestamp_ist("2025-03-07T14:05:09.123456"),
            "7 March 2025, 7:35 PM IST"
        );
        assert_eq!(
            format_timestamp_ist("2025-03-07T14:05:09"),
            "7 March 2025, 7:35 PM IST"
        );
    }

    #[test]
    fn test_timestamp_bare_date() {
        assert_eq!(
            format_timestamp_ist("2024-06-01"),
            "1 June 2024, 5:30 AM IST"
        );
    }

    #[test]
    fn test_timestamp_invalid_renders_marker() {
        assert_eq!(format_timestamp_ist("not-a-date"), "Invalid date");
        assert_eq!(format_timestamp_ist(""), "Invalid date");
        assert_eq!(format_timestamp_ist("15/01/2024"), "Invalid date");
    }

    #[test]
    fn test_submission_display() {
        let sub = Submission {
            name: "Asha Rao".to_string(),
            mobile_number: "9876543210".to_string(),
            resume_filename: "asha_rao.pdf".to_string(),
            resume_url: "http://localhost:5000/uploads/asha_rao.pdf".to_string(),
            created_at: "2024-01-15T10:30:00Z".to_string(),
        };

        assert_eq!(sub.to_string(), "Asha Rao (asha_rao.pdf)");
        assert_eq!(sub.formatted_created_at(), "15 January 2024, 4:00 PM IST");
    }

    #[test]
    fn test_submissions_response_decodes_envelope() {
        let json = r#"{
            "success": true,
            "data": [
                {
                    "name": "Asha Rao",
                    "mobile_number": "9876543210",
                    "resume_filename": "asha_rao.pdf",
                    "resume_url": "http://localhost:5000/uploads/asha_rao.pdf",
                    "created_at": "2024-01-15T10:30:00"
                }
            ]
        }"#;

        let resp: SubmissionsResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].mobile_number, "9876543210");
    }

    #[test]
    fn test_submissions_response_data_defaults_empty() {
        let resp: SubmissionsResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn test_upload_response_error_field() {
        let ok: UploadResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed: UploadResponse =
            serde_json::from_str(r#"{"success": false, "error": "Invalid file type"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Invalid file type"));
    }
}
