//! Session manager for shell state and upload history tracking
//!
//! Maintains the in-progress upload draft, the cached submission
//! listing, and a bounded record of past upload attempts.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::Submission;
use crate::upload::UploadForm;

/// Maximum number of upload attempts to keep in history
const MAX_HISTORY_SIZE: usize = 1000;

/// Which of the two screens the shell last rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Upload,
    Submissions,
}

/// Record of a completed upload attempt
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub name: String,
    pub file_name: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
    pub timestamp: u64,
}

/// Session manager maintaining shell state
///
/// Tracks:
/// - The upload draft (survives failed attempts)
/// - The cached submission listing and its error state
/// - Upload history (bounded to MAX_HISTORY_SIZE)
pub struct SessionManager {
    /// Form values carried across `/upload` runs
    draft: UploadForm,

    /// Cached listing from the last successful fetch
    submissions: Vec<Submission>,

    /// Whether any fetch has succeeded this session
    fetched: bool,

    /// Error from the most recent failed fetch, cleared on success
    last_fetch_error: Option<String>,

    /// Upload attempts (FIFO queue, max 1000 entries)
    history: VecDeque<UploadRecord>,

    /// Screen the shell last rendered
    active_view: ActiveView,

    /// Session start time
    session_start: u64,

    /// Total upload attempts this session
    upload_count: usize,
}

impl SessionManager {
    pub fn new() -> Self {
        let session_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        SessionManager {
            draft: UploadForm::new(),
            submissions: Vec::new(),
            fetched: false,
            last_fetch_error: None,
            history: VecDeque::with_capacity(16),
            active_view: ActiveView::Upload,
            session_start,
            upload_count: 0,
        }
    }

    pub fn draft(&self) -> &UploadForm {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut UploadForm {
        &mut self.draft
    }

    /// Replace the cached listing after a successful fetch
    ///
    /// Clears any previous fetch error and switches to the
    /// submissions view.
    pub fn set_submissions(&mut self, submissions: Vec<Submission>) {
        self.submissions = submissions;
        self.fetched = true;
        self.last_fetch_error = None;
        self.active_view = ActiveView::Submissions;
    }

    /// Record a failed fetch so `/retry` knows there is work to redo
    pub fn set_fetch_error(&mut self, message: String) {
        self.last_fetch_error = Some(message);
        self.active_view = ActiveView::Submissions;
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn has_fetched(&self) -> bool {
        self.fetched
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.last_fetch_error.as_deref()
    }

    /// True when the last fetch failed and `/retry` has work to redo
    pub fn can_retry(&self) -> bool {
        self.last_fetch_error.is_some()
    }

    /// Look up a cached submission by its 1-based listing number
    pub fn submission(&self, index: usize) -> Option<&Submission> {
        if index == 0 {
            return None;
        }
        self.submissions.get(index - 1)
    }

    /// Record a completed upload attempt
    ///
    /// Complexity: O(1) append, O(1) eviction if at capacity
    pub fn record_upload(&mut self, record: UploadRecord) {
        if self.history.len() >= MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(record);

        self.upload_count += 1;
    }

    /// Record a finished upload attempt, clearing the draft on success
    ///
    /// A failed attempt keeps the draft so `/upload` resumes from the
    /// entered values.
    pub fn finish_upload(&mut self, record: UploadRecord) {
        let success = record.success;
        self.record_upload(record);
        if success {
            self.draft.clear();
        }
    }

    /// Get upload history (newest first)
    ///
    /// Returns up to `limit` most recent attempts
    pub fn get_history(&self, limit: usize) -> Vec<&UploadRecord> {
        self.history.iter().rev().take(limit).collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Get total upload attempts this session
    pub fn upload_count(&self) -> usize {
        self.upload_count
    }

    pub fn successful_uploads(&self) -> usize {
        self.history.iter().filter(|r| r.success).count()
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Clear the draft, the cached listing, and the upload history
    pub fn reset(&mut self) {
        self.draft.clear();
        self.submissions.clear();
        self.fetched = false;
        self.last_fetch_error = None;
        self.history.clear();
        self.upload_count = 0;
        self.active_view = ActiveView::Upload;
        self.session_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
    }

    /// Get session duration in seconds
    pub fn session_duration(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        now.saturating_sub(self.session_start)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
