//! Display manager for the shell terminal UI
//!
//! Manages fetch/upload spinners, the submission listing, and
//! color-coded notices.

use colored::*;
use crossterm::{
    cursor,
    execute,
    terminal::{Clear, ClearType},
};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::api::Submission;

/// Display manager for the shell UI
///
/// Features:
/// - Spinners for in-flight requests
/// - Numbered submission cards
/// - Color-coded output
pub struct DisplayManager {
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    progress_enabled: bool,
}

impl DisplayManager {
    /// Create new display manager
    ///
    /// Update frequency: 10 FPS (100ms interval)
    pub fn new() -> Self {
        DisplayManager {
            multi_progress: MultiProgress::new(),
            current_bar: None,
            update_interval: Duration::from_millis(100), // 10 FPS
            progress_enabled: true,
        }
    }

    /// Enable or disable spinners (quiet mode, piped output)
    pub fn set_progress(&mut self, enabled: bool) {
        self.progress_enabled = enabled;
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, server_url: &str) {
        let width = 64;
        let top = format!("{}", "=".repeat(width).cyan());
        let title = format!("  ResumeDrop {} - Resume Collection Client", version);
        let info = format!("  Server: {} | Mode: Interactive", server_url);
        let bottom = format!("{}", "=".repeat(width).cyan());

        println!("\n{}", top);
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", bottom);
        println!("Submit with {}, browse with {} (or {} for commands, {} to quit)\n",
            "/upload".green(), "/list".green(), "/help".green(), "/exit".green());
    }

    /// Create spinner for the submission fetch
    pub fn start_fetch(&mut self) -> ProgressBar {
        self.finish_current();

        let pb = if self.progress_enabled {
            let pb = self.multi_progress.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap()
            );
            pb.enable_steady_tick(self.update_interval);
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message("Loading submissions...");

        self.current_bar = Some(pb.clone());
        pb
    }

    /// Create spinner for an upload in flight
    pub fn start_upload(&mut self, file_name: &str) -> ProgressBar {
        self.finish_current();

        let pb = if self.progress_enabled {
            let pb = self.multi_progress.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap()
            );
            pb.enable_steady_tick(self.update_interval);
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(format!("Uploading {}...", file_name));

        self.current_bar = Some(pb.clone());
        pb
    }

    /// Create spinner for a resume download
    pub fn start_download(&mut self, file_name: &str) -> ProgressBar {
        self.finish_current();

        let pb = if self.progress_enabled {
            let pb = self.multi_progress.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap()
            );
            pb.enable_steady_tick(self.update_interval);
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(format!("Downloading {}...", file_name));

        self.current_bar = Some(pb.clone());
        pb
    }

    /// Finish current spinner
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Finish spinner with success message
    pub fn finish_with_success(&mut self, message: &str, duration_ms: u64) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        println!("{} {} {}",
            "✓".green(),
            message,
            format!("({}ms)", duration_ms).dimmed()
        );
    }

    /// Finish spinner with error message
    pub fn finish_with_error(&mut self, message: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        println!("{} {}", "✗".red(), message.red());
    }

    /// Display the submission listing as numbered cards
    pub fn render_submissions(&self, submissions: &[Submission]) {
        println!("\n{}", format!("Resume Submissions ({})", submissions.len()).bold().cyan());
        println!("{}", "-".repeat(60).cyan());

        if submissions.is_empty() {
            println!("\n{}", "No submissions yet".bold());
            println!("{}\n", "Upload resumes to see them here.".dimmed());
            return;
        }

        for (i, submission) in submissions.iter().enumerate() {
            println!("\n  {}. {}", (i + 1).to_string().cyan(), submission.name.bold());
            println!("     📱 {}", submission.mobile_number);
            println!("     📄 {}", submission.resume_filename);
            println!("     📅 {}", submission.formatted_created_at().dimmed());
        }
        println!();
    }

    /// Printed after the listing in the shell
    pub fn show_listing_hint(&self) {
        println!("Use {} or {} to grab a resume.\n",
            "/download <n>".green(), "/view <n>".green());
    }

    /// Printed after a failed fetch in the shell
    pub fn show_retry_hint(&self) {
        println!("{}", "Run /retry to try again.".dimmed());
    }

    /// Shown at the top of the upload wizard
    pub fn show_upload_header(&self) {
        self.show_section("Upload Your Resume");
        println!("{}", "Supported formats: PDF, DOC, DOCX (Max size: 5MB)".dimmed());
    }

    /// Show the picked resume before it is sent
    pub fn show_file_selected(&self, file_name: &str, size: &str) {
        println!("{} {}", "✓ File selected:".green(), file_name.bold());
        println!("  {}", format!("Size: {}", size).dimmed());
    }

    /// Display a standalone success notice
    pub fn show_success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Display debug message (only if verbose)
    pub fn show_debug(&self, debug: &str, verbose: bool) {
        if verbose {
            println!("{} {}", "Debug:".dimmed(), debug.dimmed());
        }
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
