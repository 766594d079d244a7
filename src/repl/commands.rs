//! Command handler for shell built-in commands
//!
//! Parses `/` commands and executes the ones that only touch session
//! state. Commands that need the HTTP client are dispatched by the
//! shell loop after `execute` returns.

use anyhow::Result;
use colored::*;
use crate::repl::session::{ActiveView, SessionManager};

/// Shell command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Upload,
    List,
    Refresh,
    Retry,
    Download { index: Option<usize> },
    View { index: Option<usize> },
    Draft,
    History { limit: Option<usize> },
    Status,
    Reset,
    Exit,
    Verbose { enable: bool },
    Clear,
    Unknown { input: String },
}

impl Command {
    /// Commands that need the HTTP client
    pub fn needs_backend(&self) -> bool {
        matches!(
            self,
            Command::Upload
                | Command::List
                | Command::Refresh
                | Command::Retry
                | Command::Download { .. }
                | Command::View { .. }
        )
    }
}

/// Command handler for parsing and executing shell commands
pub struct CommandHandler {
    verbose: bool,
}

impl CommandHandler {
    /// Create new command handler
    pub fn new() -> Self {
        CommandHandler { verbose: false }
    }

    /// Parse input string into a command
    ///
    /// Complexity: O(1) string matching
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        // Not a command if doesn't start with /
        if !trimmed.starts_with('/') {
            return Command::Unknown { input: input.to_string() };
        }

        let parts: Vec<&str> = trimmed[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown { input: input.to_string() };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "upload" | "up" => Command::Upload,
            "list" | "ls" => Command::List,
            "refresh" => Command::Refresh,
            "retry" => Command::Retry,
            "download" | "dl" => {
                let index = parts.get(1).and_then(|s| s.parse().ok());
                Command::Download { index }
            }
            "view" => {
                let index = parts.get(1).and_then(|s| s.parse().ok());
                Command::View { index }
            }
            "draft" => Command::Draft,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "status" => Command::Status,
            "reset" => Command::Reset,
            "verbose" => {
                let enable = parts.get(1)
                    .map(|s| s.to_lowercase() == "on" || s == &"1" || s == &"true")
                    .unwrap_or(true);
                Command::Verbose { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    ///
    /// Returns true if the shell should continue, false if it should
    /// exit. Backend commands fall through untouched so the shell loop
    /// can dispatch them with the HTTP client in scope.
    pub fn execute(&mut self, command: Command, session: &mut SessionManager) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Upload
            | Command::List
            | Command::Refresh
            | Command::Retry
            | Command::Download { .. }
            | Command::View { .. } => Ok(true),
            Command::Draft => {
                self.show_draft(session);
                Ok(true)
            }
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(10));
                Ok(true)
            }
            Command::Status => {
                self.show_status(session);
                Ok(true)
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Session reset. Draft and history cleared.".yellow());
                Ok(true)
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(true)
            }
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H"); // ANSI escape codes to clear screen
                Ok(true)
            }
            Command::Unknown { input } => {
                let trimmed = input.trim();
                if trimmed.starts_with('/') {
                    println!("{}", format!("Unknown command: {}", trimmed).red());
                } else {
                    println!("{}", "Commands start with '/'.".yellow());
                }
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = vec![
            ("/upload, /up", "Fill in and submit the upload form"),
            ("/list, /ls", "Fetch and show all submissions"),
            ("/refresh", "Fetch the submission listing again"),
            ("/retry", "Retry after a failed fetch"),
            ("/download <n>", "Save resume n to the download folder"),
            ("/view <n>", "Open resume n in the browser"),
            ("/draft", "Show the saved upload form values"),
            ("/history [n]", "Show last n upload attempts (default: 10)"),
            ("/status", "Show session status and statistics"),
            ("/reset", "Clear session draft and history"),
            ("/verbose [on|off]", "Toggle verbose error output"),
            ("/clear, /cls", "Clear screen"),
            ("/help, /h", "Show this help message"),
            ("/exit, /quit, /q", "Exit the shell"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - {} walks through name, mobile number, and resume file", "/upload".cyan());
        println!("  - Use {} for command history", "UP/DOWN arrows".cyan());
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display the saved upload form values
    fn show_draft(&self, session: &SessionManager) {
        let draft = session.draft();

        println!("\n{}", "Upload Draft:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let field = |value: &str| -> String {
            if value.is_empty() {
                "(not set)".dimmed().to_string()
            } else {
                value.green().to_string()
            }
        };

        println!("  Name:          {}", field(&draft.name));
        println!("  Mobile Number: {}", field(&draft.mobile_number));
        println!("  Resume File:   {}", field(&draft.file_path));

        println!("\nRun {} to fill in or submit the draft.", "/upload".cyan());
        println!();
    }

    /// Display upload history
    fn show_history(&self, session: &SessionManager, limit: usize) {
        let history = session.get_history(limit);

        if history.is_empty() {
            println!("{}", "No uploads in history yet.".yellow());
            return;
        }

        println!("\n{}", format!("Upload History (last {}):", history.len()).bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        for (i, record) in history.iter().enumerate() {
            let index = history.len() - i;
            let status_icon = if record.success { "✓".green() } else { "✗".red() };
            let duration = format!("({}ms)", record.duration_ms).dimmed();

            println!("  {}. {} {} {} {}",
                index.to_string().cyan(),
                status_icon,
                record.name,
                format!("[{}]", record.file_name).dimmed(),
                duration
            );

            if self.verbose {
                if let Some(error) = &record.error {
                    println!("     Error: {}", error.dimmed());
                }
            }
        }
        println!();
    }

    /// Display session status
    fn show_status(&self, session: &SessionManager) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let duration = session.session_duration();
        let hours = duration / 3600;
        let minutes = (duration % 3600) / 60;
        let seconds = duration % 60;

        let duration_str = if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        };

        let fetch_state = if let Some(error) = session.fetch_error() {
            format!("failed ({})", error).red().to_string()
        } else if session.has_fetched() {
            "ok".green().to_string()
        } else {
            "never".yellow().to_string()
        };

        let view = match session.active_view() {
            ActiveView::Upload => "Upload",
            ActiveView::Submissions => "Submissions",
        };

        println!("  Uploads Attempted:  {}", session.upload_count().to_string().green());
        println!("  Uploads Succeeded:  {}", session.successful_uploads().to_string().green());
        println!("  Cached Submissions: {}", session.submissions().len().to_string().green());
        println!("  Last Fetch:         {}", fetch_state);
        println!("  Active View:        {}", view.cyan());
        println!("  Session Duration:   {}", duration_str.green());
        println!("  Verbose Mode:       {}", if self.verbose { "On".green() } else { "Off".red() });
        println!();
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::session::UploadRecord;

    #[test]
    fn test_parse_help() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/help"), Command::Help);
        assert_eq!(handler.parse("/h"), Command::Help);
    }

    #[test]
    fn test_parse_exit() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/exit"), Command::Exit);
        assert_eq!(handler.parse("/quit"), Command::Exit);
        assert_eq!(handler.parse("/q"), Command::Exit);
    }

    #[test]
    fn test_parse_upload() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/upload"), Command::Upload);
        assert_eq!(handler.parse("/up"), Command::Upload);
    }

    #[test]
    fn test_parse_list_and_refresh() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/list"), Command::List);
        assert_eq!(handler.parse("/ls"), Command::List);
        assert_eq!(handler.parse("/refresh"), Command::Refresh);
        assert_eq!(handler.parse("/retry"), Command::Retry);
    }

    #[test]
    fn test_parse_download() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/download 3"), Command::Download { index: Some(3) });
        assert_eq!(handler.parse("/dl 3"), Command::Download { index: Some(3) });
        assert_eq!(handler.parse("/download"), Command::Download { index: None });
        assert_eq!(handler.parse("/download abc"), Command::Download { index: None });
    }

    #[test]
    fn test_parse_view() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/view 1"), Command::View { index: Some(1) });
        assert_eq!(handler.parse("/view"), Command::View { index: None });
    }

    #[test]
    fn test_parse_history() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/history"), Command::History { limit: None });
        assert_eq!(handler.parse("/history 5"), Command::History { limit: Some(5) });
    }

    #[test]
    fn test_parse_draft_status_reset() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/draft"), Command::Draft);
        assert_eq!(handler.parse("/status"), Command::Status);
        assert_eq!(handler.parse("/reset"), Command::Reset);
    }

    #[test]
    fn test_parse_verbose() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/verbose"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose on"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose off"), Command::Verbose { enable: false });
    }

    #[test]
    fn test_parse_clear() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/clear"), Command::Clear);
        assert_eq!(handler.parse("/cls"), Command::Clear);
    }

    #[test]
    fn test_parse_unknown() {
        let handler = CommandHandler::new();
        match handler.parse("/unknown") {
            Command::Unknown { input } => assert!(input.contains("unknown")),
            _ => panic!("Expected Unknown command"),
        }
    }

    #[test]
    fn test_parse_non_command() {
        let handler = CommandHandler::new();
        match handler.parse("hello there") {
            Command::Unknown { .. } => {}
            _ => panic!("Expected Unknown command for non-command input"),
        }
    }

    #[test]
    fn test_needs_backend() {
        assert!(Command::Upload.needs_backend());
        assert!(Command::List.needs_backend());
        assert!(Command::Refresh.needs_backend());
        assert!(Command::Retry.needs_backend());
        assert!(Command::Download { index: Some(1) }.needs_backend());
        assert!(Command::View { index: None }.needs_backend());

        assert!(!Command::Help.needs_backend());
        assert!(!Command::Status.needs_backend());
        assert!(!Command::Exit.needs_backend());
        assert!(!Command::Draft.needs_backend());
    }

    #[test]
    fn test_execute_exit() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        let result = handler.execute(Command::Exit, &mut session).unwrap();
        assert!(!result); // Should return false to exit the shell
    }

    #[test]
    fn test_execute_help() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        let result = handler.execute(Command::Help, &mut session).unwrap();
        assert!(result); // Should continue
    }

    #[test]
    fn test_execute_backend_commands_fall_through() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        assert!(handler.execute(Command::Upload, &mut session).unwrap());
        assert!(handler.execute(Command::List, &mut session).unwrap());
        assert!(handler.execute(Command::Download { index: Some(1) }, &mut session).unwrap());
    }

    #[test]
    fn test_execute_reset() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        session.draft_mut().name = "Asha Rao".to_string();
        session.record_upload(UploadRecord {
            name: "Asha Rao".to_string(),
            file_name: "resume.pdf".to_string(),
            success: true,
            error: None,
            duration_ms: 100,
            timestamp: 1234567890,
        });

        handler.execute(Command::Reset, &mut session).unwrap();

        assert!(session.draft().is_blank());
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_execute_verbose() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        assert!(!handler.is_verbose());

        handler.execute(Command::Verbose { enable: true }, &mut session).unwrap();
        assert!(handler.is_verbose());

        handler.execute(Command::Verbose { enable: false }, &mut session).unwrap();
        assert!(!handler.is_verbose());
    }

    #[test]
    fn test_verbose_mode() {
        let mut handler = CommandHandler::new();

        assert!(!handler.is_verbose());
        handler.set_verbose(true);
        assert!(handler.is_verbose());
        handler.set_verbose(false);
        assert!(!handler.is_verbose());
    }
}
