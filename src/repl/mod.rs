//! Interactive shell module for the resume-collection client
//!
//! Provides the read-eval-print loop that switches between the upload
//! form and the submission listing, with persistent command history
//! and built-in commands.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;

pub use crate::repl::commands::{Command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::session::{ActiveView, SessionManager, UploadRecord};

/// Shell session coordinator
///
/// Manages the interactive loop with:
/// - Input handling (rustyline)
/// - Command processing
/// - Session state management
/// - Display coordination
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
}

impl ReplSession {
    /// Create new shell session
    pub fn new() -> Result<Self> {
        let input_handler = InputHandler::new()?;
        let command_handler = CommandHandler::new();
        let session_manager = SessionManager::new();
        let display_manager = DisplayManager::new();

        Ok(ReplSession {
            input_handler,
            command_handler,
            session_manager,
            display_manager,
        })
    }

    /// Create shell session with persistent history
    pub fn with_history(history_path: PathBuf) -> Result<Self> {
        let input_handler = InputHandler::with_history(history_path)?;
        let command_handler = CommandHandler::new();
        let session_manager = SessionManager::new();
        let display_manager = DisplayManager::new();

        Ok(ReplSession {
            input_handler,
            command_handler,
            session_manager,
            display_manager,
        })
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str, server_url: &str) {
        self.display_manager.show_banner(version, server_url);
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input
    /// - Ok(None) for EOF/exit
    /// - Err for interrupt
    pub fn read_input(&mut self) -> Result<Option<String>> {
        self.input_handler.read_line()
    }

    /// Read one upload form field, pre-filled from the draft
    ///
    /// Returns Ok(None) when the user cancels.
    pub fn read_field(&mut self, label: &str, initial: &str) -> Result<Option<String>> {
        self.input_handler.read_field(label, initial)
    }

    /// Handle user input for the session-local commands
    ///
    /// Returns true if the session should continue, false to exit.
    /// Commands that need the HTTP client fall through untouched;
    /// fetch them with [`backend_command`](Self::backend_command) and
    /// dispatch from the shell loop.
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        // Skip empty input
        if input.trim().is_empty() {
            return Ok(true);
        }

        let command = self.command_handler.parse(input);
        self.command_handler.execute(command, &mut self.session_manager)
    }

    /// Parse input into a backend command, if it is one
    pub fn backend_command(&self, input: &str) -> Option<Command> {
        let command = self.command_handler.parse(input);
        if command.needs_backend() {
            Some(command)
        } else {
            None
        }
    }

    /// Get session manager (immutable)
    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    /// Get session manager (mutable)
    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session_manager
    }

    /// Get display manager
    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    /// Get display manager (mutable)
    pub fn display_mut(&mut self) -> &mut DisplayManager {
        &mut self.display_manager
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.command_handler.set_verbose(enable);
    }

    /// Save session state
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()?;
        Ok(())
    }
}
