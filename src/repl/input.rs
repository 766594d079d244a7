//! Input handler for the shell using rustyline
//!
//! Provides readline functionality with history and editing, plus
//! pre-filled field prompts for the upload wizard.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Input handler managing the readline interface and command history
///
/// Features:
/// - Command line editing (Emacs-style by default)
/// - Persistent history (saved to disk)
/// - Graceful interrupt handling
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: ">resumedrop: ".to_string(),
        })
    }

    /// Create input handler with persistent history
    ///
    /// History file: ~/.resumedrop/history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        // Load existing history if file exists
        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(InputHandler {
            editor,
            history_path: Some(history_file),
            prompt: ">resumedrop: ".to_string(),
        })
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input
    /// - Ok(None) for EOF (Ctrl-D)
    /// - Err on interrupt (Ctrl-C) or other errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    return Ok(Some(String::new()));
                }

                // Add to history
                let _ = self.editor.add_history_entry(trimmed);

                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C pressed
                Err(anyhow::anyhow!("Interrupted"))
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D pressed
                Ok(None)
            }
            Err(err) => {
                Err(anyhow::anyhow!("Readline error: {}", err))
            }
        }
    }

    /// Read one form field, pre-filled with any saved draft value
    ///
    /// Returns Ok(None) when the user cancels with Ctrl-C or Ctrl-D.
    /// Field values are never added to the command history file.
    pub fn read_field(&mut self, label: &str, initial: &str) -> Result<Option<String>> {
        match self.editor.readline_with_initial(label, (initial, "")) {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk
    ///
    /// Called on graceful shutdown
    pub fn save_history(&mut self) -> Result<()> {
        if let Some(ref path) = self.history_path {
            self.editor.save_history(path)?;
        }
        Ok(())
    }

    /// Get history size
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}
