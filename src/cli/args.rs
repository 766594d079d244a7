//! Command-line argument parsing for ResumeDrop
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::config::Config;

/// ResumeDrop - Collect and browse resume submissions from the terminal
#[derive(Parser, Debug)]
#[command(name = "resumedrop")]
#[command(version = "0.1.0")]
#[command(about = "Collect and browse resume submissions from the terminal", long_about = None)]
pub struct Args {
    /// Backend host (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Backend port (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress spinners and color)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell
    Start,

    /// Submit one resume without entering the shell
    Upload {
        /// Applicant name
        #[arg(long)]
        name: String,

        /// 10-digit mobile number
        #[arg(long)]
        mobile: String,

        /// Path to the resume file (.pdf, .doc, or .docx)
        #[arg(long)]
        file: PathBuf,
    },

    /// Fetch and print all submissions
    List,

    /// Save one submission's resume to disk
    Download {
        /// 1-based listing number from `list`
        index: usize,

        /// Directory to save into (defaults to the configured download dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Open one submission's resume in the browser
    View {
        /// 1-based listing number from `list`
        index: usize,
    },

    /// Run system diagnostics and health checks
    Doctor,

    /// Display current configuration
    Config,

    /// Clean client state and temporary files
    Clean {
        /// Also remove downloaded resumes
        #[arg(long)]
        downloads: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Get the backend base URL, CLI flags overriding the config file
    pub fn server_url(&self, config: &Config) -> String {
        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);
        format!("http://{}:{}", host, port)
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show raw error detail
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
