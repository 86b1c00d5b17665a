//! CLI - Command Line Interface for vidshelf
//!
//! Without a subcommand the interactive shell starts. Subcommands cover
//! scripted sessions and one-shot queries; one-shot output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Interactive session
//! vidshelf --library data/videos.txt
//!
//! # Replay a command script, answering search prompts from the script
//! vidshelf run session.txt --answer-prompts
//!
//! # One-shot queries
//! vidshelf search cat --json
//! vidshelf search animal --tag
//! vidshelf list
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Search matched nothing
    NoResults = 3,
    /// A script command was rejected (with --strict)
    CommandFailed = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// vidshelf - in-memory video catalogue and player
///
/// Run without arguments to start the interactive shell.
/// Use subcommands for scripting.
#[derive(Parser, Debug)]
#[command(
    name = "vidshelf",
    version,
    about = "In-memory video catalogue with playback, playlists and flags",
    long_about = "Browse, play, search, flag and organise a fixed catalogue of videos.\n\n\
                  Run without arguments to start the interactive shell.\n\
                  Use subcommands for scripted sessions and one-shot queries.",
    after_help = "EXAMPLES:\n\
                  vidshelf                              Start the interactive shell\n\
                  vidshelf -l data/videos.txt           Use a specific catalogue\n\
                  vidshelf run session.txt              Replay a command script\n\
                  vidshelf search cat --json            One-shot search"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY one-shot commands)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalogue file (Title|id|tags per line)
    #[arg(long, short = 'l', global = true)]
    pub library: Option<PathBuf>,

    /// Seed for random playback
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run (omit for the interactive shell)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running a one-shot or scripted command
    pub fn is_cli_mode(&self) -> bool {
        !matches!(self.command, None | Some(Command::Shell))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive shell (default)
    Shell,

    /// Execute commands from a script file ("-" for stdin)
    Run(RunCmd),

    /// List all videos
    #[command(visible_alias = "ls")]
    List,

    /// Search videos by title or tag
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Print the number of videos in the catalogue
    Count,
}

/// Run a command script
#[derive(Args, Debug, PartialEq, Eq)]
pub struct RunCmd {
    /// Script path, one command per line
    #[arg(required = true)]
    pub script: PathBuf,

    /// Treat the line after a successful search as the follow-up answer
    #[arg(long, short = 'a')]
    pub answer_prompts: bool,

    /// Exit non-zero if any command was rejected
    #[arg(long)]
    pub strict: bool,
}

impl RunCmd {
    /// Whether the script is read from stdin
    pub fn from_stdin(&self) -> bool {
        self.script.as_os_str() == "-"
    }
}

/// One-shot search
#[derive(Args, Debug, PartialEq, Eq)]
pub struct SearchCmd {
    /// Search term (title pattern, or tag with --tag)
    #[arg(required = true)]
    pub term: String,

    /// Match tags exactly instead of titles
    #[arg(long, short = 't')]
    pub tag: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Count response
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub videos: usize,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print one compact JSON document per line
    pub fn print_line<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string(data)?);
        Ok(())
    }

    /// Print plain text lines
    pub fn text(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
