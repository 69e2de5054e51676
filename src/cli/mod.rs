//! Line-oriented shell rendering the dashboard and monthly resume as text.

pub mod commands;
pub mod output;
pub mod shell;

use thiserror::Error;

use crate::core::services::ServiceError;
use crate::errors::FinanceError;

pub use shell::{run_cli, ShellContext};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// How the shell reads its commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    /// Line editor with history and tab completion.
    Interactive,
    /// Plain line-by-line reading of stdin.
    Script,
}

impl CliMode {
    pub fn detect(script_requested: bool, stdin_is_terminal: bool) -> Self {
        if script_requested || !stdin_is_terminal {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
