//! Application errors.
//!
//! Picking a recipe cannot fail. Everything here comes from the edges:
//! configuration, the terminal, the log file, and command line input.

use std::process::ExitCode;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal setup, drawing, or event reading failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The log file could not be opened.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        /// Path that was requested
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON output could not be produced.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// `pick --name` named a recipe that is not in the catalog.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),
}

impl AppError {
    /// Numeric exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::UnknownRecipe(_) => 3,
            _ => 1,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
