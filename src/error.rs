//! Error types and exit codes for prove-runner

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for prove-runner operations
#[derive(Error, Debug)]
pub enum ProveError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("No test class found at {file}:{line}")]
    NoSymbolAtCursor { file: String, line: usize },

    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("Failed to launch test runner: {message}")]
    Launch { message: String },

    #[error("Git error: {message}")]
    Git { message: String },

    #[error("Not a git repository")]
    NotGitRepo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProveError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: No test class at the cursor
    /// - 3: Settings file unreadable or malformed
    /// - 4: Test runner could not be started
    /// - 5: Git error / not a git repository
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::NoSymbolAtCursor { .. } => ExitCode::from(2),
            Self::Settings { .. } => ExitCode::from(3),
            Self::Launch { .. } => ExitCode::from(4),
            Self::Git { .. } => ExitCode::from(5),
            Self::NotGitRepo => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for prove-runner operations
pub type Result<T> = std::result::Result<T, ProveError>;
