use thiserror::Error;

/// Unified error type for np operations
#[derive(Error, Debug)]
pub enum NpError {
    #[error("Working tree has uncommitted changes: {}", files.join(", "))]
    DirtyWorkingTree { files: Vec<String> },

    #[error("Invalid base version: {0}")]
    InvalidBaseVersion(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("History query failed: {0}")]
    HistoryQuery(String),

    #[error("Cannot parse remote URL: {0}")]
    RemoteUrlParse(String),

    #[error("Version field not found in {0}")]
    FieldNotFound(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Browser launch failed: {0}")]
    Browser(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in np
pub type Result<T> = std::result::Result<T, NpError>;

impl NpError {
    pub fn invalid_version(version: impl Into<String>) -> Self {
        NpError::InvalidVersion(version.into())
    }

    pub fn history(msg: impl Into<String>) -> Self {
        NpError::HistoryQuery(msg.into())
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        NpError::Manifest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        NpError::Config(msg.into())
    }

    pub fn prompt(msg: impl Into<String>) -> Self {
        NpError::Prompt(msg.into())
    }

    /// Process exit code for a fatal error.
    ///
    /// Declines and validation failures the user can act on exit with 1,
    /// everything else with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            NpError::DirtyWorkingTree { .. }
            | NpError::InvalidBaseVersion(_)
            | NpError::InvalidVersion(_) => 1,
            _ => 2,
        }
    }
}
