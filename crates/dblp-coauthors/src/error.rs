//! Error types for the co-author search tool.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;

/// Errors from the snapshot store layer.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// DuckDB operation failed (includes malformed snapshot files).
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// A snapshot file is not present in the snapshot directory.
    #[error("Snapshot file not found: {}", path.display())]
    MissingSnapshot {
        /// Expected location of the file
        path: PathBuf,
    },

    /// A snapshot file loaded but lacks a column the queries rely on.
    #[error("Snapshot table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Table the file was loaded into
        table: &'static str,
        /// Name of the absent column
        column: &'static str,
    },

    /// I/O error while inspecting snapshot files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a missing snapshot error.
    #[must_use]
    pub fn missing_snapshot(path: impl Into<PathBuf>) -> Self {
        Self::MissingSnapshot { path: path.into() }
    }
}

/// Errors from search session transitions.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// Error from the snapshot store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A transition was requested from a state that does not allow it.
    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        /// Requested action
        action: &'static str,
        /// Current session state name
        state: &'static str,
    },
}

impl SessionError {
    /// Create an invalid transition error.
    #[must_use]
    pub const fn invalid_transition(action: &'static str, state: &'static str) -> Self {
        Self::InvalidTransition { action, state }
    }
}

/// Errors from the snapshot freshness check and download.
#[derive(thiserror::Error, Debug)]
pub enum RefreshError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The configured remote directory is not a valid URL
    #[error("Invalid remote URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local file system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Downloaded data could not be moved into place
    #[error("Failed to persist {}: {source}", path.display())]
    Persist {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Errors from converting an RDF dump into snapshot files.
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Reading the dump or writing a snapshot file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dump file does not exist
    #[error("Dump file not found: {}", .0.display())]
    MissingDump(PathBuf),
}

/// Errors from tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from a session transition
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Error from the snapshot store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message for the protocol response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Session(SessionError::InvalidTransition { action, .. }) => {
                format!("Nothing to {action} yet. Run search_coauthors first.")
            }
            Self::Session(SessionError::Store(StoreError::MissingSnapshot { path }))
            | Self::Store(StoreError::MissingSnapshot { path }) => {
                format!("Snapshot file {} is missing. Check the snapshot directory.", path.display())
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for session transitions.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for refresh operations.
pub type RefreshResult<T> = Result<T, RefreshError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
