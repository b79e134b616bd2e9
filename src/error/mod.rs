//! Error handling for classfinder.
//!
//! This module provides:
//! - [`FinderError`]: The main error enum for all classfinder operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Serializable error for `--json` output
//!
//! Note that the search path itself never returns these errors to callers;
//! they surface only from setup, index building and the CLI.

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for classfinder operations.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Search index error: {0}")]
    SearchIndex(#[from] tantivy::TantivyError),

    #[error("Index not found at {0}")]
    IndexMissing(String),

    #[error("Invalid index input at line {line}: {reason}")]
    IndexInput { line: usize, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote search timed out after {0} ms")]
    RemoteTimeout(u64),

    #[error("Usage catalog error: {0}")]
    UsageCatalog(String),

    #[error("Query parse error: {0}")]
    QueryParse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl FinderError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::SearchIndex(_) => ErrorCode::IndexCorrupted,
            Self::IndexMissing(_) => ErrorCode::IndexMissing,
            Self::IndexInput { .. } => ErrorCode::IndexInputInvalid,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Http(_) => ErrorCode::NetworkUnreachable,
            Self::RemoteTimeout(_) => ErrorCode::NetworkTimeout,
            Self::UsageCatalog(_) => ErrorCode::UsageCatalogInvalid,
            Self::QueryParse(_) => ErrorCode::SearchQueryInvalid,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Runtime(_) => ErrorCode::InternalError,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_finder_error(self)
    }
}

/// A structured error with machine-readable code and suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "INDEX_MISSING")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 201)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "index", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_finder_error(err: &FinderError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&FinderError> for StructuredError {
    fn from(err: &FinderError) -> Self {
        Self::from_finder_error(err)
    }
}

/// Result type alias using FinderError.
pub type Result<T> = std::result::Result<T, FinderError>;
