//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 2xx: Local index errors
//! - 3xx: Config errors
//! - 4xx: Search errors
//! - 5xx: Network errors
//! - 6xx: Storage errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Index errors (2xx)
    // ========================================
    /// E201: Index directory does not exist or has no index
    IndexMissing,
    /// E202: Index files are corrupted or unreadable
    IndexCorrupted,
    /// E203: Index input listing is malformed
    IndexInputInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Search errors (4xx)
    // ========================================
    /// E401: Search query has invalid syntax
    SearchQueryInvalid,
    /// E402: Usage catalog could not be loaded
    UsageCatalogInvalid,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: Cannot reach the remote search endpoint
    NetworkUnreachable,
    /// E502: Network request timed out
    NetworkTimeout,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E605: JSON or TOML (de)serialization failed
    SerializationError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal failure
    InternalError,
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `IndexMissing` -> 201).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::IndexMissing => 201,
            Self::IndexCorrupted => 202,
            Self::IndexInputInvalid => 203,

            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::SearchQueryInvalid => 401,
            Self::UsageCatalogInvalid => 402,

            Self::NetworkUnreachable => 501,
            Self::NetworkTimeout => 502,

            Self::SerializationError => 605,

            Self::InternalError => 901,
            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E201").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::IndexMissing => "Build an index with `classfinder index build --input <artifacts.jsonl> --output <dir>`",
            Self::IndexCorrupted => "Rebuild the index directory with `classfinder index build`",
            Self::IndexInputInvalid => "Each input line must be a JSON object with g, a, v and classes fields",
            Self::ConfigInvalid => "Check the config file for TOML syntax errors or out-of-range values",
            Self::ConfigMissingRequired => "Set the missing value in config.toml or via a CLASSFINDER_* environment variable",
            Self::SearchQueryInvalid => "Pass a class name such as `ArrayList` or `java.util.ArrayList`",
            Self::UsageCatalogInvalid => "The usage catalog must be a JSON object mapping `groupId:artifactId` to a count",
            Self::NetworkUnreachable => "Check network connectivity, or pass --offline to search the local index only",
            Self::NetworkTimeout => "Increase remote.timeout_ms in config.toml",
            Self::SerializationError => "The input could not be parsed; verify it is well-formed JSON or TOML",
            Self::InternalError => "Re-run with -vv and report the log output",
            Self::IoError => "Check that the path exists and is readable",
        }
    }

    /// Get the error category (e.g., "index", "network").
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            2 => "index",
            3 => "config",
            4 => "search",
            5 => "network",
            6 => "storage",
            _ => "internal",
        }
    }

    /// Whether the user can plausibly recover from this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InternalError)
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::IndexMissing,
            Self::IndexCorrupted,
            Self::IndexInputInvalid,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::SearchQueryInvalid,
            Self::UsageCatalogInvalid,
            Self::NetworkUnreachable,
            Self::NetworkTimeout,
            Self::SerializationError,
            Self::InternalError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
