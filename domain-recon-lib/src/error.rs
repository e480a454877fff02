//! Error handling for reconnaissance operations.
//!
//! This module defines a comprehensive error type that covers the different
//! ways a batch run can fail, from unreadable input files to invalid queries.
//! Per-query transport failures are deliberately NOT represented here: they
//! are categorized into [`crate::WhoisFailure`] and [`crate::DnsError`] and
//! written into the output rows instead of propagating.

use std::fmt;

/// Main error type for reconnaissance operations.
///
/// This enum covers the failure modes that escape the per-domain boundary:
/// file handling, configuration, output sinks, and invalid input. Anything
/// that happens during a single query is folded into that query's row.
#[derive(Debug, Clone)]
pub enum DomainReconError {
    /// Invalid domain query format
    InvalidQuery {
        domain: String,
        reason: String,
    },

    /// DNS resolver setup failures (not per-query lookup failures)
    ResolverError {
        message: String,
    },

    /// File I/O errors when reading inputs or creating outputs
    FileError {
        path: String,
        message: String,
    },

    /// CSV encoding/decoding errors at the sink boundary
    CsvError {
        message: String,
    },

    /// Configuration errors (invalid settings, unparseable TOML, etc.)
    ConfigError {
        message: String,
    },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl DomainReconError {
    /// Create a new invalid query error.
    pub fn invalid_query<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidQuery {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new resolver setup error.
    pub fn resolver<M: Into<String>>(message: M) -> Self {
        Self::ResolverError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::ResolverError { message } => {
                write!(f, "Resolver error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::CsvError { message } => {
                write!(f, "CSV error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainReconError {}

// Implement From conversions for common error types
impl From<std::io::Error> for DomainReconError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<csv::Error> for DomainReconError {
    fn from(err: csv::Error) -> Self {
        Self::CsvError {
            message: err.to_string(),
        }
    }
}
