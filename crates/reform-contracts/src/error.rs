//! Error types for the reform dashboard.
//!
//! Data generation itself never fails. Errors only arise while loading the
//! reference catalog, validating user-supplied selectors at the CLI/TUI
//! boundary, and talking to the terminal.

use thiserror::Error;

/// The unified error type for the dashboard workspace.
#[derive(Debug, Error)]
pub enum ReformError {
    /// The catalog TOML could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The catalog parsed, but its tables are inconsistent.
    ///
    /// Example: an alert names a region that is not in the region table.
    #[error("catalog invariant violated: {reason}")]
    CatalogInvariant { reason: String },

    /// A page identifier did not match any of the five dashboard pages.
    #[error("unknown page '{name}'")]
    UnknownPage { name: String },

    /// A selector value is not present in the reference tables.
    #[error("unknown {kind} '{value}'")]
    UnknownSelection { kind: String, value: String },

    /// A JSON Schema document used by the record verifier is itself invalid.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// Terminal or stdout I/O failed.
    #[error("i/o error: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for ReformError {
    fn from(e: std::io::Error) -> Self {
        ReformError::Io {
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type ReformResult<T> = Result<T, ReformError>;
