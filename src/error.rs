//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every input or configuration problem the engine can report. Staffing
//! shortfalls are deliberately absent: they are results, not errors.

use thiserror::Error;

/// The main error type for the roster engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use shift_roster::error::EngineError;
///
/// let error = EngineError::UnsupportedGranularity {
///     value: "fortnight".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported granularity: fortnight");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The reference date could not be turned into a valid UTC calendar date.
    #[error("Invalid reference date '{input}': {message}")]
    InvalidReferenceDate {
        /// The raw input that was rejected.
        input: String,
        /// A description of why it was rejected.
        message: String,
    },

    /// The requested window granularity is not one of day, week or month.
    #[error("Unsupported granularity: {value}")]
    UnsupportedGranularity {
        /// The rejected granularity value.
        value: String,
    },

    /// A shift record is missing or has inconsistent temporal fields.
    #[error("Malformed shift record '{shift_id}': {message}")]
    MalformedShiftRecord {
        /// The ID of the malformed shift, or `<unknown>` when absent.
        shift_id: String,
        /// A description of what is wrong with the record.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is internally inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
