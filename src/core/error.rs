//! Error types for the grade engine.
//!
//! Nothing in the numeric pipeline fails once a transcript has been accepted;
//! these cover the edges: intake, catalog loading, caller overrides, and the
//! notification sink.

use std::path::PathBuf;
use thiserror::Error;

/// Transcript input rejected before any reconciliation runs.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The input is not valid JSON
    #[error("Transcript is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array
    #[error("Transcript must be a JSON array of grade records, found {found}")]
    NotAnArray {
        /// JSON type that was found instead
        found: &'static str,
    },

    /// An array element is not an object
    #[error("Grade record #{index} is not a JSON object")]
    NotAnObject {
        /// Position in the input array
        index: usize,
    },

    /// An object is missing a required field or has a field of the wrong type
    #[error("Grade record #{index} is invalid: {message}")]
    InvalidRecord {
        /// Position in the input array
        index: usize,
        /// Deserializer message
        message: String,
    },
}

/// Override or reset against the reconciled course set failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseSetError {
    /// No course with this code exists in the set
    #[error("No course with code '{0}' in the reconciled set")]
    UnknownCourse(String),

    /// The grade is not one a caller may assign
    #[error("Grade '{0}' cannot be assigned (expected one of A+, A, B+, B, C+, C, D+, D, F, DT)")]
    UnsupportedGrade(String),
}

/// Curriculum catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The catalog is not valid TOML or does not match the schema
    #[error("Invalid catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// The catalog lists no required courses
    #[error("Catalog has no required courses")]
    Empty,
}

/// Delivery to the notification sink failed. Logged, never propagated to results.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing the payload failed
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be serialized
    #[error("Sink payload could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}
