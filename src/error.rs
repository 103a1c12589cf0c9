//! Error types for the Grievance library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`GrievanceError`] enum. Only a handful of variants ever reach callers of
//! [`ComplaintEngine`](crate::engine::ComplaintEngine): prediction paths
//! recover from `Untrained` and `AnalysisDegraded` internally.
//!
//! # Examples
//!
//! ```
//! use grievance::error::{GrievanceError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GrievanceError::invalid_input("training set is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Grievance operations.
#[derive(Error, Debug)]
pub enum GrievanceError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Caller supplied unusable input (empty text, empty training set).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A pipeline was asked to predict before it was fitted.
    #[error("Model not trained: {0}")]
    Untrained(String),

    /// Retraining did not complete; the previously live models are still in place.
    #[error("Training failed: {message}")]
    TrainingFailed { message: String },

    /// Sentiment scoring failed unexpectedly.
    #[error("Analysis degraded: {0}")]
    AnalysisDegraded(String),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored model artifact could not be decoded or failed its checksum.
    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with GrievanceError.
pub type Result<T> = std::result::Result<T, GrievanceError>;

impl GrievanceError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        GrievanceError::InvalidInput(msg.into())
    }

    /// Create a new untrained error.
    pub fn untrained<S: Into<String>>(msg: S) -> Self {
        GrievanceError::Untrained(msg.into())
    }

    /// Create a new training failure.
    pub fn training_failed<S: Into<String>>(msg: S) -> Self {
        GrievanceError::TrainingFailed {
            message: msg.into(),
        }
    }

    /// Create a new degraded analysis error.
    pub fn degraded<S: Into<String>>(msg: S) -> Self {
        GrievanceError::AnalysisDegraded(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        GrievanceError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        GrievanceError::Storage(msg.into())
    }

    /// Create a new corrupt artifact error.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        GrievanceError::CorruptArtifact(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        GrievanceError::Serialization(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        GrievanceError::Config(msg.into())
    }

    /// Whether this error is a caller mistake rather than an engine fault.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GrievanceError::InvalidInput(_))
    }
}

impl From<bincode::Error> for GrievanceError {
    fn from(err: bincode::Error) -> Self {
        GrievanceError::serialization(err.to_string())
    }
}
