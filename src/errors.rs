//! Error types for letter_topics
//!
//! This module defines the error taxonomy used throughout the pipeline.
//! Errors are raised synchronously at the stage that detects them and
//! terminate the current analysis request; no stage retries internally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Main error type for letter_topics
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisError {
    /// The input table is missing or malformed in a required column
    #[error("Schema error in column '{column}': {message}")]
    Schema { column: String, message: String },

    /// The document set reaching the vocabulary builder is empty, or every
    /// document reduced to zero tokens after normalization
    #[error("Empty corpus: {message}")]
    EmptyCorpus { message: String },

    /// Invalid training parameters, or topic count exceeds vocabulary size
    #[error("Training error: {message}")]
    Training { message: String },

    /// Internal contract violation (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    /// Create a schema error for a named column
    pub fn schema(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an empty corpus error
    pub fn empty_corpus(message: impl Into<String>) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error indicates an empty corpus
    /// (often a consequence of overly narrow filters, not a bug)
    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, Self::EmptyCorpus { .. })
    }
}
