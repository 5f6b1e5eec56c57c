//! Document-level normalization errors.
//!
//! A document that fails with one of these is left out of the canonical corpus;
//! the rest of the batch carries on. Directory and file I/O failures are not
//! represented here, they surface as `anyhow` errors and abort the job.

use thiserror::Error;

/// Why a raw document could not be normalized.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The document is not valid JSON or has the wrong shape.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required text field is absent. Not defaulted.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// The document has no questions.
    #[error("document has no questions")]
    NoQuestions,

    /// A question has no options.
    #[error("question {question} has no options")]
    NoOptions { question: usize },

    /// A result profile carries neither `mbtiType` nor `type`.
    #[error("result profile {index} has no type code")]
    MissingTypeCode { index: usize },

    /// The id cannot be used as a file name in the output tree.
    #[error("invalid test id for a file name: {0:?}")]
    InvalidId(String),

    /// A result profile's code is not one of the sixteen.
    #[error("invalid type code: {0}")]
    InvalidTypeCode(String),
}

impl NormalizeError {
    /// Returns `true` for data-quality problems in otherwise well-formed documents.
    pub fn is_data_quality(&self) -> bool {
        matches!(self, NormalizeError::MissingField { .. })
    }
}
