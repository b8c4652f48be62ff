//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use tutor_core::ValidationError;

/// Errors emitted by a `ModelClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("model access is not configured")]
    Disabled,
    #[error("model request failed with status {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Which structured reply was being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySchema {
    Solution,
    SimilarProblems,
}

impl fmt::Display for ReplySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solution => write!(f, "solution"),
            Self::SimilarProblems => write!(f, "similar problems"),
        }
    }
}

/// The model answered, but not in the shape the schema asked for.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResponseFormatError {
    #[error("reply does not match the {schema} schema: {source}")]
    Malformed {
        schema: ReplySchema,
        #[source]
        source: serde_json::Error,
    },
    #[error("reply is missing the problem statement")]
    MissingProblemText,
    #[error("reply is missing the solution steps")]
    MissingSteps,
    #[error("reply contains no problems")]
    NoProblems,
}

/// Errors emitted by `SolveService` and `SimilarService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ResponseFormat(#[from] ResponseFormatError),
    #[error(transparent)]
    Upstream(#[from] ModelError),
}
