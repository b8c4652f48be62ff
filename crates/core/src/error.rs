use thiserror::Error;

/// Input rejected before any model call is issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("problem count {count} is outside {min}..={max}")]
    CountOutOfRange { count: i64, min: u32, max: u32 },

    #[error("the original problem has not been solved yet")]
    MissingOriginal,

    #[error("problem text cannot be empty")]
    EmptyProblemText,

    #[error("uploaded file is empty")]
    EmptyImage,

    #[error("uploaded file is not a PNG, JPEG or WEBP image")]
    UnsupportedImage,
}
