use thiserror::Error;

/// Errors produced while validating input records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("post must have text content or a media URL")]
    EmptyPost,

    #[error("post content exceeds {max} characters (got {actual})")]
    ContentTooLong { max: usize, actual: usize },

    #[error("comment content must not be empty")]
    EmptyComment,

    #[error("unknown media type: {0}")]
    UnknownMediaKind(String),
}
