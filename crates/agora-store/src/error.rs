use agora_types::{PostId, UserId, ValidationError};

/// Errors from entity store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No user has the given id.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No post has the given id.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Input failed validation; nothing was written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A user tried to follow themselves.
    #[error("user {0} cannot follow themselves")]
    SelfFollowRejected(UserId),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::PostNotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
