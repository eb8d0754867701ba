/// Rejection of user-submitted input, raised before any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent, empty, or whitespace only.
    #[error("missing field")]
    MissingField,

    /// The email did not have the `local@domain.tld` shape.
    #[error("invalid format")]
    InvalidFormat,
}

/// Failure of the backing session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
