//! Error type shared by the provider and the host collaborators it calls.

/// Common error type for introgate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity does not exist in the host store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The host item/library store failed to answer a query.
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Self::Store(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
