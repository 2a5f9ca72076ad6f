use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Operation conflicts with current state: {0}")]
    Conflict(String),
    /// A record referenced by an in-flight job disappeared from the store.
    #[error("Consistency violation: {0}")]
    Consistency(String),
    #[error(transparent)]
    Transient(#[from] anyhow::Error),
}

impl DomainError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Transient(_))
    }

    /// Recovers a domain error a store raised through `anyhow`; anything
    /// else is transient.
    pub fn from_store(err: anyhow::Error) -> Self {
        err.downcast::<DomainError>()
            .unwrap_or_else(DomainError::Transient)
    }
}
