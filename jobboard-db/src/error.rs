use thiserror::Error;

/// Failure raised by the job and company stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("malformed stored document: {0}")]
    Corrupt(#[from] serde_json::Error),
}
