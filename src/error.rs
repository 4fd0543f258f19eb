//! Failure taxonomy for the reward core.
//!
//! None of these ever reach the visitor: the ledger logs them and degrades to
//! "reward not unlocked" or "reward not remembered".

/// Errors from the key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available in this context")]
    Unavailable,

    #[error("failed to read key: {0}")]
    Read(String),

    #[error("failed to write key: {0}")]
    Write(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RewardError {
    #[error("reward not in catalog: {0}")]
    NotFound(String),

    #[error("reward already discovered: {0}")]
    AlreadyDiscovered(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(#[from] serde_json::Error),
}
