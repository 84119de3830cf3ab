use crate::error::StorageError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the persisted counter and return the new value.
    /// A store that does not exist yet starts at 0, so the first call yields 1.
    async fn next(&self) -> Result<u64, StorageError>;
}
