use crate::error::StorageError;
use crate::ports::counter::CounterStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CounterState {
    count: u64,
    /// Other keys in the file, written back untouched.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// CounterStore persisted as `{"count": N}` in a JSON file.
///
/// `count` must be a non-negative integer; anything else is a
/// `StorageError::Json` and leaves the file as it was.
///
/// The read-modify-write is serialized within this process only; two
/// processes sharing the file can still race.
#[derive(Debug)]
pub struct FileCounter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(&self) -> Result<CounterState, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            let state = CounterState::default();
            self.write_state(&state).await?;
            return Ok(state);
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_state(&self, state: &CounterState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for FileCounter {
    async fn next(&self) -> Result<u64, StorageError> {
        let _guard = self.lock.lock().await;

        let mut state = self.read_state().await?;
        state.count = state
            .count
            .checked_add(1)
            .ok_or(StorageError::Overflow(state.count))?;
        self.write_state(&state).await?;

        Ok(state.count)
    }
}
