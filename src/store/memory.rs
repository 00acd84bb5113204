use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{AtlasError, Result};
use crate::store::KeyValueStore;

/// Process-local store; nothing outlives the process.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| AtlasError::Other(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| AtlasError::Other(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
