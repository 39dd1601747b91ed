//! In-memory storage.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::port::StoragePort;

/// Storage that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, as with disabled browser storage.
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(StoreError::Unavailable {
                reason: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl StoragePort for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.check_writable()?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.values.remove(key);
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        self.check_writable()?;
        for key in keys {
            self.values.remove(*key);
        }
        Ok(())
    }
}
