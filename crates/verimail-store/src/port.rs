//! The storage seam.

use serde_json::Value;

use crate::error::Result;

/// Key/value storage of JSON values.
///
/// Reads are infallible from the caller's point of view: a backend that
/// cannot produce a value reports it as absent.
pub trait StoragePort {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Removes several keys as one change.
    ///
    /// Backends that persist should either remove all of them or none.
    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
        (**self).remove_many(keys)
    }
}
