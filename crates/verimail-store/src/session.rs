//! Typed access to the persisted session keys.

use serde::Serialize;
use serde::de::DeserializeOwned;
use verimail_model::ResultSet;

use crate::error::{Result, StoreError};
use crate::port::StoragePort;

/// The last submitted address list.
pub const ADDRESSES_KEY: &str = "persistedEmails";
/// The last result set.
pub const RESULTS_KEY: &str = "persistedData";
/// Whether the summary chart is shown.
pub const SHOW_CHART_KEY: &str = "persisted_show_chart";
/// The last-used sort of the results table.
pub const VIEW_KEY: &str = "persisted_view";

/// The persisted session on top of any [`StoragePort`].
///
/// Every setter writes through immediately. Getters never fail: unset and
/// undecodable keys read as their empty value.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: StoragePort> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn addresses(&self) -> Vec<String> {
        self.load(ADDRESSES_KEY).unwrap_or_default()
    }

    pub fn save_addresses(&mut self, addresses: &[String]) -> Result<()> {
        self.save(ADDRESSES_KEY, &addresses)
    }

    /// Appends to the stored list and returns the new list.
    pub fn append_addresses<I>(&mut self, addresses: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut list = self.addresses();
        list.extend(addresses);
        self.save_addresses(&list)?;
        Ok(list)
    }

    pub fn results(&self) -> Option<ResultSet> {
        self.load(RESULTS_KEY)
    }

    pub fn save_results(&mut self, results: &ResultSet) -> Result<()> {
        self.save(RESULTS_KEY, results)
    }

    /// Chart visibility; shown unless explicitly hidden.
    pub fn show_chart(&self) -> bool {
        self.load(SHOW_CHART_KEY).unwrap_or(true)
    }

    pub fn set_show_chart(&mut self, show: bool) -> Result<()> {
        self.save(SHOW_CHART_KEY, &show)
    }

    pub fn view<T: DeserializeOwned>(&self) -> Option<T> {
        self.load(VIEW_KEY)
    }

    pub fn save_view<T: Serialize>(&mut self, view: &T) -> Result<()> {
        self.save(VIEW_KEY, view)
    }

    /// Clears the address list and the results together.
    ///
    /// View preferences are kept.
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove_many(&[ADDRESSES_KEY, RESULTS_KEY])?;
        tracing::info!("Cleared persisted addresses and results");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.get(key)?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is corrupt; treating as absent");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| StoreError::Serialization {
            key: key.to_string(),
            source: e,
        })?;
        self.store.set(key, value)?;
        tracing::debug!(key, "Persisted session value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use serde_json::json;
    use verimail_model::{Reachability, VerificationResult};

    fn session() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new())
    }

    #[test]
    fn test_unset_keys_read_empty() {
        let session = session();
        assert!(session.addresses().is_empty());
        assert!(session.results().is_none());
        assert!(session.show_chart());
        assert!(session.view::<String>().is_none());
    }

    #[test]
    fn test_addresses_round_trip_in_order() {
        let mut session = session();
        let list = vec![
            "b@example.com".to_string(),
            "a@example.com".to_string(),
            "b@example.com".to_string(),
        ];
        session.save_addresses(&list).unwrap();
        assert_eq!(session.addresses(), list);
    }

    #[test]
    fn test_append_addresses() {
        let mut session = session();
        session.save_addresses(&["a@x.y".to_string()]).unwrap();
        let list = session.append_addresses(vec!["b@x.y".to_string()]).unwrap();
        assert_eq!(list, ["a@x.y", "b@x.y"]);
        assert_eq!(session.addresses(), list);
    }

    #[test]
    fn test_results_round_trip() {
        let mut session = session();
        let results = ResultSet::from_items(vec![VerificationResult::new(
            "a@example.com",
            Reachability::Safe,
        )]);
        session.save_results(&results).unwrap();
        assert_eq!(session.results(), Some(results));
    }

    #[test]
    fn test_corrupt_value_reads_absent() {
        let mut store = MemoryStore::new();
        store.set(ADDRESSES_KEY, json!("not a list")).unwrap();
        store.set(RESULTS_KEY, json!({"stats": 4})).unwrap();
        store.set(SHOW_CHART_KEY, json!("yes")).unwrap();
        let session = SessionStore::new(store);
        assert!(session.addresses().is_empty());
        assert!(session.results().is_none());
        assert!(session.show_chart());
    }

    #[test]
    fn test_null_results_read_absent() {
        let mut store = MemoryStore::new();
        store.set(RESULTS_KEY, json!(null)).unwrap();
        assert!(SessionStore::new(store).results().is_none());
    }

    #[test]
    fn test_reset_keeps_preferences() {
        let mut session = session();
        session.save_addresses(&["a@x.y".to_string()]).unwrap();
        session.save_results(&ResultSet::default()).unwrap();
        session.set_show_chart(false).unwrap();
        session.reset().unwrap();
        assert!(session.addresses().is_empty());
        assert!(session.results().is_none());
        assert!(!session.show_chart());
    }

    #[test]
    fn test_write_failure_is_returned() {
        let mut session = SessionStore::new(MemoryStore::read_only());
        assert!(matches!(
            session.save_addresses(&[]),
            Err(StoreError::Unavailable { .. })
        ));
    }
}
