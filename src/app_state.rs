//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{Error, JsonStore, ledger::Ledger};

/// The state of the server.
///
/// The ledger is the single source of truth for all budgets and expenses; it
/// is loaded from the store once at startup and written back after every
/// mutation.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The in-memory ledger shared by all request handlers.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The store the ledger is persisted to after each mutation.
    pub store: Arc<JsonStore>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState], loading the ledger from `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the data file exists but cannot be read or parsed.
    pub fn new(store: JsonStore, local_timezone: &str) -> Result<Self, Error> {
        let ledger = store.load()?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            store: Arc::new(store),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use super::AppState;
    use crate::JsonStore;

    #[test]
    fn loads_the_ledger_from_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        std::fs::write(store.path(), r#"{"budgetName": "My Budget", "budget": 100}"#).unwrap();

        let state = AppState::new(store, "UTC").unwrap();

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.budgets.len(), 1);
    }

    #[test]
    fn corrupt_data_file_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        std::fs::write(store.path(), "not json").unwrap();

        assert!(AppState::new(store, "UTC").is_err());
    }
}
