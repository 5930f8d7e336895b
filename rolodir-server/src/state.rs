use std::sync::Arc;

use anyhow::Result;
use rolodir_core::config::RolodirConfig;
use rolodir_core::{ContactStore, MemoryStore};

/// Shared application state: one record-store backend for the process, with a
/// per-request store view scoped to the caller's user id.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<MemoryStore>,
}

impl AppState {
    /// Load config, open the backend, and return the state plus any
    /// configured port override.
    pub fn new() -> Result<(Self, Option<u16>)> {
        let config = RolodirConfig::load()?;
        let backend = MemoryStore::open(config.records_path())?;

        let state = AppState {
            backend: Arc::new(backend),
        };
        Ok((state, config.port))
    }

    /// A store scoped to the given session. `None` produces a signed-out
    /// store whose mutations fail with `AuthenticationRequired`.
    pub fn store(&self, user: Option<String>) -> ContactStore<MemoryStore> {
        ContactStore::new(Arc::clone(&self.backend), user)
    }
}
