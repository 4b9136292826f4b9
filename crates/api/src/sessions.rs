//! In-memory ledger sessions.
//!
//! One ledger per session; edits to a session are serialized by its mutex.
//! Sessions left idle past the configured window are evicted, and the store
//! holds at most `max_sessions` entries. Sessions are never persisted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use moka::sync::Cache;
use nomina_core::ledger::{Ledger, LedgerView};
use nomina_shared::LedgerConfig;
use nomina_shared::types::LedgerSessionId;
use tracing::info;

type SharedLedger = Arc<Mutex<Ledger>>;

/// Store of live ledger sessions.
#[derive(Clone)]
pub struct LedgerSessions {
    sessions: Cache<LedgerSessionId, SharedLedger>,
}

impl LedgerSessions {
    /// Creates an empty store bounded by `max_sessions` entries, evicting
    /// sessions not touched within `idle`.
    #[must_use]
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle)
            .build();
        Self { sessions }
    }

    /// Creates a store sized from the ledger configuration.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(
            config.max_sessions,
            Duration::from_secs(config.session_idle_secs),
        )
    }

    /// Registers a ledger under a fresh id.
    pub fn create(&self, ledger: Ledger) -> (LedgerSessionId, LedgerView) {
        let id = LedgerSessionId::new();
        let view = ledger.view();
        self.sessions.insert(id, Arc::new(Mutex::new(ledger)));
        info!(session_id = %id, rows = view.rows.len(), "Ledger session created");
        (id, view)
    }

    /// Renders a session.
    #[must_use]
    pub fn view(&self, id: LedgerSessionId) -> Option<LedgerView> {
        self.sessions.get(&id).map(|ledger| lock(&ledger).view())
    }

    /// Applies `f` to a session and renders the result.
    pub fn update<R>(
        &self,
        id: LedgerSessionId,
        f: impl FnOnce(&mut Ledger) -> R,
    ) -> Option<(R, LedgerView)> {
        let shared = self.sessions.get(&id)?;
        let mut ledger = lock(&shared);
        let result = f(&mut ledger);
        Some((result, ledger.view()))
    }

    /// Drops a session. Returns true if it existed.
    pub fn remove(&self, id: LedgerSessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Ledger session closed");
        }
        removed
    }

    /// Returns true if the session exists.
    #[must_use]
    pub fn contains(&self, id: LedgerSessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Number of live sessions, after pending evictions are applied.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }

    /// Returns true if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LedgerSessions {
    fn default() -> Self {
        Self::from_config(&LedgerConfig::default())
    }
}

// A session whose edit panicked stays readable.
fn lock(ledger: &Mutex<Ledger>) -> MutexGuard<'_, Ledger> {
    ledger.lock().unwrap_or_else(PoisonError::into_inner)
}
