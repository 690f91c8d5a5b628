//! Typed cursor mapping and the store seam used by the crawler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::github::{ContainerKind, CursorToken};

use super::error::PersistenceError;

/// Saved resumption cursor per container kind.
///
/// A kind without an entry is crawled from the beginning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorState(BTreeMap<ContainerKind, CursorToken>);

impl CursorState {
    /// Returns the saved cursor for `kind`.
    #[must_use]
    pub fn get(&self, kind: ContainerKind) -> Option<&CursorToken> {
        self.0.get(&kind)
    }

    /// Records the cursor of the last fully processed page for `kind`.
    pub fn set(&mut self, kind: ContainerKind, cursor: CursorToken) {
        self.0.insert(kind, cursor);
    }

    /// Returns true when no kind has a saved cursor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Durable storage for [`CursorState`].
pub trait CursorStore: Send + Sync {
    /// Loads the saved state, returning an empty state when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when stored state exists but cannot be read.
    fn load(&self) -> Result<CursorState, PersistenceError>;

    /// Replaces the stored state.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the state cannot be written.
    fn save(&self, state: &CursorState) -> Result<(), PersistenceError>;
}

/// Cursor store kept in memory, for tests and dry runs.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct MemoryCursorStore {
    state: std::sync::Mutex<CursorState>,
    saves: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-support"))]
impl MemoryCursorStore {
    /// Creates a store pre-populated with `state`.
    #[must_use]
    pub fn with_state(state: CursorState) -> Self {
        Self {
            state: std::sync::Mutex::new(state),
            saves: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Returns a copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::LockPoisoned`] if a writer panicked.
    pub fn snapshot(&self) -> Result<CursorState, PersistenceError> {
        self.load()
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CursorStore for MemoryCursorStore {
    fn load(&self) -> Result<CursorState, PersistenceError> {
        self.state
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| PersistenceError::LockPoisoned)
    }

    fn save(&self, state: &CursorState) -> Result<(), PersistenceError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        guard.clone_from(state);
        self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
