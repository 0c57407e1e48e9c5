//! Generic domain store: a [`History`] wired to a [`PersistenceAdapter`].
//!
//! Domain-specific actions live next to their snapshot types (`view`,
//! `module`, `privacy`) as inherent impls on the concrete store aliases.

use std::sync::Arc;

use crate::coordinator::Undoable;
use crate::error::Result;
use crate::history::{History, HistoryState};
use crate::persistence::{Envelope, KeyValueStore, PersistenceAdapter};

/// One independently undoable, persisted area of UI state.
pub struct DomainStore<E: Envelope> {
    history: History<E::Snapshot>,
    persistence: PersistenceAdapter<E>,
}

impl<E: Envelope> DomainStore<E> {
    /// Opens the store: reads the persisted envelope once and merges it onto
    /// `defaults` before the store becomes readable.
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        defaults: E::Snapshot,
        history_limit: Option<usize>,
    ) -> Self {
        let persistence = PersistenceAdapter::<E>::new(storage);
        let present = persistence.load(defaults);
        tracing::debug!(key = E::KEY, "opened domain store");
        Self {
            history: History::new(present).with_limit(history_limit),
            persistence,
        }
    }

    /// Current snapshot.
    pub fn present(&self) -> &E::Snapshot {
        self.history.present()
    }

    pub fn history(&self) -> &History<E::Snapshot> {
        &self.history
    }

    pub fn history_state(&self) -> HistoryState {
        self.history.state()
    }

    pub fn past_len(&self) -> usize {
        self.history.past_len()
    }

    pub fn future_len(&self) -> usize {
        self.history.future_len()
    }

    pub fn storage_key(&self) -> &'static str {
        self.persistence.key()
    }

    /// Commits the mutator's result and persists the new present.
    ///
    /// The in-memory commit always happens; a storage failure is returned
    /// afterwards and leaves persistence behind memory until the next write.
    pub(crate) fn commit<F>(&mut self, mutator: F) -> Result<()>
    where
        F: FnOnce(&E::Snapshot) -> E::Snapshot,
    {
        self.history.commit(mutator);
        tracing::debug!(key = E::KEY, past = self.history.past_len(), "committed");
        self.persistence.write(self.history.present())
    }

    /// Drops history, removes the stored envelope and installs `defaults`.
    ///
    /// The in-memory reset happens even when removing the envelope fails.
    pub fn reset(&mut self, defaults: E::Snapshot) -> Result<()> {
        self.reset_in_memory(defaults);
        self.clear_persisted()
    }

    pub(crate) fn reset_in_memory(&mut self, defaults: E::Snapshot) {
        self.history.reset(defaults);
        tracing::debug!(key = E::KEY, "reset");
    }

    pub(crate) fn clear_persisted(&self) -> Result<()> {
        self.persistence.clear()
    }

    fn persist_after_move(&self) {
        // Failures were already logged by the adapter; memory stays ahead.
        let _ = self.persistence.write(self.history.present());
    }
}

impl<E: Envelope> Undoable for DomainStore<E> {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        tracing::debug!(key = E::KEY, "undo");
        self.persist_after_move();
        true
    }

    fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        tracing::debug!(key = E::KEY, "redo");
        self.persist_after_move();
        true
    }
}
