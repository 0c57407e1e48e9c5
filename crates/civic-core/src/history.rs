//! Linear undo/redo history over immutable snapshots.
//!
//! A [`History`] keeps the current snapshot together with the snapshots that
//! preceded it (`past`) and the snapshots that were undone (`future`). The
//! history never branches: committing a new snapshot always discards `future`.

use std::collections::VecDeque;

/// Observable undo/redo availability of a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum HistoryState {
    NoHistory,
    CanUndoOnly,
    CanRedoOnly,
    CanUndoAndRedo,
}

/// Past/present/future triple.
///
/// `future` is only ever populated by [`History::undo`], so a non-empty
/// `future` means the most recent operation was an undo.
#[derive(Debug, Clone)]
pub struct History<S> {
    past: Vec<S>,
    present: S,
    future: VecDeque<S>,
    /// Maximum number of entries kept in `past` and in `future`.
    limit: Option<usize>,
}

impl<S> History<S> {
    /// Creates an unbounded history with `present` as its only snapshot.
    pub fn new(present: S) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: VecDeque::new(),
            limit: None,
        }
    }

    /// Bounds `past` and `future` to at most `limit` entries each.
    ///
    /// When `past` overflows the oldest entry is evicted. A limit of zero
    /// disables undo entirely.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.enforce_limit();
        self
    }

    pub fn present(&self) -> &S {
        &self.present
    }

    pub fn past(&self) -> &[S] {
        &self.past
    }

    /// Undone snapshots, the next redo target first.
    pub fn future(&self) -> impl Iterator<Item = &S> {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        match (self.can_undo(), self.can_redo()) {
            (false, false) => HistoryState::NoHistory,
            (true, false) => HistoryState::CanUndoOnly,
            (false, true) => HistoryState::CanRedoOnly,
            (true, true) => HistoryState::CanUndoAndRedo,
        }
    }

    /// Replaces `present` with the mutator's result.
    ///
    /// The previous present is pushed onto `past` and `future` is cleared.
    /// Callers validate their input before calling this; a rejected action
    /// must not create a history entry.
    pub fn commit<F>(&mut self, mutator: F)
    where
        F: FnOnce(&S) -> S,
    {
        let next = mutator(&self.present);
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        self.future.clear();
        self.enforce_limit();
    }

    /// Steps back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.enforce_limit();
        true
    }

    /// Re-applies the most recently undone snapshot. Returns `false` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        self.enforce_limit();
        true
    }

    /// Drops all history and installs `present`.
    pub fn reset(&mut self, present: S) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.past.len() > limit {
            let excess = self.past.len() - limit;
            self.past.drain(..excess);
        }
        // The far end of `future` is the oldest undo.
        self.future.truncate(limit);
    }
}

impl<S: Default> Default for History<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(history: &mut History<Vec<u32>>, value: u32) {
        history.commit(|present| {
            let mut next = present.clone();
            next.push(value);
            next
        });
    }

    #[test]
    fn test_new_has_no_history() {
        let history = History::new(0u32);
        assert_eq!(history.state(), HistoryState::NoHistory);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_pushes_present_to_past() {
        let mut history = History::new(vec![]);
        push(&mut history, 1);
        push(&mut history, 2);

        assert_eq!(history.present(), &vec![1, 2]);
        assert_eq!(history.past(), &[vec![], vec![1]]);
        assert_eq!(history.state(), HistoryState::CanUndoOnly);
    }

    #[test]
    fn test_undo_and_redo_move_between_stacks() {
        let mut history = History::new(vec![]);
        push(&mut history, 1);
        push(&mut history, 2);

        assert!(history.undo());
        assert_eq!(history.present(), &vec![1]);
        assert_eq!(history.state(), HistoryState::CanUndoAndRedo);

        assert!(history.undo());
        assert_eq!(history.present(), &Vec::<u32>::new());
        assert_eq!(history.state(), HistoryState::CanRedoOnly);
        assert_eq!(history.future().collect::<Vec<_>>(), vec![&vec![1], &vec![1, 2]]);

        assert!(history.redo());
        assert_eq!(history.present(), &vec![1]);
        assert!(history.redo());
        assert_eq!(history.present(), &vec![1, 2]);
        assert!(!history.redo());
    }

    #[test]
    fn test_undo_on_empty_past_is_noop() {
        let mut history = History::new(7u32);
        assert!(!history.undo());
        assert_eq!(*history.present(), 7);
    }

    #[test]
    fn test_commit_clears_future() {
        let mut history = History::new(vec![]);
        push(&mut history, 1);
        push(&mut history, 2);
        history.undo();
        assert!(history.can_redo());

        push(&mut history, 3);
        assert!(!history.can_redo());
        assert_eq!(history.present(), &vec![1, 3]);
        assert_eq!(history.state(), HistoryState::CanUndoOnly);
    }

    #[test]
    fn test_limit_evicts_oldest_past_entries() {
        let mut history = History::new(vec![]).with_limit(Some(2));
        for value in 1..=4 {
            push(&mut history, value);
        }

        assert_eq!(history.past_len(), 2);
        assert_eq!(history.past(), &[vec![1, 2], vec![1, 2, 3]]);

        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.present(), &vec![1, 2]);
    }

    #[test]
    fn test_reset_drops_history() {
        let mut history = History::new(vec![]);
        push(&mut history, 1);
        history.undo();
        push(&mut history, 2);

        history.reset(vec![9]);
        assert_eq!(history.present(), &vec![9]);
        assert_eq!(history.state(), HistoryState::NoHistory);
    }
}
