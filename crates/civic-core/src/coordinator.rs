//! Cross-store undo/redo.
//!
//! Each domain store keeps its own history, so a single "undo" gesture in the
//! UI is applied to every store that has something to undo. One call can
//! therefore revert several unrelated domains at once; that is the observed
//! behavior and is kept as-is.

/// A store with a linear undo/redo history.
pub trait Undoable {
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    /// Returns `false` if there was nothing to undo.
    fn undo(&mut self) -> bool;
    /// Returns `false` if there was nothing to redo.
    fn redo(&mut self) -> bool;
}

/// Undoes every store that can undo. Returns how many stores moved.
pub fn undo_any(stores: &mut [&mut dyn Undoable]) -> usize {
    let mut moved = 0;
    for store in stores.iter_mut() {
        if store.can_undo() && store.undo() {
            moved += 1;
        }
    }
    tracing::debug!(moved, "undo_any");
    moved
}

/// Redoes every store that can redo. Returns how many stores moved.
pub fn redo_any(stores: &mut [&mut dyn Undoable]) -> usize {
    let mut moved = 0;
    for store in stores.iter_mut() {
        if store.can_redo() && store.redo() {
            moved += 1;
        }
    }
    tracing::debug!(moved, "redo_any");
    moved
}

/// True if any store can undo.
pub fn can_undo_any(stores: &[&dyn Undoable]) -> bool {
    stores.iter().any(|store| store.can_undo())
}

/// True if any store can redo.
pub fn can_redo_any(stores: &[&dyn Undoable]) -> bool {
    stores.iter().any(|store| store.can_redo())
}
