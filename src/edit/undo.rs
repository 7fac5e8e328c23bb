//! Snapshot-based undo.

use std::fmt::Debug;

use crate::raster::geom::Rect;

/// Full editor state captured before a mutation.
///
/// Always carries both sets, so restoring never has to guess which one a
/// snapshot belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub regions: Vec<Rect>,
    pub areas: Vec<Rect>,
}

pub trait UndoStack<T: Debug>: Debug {
    fn push(&mut self, value: T);
    fn undo(&mut self) -> Option<T>;
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded stack of whole-state snapshots. There is no redo.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStack<T: Debug> {
    entries: Vec<T>,
}

impl<T: Debug> SnapshotStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Most recent snapshot, without popping it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.last()
    }
}

impl<T: Debug> UndoStack<T> for SnapshotStack<T> {
    fn push(&mut self, value: T) {
        self.entries.push(value);
    }

    fn undo(&mut self) -> Option<T> {
        self.entries.pop()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
