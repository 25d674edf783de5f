// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded undo/redo log of ink snapshots.
//!
//! The history is a list of at most [`HISTORY_CAPACITY`] snapshots plus a
//! cursor in `[0, len]`. Right after a commit the cursor is `len` ("one past
//! the snapshot on screen"); undo and redo move it and hand back the snapshot
//! to display.
//!
//! Two behaviors are worth knowing about:
//!
//! - Committing while the cursor sits before the last snapshot discards every
//!   snapshot after the cursor, so redo is no longer possible.
//! - When the log is full the oldest snapshot is evicted and the cursor is
//!   not renumbered. After very long sessions the number of available undo
//!   steps is therefore capped, not equal to the number of gestures.

use alloc::vec::Vec;

use log::debug;

use crate::InkSnapshot;

/// Maximum number of snapshots kept.
pub const HISTORY_CAPACITY: usize = 100;

/// What the canvas has to do after an undo or redo.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    /// Nothing changes.
    None,
    /// Stepped before the oldest snapshot: clear the canvas.
    Clear,
    /// Show this snapshot.
    Restore(InkSnapshot),
}

/// Snapshot log with an undo cursor.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vec<InkSnapshot>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` when nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The cursor, always in `[0, len]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The stored snapshot at `index`.
    pub fn get(&self, index: usize) -> Option<&InkSnapshot> {
        self.snapshots.get(index)
    }

    /// Record a committed gesture.
    pub fn push(&mut self, snapshot: InkSnapshot) {
        // Truncate on the current indices; evicting first would shift the
        // branch point and keep one snapshot of the discarded branch.
        if self.cursor + 1 < self.snapshots.len() {
            debug!(
                "discarding {} redo snapshots",
                self.snapshots.len() - self.cursor - 1
            );
            self.snapshots.truncate(self.cursor + 1);
        }
        if self.snapshots.len() == HISTORY_CAPACITY {
            self.snapshots.remove(0);
            debug!("history full, evicted the oldest snapshot");
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len();
    }

    /// Step back.
    pub fn undo(&mut self) -> Transition {
        if self.snapshots.is_empty() {
            return Transition::None;
        }
        // Right after a commit the top snapshot is what is on screen; skip it.
        let cursor = if self.cursor == self.snapshots.len() {
            self.cursor - 1
        } else {
            self.cursor
        };
        match cursor.checked_sub(1) {
            Some(cursor) => {
                self.cursor = cursor;
                debug!("undo to snapshot {cursor}");
                Transition::Restore(self.snapshots[cursor].clone())
            }
            None => {
                self.cursor = 0;
                debug!("undo past the oldest snapshot");
                Transition::Clear
            }
        }
    }

    /// Step forward.
    pub fn redo(&mut self) -> Transition {
        let Some(last) = self.snapshots.len().checked_sub(1) else {
            return Transition::None;
        };
        if self.cursor < last {
            self.cursor += 1;
        }
        if self.cursor > last {
            return Transition::None;
        }
        debug!("redo to snapshot {}", self.cursor);
        Transition::Restore(self.snapshots[self.cursor].clone())
    }

    /// The snapshot [`Self::redo`] would restore, without moving the cursor.
    pub fn peek_redo(&self) -> Option<&InkSnapshot> {
        let last = self.snapshots.len().checked_sub(1)?;
        if self.cursor > last {
            None
        } else {
            self.snapshots.get((self.cursor + 1).min(last))
        }
    }

    /// Move the cursor back to the start without touching the snapshots.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Drop every snapshot and reset the cursor.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}
