//! Linear snapshot history with a current index.

use crate::snapshot::Snapshot;

/// Ordered sequence of snapshots plus the index of the current one.
///
/// Recording after an undo prunes the redo tail (single branch, no tree).
/// The list is capacity-bounded; the oldest entry is evicted first.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    /// Index of the current snapshot. Valid whenever `entries` is
    /// non-empty.
    index: usize,
    capacity: usize,
}

impl History {
    /// Create an empty history holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Append a snapshot, pruning any redo tail and evicting the oldest
    /// entry when over capacity.
    pub fn record(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.index -= 1;
        }
    }

    /// Step back one snapshot and return it, or `None` at the oldest
    /// entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.can_undo() {
            self.index -= 1;
            Some(&self.entries[self.index])
        } else {
            None
        }
    }

    /// Step forward one snapshot and return it, or `None` at the newest
    /// entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.can_redo() {
            self.index += 1;
            Some(&self.entries[self.index])
        } else {
            None
        }
    }

    /// The snapshot at the current index, if any has been recorded.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }

    /// Whether an undo step is available (drives the undo affordance).
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo step is available (drives the redo affordance).
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current index into the retained snapshots.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
