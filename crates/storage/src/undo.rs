//! Undo log for rollback
//!
//! Each write records the pre-image of the key it touches as a tagged
//! compensating action. Rollback replays the log newest-first, so a key
//! written several times by one transaction ends up with the value it had
//! before the first of those writes.

use interleave_core::{Key, Value};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A compensating action that undoes one write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndoAction {
    /// The key held `value` before the write; put it back
    Restore {
        /// Key to restore
        key: Key,
        /// Pre-image value
        value: Value,
    },
    /// The key did not exist before the write; remove it
    Delete {
        /// Key to remove
        key: Key,
    },
}

impl UndoAction {
    /// Build the compensator for a write to `key` whose pre-image was `previous`
    pub fn for_pre_image(key: Key, previous: Option<Value>) -> Self {
        match previous {
            Some(value) => UndoAction::Restore { key, value },
            None => UndoAction::Delete { key },
        }
    }

    /// Key this action touches
    pub fn key(&self) -> Key {
        match self {
            UndoAction::Restore { key, .. } | UndoAction::Delete { key } => *key,
        }
    }

    /// Apply this action to the key map
    pub fn apply(&self, data: &mut FxHashMap<Key, Value>) {
        match *self {
            UndoAction::Restore { key, value } => {
                data.insert(key, value);
            }
            UndoAction::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}

/// Ordered compensating actions for one transaction
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    actions: Vec<UndoAction>,
}

impl UndoLog {
    /// Create an empty undo log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-image of an upcoming `set` on `key`
    pub fn record_set(&mut self, key: Key, previous: Option<Value>) {
        self.actions.push(UndoAction::for_pre_image(key, previous));
    }

    /// Record the pre-image of an upcoming `delete` on `key`
    ///
    /// Deleting an absent key changes nothing, so nothing is recorded.
    pub fn record_delete(&mut self, key: Key, previous: Option<Value>) {
        if let Some(value) = previous {
            self.actions.push(UndoAction::Restore { key, value });
        }
    }

    /// Recorded actions in write order
    pub fn actions(&self) -> &[UndoAction] {
        &self.actions
    }

    /// Number of recorded actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Undo every recorded write, newest first, consuming the log
    ///
    /// Returns the number of actions applied.
    pub fn replay(self, data: &mut FxHashMap<Key, Value>) -> usize {
        let applied = self.actions.len();
        for action in self.actions.iter().rev() {
            action.apply(data);
        }
        applied
    }
}
