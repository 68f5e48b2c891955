use std::collections::VecDeque;

use crate::layer::{Layer, LayerStack};

/// A deep copy of every layer (pixels, visibility, names and order), plus
/// the number the next new layer will be named after.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    layers: Vec<Layer>,
    next_number: usize,
}

impl Snapshot {
    pub fn capture(stack: &LayerStack) -> Self {
        Self {
            layers: stack.layers().to_vec(),
            next_number: stack.next_number(),
        }
    }

    fn restore_into(&self, stack: &mut LayerStack) {
        stack.restore(self.layers.clone(), self.next_number);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

/// Linear snapshot-based undo/redo.
///
/// The history tracks a baseline: the stack as it looked after the last
/// commit, undo or redo. Committing pushes that baseline, so undoing the
/// first stroke returns to the blank canvas the history was created with.
pub struct CommandHistory {
    /// Snapshots that can be restored by undo, oldest first
    undo_stack: VecDeque<Snapshot>,
    /// Snapshots that can be restored by redo
    redo_stack: Vec<Snapshot>,
    baseline: Snapshot,
    limit: Option<usize>,
}

impl CommandHistory {
    /// Creates an empty history whose baseline is the given stack
    pub fn new(stack: &LayerStack, limit: Option<usize>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            baseline: Snapshot::capture(stack),
            limit,
        }
    }

    /// Records the current stack as a new undo step and drops any redo steps
    pub fn snapshot(&mut self, stack: &LayerStack) {
        let previous = std::mem::replace(&mut self.baseline, Snapshot::capture(stack));
        self.undo_stack.push_back(previous);
        self.redo_stack.clear();
        self.enforce_limit();
        log::debug!("Snapshot taken, undo depth {}", self.undo_stack.len());
    }

    /// Restores the previous snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self, stack: &mut LayerStack) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.redo_stack.push(Snapshot::capture(stack));
        previous.restore_into(stack);
        self.baseline = previous;
        log::debug!("Undo, {} left / {} redoable", self.undo_stack.len(), self.redo_stack.len());
        true
    }

    /// Re-applies the last undone snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self, stack: &mut LayerStack) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.undo_stack.push_back(Snapshot::capture(stack));
        self.enforce_limit();
        next.restore_into(stack);
        self.baseline = next;
        log::debug!("Redo, {} undoable / {} left", self.undo_stack.len(), self.redo_stack.len());
        true
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drops every step and rebases on the given stack
    pub fn clear(&mut self, stack: &LayerStack) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.baseline = Snapshot::capture(stack);
    }
}
