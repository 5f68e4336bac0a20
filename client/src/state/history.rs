//! Bounded undo/redo container.
//!
//! DESIGN
//! ======
//! `History` owns the present value. Writers hand it a function from the
//! latest value to the next one, so every mutation observes the state left by
//! the previous write even when several async streams interleave. A write
//! either records a checkpoint (one undo step) or amends the present value in
//! place, which is how a whole streaming generation collapses into the single
//! step that started it.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

/// Maximum number of undo steps retained.
pub const HISTORY_LIMIT: usize = 50;

/// How a write interacts with the undo stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    /// Push the current value to the past before replacing it.
    Push,
    /// Replace the current value without adding an undo step.
    Amend,
}

/// Undo/redo wrapper around a cloneable state snapshot.
#[derive(Clone, Debug)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: Vec<T>,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self { past: VecDeque::new(), present: initial, future: Vec::new(), limit: limit.max(1) }
    }

    /// Current value.
    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replace the present value, recording an undo step.
    pub fn set(&mut self, next: T) {
        self.write(next, Checkpoint::Push);
    }

    /// Derive the next value from the latest one and store it.
    ///
    /// Returns `false` when `f` produced a value equal to the present one;
    /// such no-op writes leave both stacks untouched.
    pub fn update(&mut self, checkpoint: Checkpoint, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.present);
        if next == self.present {
            return false;
        }
        self.write(next, checkpoint);
        true
    }

    fn write(&mut self, next: T, checkpoint: Checkpoint) {
        let previous = std::mem::replace(&mut self.present, next);
        if checkpoint == Checkpoint::Push {
            self.past.push_back(previous);
            while self.past.len() > self.limit {
                self.past.pop_front();
            }
        }
        self.future.clear();
    }

    /// Rewrite the present value in place, leaving both stacks untouched.
    pub fn patch_present(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.present);
    }

    /// Step back one checkpoint. No-op at the boundary.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push(current);
        true
    }

    /// Step forward one checkpoint. No-op at the boundary.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop both stacks and start over from `value`.
    pub fn reset(&mut self, value: T) {
        self.past.clear();
        self.future.clear();
        self.present = value;
    }
}

impl<T: Clone + PartialEq + Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
