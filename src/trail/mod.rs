// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based undo for problem state.
//!
//! A trail records the old value of every slot written through it. Rewinding
//! to a checkpoint writes those old values back in reverse order, so undoing a
//! choice costs O(changes made by that choice) whatever the size of the state.
//!
//! Problems keep the trail next to the values it protects: `make_choice` opens
//! a checkpoint and writes through [`Trail::set`], `unmake_choice` calls
//! [`Trail::rewind`].

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry<V> {
    /// Slot that was written.
    index: usize,
    /// The value before the change.
    old_value: V,
}

/// Undo log over a slice of `Copy` values.
///
/// # Example
///
/// ```
/// use backtrack_trace::Trail;
///
/// let mut occupied = vec![false; 4];
/// let mut trail = Trail::new();
///
/// trail.checkpoint();
/// trail.set(&mut occupied, 2, true);
/// assert_eq!(occupied, [false, false, true, false]);
///
/// trail.rewind(&mut occupied);
/// assert_eq!(occupied, [false; 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail<V> {
    /// All trail entries recorded so far
    entries: Vec<TrailEntry<V>>,
    /// Stack of checkpoint indices for nested backtracking
    checkpoints: Vec<usize>,
}

impl<V: Copy> Trail<V> {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            checkpoints: Vec::with_capacity(64), // Reasonable depth estimate
        }
    }

    /// Record a checkpoint for later backtracking.
    ///
    /// Returns the checkpoint index.
    pub fn checkpoint(&mut self) -> usize {
        let checkpoint = self.entries.len();
        self.checkpoints.push(checkpoint);
        checkpoint
    }

    /// Write `new_value` into `values[index]`, remembering the old value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `values`.
    pub fn set(&mut self, values: &mut [V], index: usize, new_value: V) {
        let old_value = values[index];
        self.entries.push(TrailEntry { index, old_value });
        values[index] = new_value;
    }

    /// Rewind to the most recent checkpoint, restoring `values`.
    ///
    /// Returns true if there was a checkpoint to rewind to, false otherwise.
    pub fn rewind(&mut self, values: &mut [V]) -> bool {
        match self.checkpoints.pop() {
            Some(checkpoint) => {
                self.restore(values, checkpoint);
                true
            }
            None => false,
        }
    }

    /// Rewind to a checkpoint returned by [`Trail::checkpoint`], dropping any
    /// checkpoints taken after it.
    pub fn rewind_to(&mut self, values: &mut [V], checkpoint: usize) {
        while self.checkpoints.last().is_some_and(|&cp| cp >= checkpoint) {
            self.checkpoints.pop();
        }
        self.restore(values, checkpoint);
    }

    fn restore(&mut self, values: &mut [V], checkpoint: usize) {
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                values[entry.index] = entry.old_value;
            }
        }
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of active checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }
}

impl<V: Copy> Default for Trail<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_new() {
        let trail: Trail<u32> = Trail::new();
        assert_eq!(trail.len(), 0);
        assert_eq!(trail.checkpoint_depth(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_checkpoint_and_rewind() {
        let mut values = [0u32; 5];
        let mut trail = Trail::new();

        // Record some changes
        trail.set(&mut values, 1, 10);
        trail.set(&mut values, 2, 20);
        assert_eq!(trail.len(), 2);

        // Create checkpoint
        let checkpoint = trail.checkpoint();
        assert_eq!(checkpoint, 2);
        assert_eq!(trail.checkpoint_depth(), 1);

        // Record more changes
        trail.set(&mut values, 3, 30);
        trail.set(&mut values, 1, 40);
        assert_eq!(values, [0, 40, 20, 30, 0]);

        // Rewind to checkpoint
        assert!(trail.rewind(&mut values));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.checkpoint_depth(), 0);
        assert_eq!(values, [0, 10, 20, 0, 0]);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut values = [false; 4];
        let mut trail = Trail::new();

        trail.set(&mut values, 0, true);
        let _cp1 = trail.checkpoint();

        trail.set(&mut values, 1, true);
        let _cp2 = trail.checkpoint();

        trail.set(&mut values, 2, true);
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.checkpoint_depth(), 2);

        // Rewind inner checkpoint
        assert!(trail.rewind(&mut values));
        assert_eq!(values, [true, true, false, false]);
        assert_eq!(trail.checkpoint_depth(), 1);

        // Rewind outer checkpoint
        assert!(trail.rewind(&mut values));
        assert_eq!(values, [true, false, false, false]);
        assert_eq!(trail.checkpoint_depth(), 0);
    }

    #[test]
    fn test_same_slot_written_twice_restores_original() {
        let mut values = [7i64];
        let mut trail = Trail::new();

        trail.checkpoint();
        trail.set(&mut values, 0, 8);
        trail.set(&mut values, 0, 9);
        trail.rewind(&mut values);

        assert_eq!(values, [7]);
    }

    #[test]
    fn test_rewind_to_drops_later_checkpoints() {
        let mut values = [0u8; 3];
        let mut trail = Trail::new();

        let outer = trail.checkpoint();
        trail.set(&mut values, 0, 1);
        trail.checkpoint();
        trail.set(&mut values, 1, 2);

        trail.rewind_to(&mut values, outer);
        assert_eq!(values, [0, 0, 0]);
        assert_eq!(trail.checkpoint_depth(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_rewind_empty() {
        let mut values = [0u8; 1];
        let mut trail = Trail::new();
        assert!(!trail.rewind(&mut values)); // No checkpoint to rewind
    }
}
