// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Hooks invoked synchronously by the engine while it searches.
//!
//! The engine never sleeps on its own. When [`SearchObserver::should_pause`]
//! returns true at a recursive entry, the engine calls
//! [`SearchObserver::on_pause`] and waits for it to return; that is the only
//! suspension point of a search. How long to wait is the host's business,
//! [`PacedObserver`] covers the common fixed-delay case.

use std::time::Duration;

use crate::trace::{ConstraintInfo, ExecutionStep, TreeNode};

/// Receives search events. Every method has a no-op default.
pub trait SearchObserver<C> {
    /// Called for every step, before the engine continues.
    #[allow(unused)]
    fn on_step(&mut self, step: &ExecutionStep<C>) {}

    /// Called with a copy of each solution path as it is found.
    #[allow(unused)]
    fn on_solution(&mut self, solution: &[C]) {}

    /// Called after `child`'s subtree is finished, with its parent.
    #[allow(unused)]
    fn on_backtrack(&mut self, child: &TreeNode<C>, parent: &TreeNode<C>) {}

    /// Called for each violated constraint of a rejected choice.
    #[allow(unused)]
    fn on_constraint_violation(&mut self, violation: &ConstraintInfo) {}

    /// Polled at every recursive entry.
    fn should_pause(&mut self) -> bool {
        false
    }

    /// Suspension point, called when [`SearchObserver::should_pause`] was true.
    #[allow(unused)]
    fn on_pause(&mut self, depth: usize) {}
}

/// Observer that ignores everything.
impl<C> SearchObserver<C> for () {}

impl<C, O: SearchObserver<C> + ?Sized> SearchObserver<C> for &mut O {
    fn on_step(&mut self, step: &ExecutionStep<C>) {
        (**self).on_step(step)
    }

    fn on_solution(&mut self, solution: &[C]) {
        (**self).on_solution(solution)
    }

    fn on_backtrack(&mut self, child: &TreeNode<C>, parent: &TreeNode<C>) {
        (**self).on_backtrack(child, parent)
    }

    fn on_constraint_violation(&mut self, violation: &ConstraintInfo) {
        (**self).on_constraint_violation(violation)
    }

    fn should_pause(&mut self) -> bool {
        (**self).should_pause()
    }

    fn on_pause(&mut self, depth: usize) {
        (**self).on_pause(depth)
    }
}

/// Wraps an observer and sleeps a fixed delay at every recursive entry.
///
/// A zero delay never pauses; the inner observer may still request pauses.
#[derive(Debug, Clone)]
pub struct PacedObserver<O> {
    inner: O,
    delay: Duration,
    pauses: u64,
}

impl<O> PacedObserver<O> {
    pub fn new(inner: O, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            pauses: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the speed between two runs, or from inside a hook.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Number of times the engine suspended.
    pub fn pauses(&self) -> u64 {
        self.pauses
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<C, O: SearchObserver<C>> SearchObserver<C> for PacedObserver<O> {
    fn on_step(&mut self, step: &ExecutionStep<C>) {
        self.inner.on_step(step)
    }

    fn on_solution(&mut self, solution: &[C]) {
        self.inner.on_solution(solution)
    }

    fn on_backtrack(&mut self, child: &TreeNode<C>, parent: &TreeNode<C>) {
        self.inner.on_backtrack(child, parent)
    }

    fn on_constraint_violation(&mut self, violation: &ConstraintInfo) {
        self.inner.on_constraint_violation(violation)
    }

    fn should_pause(&mut self) -> bool {
        // Poll the inner observer first so it sees every entry.
        self.inner.should_pause() || !self.delay.is_zero()
    }

    fn on_pause(&mut self, depth: usize) {
        self.pauses += 1;
        self.inner.on_pause(depth);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct PauseEveryOther {
        polls: u32,
        paused: u32,
    }

    impl SearchObserver<u8> for PauseEveryOther {
        fn should_pause(&mut self) -> bool {
            self.polls += 1;
            self.polls % 2 == 0
        }

        fn on_pause(&mut self, _depth: usize) {
            self.paused += 1;
        }
    }

    #[test]
    fn test_zero_delay_defers_to_inner() {
        let mut paced = PacedObserver::new(PauseEveryOther::default(), Duration::ZERO);
        let polls: Vec<bool> = (0..4)
            .map(|_| SearchObserver::<u8>::should_pause(&mut paced))
            .collect();
        assert_eq!(polls, vec![false, true, false, true]);
    }

    #[test]
    fn test_pause_counts_and_forwards() {
        let mut paced = PacedObserver::new(PauseEveryOther::default(), Duration::from_millis(1));
        assert!(SearchObserver::<u8>::should_pause(&mut paced));
        SearchObserver::<u8>::on_pause(&mut paced, 3);
        assert_eq!(paced.pauses(), 1);
        assert_eq!(paced.into_inner().paused, 1);
    }
}
