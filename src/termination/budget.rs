// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Budgets on the work a search may do, and a way to combine two conditions.

use std::time::{Duration, Instant};

use log::debug;

use super::TerminationCondition;

/// Stops the search once `limit` recursive calls have been made.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StepBudget {
    limit: u64,
    calls: u64,
}

impl StepBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, calls: 0 }
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.calls)
    }
}

impl TerminationCondition for StepBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining() == 0
    }

    fn call_has_been_made(&mut self) {
        self.calls += 1;
    }
}

/// Stops the search once a wall-clock duration has passed since it was made.
#[derive(Debug, Copy, Clone)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// The clock starts here, not when the search starts.
    pub fn starting_now(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }
}

impl TerminationCondition for TimeBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining().is_zero()
    }
}

/// Which half of a [`Combinator`] asked to stop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Stops when either of two conditions does, and remembers which one did.
///
/// Both conditions hear about every call, so a budget keeps counting while
/// the other half is being polled.
#[derive(Debug, Copy, Clone)]
pub struct Combinator<T1, T2> {
    first: T1,
    second: T2,
    stopped_by: Option<Side>,
}

impl<T1, T2> Combinator<T1, T2> {
    pub fn new(first: T1, second: T2) -> Self {
        Self {
            first,
            second,
            stopped_by: None,
        }
    }

    /// The condition that fired first, if any has.
    pub fn stopped_by(&self) -> Option<Side> {
        self.stopped_by
    }

    pub fn first(&self) -> &T1 {
        &self.first
    }

    pub fn second(&self) -> &T2 {
        &self.second
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition for Combinator<T1, T2> {
    fn should_stop(&mut self) -> bool {
        if self.stopped_by.is_none() {
            self.stopped_by = if self.first.should_stop() {
                Some(Side::First)
            } else if self.second.should_stop() {
                Some(Side::Second)
            } else {
                None
            };
            if let Some(side) = self.stopped_by {
                debug!("{:?} termination condition fired", side);
            }
        }
        self.stopped_by.is_some()
    }

    fn call_has_been_made(&mut self) {
        self.first.call_has_been_made();
        self.second.call_has_been_made();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::CancellationToken;

    #[test]
    fn test_step_budget_counts_down() {
        let mut budget = StepBudget::new(2);
        assert!(!budget.should_stop());
        budget.call_has_been_made();
        assert_eq!(budget.remaining(), 1);
        assert!(!budget.should_stop());
        budget.call_has_been_made();
        assert!(budget.should_stop());
        assert_eq!(budget.calls(), 2);
    }

    #[test]
    fn test_zero_step_budget_stops_immediately() {
        assert!(StepBudget::new(0).should_stop());
    }

    #[test]
    fn test_time_budget() {
        assert!(TimeBudget::starting_now(Duration::ZERO).should_stop());

        let mut budget = TimeBudget::starting_now(Duration::from_secs(3600));
        assert!(!budget.should_stop());
        assert!(budget.remaining() > Duration::from_secs(3500));
    }

    #[test]
    fn test_combinator_remembers_which_side_fired() {
        let token = CancellationToken::new();
        let mut condition = Combinator::new(StepBudget::new(10), token.clone());
        assert!(!condition.should_stop());
        assert_eq!(condition.stopped_by(), None);

        token.cancel();
        assert!(condition.should_stop());
        assert_eq!(condition.stopped_by(), Some(Side::Second));
        assert_eq!(condition.first().calls(), 0);
    }

    #[test]
    fn test_combinator_passes_calls_to_both() {
        let mut condition = Combinator::new(StepBudget::new(1), StepBudget::new(5));
        condition.call_has_been_made();
        assert!(condition.should_stop());
        assert_eq!(condition.stopped_by(), Some(Side::First));
        assert_eq!(condition.second().remaining(), 4);
    }
}
