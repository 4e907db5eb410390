// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A [`TerminationCondition`] is polled by the engine at the top of every recursive call. It
//! indicates when the search should stop early, even though the tree has not been exhausted. The
//! stop is an immediate unwind: everything recorded so far stays in the report.
//!
//! All problems share this one contract. Hosts that want a cancel button hand a clone of a
//! [`CancellationToken`] to another thread; budgets cover the other common cases.

mod budget;
mod cancellation;
mod indefinite;

pub use budget::{Combinator, Side, StepBudget, TimeBudget};
pub use cancellation::CancellationToken;
pub use indefinite::Indefinite;

/// The central trait that defines a termination condition.
pub trait TerminationCondition {
    /// Returns `true` when the engine should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called once per recursive call, after [`TerminationCondition::should_stop`] said to go on.
    fn call_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn call_has_been_made(&mut self) {
        if let Some(t) = self {
            t.call_has_been_made()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn call_has_been_made(&mut self) {
        (**self).call_has_been_made()
    }
}
