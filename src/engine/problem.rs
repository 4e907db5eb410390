// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Problem trait for the backtracking engine.
//!
//! A problem describes an implicit decision tree. The engine walks it depth
//! first: at each node it asks whether the state is complete, enumerates the
//! choices, filters them through [`Problem::constraints`] and
//! [`Problem::is_valid`], applies the survivors one at a time with
//! [`Problem::make_choice`] and undoes each with [`Problem::unmake_choice`]
//! after the subtree is finished.
//!
//! # Example
//!
//! ```
//! use backtrack_trace::engine::Problem;
//! use backtrack_trace::error::CallbackResult;
//!
//! /// All bit strings of a fixed length.
//! struct BitStrings(usize);
//!
//! impl Problem for BitStrings {
//!     type State = Vec<bool>;
//!     type Choice = bool;
//!
//!     fn is_complete(&self, state: &Vec<bool>) -> CallbackResult<bool> {
//!         Ok(state.len() == self.0)
//!     }
//!
//!     fn choices(&self, _state: &Vec<bool>) -> CallbackResult<Vec<bool>> {
//!         Ok(vec![false, true])
//!     }
//!
//!     fn is_valid(&self, _state: &Vec<bool>, _choice: &bool) -> CallbackResult<bool> {
//!         Ok(true)
//!     }
//!
//!     fn make_choice(&self, state: &mut Vec<bool>, choice: &bool) -> CallbackResult<()> {
//!         state.push(*choice);
//!         Ok(())
//!     }
//!
//!     fn unmake_choice(&self, state: &mut Vec<bool>, _choice: &bool) -> CallbackResult<()> {
//!         state.pop();
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::error::CallbackResult;
use crate::trace::ConstraintInfo;

/// State-transition contract consumed by the engine.
///
/// # Lifecycle
///
/// 1. `is_complete(state)`: if true the current path is a solution and no
///    further choices are enumerated from this node.
/// 2. `choices(state)`: candidate choices, in exploration order. This order is
///    the order solutions are discovered in, so it must be deterministic.
/// 3. For each choice: `constraints` then `is_valid`. A violated constraint or
///    an invalid choice is skipped without calling `make_choice`.
/// 4. `make_choice`, recursion, `unmake_choice`. After `unmake_choice` the state
///    must equal the state before `make_choice`; siblings must never see
///    changes made in an earlier branch.
///
/// Any `Err` returned by a callback stops the whole run.
pub trait Problem {
    /// Search state, owned by the caller and mutated only through this trait.
    type State;

    /// One decision at a node.
    type Choice: Clone + Debug;

    /// Whether `state` is a finished solution.
    fn is_complete(&self, state: &Self::State) -> CallbackResult<bool>;

    /// All choices worth attempting next, in exploration order.
    fn choices(&self, state: &Self::State) -> CallbackResult<Vec<Self::Choice>>;

    /// Secondary gate evaluated before recursing.
    fn is_valid(&self, state: &Self::State, choice: &Self::Choice) -> CallbackResult<bool>;

    /// Apply `choice` to `state`.
    fn make_choice(&self, state: &mut Self::State, choice: &Self::Choice) -> CallbackResult<()>;

    /// Undo the most recent `make_choice(state, choice)`.
    fn unmake_choice(&self, state: &mut Self::State, choice: &Self::Choice) -> CallbackResult<()>;

    /// Optional diagnostics for a candidate choice.
    ///
    /// Any entry with [`ConstraintInfo::is_violated`] rejects the choice, even
    /// if [`Problem::is_valid`] would accept it.
    #[allow(unused)]
    fn constraints(
        &self,
        state: &Self::State,
        choice: &Self::Choice,
    ) -> CallbackResult<Vec<ConstraintInfo>> {
        Ok(Vec::new())
    }

    /// Human readable form of a choice, used in step reasoning.
    fn describe_choice(&self, choice: &Self::Choice) -> String {
        format!("{:?}", choice)
    }

    /// Optional: Get a name for this problem (for logs and errors).
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
