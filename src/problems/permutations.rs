// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Permutations of a list of distinct items.
//!
//! The choices at each node are the unused items in input order, so the
//! solutions come out in lexicographic order of input positions.

use std::fmt::Debug;

use crate::engine::{BacktrackingEngine, Problem, SearchReport};
use crate::error::{AnalysisError, CallbackResult, ProblemError, Result};

/// All orderings of `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutations<T> {
    items: Vec<T>,
}

/// Which items are already placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationState {
    used: Vec<bool>,
    placed: usize,
}

impl PermutationState {
    pub fn placed(&self) -> usize {
        self.placed
    }
}

impl<T: Clone + Debug + PartialEq> Permutations<T> {
    /// Rejects lists containing the same item twice.
    pub fn new(items: Vec<T>) -> Result<Self> {
        for (index, item) in items.iter().enumerate() {
            if items[..index].contains(item) {
                return Err(ProblemError::DuplicateItems { index });
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn initial_state(&self) -> PermutationState {
        PermutationState {
            used: vec![false; self.items.len()],
            placed: 0,
        }
    }

    /// `n!` for the number of items.
    pub fn expected_count(&self) -> u64 {
        factorial(self.items.len())
    }

    pub fn solve(&self, engine: &BacktrackingEngine) -> SearchReport<T> {
        engine.run_default(self, &mut self.initial_state())
    }

    fn position(&self, item: &T) -> CallbackResult<usize> {
        self.items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or_else(|| format!("{:?} is not one of the items", item).into())
    }
}

impl<T: Clone + Debug + PartialEq> Problem for Permutations<T> {
    type State = PermutationState;
    type Choice = T;

    fn is_complete(&self, state: &PermutationState) -> CallbackResult<bool> {
        Ok(state.placed == self.items.len())
    }

    fn choices(&self, state: &PermutationState) -> CallbackResult<Vec<T>> {
        Ok(self
            .items
            .iter()
            .zip(&state.used)
            .filter(|(_, used)| !**used)
            .map(|(item, _)| item.clone())
            .collect())
    }

    fn is_valid(&self, state: &PermutationState, choice: &T) -> CallbackResult<bool> {
        let index = self.position(choice)?;
        Ok(!state.used[index])
    }

    fn make_choice(&self, state: &mut PermutationState, choice: &T) -> CallbackResult<()> {
        let index = self.position(choice)?;
        state.used[index] = true;
        state.placed += 1;
        Ok(())
    }

    fn unmake_choice(&self, state: &mut PermutationState, choice: &T) -> CallbackResult<()> {
        let index = self.position(choice)?;
        state.used[index] = false;
        state.placed -= 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "Permutations"
    }
}

/// Check a generated permutation set: `n!` distinct rearrangements of `items`.
/// `n!`, saturating at `u64::MAX` from `21!` on.
pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).try_fold(1u64, |acc, i| acc.checked_mul(i)).unwrap_or(u64::MAX)
}

pub fn verify_permutations<T: PartialEq + Debug>(
    solutions: &[Vec<T>],
    items: &[T],
) -> std::result::Result<(), AnalysisError> {
    let expected = factorial(items.len());
    if solutions.len() as u64 != expected {
        return Err(AnalysisError::Count {
            expected,
            got: solutions.len() as u64,
        });
    }

    for (index, permutation) in solutions.iter().enumerate() {
        let mut used = vec![false; items.len()];
        let rearranges = permutation.len() == items.len()
            && permutation.iter().all(|value| {
                match items
                    .iter()
                    .enumerate()
                    .position(|(i, item)| !used[i] && item == value)
                {
                    Some(i) => {
                        used[i] = true;
                        true
                    }
                    None => false,
                }
            });
        if !rearranges {
            return Err(AnalysisError::Invalid {
                index,
                reason: format!("{:?} is not a rearrangement of {:?}", permutation, items),
            });
        }
        if let Some(first) = solutions[..index].iter().position(|p| p == permutation) {
            return Err(AnalysisError::Duplicate { index, first });
        }
    }
    Ok(())
}
