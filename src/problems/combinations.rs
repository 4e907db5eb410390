// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! k-combinations of `1..=n`.
//!
//! Choices at each node are the values above the last one picked that still
//! leave room for the rest of the combination, so every solution comes out
//! strictly ascending and the solution list is in lexicographic order.

use std::collections::HashMap;

use crate::engine::{BacktrackingEngine, Problem, SearchReport};
use crate::error::{AnalysisError, CallbackResult, ProblemError, Result};

/// Choose `k` of the numbers `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combinations {
    n: usize,
    k: usize,
}

impl Combinations {
    /// Rejects `k > n`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if k > n {
            return Err(ProblemError::KExceedsN { n, k });
        }
        Ok(Self { n, k })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The empty combination.
    pub fn initial_state(&self) -> Vec<usize> {
        Vec::with_capacity(self.k)
    }

    /// Number of combinations the search must produce.
    pub fn expected_count(&self) -> u64 {
        binomial(self.n, self.k)
    }

    /// Run `engine` from the empty combination.
    pub fn solve(&self, engine: &BacktrackingEngine) -> SearchReport<usize> {
        engine.run_default(self, &mut self.initial_state())
    }
}

impl Problem for Combinations {
    type State = Vec<usize>;
    type Choice = usize;

    fn is_complete(&self, state: &Vec<usize>) -> CallbackResult<bool> {
        Ok(state.len() == self.k)
    }

    fn choices(&self, state: &Vec<usize>) -> CallbackResult<Vec<usize>> {
        let start = state.last().map_or(1, |last| last + 1);
        let remaining = self.k - state.len();
        // The last `remaining - 1` slots need values above this one.
        let end = self.n + 1 - remaining;
        Ok((start..=end).collect())
    }

    fn is_valid(&self, state: &Vec<usize>, choice: &usize) -> CallbackResult<bool> {
        let above_last = state.last().map_or(true, |last| choice > last);
        Ok(above_last && (1..=self.n).contains(choice))
    }

    fn make_choice(&self, state: &mut Vec<usize>, choice: &usize) -> CallbackResult<()> {
        state.push(*choice);
        Ok(())
    }

    fn unmake_choice(&self, state: &mut Vec<usize>, choice: &usize) -> CallbackResult<()> {
        match state.pop() {
            Some(last) if last == *choice => Ok(()),
            other => Err(format!("unmake {} but top of combination was {:?}", choice, other).into()),
        }
    }

    fn describe_choice(&self, choice: &usize) -> String {
        choice.to_string()
    }

    fn name(&self) -> &str {
        "Combinations"
    }
}

/// `n` choose `k`, 0 when `k > n`. Saturates at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    // Each partial product is itself a binomial coefficient, so the division is
    // exact, and none exceeds the result.
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) / (i + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}

/// Check a generated combination set: count, length, range, strict ascent and
/// uniqueness.
pub fn verify_combinations(solutions: &[Vec<usize>], n: usize, k: usize) -> std::result::Result<(), AnalysisError> {
    let expected = binomial(n, k);
    if solutions.len() as u64 != expected {
        return Err(AnalysisError::Count {
            expected,
            got: solutions.len() as u64,
        });
    }

    let mut seen: HashMap<&[usize], usize> = HashMap::new();
    for (index, combination) in solutions.iter().enumerate() {
        if combination.len() != k {
            return Err(AnalysisError::Invalid {
                index,
                reason: format!("has {} elements, expected {}", combination.len(), k),
            });
        }
        if let Some(value) = combination.iter().find(|v| !(1..=n).contains(*v)) {
            return Err(AnalysisError::Invalid {
                index,
                reason: format!("{} is outside 1..={}", value, n),
            });
        }
        if combination.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(AnalysisError::Invalid {
                index,
                reason: "not strictly ascending".to_owned(),
            });
        }
        if let Some(&first) = seen.get(combination.as_slice()) {
            return Err(AnalysisError::Duplicate { index, first });
        }
        seen.insert(combination.as_slice(), index);
    }
    Ok(())
}
