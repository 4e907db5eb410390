// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use backtrack_trace::{CallbackResult, ConstraintInfo, Problem, SearchObserver, Severity, StepKind};
use backtrack_trace::{CancellationToken, ExecutionStep, TreeNode};

/// Digit strings of a fixed length, with a running sum the problem checks on
/// every callback.
///
/// Any state left behind by a sibling subtree shows up as a sum that does not
/// match the digits, and the callback fails with "leaked state".
#[derive(Debug, Clone)]
pub struct Digits {
    pub branching: u8,
    pub length: usize,
    /// Choices pushing the sum above this are invalid.
    pub max_sum: Option<u32>,
    /// Digits reported as a violated constraint.
    pub forbidden: Option<u8>,
    /// `make_choice` fails when it would produce this prefix.
    pub fail_on: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitState {
    pub digits: Vec<u8>,
    pub sum: u32,
}

impl Digits {
    pub fn new(branching: u8, length: usize) -> Self {
        Self {
            branching,
            length,
            max_sum: None,
            forbidden: None,
            fail_on: None,
        }
    }

    pub fn max_sum(mut self, max_sum: u32) -> Self {
        self.max_sum = Some(max_sum);
        self
    }

    pub fn forbid(mut self, digit: u8) -> Self {
        self.forbidden = Some(digit);
        self
    }

    pub fn fail_on(mut self, prefix: Vec<u8>) -> Self {
        self.fail_on = Some(prefix);
        self
    }

    /// Every string the search must produce, in exploration order.
    pub fn expected_solutions(&self) -> Vec<Vec<u8>> {
        let mut all: Vec<Vec<u8>> = vec![Vec::new()];
        for _ in 0..self.length {
            all = all
                .into_iter()
                .flat_map(|prefix| {
                    (0..self.branching).map(move |digit| {
                        let mut next = prefix.clone();
                        next.push(digit);
                        next
                    })
                })
                .collect();
        }
        all.retain(|digits| {
            self.forbidden.map_or(true, |f| !digits.contains(&f))
                && self.max_sum.map_or(true, |max| digits.iter().map(|&d| d as u32).sum::<u32>() <= max)
        });
        all
    }

    fn check(&self, state: &DigitState) -> CallbackResult<()> {
        let sum: u32 = state.digits.iter().map(|&d| d as u32).sum();
        if sum != state.sum || state.digits.len() > self.length {
            return Err(format!("leaked state {:?}", state).into());
        }
        Ok(())
    }
}

impl Problem for Digits {
    type State = DigitState;
    type Choice = u8;

    fn is_complete(&self, state: &DigitState) -> CallbackResult<bool> {
        self.check(state)?;
        Ok(state.digits.len() == self.length)
    }

    fn choices(&self, state: &DigitState) -> CallbackResult<Vec<u8>> {
        self.check(state)?;
        Ok((0..self.branching).collect())
    }

    fn is_valid(&self, state: &DigitState, choice: &u8) -> CallbackResult<bool> {
        self.check(state)?;
        Ok(self.max_sum.map_or(true, |max| state.sum + *choice as u32 <= max))
    }

    fn make_choice(&self, state: &mut DigitState, choice: &u8) -> CallbackResult<()> {
        self.check(state)?;
        if let Some(prefix) = &self.fail_on {
            if state.digits.len() + 1 == prefix.len()
                && state.digits[..] == prefix[..prefix.len() - 1]
                && prefix.last() == Some(choice)
            {
                return Err(format!("refusing {:?}", prefix).into());
            }
        }
        state.digits.push(*choice);
        state.sum += *choice as u32;
        Ok(())
    }

    fn unmake_choice(&self, state: &mut DigitState, choice: &u8) -> CallbackResult<()> {
        if state.digits.pop() != Some(*choice) {
            return Err(format!("undo of {} out of order", choice).into());
        }
        state.sum -= *choice as u32;
        self.check(state)
    }

    fn constraints(&self, _state: &DigitState, choice: &u8) -> CallbackResult<Vec<ConstraintInfo>> {
        Ok(match self.forbidden {
            Some(digit) if digit == *choice => vec![ConstraintInfo::violated(
                "digit",
                format!("{} is forbidden", digit),
                Severity::Medium,
            )],
            _ => Vec::new(),
        })
    }

    fn name(&self) -> &str {
        "Digits"
    }
}

/// Observer recording what it was told.
#[derive(Debug, Default)]
pub struct Recorder {
    pub kinds: Vec<StepKind>,
    pub solutions: Vec<Vec<u8>>,
    /// `(child depth, parent depth)` per backtrack.
    pub backtracks: Vec<(usize, usize)>,
    pub violations: usize,
    /// Cancel this token once a given number of solutions has been seen.
    pub cancel_after: Option<(usize, CancellationToken)>,
}

impl SearchObserver<u8> for Recorder {
    fn on_step(&mut self, step: &ExecutionStep<u8>) {
        self.kinds.push(step.kind());
    }

    fn on_solution(&mut self, solution: &[u8]) {
        self.solutions.push(solution.to_vec());
        if let Some((after, token)) = &self.cancel_after {
            if self.solutions.len() >= *after {
                token.cancel();
            }
        }
    }

    fn on_backtrack(&mut self, child: &TreeNode<u8>, parent: &TreeNode<u8>) {
        self.backtracks.push((child.depth(), parent.depth()));
    }

    fn on_constraint_violation(&mut self, _violation: &ConstraintInfo) {
        self.violations += 1;
    }
}
