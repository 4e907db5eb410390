// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! N-Queens: place `n` non-attacking queens on an `n x n` board.
//!
//! Queens go in row order; a choice is the column for the next row, so a
//! solution path is the board encoding "column per row". Column and diagonal
//! occupancy live in one flag vector written through a [`Trail`], which is
//! what `unmake_choice` rewinds.

use std::fmt::Write as _;

use crate::engine::{BacktrackingEngine, Problem, SearchReport};
use crate::error::{AnalysisError, CallbackResult, ProblemError, Result};
use crate::trace::{ConstraintInfo, Severity};
use crate::trail::Trail;

/// Number of solutions for `n = 1..=10`.
pub const KNOWN_SOLUTION_COUNTS: [u64; 10] = [1, 0, 0, 2, 10, 4, 40, 92, 352, 724];

/// Known solution count for a board size, if tabulated.
pub fn known_solution_count(n: usize) -> Option<u64> {
    n.checked_sub(1)
        .and_then(|index| KNOWN_SOLUTION_COUNTS.get(index))
        .copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NQueens {
    n: usize,
    report_constraints: bool,
}

/// Queens placed so far and the attacked lines they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueensState {
    /// Column of the queen in each filled row.
    columns: Vec<usize>,
    /// Columns, then `row + col` diagonals, then `row - col + n - 1` diagonals.
    occupied: Vec<bool>,
    trail: Trail<bool>,
}

impl QueensState {
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

impl NQueens {
    /// Rejects a board of size 0.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(ProblemError::ZeroBoardSize);
        }
        Ok(Self {
            n,
            report_constraints: false,
        })
    }

    /// Report column and diagonal checks through [`Problem::constraints`], so
    /// rejected placements carry a reason in the step log.
    pub fn with_constraint_reports(mut self) -> Self {
        self.report_constraints = true;
        self
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn initial_state(&self) -> QueensState {
        QueensState {
            columns: Vec::with_capacity(self.n),
            occupied: vec![false; self.n + 2 * (2 * self.n - 1)],
            trail: Trail::new(),
        }
    }

    /// Run `engine` from the empty board.
    pub fn solve(&self, engine: &BacktrackingEngine) -> SearchReport<usize> {
        engine.run_default(self, &mut self.initial_state())
    }

    fn diagonal(&self, row: usize, col: usize) -> usize {
        self.n + row + col
    }

    fn anti_diagonal(&self, row: usize, col: usize) -> usize {
        self.n + (2 * self.n - 1) + row + self.n - 1 - col
    }

    /// Flags covering `(row, col)`: column, diagonal, anti-diagonal.
    fn lines(&self, row: usize, col: usize) -> [usize; 3] {
        [col, self.diagonal(row, col), self.anti_diagonal(row, col)]
    }
}

impl Problem for NQueens {
    type State = QueensState;
    type Choice = usize;

    fn is_complete(&self, state: &QueensState) -> CallbackResult<bool> {
        Ok(state.columns.len() == self.n)
    }

    fn choices(&self, _state: &QueensState) -> CallbackResult<Vec<usize>> {
        Ok((0..self.n).collect())
    }

    fn is_valid(&self, state: &QueensState, choice: &usize) -> CallbackResult<bool> {
        let row = state.columns.len();
        Ok(self
            .lines(row, *choice)
            .iter()
            .all(|&flag| !state.occupied[flag]))
    }

    fn make_choice(&self, state: &mut QueensState, choice: &usize) -> CallbackResult<()> {
        if *choice >= self.n {
            return Err(format!("column {} is off a board of size {}", choice, self.n).into());
        }
        let row = state.columns.len();
        state.trail.checkpoint();
        for flag in self.lines(row, *choice) {
            state.trail.set(&mut state.occupied, flag, true);
        }
        state.columns.push(*choice);
        Ok(())
    }

    fn unmake_choice(&self, state: &mut QueensState, _choice: &usize) -> CallbackResult<()> {
        state.columns.pop();
        if state.trail.rewind(&mut state.occupied) {
            Ok(())
        } else {
            Err("no placement to undo".into())
        }
    }

    fn constraints(&self, state: &QueensState, choice: &usize) -> CallbackResult<Vec<ConstraintInfo>> {
        if !self.report_constraints {
            return Ok(Vec::new());
        }
        let row = state.columns.len();
        let col = *choice;
        let attacker = |pred: &dyn Fn(usize, usize) -> bool| {
            state
                .columns
                .iter()
                .enumerate()
                .find(|&(r, &c)| pred(r, c))
                .map(|(r, &c)| (r, c))
        };

        let column = match attacker(&|_, c| c == col) {
            Some((r, c)) => ConstraintInfo::violated(
                "column",
                format!("column {} is held by the queen at ({}, {})", col, r, c),
                Severity::High,
            ),
            None => ConstraintInfo::satisfied("column", format!("column {} is free", col)),
        };
        let diagonal = match attacker(&|r, c| r.abs_diff(row) == c.abs_diff(col)) {
            Some((r, c)) => ConstraintInfo::violated(
                "diagonal",
                format!("({}, {}) is on a diagonal with the queen at ({}, {})", row, col, r, c),
                Severity::High,
            ),
            None => ConstraintInfo::satisfied("diagonal", format!("diagonals through ({}, {}) are free", row, col)),
        };
        Ok(vec![column, diagonal])
    }

    fn describe_choice(&self, choice: &usize) -> String {
        format!("column {}", choice)
    }

    fn name(&self) -> &str {
        "NQueens"
    }
}

/// Check one board encoding (column per row) for attacking pairs.
pub fn verify_board(board: &[usize]) -> std::result::Result<(), String> {
    let n = board.len();
    for (row, &col) in board.iter().enumerate() {
        if col >= n {
            return Err(format!("row {} has column {} outside the board", row, col));
        }
        for (other_row, &other_col) in board.iter().enumerate().skip(row + 1) {
            if col == other_col || other_row - row == col.abs_diff(other_col) {
                return Err(format!(
                    "queens at ({}, {}) and ({}, {}) attack each other",
                    row, col, other_row, other_col
                ));
            }
        }
    }
    Ok(())
}

/// Check a full solution set against the known count and board validity.
pub fn verify_solutions(solutions: &[Vec<usize>], n: usize) -> std::result::Result<(), AnalysisError> {
    if let Some(expected) = known_solution_count(n) {
        if solutions.len() as u64 != expected {
            return Err(AnalysisError::Count {
                expected,
                got: solutions.len() as u64,
            });
        }
    }
    for (index, board) in solutions.iter().enumerate() {
        if board.len() != n {
            return Err(AnalysisError::Invalid {
                index,
                reason: format!("{} queens on a board of size {}", board.len(), n),
            });
        }
        verify_board(board).map_err(|reason| AnalysisError::Invalid { index, reason })?;
        if let Some(first) = solutions[..index].iter().position(|b| b == board) {
            return Err(AnalysisError::Duplicate { index, first });
        }
    }
    Ok(())
}

/// Text board, one line per row, `Q` for a queen and `.` for an empty square.
pub fn render_board(board: &[usize]) -> String {
    let n = board.len();
    let mut out = String::with_capacity(n * (n + 1));
    for &col in board {
        for c in 0..n {
            out.push(if c == col { 'Q' } else { '.' });
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::StepKind;

    #[test]
    fn test_rejects_zero() {
        assert_eq!(NQueens::new(0), Err(ProblemError::ZeroBoardSize));
    }

    #[test]
    fn test_make_and_unmake_restore_flags() {
        let problem = NQueens::new(5).unwrap();
        let mut state = problem.initial_state();
        let empty = state.clone();

        problem.make_choice(&mut state, &2).unwrap();
        assert!(!problem.is_valid(&state, &2).unwrap()); // same column
        assert!(!problem.is_valid(&state, &1).unwrap()); // diagonal
        assert!(!problem.is_valid(&state, &3).unwrap()); // anti-diagonal
        assert!(problem.is_valid(&state, &0).unwrap());

        problem.unmake_choice(&mut state, &2).unwrap();
        assert_eq!(state, empty);
    }

    #[test]
    fn test_unmake_without_placement_fails() {
        let problem = NQueens::new(3).unwrap();
        let mut state = problem.initial_state();
        assert!(problem.unmake_choice(&mut state, &0).is_err());
    }

    #[test]
    fn test_constraint_reports() {
        let problem = NQueens::new(4).unwrap().with_constraint_reports();
        let mut state = problem.initial_state();
        problem.make_choice(&mut state, &1).unwrap();

        let reports = problem.constraints(&state, &2).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].is_violated());
        assert!(reports[1].is_violated());
        assert_eq!(
            reports[1].description(),
            "(1, 2) is on a diagonal with the queen at (0, 1)"
        );
    }

    #[test]
    fn test_reports_change_log_not_solutions() {
        let plain = NQueens::new(5).unwrap();
        let reported = NQueens::new(5).unwrap().with_constraint_reports();
        let engine = BacktrackingEngine::default();

        let a = engine.run_default(&plain, &mut plain.initial_state());
        let b = engine.run_default(&reported, &mut reported.initial_state());

        assert_eq!(a.solutions, b.solutions);
        assert_eq!(a.metrics.constraint_rejections, b.metrics.constraint_rejections);
        assert!(a.steps_of(StepKind::ConstraintCheck).all(|s| s.constraints().is_empty()));
        assert!(b.steps_of(StepKind::ConstraintCheck).all(|s| !s.constraints().is_empty()));
    }

    #[test]
    fn test_verify_board() {
        assert_eq!(verify_board(&[1, 3, 0, 2]), Ok(()));
        assert!(verify_board(&[0, 1]).is_err());
        assert!(verify_board(&[0, 0]).is_err());
        assert!(verify_board(&[0, 5]).is_err());
    }

    #[test]
    fn test_render_board() {
        assert_eq!(render_board(&[1, 3, 0, 2]), ".Q..\n...Q\nQ...\n..Q.\n");
    }

    #[test]
    fn test_known_counts() {
        assert_eq!(known_solution_count(0), None);
        assert_eq!(known_solution_count(1), Some(1));
        assert_eq!(known_solution_count(8), Some(92));
        assert_eq!(known_solution_count(11), None);
    }
}
