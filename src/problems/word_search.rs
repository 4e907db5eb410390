// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Word search on a letter grid.
//!
//! A word is traced through horizontally or vertically adjacent cells, each
//! cell used at most once. One search runs per word; its first choice is any
//! cell holding the first letter (row-major order), later choices are the
//! neighbours of the last cell (up, right, down, left).

use std::fmt;

use serde::Serialize;

use crate::config::SearchConfig;
use crate::engine::{BacktrackingEngine, Problem, SearchReport};
use crate::error::{CallbackResult, ProblemError, Result};
use crate::trail::Trail;

/// Grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular, non-empty letter grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGrid {
    cells: Vec<Vec<char>>,
    rows: usize,
    cols: usize,
}

impl WordGrid {
    pub fn new(cells: Vec<Vec<char>>) -> Result<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(ProblemError::EmptyGrid);
        }
        if let Some((row, line)) = cells.iter().enumerate().find(|(_, line)| line.len() != cols) {
            return Err(ProblemError::RaggedGrid {
                row,
                expected: cols,
                got: line.len(),
            });
        }
        Ok(Self { cells, rows, cols })
    }

    /// Build a grid from one string per row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        Self::new(rows.iter().map(|row| row.as_ref().chars().collect()).collect())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.cells.get(cell.row).and_then(|line| line.get(cell.col)).copied()
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        const OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
        OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            (row < self.rows && col < self.cols).then_some(Cell { row, col })
        })
    }

    /// The search problem for one word.
    ///
    /// Rejects an empty word.
    pub fn word(&self, word: &str) -> Result<WordPath<'_>> {
        if word.is_empty() {
            return Err(ProblemError::EmptyWord { index: 0 });
        }
        Ok(WordPath {
            grid: self,
            word: word.chars().collect(),
            text: word.to_owned(),
        })
    }

    /// Search every word, stopping each search at its first path.
    pub fn find_words<S: AsRef<str>>(&self, words: &[S], engine: &BacktrackingEngine) -> Result<WordSearchOutcome> {
        if let Some(index) = words.iter().position(|word| word.as_ref().is_empty()) {
            return Err(ProblemError::EmptyWord { index });
        }
        let engine = BacktrackingEngine::new(engine.config().stop_after_first(true));

        let mut outcome = WordSearchOutcome::default();
        for word in words {
            let problem = self.word(word.as_ref())?;
            let report = engine.run_default(&problem, &mut problem.initial_state());
            match report.solutions.into_iter().next() {
                Some(path) => outcome.found.push(FoundWord {
                    word: word.as_ref().to_owned(),
                    path,
                }),
                None => outcome.missing.push(word.as_ref().to_owned()),
            }
        }
        Ok(outcome)
    }
}

/// A word located in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: Vec<Cell>,
}

/// Result of [`WordGrid::find_words`], words kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordSearchOutcome {
    pub found: Vec<FoundWord>,
    pub missing: Vec<String>,
}

impl WordSearchOutcome {
    pub fn all_found(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Tracing one word through a [`WordGrid`].
#[derive(Debug, Clone)]
pub struct WordPath<'g> {
    grid: &'g WordGrid,
    word: Vec<char>,
    text: String,
}

/// Cells used so far, with visited flags rewound through the trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordState {
    path: Vec<Cell>,
    visited: Vec<bool>,
    trail: Trail<bool>,
}

impl WordState {
    pub fn path(&self) -> &[Cell] {
        &self.path
    }
}

impl<'g> WordPath<'g> {
    pub fn initial_state(&self) -> WordState {
        WordState {
            path: Vec::with_capacity(self.word.len()),
            visited: vec![false; self.grid.rows * self.grid.cols],
            trail: Trail::new(),
        }
    }

    /// Run a search listing every path that spells the word.
    pub fn all_paths(&self, config: SearchConfig) -> SearchReport<Cell> {
        BacktrackingEngine::new(config).run_default(self, &mut self.initial_state())
    }
}

impl<'g> Problem for WordPath<'g> {
    type State = WordState;
    type Choice = Cell;

    fn is_complete(&self, state: &WordState) -> CallbackResult<bool> {
        Ok(state.path.len() == self.word.len())
    }

    fn choices(&self, state: &WordState) -> CallbackResult<Vec<Cell>> {
        Ok(match state.path.last() {
            None => {
                let first = self.word[0];
                (0..self.grid.rows)
                    .flat_map(|row| (0..self.grid.cols).map(move |col| Cell { row, col }))
                    .filter(|&cell| self.grid.letter(cell) == Some(first))
                    .collect()
            }
            Some(&last) => self.grid.neighbours(last).collect(),
        })
    }

    fn is_valid(&self, state: &WordState, choice: &Cell) -> CallbackResult<bool> {
        let wanted = self.word.get(state.path.len()).copied();
        Ok(!state.visited[self.grid.index(*choice)] && self.grid.letter(*choice) == wanted)
    }

    fn make_choice(&self, state: &mut WordState, choice: &Cell) -> CallbackResult<()> {
        if self.grid.letter(*choice).is_none() {
            return Err(format!("{} is outside the grid", choice).into());
        }
        state.trail.checkpoint();
        let index = self.grid.index(*choice);
        state.trail.set(&mut state.visited, index, true);
        state.path.push(*choice);
        Ok(())
    }

    fn unmake_choice(&self, state: &mut WordState, _choice: &Cell) -> CallbackResult<()> {
        state.path.pop();
        if state.trail.rewind(&mut state.visited) {
            Ok(())
        } else {
            Err("no cell to release".into())
        }
    }

    fn describe_choice(&self, choice: &Cell) -> String {
        match self.grid.letter(*choice) {
            Some(letter) => format!("{} at {}", letter, choice),
            None => choice.to_string(),
        }
    }

    fn name(&self) -> &str {
        &self.text
    }
}
