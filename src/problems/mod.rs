// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Problem adapters.
//!
//! Each adapter validates its parameters on construction (returning a
//! [`ProblemError`](crate::error::ProblemError) before any search starts),
//! implements [`Problem`](crate::engine::Problem), and comes with
//! verification helpers that check a generated solution set against the
//! mathematical invariants of the problem.
//!
//! # Organization
//!
//! - `permutations`: orderings of distinct items
//! - `combinations`: k-subsets of `1..=n`, ascending
//! - `n_queens`: non-attacking queens, one per row, trail-backed occupancy
//! - `word_search`: words traced through adjacent grid cells

pub mod combinations;
pub mod n_queens;
pub mod permutations;
pub mod word_search;

// Re-export main adapters for convenience
pub use combinations::{binomial, verify_combinations, Combinations};
pub use n_queens::{
    known_solution_count, render_board, verify_board, verify_solutions, NQueens, QueensState,
    KNOWN_SOLUTION_COUNTS,
};
pub use permutations::{factorial, verify_permutations, PermutationState, Permutations};
pub use word_search::{Cell, FoundWord, WordGrid, WordPath, WordSearchOutcome, WordState};
