// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canned test-case tables and a runner that scores an implementation.
//!
//! A [`TestSuite`] pairs inputs with expected outputs for one algorithm.
//! [`run_suite`] calls an implementation on every input and reports how many
//! cases it got right.
//!
//! ```
//! use backtrack_trace::suites::{run_suite, two_sum_suite};
//! use backtrack_trace::two_pointer::two_sum;
//!
//! let suite = two_sum_suite();
//! let report = run_suite(&suite, |(nums, target)| two_sum(nums, *target));
//! assert_eq!(report.failed, 0);
//! assert_eq!(report.score, 100.0);
//! ```

use std::fmt::Debug;

use log::debug;
use serde::Serialize;

use crate::engine::BacktrackingEngine;
use crate::problems::{Combinations, NQueens, WordGrid};

/// One input with the output an implementation must produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase<I, E> {
    pub name: String,
    pub input: I,
    pub expected: E,
}

impl<I, E> TestCase<I, E> {
    pub fn new(name: impl Into<String>, input: I, expected: E) -> Self {
        Self {
            name: name.into(),
            input,
            expected,
        }
    }
}

/// Test cases for one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSuite<I, E> {
    pub name: String,
    pub algorithm: String,
    pub cases: Vec<TestCase<I, E>>,
}

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    /// Expected and actual output, when they differ.
    pub mismatch: Option<String>,
}

/// Outcome of [`run_suite`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of cases passed, 0 for an empty suite.
    pub score: f64,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Run `implementation` on every case of `suite` in order.
pub fn run_suite<I, E, F>(suite: &TestSuite<I, E>, mut implementation: F) -> SuiteReport
where
    E: PartialEq + Debug,
    F: FnMut(&I) -> E,
{
    let results: Vec<CaseResult> = suite
        .cases
        .iter()
        .map(|case| {
            let actual = implementation(&case.input);
            let passed = actual == case.expected;
            let mismatch = (!passed).then(|| format!("expected {:?}, got {:?}", case.expected, actual));
            if let Some(mismatch) = &mismatch {
                debug!("{}/{}: {}", suite.name, case.name, mismatch);
            }
            CaseResult {
                name: case.name.clone(),
                passed,
                mismatch,
            }
        })
        .collect();

    let passed = results.iter().filter(|result| result.passed).count();
    let failed = results.len() - passed;
    let score = if results.is_empty() {
        0.0
    } else {
        passed as f64 * 100.0 / results.len() as f64
    };
    SuiteReport {
        suite: suite.name.clone(),
        passed,
        failed,
        score,
        results,
    }
}

/// Two Sum: `(nums, target)` to the pair of indices, if any.
pub fn two_sum_suite() -> TestSuite<(Vec<i64>, i64), Option<(usize, usize)>> {
    TestSuite {
        name: "Two Sum".to_owned(),
        algorithm: "two_sum".to_owned(),
        cases: vec![
            TestCase::new("basic_case", (vec![2, 7, 11, 15], 9), Some((0, 1))),
            TestCase::new("duplicate_numbers", (vec![3, 3], 6), Some((0, 1))),
            TestCase::new("negative_numbers", (vec![-1, -2, -3, -4, -5], -8), Some((2, 4))),
            TestCase::new("large_array", ((0..1000).collect(), 1997), Some((998, 999))),
            TestCase::new("no_solution", (vec![1, 2, 3], 7), None),
            TestCase::new("zero_target", (vec![-1, 0, 1], 0), Some((0, 2))),
            TestCase::new("single_element", (vec![1], 1), None),
            TestCase::new("two_elements_match", (vec![1, 2], 3), Some((0, 1))),
        ],
    }
}

/// Binary search: `(ascending nums, target)` to the index of the target.
pub fn binary_search_suite() -> TestSuite<(Vec<i64>, i64), Option<usize>> {
    TestSuite {
        name: "Binary Search".to_owned(),
        algorithm: "binary_search".to_owned(),
        cases: vec![
            TestCase::new("found_middle", (vec![1, 2, 3, 4, 5], 3), Some(2)),
            TestCase::new("found_first", (vec![1, 2, 3, 4, 5], 1), Some(0)),
            TestCase::new("found_last", (vec![1, 2, 3, 4, 5], 5), Some(4)),
            TestCase::new("not_found", (vec![1, 2, 3, 4, 5], 6), None),
            TestCase::new("empty_array", (vec![], 1), None),
            TestCase::new("single_element_found", (vec![1], 1), Some(0)),
            TestCase::new("single_element_not_found", (vec![1], 2), None),
            TestCase::new("large_array", ((0..10_000).collect(), 5555), Some(5555)),
        ],
    }
}

/// Container with most water: heights to the largest area.
pub fn container_water_suite() -> TestSuite<Vec<u64>, u64> {
    TestSuite {
        name: "Container With Most Water".to_owned(),
        algorithm: "max_area".to_owned(),
        cases: vec![
            TestCase::new("basic_case", vec![1, 8, 6, 2, 5, 4, 8, 3, 7], 49),
            TestCase::new("two_elements", vec![1, 1], 1),
            TestCase::new("increasing_height", vec![1, 2, 3, 4, 5], 6),
            TestCase::new("decreasing_height", vec![5, 4, 3, 2, 1], 6),
            TestCase::new("same_height", vec![5, 5, 5, 5, 5], 20),
        ],
    }
}

/// Combinations: `(n, k)` to the number of k-subsets.
pub fn combinations_suite() -> TestSuite<(usize, usize), u64> {
    TestSuite {
        name: "Combinations".to_owned(),
        algorithm: "combinations".to_owned(),
        cases: vec![
            TestCase::new("choose_two_of_four", (4, 2), 6),
            TestCase::new("choose_none", (5, 0), 1),
            TestCase::new("choose_all", (5, 5), 1),
            TestCase::new("choose_three_of_six", (6, 3), 20),
            TestCase::new("choose_five_of_ten", (10, 5), 252),
        ],
    }
}

/// N-Queens: board size to the number of solutions.
pub fn n_queens_suite() -> TestSuite<usize, u64> {
    TestSuite {
        name: "N-Queens".to_owned(),
        algorithm: "n_queens".to_owned(),
        cases: [1, 0, 0, 2, 10, 4, 40, 92]
            .into_iter()
            .enumerate()
            .map(|(i, count)| TestCase::new(format!("board_{}", i + 1), i + 1, count))
            .collect(),
    }
}

/// Word search: `(grid rows, word)` to whether the word can be traced.
pub fn word_search_suite() -> TestSuite<(Vec<String>, String), bool> {
    let grid: Vec<String> = ["CATS", "ORAT", "DOGS", "MATH"]
        .iter()
        .map(|row| (*row).to_owned())
        .collect();
    let case = |name: &str, word: &str, expected| TestCase::new(name, (grid.clone(), word.to_owned()), expected);
    TestSuite {
        name: "Word Search".to_owned(),
        algorithm: "word_search".to_owned(),
        cases: vec![
            case("along_a_row", "CAT", true),
            case("down_and_across", "DOG", true),
            case("bottom_row", "MATH", true),
            case("down_a_column", "COD", true),
            case("turning_path", "GOAT", true),
            case("cell_reused", "CAC", false),
            case("absent_letters", "ZEBRA", false),
        ],
    }
}

/// Number of combinations found by the engine.
pub fn engine_combination_count(&(n, k): &(usize, usize)) -> u64 {
    Combinations::new(n, k)
        .map(|problem| problem.solve(&BacktrackingEngine::default()).solutions.len() as u64)
        .unwrap_or(0)
}

/// Number of N-Queens boards found by the engine.
pub fn engine_queens_count(&n: &usize) -> u64 {
    NQueens::new(n)
        .map(|problem| problem.solve(&BacktrackingEngine::default()).solutions.len() as u64)
        .unwrap_or(0)
}

/// Whether the engine traces the word through the grid.
pub fn engine_word_found((rows, word): &(Vec<String>, String)) -> bool {
    WordGrid::from_rows(rows.as_slice())
        .and_then(|grid| grid.find_words(std::slice::from_ref(word), &BacktrackingEngine::default()))
        .map(|outcome| outcome.all_found())
        .unwrap_or(false)
}
