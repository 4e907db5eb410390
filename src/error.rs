// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Two classes of failure exist:
//! - [`ProblemError`]: bad problem parameters, detected by an adapter before the
//!   engine runs. Never retried.
//! - [`SearchError`]: a problem callback failed mid-search. The run stops and the
//!   partial trace is kept in the report.

use serde::Serialize;
use thiserror::Error;

/// Error raised by a problem callback.
///
/// Callbacks return [`CallbackResult`]; the first `Err` aborts the search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for CallbackError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Result type for problem callbacks.
pub type CallbackResult<T> = std::result::Result<T, CallbackError>;

/// Failure of a search run.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum SearchError {
    #[error("callback of problem '{problem}' failed: {message}")]
    Callback { problem: String, message: String },
}

impl SearchError {
    pub(crate) fn callback(problem: &str, error: CallbackError) -> Self {
        SearchError::Callback {
            problem: problem.to_owned(),
            message: error.message,
        }
    }
}

/// Invalid problem parameters, rejected before any search is started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProblemError {
    #[error("k must not exceed n (k = {k}, n = {n})")]
    KExceedsN { n: usize, k: usize },

    #[error("board size must be at least 1")]
    ZeroBoardSize,

    #[error("items must be distinct, found duplicate at index {index}")]
    DuplicateItems { index: usize },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("grid row {row} has {got} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("word at index {index} is empty")]
    EmptyWord { index: usize },
}

/// Result type for adapter constructors.
pub type Result<T> = std::result::Result<T, ProblemError>;

/// A generated solution set breaks an invariant of its problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("expected {expected} solutions, got {got}")]
    Count { expected: u64, got: u64 },

    #[error("solution {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("solution {index} duplicates solution {first}")]
    Duplicate { index: usize, first: usize },
}
