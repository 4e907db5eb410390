// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Instrumented depth-first backtracking.
//!
//! A problem describes its decision tree through the [`Problem`] trait; the
//! [`BacktrackingEngine`] walks that tree exhaustively and returns, besides the
//! solutions, everything needed to replay the walk afterwards.
//!
//! # Architecture
//!
//! One run produces three outputs, all owned by the [`SearchReport`]:
//!
//! - **Event log**: one immutable [`ExecutionStep`] per step (node entry, choice
//!   made, constraint rejection, solution, backtrack, pruning). Paths are copied
//!   when a step is recorded, so later moves never show through.
//! - **Decision tree**: an arena of [`TreeNode`]s mirroring the recursion. A
//!   node is created before its subtree is searched and updated in place when
//!   the subtree is done.
//! - **Metrics**: [`PerformanceMetrics`] counters accumulated across the run.
//!
//! The search state is opaque to the engine. It is only changed through
//! `make_choice` and `unmake_choice`, which the engine calls in strict pairs;
//! adapters use the [`Trail`] to make undo cheap.
//!
//! Hosts control a run through a [`TerminationCondition`] (cancellation,
//! budgets) and watch it through a [`SearchObserver`], whose pause hook is the
//! only place a run can be suspended.
//!
//! # Modules
//!
//! - [`engine`]: the search driver, problem contract, observer and report
//! - [`trace`]: steps, tree and constraint reports
//! - [`problems`]: permutations, combinations, N-Queens and word search
//! - [`two_pointer`]: Two Sum and related array techniques
//! - [`suites`]: canned test-case tables with a scoring runner

pub mod config;
pub mod engine;
pub mod error;
pub mod problems;
pub mod statistics;
pub mod suites;
pub mod termination;
pub mod trace;
pub mod trail;
pub mod two_pointer;

// Re-export commonly used types
pub use config::SearchConfig;
pub use engine::{BacktrackingEngine, PacedObserver, Problem, SearchObserver, SearchReport, SearchStatus};
pub use error::{AnalysisError, CallbackError, CallbackResult, ProblemError, SearchError};
pub use statistics::PerformanceMetrics;
pub use termination::{CancellationToken, Combinator, Indefinite, Side, StepBudget, TerminationCondition, TimeBudget};
pub use trace::{ConstraintInfo, DecisionTree, ExecutionStep, NodeId, Severity, StepKind, TreeNode};
pub use trail::Trail;
