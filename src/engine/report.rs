// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Result of one engine run.

use serde::Serialize;

use crate::error::SearchError;
use crate::statistics::PerformanceMetrics;
use crate::trace::{DecisionTree, ExecutionStep, StepKind};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// The whole tree was explored.
    Exhausted,
    /// The configured solution limit was reached.
    StoppedEarly,
    /// A termination condition fired.
    Cancelled,
    /// A problem callback failed; the trace holds what was recorded before.
    Failed(SearchError),
}

/// Solutions, event log, decision tree and metrics of one run.
///
/// The three trace outputs are fully determined by the problem, the initial
/// state and the configuration. Timing fields are the only exception.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<C> {
    /// Solution paths in discovery order.
    pub solutions: Vec<Vec<C>>,
    pub steps: Vec<ExecutionStep<C>>,
    pub tree: DecisionTree<C>,
    pub metrics: PerformanceMetrics,
    pub status: SearchStatus,
}

impl<C> SearchReport<C> {
    /// False only when a callback failed.
    pub fn success(&self) -> bool {
        !matches!(self.status, SearchStatus::Failed(_))
    }

    pub fn error(&self) -> Option<&SearchError> {
        match &self.status {
            SearchStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == SearchStatus::Cancelled
    }

    /// Steps of one kind, in log order.
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &ExecutionStep<C>> {
        self.steps.iter().filter(move |step| step.kind() == kind)
    }
}

impl<C: Serialize> SearchReport<C> {
    /// Pretty-printed JSON of the full trace, for external viewers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
