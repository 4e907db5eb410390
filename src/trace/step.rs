// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Execution steps: the ordered event log of a search.
//!
//! Every step owns copies of the path and the available choices taken at the
//! moment it was recorded. The engine keeps mutating its own path after a step
//! is logged, so a step must never borrow or share that buffer. Steps have no
//! mutating API once constructed.

use std::time::Duration;

use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter, IntoStaticStr};

use super::constraint::ConstraintInfo;
use super::tree::NodeId;

/// What happened at a step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Entered a node, or committed to a choice.
    Choice,
    /// The current path is a complete solution.
    Solution,
    /// Returned from a fully explored child.
    Backtrack,
    /// Dead end: nothing left to try below this node.
    Pruning,
    /// A candidate choice was rejected by a constraint or the validity test.
    ConstraintCheck,
}

/// Point-in-time performance figures attached to each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceSnapshot {
    pub elapsed: Duration,
    /// Recursive calls made so far.
    pub calls: u64,
    pub depth: usize,
    /// Rough byte estimate of the trace built so far.
    pub memory_estimate: usize,
}

/// One immutable record of the search timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionStep<C> {
    id: u64,
    kind: StepKind,
    depth: usize,
    node: NodeId,
    path: Vec<C>,
    available: Vec<C>,
    choice: Option<C>,
    reasoning: String,
    constraints: Vec<ConstraintInfo>,
    snapshot: PerformanceSnapshot,
}

impl<C: Clone> ExecutionStep<C> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: u64,
        kind: StepKind,
        depth: usize,
        node: NodeId,
        path: &[C],
        available: &[C],
        choice: Option<&C>,
        reasoning: String,
        constraints: Vec<ConstraintInfo>,
        snapshot: PerformanceSnapshot,
    ) -> Self {
        Self {
            id,
            kind,
            depth,
            node,
            path: path.to_vec(),
            available: available.to_vec(),
            choice: choice.cloned(),
            reasoning,
            constraints,
            snapshot,
        }
    }
}

impl<C> ExecutionStep<C> {
    /// Monotonic sequence number, starting at 0 for each run.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The decision tree node this step concerns.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Choices made from the root up to this step.
    pub fn path(&self) -> &[C] {
        &self.path
    }

    /// Choices enumerated at the node, empty if enumeration has not happened yet.
    pub fn available(&self) -> &[C] {
        &self.available
    }

    /// The choice being evaluated, if any.
    pub fn choice(&self) -> Option<&C> {
        self.choice.as_ref()
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn constraints(&self) -> &[ConstraintInfo] {
        &self.constraints
    }

    pub fn snapshot(&self) -> &PerformanceSnapshot {
        &self.snapshot
    }
}
