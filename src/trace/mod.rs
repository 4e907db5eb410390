// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trace model: the event log, decision tree and constraint reports produced by
//! one engine run.

pub mod constraint;
pub mod step;
pub mod tree;

pub use constraint::{ConstraintInfo, Severity};
pub use step::{ExecutionStep, PerformanceSnapshot, StepKind};
pub use tree::{DecisionTree, NodeId, TreeNode};
