// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are accumulated by the engine during one run and frozen into the
//! [`PerformanceMetrics`] of the report.

use std::time::Duration;

use serde::Serialize;
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    Steps,
    Calls,
    Solutions,
    Backtracks,
    Prunings,
    ConstraintRejections,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

/// Aggregate figures for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceMetrics {
    pub elapsed: Duration,
    pub max_depth: usize,
    pub total_steps: u64,
    pub recursive_calls: u64,
    /// Returns from nodes that were neither solutions nor dead ends.
    pub backtrack_count: u64,
    pub solution_count: u64,
    /// Dead ends: nodes with no choice to enumerate, or cut by the depth limit.
    pub pruning_count: u64,
    /// Candidate choices rejected by a constraint or the validity test.
    pub constraint_rejections: u64,
    /// Rough byte estimate of the trace, see [`estimate_memory`].
    pub memory_estimate: usize,
}

impl PerformanceMetrics {
    pub(crate) fn from_statistics(
        stats: &Statistics,
        elapsed: Duration,
        max_depth: usize,
        memory_estimate: usize,
    ) -> Self {
        Self {
            elapsed,
            max_depth,
            total_steps: stats.get(Counters::Steps),
            recursive_calls: stats.get(Counters::Calls),
            backtrack_count: stats.get(Counters::Backtracks),
            solution_count: stats.get(Counters::Solutions),
            pruning_count: stats.get(Counters::Prunings),
            constraint_rejections: stats.get(Counters::ConstraintRejections),
            memory_estimate,
        }
    }

    /// Order-of-magnitude label guessed from the step count.
    ///
    /// This is a display heuristic for dashboards. It is not a complexity
    /// analysis and says nothing verified about the algorithm.
    pub fn complexity_hint(&self) -> &'static str {
        match self.total_steps {
            0..=10 => "O(1)",
            11..=100 => "O(n)",
            101..=1_000 => "O(n log n)",
            1_001..=10_000 => "O(n^2)",
            10_001..=100_000 => "O(2^n)",
            _ => "O(n!)",
        }
    }
}

/// Byte estimate for a trace of `steps` steps and `nodes` tree nodes, with
/// `path_items` choices copied into them in total.
pub(crate) fn estimate_memory(
    steps: usize,
    step_size: usize,
    nodes: usize,
    node_size: usize,
    path_items: usize,
    choice_size: usize,
) -> usize {
    steps * step_size + nodes * node_size + path_items * choice_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = Statistics::new();
        stats.increment_counter(Counters::Steps);
        stats.increment_counter(Counters::Steps);
        stats.increment_counter(Counters::Solutions);

        assert_eq!(stats.get(Counters::Steps), 2);
        assert_eq!(stats.get(Counters::Solutions), 1);
        assert_eq!(stats.get(Counters::Backtracks), 0);
    }

    #[test]
    fn test_metrics_from_statistics() {
        let mut stats = Statistics::new();
        for _ in 0..42 {
            stats.increment_counter(Counters::Steps);
        }
        stats.increment_counter(Counters::Prunings);

        let metrics =
            PerformanceMetrics::from_statistics(&stats, Duration::from_millis(3), 4, 1024);
        assert_eq!(metrics.total_steps, 42);
        assert_eq!(metrics.pruning_count, 1);
        assert_eq!(metrics.max_depth, 4);
        assert_eq!(metrics.memory_estimate, 1024);
        assert_eq!(metrics.complexity_hint(), "O(n)");
    }

    #[test]
    fn test_counter_names() {
        let name: &'static str = Counters::ConstraintRejections.into();
        assert_eq!(name, "constraint_rejections");
    }
}
