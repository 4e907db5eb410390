// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search configuration.

use serde::Serialize;

/// Options for one engine run.
///
/// # Example
///
/// ```
/// use backtrack_trace::SearchConfig;
///
/// let config = SearchConfig::new().stop_after_first(true).max_depth(8);
/// assert!(config.is_stop_after_first());
/// assert_eq!(config.depth_limit(), Some(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchConfig {
    stop_after_first: bool,
    max_solutions: Option<usize>,
    max_depth: Option<usize>,
    record_steps: bool,
}

impl SearchConfig {
    /// Exhaustive search, no depth limit, full event log.
    pub fn new() -> Self {
        Self {
            stop_after_first: false,
            max_solutions: None,
            max_depth: None,
            record_steps: true,
        }
    }

    /// Stop as soon as one solution has been found.
    pub fn stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first = stop;
        self
    }

    /// Stop once this many solutions have been found.
    pub fn max_solutions(mut self, limit: usize) -> Self {
        self.max_solutions = Some(limit);
        self
    }

    /// Do not enumerate choices below this depth; such nodes count as pruned.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Keep counters and the tree but drop the step log.
    pub fn record_steps(mut self, record: bool) -> Self {
        self.record_steps = record;
        self
    }

    pub fn is_stop_after_first(&self) -> bool {
        self.stop_after_first
    }

    pub fn solution_limit(&self) -> Option<usize> {
        if self.stop_after_first {
            Some(1)
        } else {
            self.max_solutions
        }
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn is_recording_steps(&self) -> bool {
        self.record_steps
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
