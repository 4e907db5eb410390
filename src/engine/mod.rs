// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Instrumented backtracking engine.
//!
//! This module implements an exhaustive depth-first search over the implicit
//! decision tree of a [`Problem`]. Every step of the walk is recorded as an
//! [`ExecutionStep`], and a [`DecisionTree`] mirroring the recursion is built
//! alongside, so a host can replay the search afterwards.
//!
//! # Algorithm
//!
//! At each node the engine:
//! 1. Polls the termination condition and the observer's pause predicate, then
//!    logs a `choice` step for entering the node
//! 2. If the state is complete: records the path as a solution, logs
//!    `solution` and returns
//! 3. Enumerates choices; none means a dead end, logged as `pruning`
//! 4. For each choice in order: rejects it on a violated constraint or a failed
//!    validity test (`constraint-check`), otherwise attaches a tree node, applies
//!    the choice, logs `choice`, recurses, undoes the choice and logs
//!    `backtrack`
//!
//! The engine calls [`Problem::unmake_choice`] itself after every recursive
//! return, so siblings always start from the same state.
//!
//! # Example
//!
//! ```
//! use backtrack_trace::engine::BacktrackingEngine;
//! use backtrack_trace::problems::Combinations;
//!
//! let problem = Combinations::new(4, 2).unwrap();
//! let report = BacktrackingEngine::default().run_default(&problem, &mut problem.initial_state());
//!
//! assert!(report.success());
//! assert_eq!(report.solutions.len(), 6);
//! assert_eq!(report.solutions[0], vec![1, 2]);
//! ```

pub mod observer;
pub mod problem;
pub mod report;

pub use observer::{PacedObserver, SearchObserver};
pub use problem::Problem;
pub use report::{SearchReport, SearchStatus};

use std::mem::size_of;
use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::error::{CallbackError, SearchError};
use crate::statistics::{estimate_memory, Counters, PerformanceMetrics, Statistics};
use crate::termination::{Indefinite, TerminationCondition};
use crate::trace::{
    ConstraintInfo, DecisionTree, ExecutionStep, NodeId, PerformanceSnapshot, StepKind, TreeNode,
};

/// Drives searches with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingEngine {
    config: SearchConfig,
}

impl BacktrackingEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `problem` from `state` without hooks or termination condition.
    pub fn run_default<P: Problem>(&self, problem: &P, state: &mut P::State) -> SearchReport<P::Choice> {
        self.run(problem, state, &mut (), &mut Indefinite)
    }

    /// Run a full search.
    ///
    /// `state` is mutated through the problem's callbacks. After an exhausted,
    /// stopped or cancelled run it is back to its initial value, provided
    /// `unmake_choice` undoes `make_choice`. After a failed run it is left as
    /// it was when the callback failed.
    pub fn run<P, O, T>(
        &self,
        problem: &P,
        state: &mut P::State,
        observer: &mut O,
        termination: &mut T,
    ) -> SearchReport<P::Choice>
    where
        P: Problem,
        O: SearchObserver<P::Choice>,
        T: TerminationCondition,
    {
        debug!("starting search for {}", problem.name());

        let mut search = Search {
            problem,
            config: self.config,
            observer,
            termination,
            started: Instant::now(),
            stats: Statistics::new(),
            steps: Vec::new(),
            tree: DecisionTree::new(),
            solutions: Vec::new(),
            path: Vec::new(),
            next_step_id: 0,
            max_depth: 0,
            path_items: 0,
        };

        let status = match search.explore(state, NodeId::ROOT, 0) {
            Ok(Flow::Continue) => SearchStatus::Exhausted,
            Ok(Flow::Stop(Stop::SolutionLimit)) => {
                info!("{}: solution limit reached", problem.name());
                SearchStatus::StoppedEarly
            }
            Ok(Flow::Stop(Stop::Terminated)) => {
                info!("{}: search cancelled", problem.name());
                SearchStatus::Cancelled
            }
            Err(error) => {
                warn!("{}", error);
                SearchStatus::Failed(error)
            }
        };
        search.tree.node_mut(NodeId::ROOT).is_active = false;
        search.finish(status)
    }
}

/// Whether the walk goes on after a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop(Stop),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    SolutionLimit,
    Terminated,
}

/// State of one run in flight.
struct Search<'a, P: Problem, O, T> {
    problem: &'a P,
    config: SearchConfig,
    observer: &'a mut O,
    termination: &'a mut T,
    started: Instant,
    stats: Statistics,
    steps: Vec<ExecutionStep<P::Choice>>,
    tree: DecisionTree<P::Choice>,
    solutions: Vec<Vec<P::Choice>>,
    /// Choices from the root to the node being explored.
    path: Vec<P::Choice>,
    next_step_id: u64,
    max_depth: usize,
    /// Choices copied into steps and tree nodes so far.
    path_items: usize,
}

impl<'a, P, O, T> Search<'a, P, O, T>
where
    P: Problem,
    O: SearchObserver<P::Choice>,
    T: TerminationCondition,
{
    fn explore(&mut self, state: &mut P::State, node: NodeId, depth: usize) -> Result<Flow, SearchError> {
        if self.termination.should_stop() {
            return Ok(Flow::Stop(Stop::Terminated));
        }
        self.termination.call_has_been_made();
        self.stats.increment_counter(Counters::Calls);
        self.max_depth = self.max_depth.max(depth);

        if self.observer.should_pause() {
            self.observer.on_pause(depth);
        }

        let entry = match self.tree.node(node).choice() {
            Some(choice) => format!("enter {}", self.problem.describe_choice(choice)),
            None => format!("start {}", self.problem.name()),
        };
        self.record(StepKind::Choice, depth, node, &[], None, entry, Vec::new());

        if self.problem.is_complete(state).map_err(|e| self.fail(e))? {
            return Ok(self.accept_solution(depth, node));
        }

        if self.config.depth_limit().is_some_and(|limit| depth >= limit) {
            self.tree.node_mut(node).is_dead_end = true;
            self.stats.increment_counter(Counters::Prunings);
            let reason = format!("depth limit {} reached", depth);
            self.record(StepKind::Pruning, depth, node, &[], None, reason, Vec::new());
            return Ok(Flow::Continue);
        }

        let choices = self.problem.choices(state).map_err(|e| self.fail(e))?;
        if choices.is_empty() {
            self.tree.node_mut(node).is_dead_end = true;
            self.stats.increment_counter(Counters::Prunings);
            let reason = "dead end: no choices left".to_owned();
            self.record(StepKind::Pruning, depth, node, &[], None, reason, Vec::new());
            return Ok(Flow::Continue);
        }

        for (index, choice) in choices.iter().enumerate() {
            let constraints = self
                .problem
                .constraints(state, choice)
                .map_err(|e| self.fail(e))?;
            if constraints.iter().any(ConstraintInfo::is_violated) {
                self.reject_violated(depth, node, &choices, choice, constraints);
                continue;
            }

            if !self.problem.is_valid(state, choice).map_err(|e| self.fail(e))? {
                self.stats.increment_counter(Counters::ConstraintRejections);
                let reason = format!("invalid choice {}", self.problem.describe_choice(choice));
                self.record(StepKind::ConstraintCheck, depth, node, &choices, Some(choice), reason, Vec::new());
                continue;
            }

            self.path.push(choice.clone());
            let child = self
                .tree
                .add_child(node, choice, &self.path, choices.len() - index);
            self.path_items += self.path.len();
            self.problem
                .make_choice(state, choice)
                .map_err(|e| self.fail(e))?;
            let reason = format!("choose {}", self.problem.describe_choice(choice));
            self.record(StepKind::Choice, depth + 1, child, &choices, Some(choice), reason, Vec::new());

            let flow = self.explore(state, child, depth + 1)?;

            self.problem
                .unmake_choice(state, choice)
                .map_err(|e| self.fail(e))?;
            self.path.pop();
            self.tree.node_mut(child).is_active = false;
            if let Flow::Stop(stop) = flow {
                return Ok(Flow::Stop(stop));
            }

            self.backtrack(depth, node, child, &choices, choice);
        }

        Ok(Flow::Continue)
    }

    fn accept_solution(&mut self, depth: usize, node: NodeId) -> Flow {
        let solution = self.path.clone();
        self.tree.node_mut(node).is_solution = true;
        self.stats.increment_counter(Counters::Solutions);
        let reason = format!("solution #{} found", self.solutions.len() + 1);
        self.record(StepKind::Solution, depth, node, &[], None, reason, Vec::new());
        self.observer.on_solution(&solution);
        self.path_items += solution.len();
        self.solutions.push(solution);

        match self.config.solution_limit() {
            Some(limit) if self.solutions.len() >= limit => Flow::Stop(Stop::SolutionLimit),
            _ => Flow::Continue,
        }
    }

    fn reject_violated(
        &mut self,
        depth: usize,
        node: NodeId,
        choices: &[P::Choice],
        choice: &P::Choice,
        constraints: Vec<ConstraintInfo>,
    ) {
        self.stats.increment_counter(Counters::ConstraintRejections);
        let violated: Vec<&str> = constraints
            .iter()
            .filter(|c| c.is_violated())
            .map(ConstraintInfo::description)
            .collect();
        let reason = format!(
            "reject {}: {}",
            self.problem.describe_choice(choice),
            violated.join("; ")
        );
        for violation in constraints.iter().filter(|c| c.is_violated()) {
            self.observer.on_constraint_violation(violation);
        }
        self.record(StepKind::ConstraintCheck, depth, node, choices, Some(choice), reason, constraints);
    }

    fn backtrack(&mut self, depth: usize, parent: NodeId, child: NodeId, choices: &[P::Choice], choice: &P::Choice) {
        let child_node = self.tree.node_mut(child);
        child_node.is_backtracked = true;
        if !child_node.is_solution && !child_node.is_dead_end {
            self.stats.increment_counter(Counters::Backtracks);
        }
        let reason = format!("backtrack from {}", self.problem.describe_choice(choice));
        self.record(StepKind::Backtrack, depth, child, choices, Some(choice), reason, Vec::new());
        self.observer
            .on_backtrack(self.tree.node(child), self.tree.node(parent));
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        kind: StepKind,
        depth: usize,
        node: NodeId,
        available: &[P::Choice],
        choice: Option<&P::Choice>,
        reasoning: String,
        constraints: Vec<ConstraintInfo>,
    ) {
        self.stats.increment_counter(Counters::Steps);
        let snapshot = PerformanceSnapshot {
            elapsed: self.started.elapsed(),
            calls: self.stats.get(Counters::Calls),
            depth,
            memory_estimate: self.memory_estimate(),
        };
        let step = ExecutionStep::new(
            self.next_step_id,
            kind,
            depth,
            node,
            &self.path,
            available,
            choice,
            reasoning,
            constraints,
            snapshot,
        );
        self.next_step_id += 1;
        trace!("step {} [{}] depth {}: {}", step.id(), kind, depth, step.reasoning());
        self.observer.on_step(&step);
        if self.config.is_recording_steps() {
            self.path_items += self.path.len() + available.len();
            self.steps.push(step);
        }
    }

    fn memory_estimate(&self) -> usize {
        estimate_memory(
            self.steps.len(),
            size_of::<ExecutionStep<P::Choice>>(),
            self.tree.len(),
            size_of::<TreeNode<P::Choice>>(),
            self.path_items,
            size_of::<P::Choice>(),
        )
    }

    fn fail(&self, error: CallbackError) -> SearchError {
        SearchError::callback(self.problem.name(), error)
    }

    fn finish(self, status: SearchStatus) -> SearchReport<P::Choice> {
        let metrics = PerformanceMetrics::from_statistics(
            &self.stats,
            self.started.elapsed(),
            self.max_depth,
            self.memory_estimate(),
        );
        debug!(
            "{} finished: {} solutions, {} steps, {} backtracks, {} prunings in {:?}",
            self.problem.name(),
            metrics.solution_count,
            metrics.total_steps,
            metrics.backtrack_count,
            metrics.pruning_count,
            metrics.elapsed
        );
        SearchReport {
            solutions: self.solutions,
            steps: self.steps,
            tree: self.tree,
            metrics,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallbackResult;
    use crate::termination::{CancellationToken, StepBudget};
    use crate::trace::Severity;

    /// Strings over an alphabet, up to a fixed length.
    #[derive(Debug)]
    struct Words {
        alphabet: Vec<char>,
        length: usize,
    }

    impl Problem for Words {
        type State = String;
        type Choice = char;

        fn is_complete(&self, state: &String) -> CallbackResult<bool> {
            Ok(state.len() == self.length)
        }

        fn choices(&self, _state: &String) -> CallbackResult<Vec<char>> {
            Ok(self.alphabet.clone())
        }

        fn is_valid(&self, _state: &String, _choice: &char) -> CallbackResult<bool> {
            Ok(true)
        }

        fn make_choice(&self, state: &mut String, choice: &char) -> CallbackResult<()> {
            state.push(*choice);
            Ok(())
        }

        fn unmake_choice(&self, state: &mut String, _choice: &char) -> CallbackResult<()> {
            state.pop();
            Ok(())
        }

        fn name(&self) -> &str {
            "Words"
        }
    }

    /// Rejects every choice through a violated constraint.
    #[derive(Debug)]
    struct Blocked;

    impl Problem for Blocked {
        type State = ();
        type Choice = u8;

        fn is_complete(&self, _state: &()) -> CallbackResult<bool> {
            Ok(false)
        }

        fn choices(&self, _state: &()) -> CallbackResult<Vec<u8>> {
            Ok(vec![1, 2])
        }

        fn is_valid(&self, _state: &(), _choice: &u8) -> CallbackResult<bool> {
            Ok(true)
        }

        fn make_choice(&self, _state: &mut (), _choice: &u8) -> CallbackResult<()> {
            Err("make_choice must not be called".into())
        }

        fn unmake_choice(&self, _state: &mut (), _choice: &u8) -> CallbackResult<()> {
            Ok(())
        }

        fn constraints(&self, _state: &(), choice: &u8) -> CallbackResult<Vec<ConstraintInfo>> {
            Ok(vec![
                ConstraintInfo::satisfied("range", "in range"),
                ConstraintInfo::violated("blocked", format!("{} is blocked", choice), Severity::Medium),
            ])
        }
    }

    fn words(length: usize) -> Words {
        Words {
            alphabet: vec!['a', 'b'],
            length,
        }
    }

    #[test]
    fn test_enumerates_in_choice_order() {
        let mut state = String::new();
        let report = BacktrackingEngine::default().run_default(&words(2), &mut state);

        assert_eq!(report.status, SearchStatus::Exhausted);
        assert_eq!(
            report.solutions,
            vec![vec!['a', 'a'], vec!['a', 'b'], vec!['b', 'a'], vec!['b', 'b']]
        );
        assert_eq!(state, "");
        assert_eq!(report.metrics.solution_count, 4);
        assert_eq!(report.metrics.max_depth, 2);
        // Root, two at depth 1, four at depth 2.
        assert_eq!(report.tree.len(), 7);
        assert_eq!(report.metrics.backtrack_count, 2);
    }

    #[test]
    fn test_complete_root_is_single_solution() {
        let report = BacktrackingEngine::default().run_default(&words(0), &mut String::new());
        assert_eq!(report.solutions, vec![Vec::<char>::new()]);
        assert!(report.tree.root().is_solution());
        let kinds: Vec<StepKind> = report.steps.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![StepKind::Choice, StepKind::Solution]);
    }

    #[test]
    fn test_violated_constraints_skip_choice() {
        #[derive(Default)]
        struct Violations(Vec<String>);

        impl SearchObserver<u8> for Violations {
            fn on_constraint_violation(&mut self, violation: &ConstraintInfo) {
                self.0.push(violation.description().to_owned());
            }
        }

        let mut observer = Violations::default();
        let report =
            BacktrackingEngine::default().run(&Blocked, &mut (), &mut observer, &mut Indefinite);

        assert!(report.success());
        assert!(report.solutions.is_empty());
        assert_eq!(report.metrics.constraint_rejections, 2);
        assert_eq!(report.tree.len(), 1);
        assert_eq!(observer.0, vec!["1 is blocked", "2 is blocked"]);

        let check = report.steps_of(StepKind::ConstraintCheck).next().unwrap();
        assert_eq!(check.constraints().len(), 2);
        assert_eq!(check.choice(), Some(&1));
        assert_eq!(check.reasoning(), "reject 1: 1 is blocked");
    }

    #[test]
    fn test_first_solution_only() {
        let engine = BacktrackingEngine::new(SearchConfig::new().stop_after_first(true));
        let mut state = String::new();
        let report = engine.run_default(&words(3), &mut state);

        assert_eq!(report.status, SearchStatus::StoppedEarly);
        assert_eq!(report.solutions, vec![vec!['a', 'a', 'a']]);
        assert_eq!(state, "");
        assert!(report.tree.iter().all(|node| !node.is_active()));
    }

    #[test]
    fn test_step_budget_cancels() {
        let mut budget = StepBudget::new(3);
        let report =
            BacktrackingEngine::default().run(&words(4), &mut String::new(), &mut (), &mut budget);

        assert!(report.is_cancelled());
        assert!(report.success());
        assert_eq!(report.metrics.recursive_calls, 3);
        assert!(report.solutions.is_empty());
        assert!(!report.steps.is_empty());
    }

    #[test]
    fn test_cancelled_token_records_nothing_but_root_tree() {
        let mut token = CancellationToken::new();
        token.cancel();
        let report =
            BacktrackingEngine::default().run(&words(2), &mut String::new(), &mut (), &mut token);

        assert_eq!(report.status, SearchStatus::Cancelled);
        assert!(report.steps.is_empty());
        assert_eq!(report.tree.len(), 1);
    }

    #[test]
    fn test_depth_limit_prunes() {
        let engine = BacktrackingEngine::new(SearchConfig::new().max_depth(1));
        let report = engine.run_default(&words(3), &mut String::new());

        assert!(report.solutions.is_empty());
        assert_eq!(report.metrics.pruning_count, 2);
        assert_eq!(report.metrics.backtrack_count, 0);
        assert!(report.tree.iter().skip(1).all(|node| node.is_dead_end()));
    }

    #[test]
    fn test_without_step_log() {
        let engine = BacktrackingEngine::new(SearchConfig::new().record_steps(false));
        let report = engine.run_default(&words(2), &mut String::new());

        assert!(report.steps.is_empty());
        assert_eq!(report.solutions.len(), 4);
        assert!(report.metrics.total_steps > 0);
    }
}
